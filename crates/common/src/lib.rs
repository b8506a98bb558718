//! Common types, wire protocol, and errors shared across the OTLP UDP crates.

pub mod endpoint;
pub mod error;
pub mod protocol;

pub use endpoint::UdpEndpoint;
pub use error::{ProtocolError, TransportError};
pub use protocol::UdpEnvelope;
