//! Best-effort delivery of serialized telemetry batches to a local collector
//! over UDP.
//!
//! - [`transport`]: framing and the UDP socket lifecycle.
//! - [`exporter`]: an OpenTelemetry [`SpanExporter`](opentelemetry_sdk::export::trace::SpanExporter)
//!   on top of the transport.
//! - [`config`] and [`telemetry`]: environment configuration and logging for
//!   the `otlp-udp-send` binary.

pub mod config;
pub mod exporter;
pub mod telemetry;
pub mod transport;

pub use exporter::{OtlpUdpSpanExporter, SpanBatchSerializer, UdpExportError};
pub use transport::{TransportState, UdpTransport};
