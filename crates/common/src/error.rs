//! Common error types shared across crates.

use thiserror::Error;

/// Errors raised by the UDP transport.
///
/// [`TransportError::InvalidEndpoint`] and [`TransportError::Unresolvable`]
/// are configuration errors; they are returned at construction time so a bad
/// destination is loud. The other
/// variants are per-send failures the exporter logs and drops.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint string is not a valid `host:port` pair.
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint {
        /// The rejected endpoint string, verbatim.
        endpoint: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The endpoint host did not resolve to any address.
    #[error("cannot resolve endpoint {endpoint:?}: {source}")]
    Unresolvable {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The local UDP socket could not be created.
    #[error("failed to bind UDP socket: {0}")]
    Bind(#[source] std::io::Error),

    /// The datagram could not be handed to the OS.
    #[error("failed to send UDP datagram: {0}")]
    Send(#[source] std::io::Error),

    /// The transport has been shut down.
    #[error("transport is closed")]
    Closed,
}

impl TransportError {
    /// Returns `true` for errors caused by bad configuration rather than I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            TransportError::InvalidEndpoint { .. } | TransportError::Unresolvable { .. }
        )
    }
}

/// Errors decoding a received datagram back into a [`crate::UdpEnvelope`].
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The datagram does not start with the protocol header.
    #[error("datagram does not start with the protocol header")]
    MissingHeader,

    /// The datagram ends before the signal prefix is complete.
    #[error("datagram truncated: expected a {expected}-byte signal prefix")]
    Truncated {
        /// Expected prefix length in bytes.
        expected: usize,
    },

    /// The signal prefix is not valid UTF-8.
    #[error("signal prefix is not valid UTF-8")]
    InvalidPrefix,

    /// The payload is not valid standard base64.
    #[error("payload is not valid base64: {0}")]
    Payload(#[from] base64::DecodeError),
}
