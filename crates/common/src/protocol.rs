//! Wire format of the datagrams sent to the local collector.
//!
//! Each datagram is the ASCII concatenation of:
//!
//! ```text
//! {"format":"json","version":1}\n   protocol header
//! T1S                                 signal prefix
//! <standard base64 of the batch>     payload
//! ```
//!
//! There is no length prefix, checksum, or fragmentation. Datagrams larger
//! than the path MTU may be dropped by the network.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ProtocolError;

/// Fixed header announcing the envelope format.
pub const PROTOCOL_HEADER: &str = "{\"format\":\"json\",\"version\":1}\n";

/// Signal prefix for sampled OTLP trace data. Used when none is configured.
pub const SAMPLED_TRACES_PREFIX: &str = "T1S";

/// Signal prefix for unsampled OTLP trace data.
pub const UNSAMPLED_TRACES_PREFIX: &str = "T1U";

/// Length of the built-in signal prefixes.
pub const SIGNAL_PREFIX_LEN: usize = 3;

/// One framed datagram: signal prefix plus the raw batch bytes.
///
/// The payload is kept decoded; base64 is applied by [`UdpEnvelope::encode`]
/// and removed by [`UdpEnvelope::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpEnvelope {
    /// Signal-type prefix, e.g. [`SAMPLED_TRACES_PREFIX`].
    pub signal_prefix: String,
    /// Serialized telemetry batch.
    pub payload: Vec<u8>,
}

impl UdpEnvelope {
    /// Construct an envelope from a prefix and a batch.
    pub fn new(signal_prefix: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            signal_prefix: signal_prefix.into(),
            payload: payload.into(),
        }
    }

    /// Encode into datagram bytes.
    pub fn encode(&self) -> Vec<u8> {
        encode_datagram(&self.payload, &self.signal_prefix)
    }

    /// Decode a datagram whose signal prefix is `prefix_len` bytes long.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] if the header is missing, the datagram is
    /// shorter than the prefix, or the payload is not valid base64.
    pub fn decode(datagram: &[u8], prefix_len: usize) -> Result<Self, ProtocolError> {
        let rest = datagram
            .strip_prefix(PROTOCOL_HEADER.as_bytes())
            .ok_or(ProtocolError::MissingHeader)?;

        if rest.len() < prefix_len {
            return Err(ProtocolError::Truncated {
                expected: prefix_len,
            });
        }
        let (prefix, encoded) = rest.split_at(prefix_len);
        let signal_prefix = std::str::from_utf8(prefix)
            .map_err(|_| ProtocolError::InvalidPrefix)?
            .to_owned();
        let payload = STANDARD.decode(encoded)?;

        Ok(Self {
            signal_prefix,
            payload,
        })
    }
}

/// Build the datagram for `payload` tagged with `signal_prefix`.
pub fn encode_datagram(payload: &[u8], signal_prefix: &str) -> Vec<u8> {
    let encoded = STANDARD.encode(payload);
    let mut out =
        Vec::with_capacity(PROTOCOL_HEADER.len() + signal_prefix.len() + encoded.len());
    out.extend_from_slice(PROTOCOL_HEADER.as_bytes());
    out.extend_from_slice(signal_prefix.as_bytes());
    out.extend_from_slice(encoded.as_bytes());
    out
}
