//! Datagram transport to the local collector.
//!
//! A [`UdpTransport`] is `Ready` from construction until [`UdpTransport::shutdown`],
//! after which it is `Closed` for good. Sends are fire-and-forget: one
//! `send_to` per batch, no acknowledgement, no retry.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwapOption;
use common::protocol::encode_datagram;
use common::{TransportError, UdpEndpoint};
use tracing::{debug, info, warn};

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(1);

/// Lifecycle state of a [`UdpTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Ready,
    Closed,
}

/// UDP sender bound to an ephemeral local port.
///
/// Shared by reference across threads. The socket lives in an
/// [`ArcSwapOption`]: a send holds its own `Arc` for the duration of the
/// syscall, so a concurrent shutdown never pulls the socket out from under it.
#[derive(Debug)]
pub struct UdpTransport {
    endpoint: UdpEndpoint,
    destination: SocketAddr,
    socket: ArcSwapOption<UdpSocket>,
}

impl UdpTransport {
    /// Parse and resolve `endpoint`, then bind a local socket of the same
    /// address family.
    ///
    /// # Errors
    ///
    /// [`TransportError::InvalidEndpoint`] for a malformed endpoint,
    /// [`TransportError::Unresolvable`] if the host has no address, or
    /// [`TransportError::Bind`] if no local socket can be created.
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let endpoint = UdpEndpoint::parse(endpoint)?;
        let destination = endpoint.resolve()?;
        let local = match destination {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        };
        let socket = UdpSocket::bind(local).map_err(TransportError::Bind)?;
        socket
            .set_read_timeout(Some(RECEIVE_TIMEOUT))
            .map_err(TransportError::Bind)?;

        info!(endpoint = %endpoint, %destination, "UDP transport ready");
        Ok(Self {
            endpoint,
            destination,
            socket: ArcSwapOption::from_pointee(socket),
        })
    }

    /// Transport to the default collector address `127.0.0.1:2000`.
    pub fn with_defaults() -> Result<Self, TransportError> {
        Self::new(common::endpoint::DEFAULT_ENDPOINT)
    }

    pub fn endpoint(&self) -> &UdpEndpoint {
        &self.endpoint
    }

    /// Address the endpoint resolved to at construction.
    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn state(&self) -> TransportState {
        if self.socket.load().is_some() {
            TransportState::Ready
        } else {
            TransportState::Closed
        }
    }

    /// Frame `data` with `signal_prefix` and send it as one datagram.
    ///
    /// Returns the number of bytes handed to the OS.
    ///
    /// # Errors
    ///
    /// [`TransportError::Closed`] after shutdown, [`TransportError::Send`] if
    /// the OS rejects the datagram (for example when it exceeds the maximum
    /// UDP payload size).
    pub fn send(&self, data: &[u8], signal_prefix: &str) -> Result<usize, TransportError> {
        let socket: Arc<UdpSocket> = self.socket.load_full().ok_or(TransportError::Closed)?;
        let datagram = encode_datagram(data, signal_prefix);

        match socket.send_to(&datagram, self.destination) {
            Ok(sent) => {
                debug!(
                    endpoint = %self.endpoint,
                    signal_prefix,
                    payload_bytes = data.len(),
                    datagram_bytes = sent,
                    "sent UDP datagram"
                );
                Ok(sent)
            }
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "failed to send UDP datagram");
                Err(TransportError::Send(e))
            }
        }
    }

    /// Close the socket. Later sends fail with [`TransportError::Closed`].
    pub fn shutdown(&self) {
        if self.socket.swap(None).is_some() {
            info!(endpoint = %self.endpoint, "UDP transport closed");
        }
    }
}
