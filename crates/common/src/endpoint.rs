//! Parsing of the collector's `host:port` endpoint string.

use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use crate::error::TransportError;

/// Default collector address used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "127.0.0.1:2000";

/// Destination of UDP datagrams, parsed once from a `host:port` string.
///
/// The host is kept as text and resolved with [`UdpEndpoint::resolve`], so
/// names such as `localhost` or a sidecar hostname are accepted alongside
/// IPv4 literals.
/// IPv6 literals are not supported: the string must contain exactly one `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpEndpoint {
    host: String,
    port: u16,
}

impl UdpEndpoint {
    /// Parse an endpoint string.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidEndpoint`] when the string is not
    /// exactly `host:port` with a non-empty host and a numeric port.
    pub fn parse(endpoint: &str) -> Result<Self, TransportError> {
        let invalid = |reason| TransportError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason,
        };

        let mut parts = endpoint.split(':');
        let (host, port) = match (parts.next(), parts.next(), parts.next()) {
            (Some(host), Some(port), None) => (host, port),
            (_, None, _) => return Err(invalid("expected host:port, found no ':'")),
            _ => return Err(invalid("expected host:port, found more than one ':'")),
        };

        if host.trim().is_empty() {
            return Err(invalid("host must not be empty"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| invalid("port must be a number between 0 and 65535"))?;

        Ok(Self {
            host: host.to_owned(),
            port,
        })
    }

    /// Host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// UDP port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Resolve the host to a single socket address.
    ///
    /// IPv4 addresses are preferred over IPv6 so that `localhost` lands on
    /// `127.0.0.1` on dual-stack hosts; an IPv6 address is used only when the
    /// host has no IPv4 address.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unresolvable`] if the lookup fails or yields
    /// no addresses.
    pub fn resolve(&self) -> Result<SocketAddr, TransportError> {
        let unresolvable = |source| TransportError::Unresolvable {
            endpoint: self.to_string(),
            source,
        };
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(unresolvable)?
            .collect();

        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| {
                unresolvable(io::Error::new(
                    io::ErrorKind::NotFound,
                    "host resolved to no addresses",
                ))
            })
    }
}

impl Default for UdpEndpoint {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 2000,
        }
    }
}

impl FromStr for UdpEndpoint {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UdpEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let ep = UdpEndpoint::parse("127.0.0.1:9999").unwrap();
        assert_eq!(ep.host(), "127.0.0.1");
        assert_eq!(ep.port(), 9999);
    }

    #[test]
    fn resolves_ipv4_literal() {
        let addr = UdpEndpoint::parse("127.0.0.1:9999").unwrap().resolve().unwrap();
        assert_eq!(addr, "127.0.0.1:9999".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn localhost_resolves_to_ipv4_loopback() {
        let addr = UdpEndpoint::parse("localhost:2000").unwrap().resolve().unwrap();
        assert!(addr.is_ipv4());
        assert!(addr.ip().is_loopback());
        assert_eq!(addr.port(), 2000);
    }

    #[test]
    fn accepts_hostnames() {
        let ep: UdpEndpoint = "cloudwatch-agent.local:2000".parse().unwrap();
        assert_eq!(ep.host(), "cloudwatch-agent.local");
        assert_eq!(ep.to_string(), "cloudwatch-agent.local:2000");
    }

    #[test]
    fn default_matches_default_endpoint_string() {
        assert_eq!(UdpEndpoint::default(), UdpEndpoint::parse(DEFAULT_ENDPOINT).unwrap());
    }

    #[test]
    fn rejects_missing_colon() {
        let err = UdpEndpoint::parse("not-an-endpoint").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("not-an-endpoint"));
    }

    #[test]
    fn rejects_non_numeric_port() {
        assert!(UdpEndpoint::parse("localhost:abc").is_err());
        assert!(UdpEndpoint::parse("localhost:").is_err());
        assert!(UdpEndpoint::parse("localhost:70000").is_err());
    }

    #[test]
    fn rejects_extra_colons_and_empty_host() {
        assert!(UdpEndpoint::parse("::1:2000").is_err());
        assert!(UdpEndpoint::parse("a:1:2").is_err());
        assert!(UdpEndpoint::parse(":2000").is_err());
    }
}
