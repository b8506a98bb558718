//! Configuration loading and validation for the OTLP UDP sender.

use anyhow::{Context, Result};
use common::protocol::SAMPLED_TRACES_PREFIX;
use common::UdpEndpoint;
use serde::Deserialize;

/// Validated sender configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Collector address as `host:port`.
    #[serde(default = "default_otlp_udp_endpoint")]
    pub otlp_udp_endpoint: String,

    /// Signal-type prefix written before the payload (`T1S` sampled, `T1U` unsampled).
    #[serde(default = "default_otlp_udp_signal_prefix")]
    pub otlp_udp_signal_prefix: String,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_otlp_udp_endpoint() -> String {
    common::endpoint::DEFAULT_ENDPOINT.into()
}
fn default_otlp_udp_signal_prefix() -> String {
    SAMPLED_TRACES_PREFIX.into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build otlp-udp-send configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise otlp-udp-send configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The parsed collector endpoint.
    pub fn endpoint(&self) -> Result<UdpEndpoint> {
        UdpEndpoint::parse(&self.otlp_udp_endpoint).context("OTLP_UDP_ENDPOINT is invalid")
    }

    fn validate(&self) -> Result<()> {
        self.endpoint()?;
        let prefix = &self.otlp_udp_signal_prefix;
        if prefix.is_empty() {
            anyhow::bail!("OTLP_UDP_SIGNAL_PREFIX must not be empty");
        }
        if !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
            anyhow::bail!("OTLP_UDP_SIGNAL_PREFIX must be ASCII alphanumeric, got {prefix:?}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str, prefix: &str) -> Config {
        Config {
            otlp_udp_endpoint: endpoint.into(),
            otlp_udp_signal_prefix: prefix.into(),
            log_level: "info".into(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_otlp_udp_endpoint(), "127.0.0.1:2000");
        assert_eq!(default_otlp_udp_signal_prefix(), "T1S");
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(config("127.0.0.1:2000", "T1S").validate().is_ok());
        assert!(config("xray-daemon:2000", "T1U").validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_endpoint() {
        assert!(config("not-an-endpoint", "T1S").validate().is_err());
        assert!(config("127.0.0.1:", "T1S").validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_or_non_ascii_prefix() {
        assert!(config("127.0.0.1:2000", "").validate().is_err());
        assert!(config("127.0.0.1:2000", "T1\n").validate().is_err());
    }

    #[test]
    fn endpoint_is_parsed() {
        let endpoint = config("localhost:4000", "T1S").endpoint().unwrap();
        assert_eq!(endpoint.host(), "localhost");
        assert_eq!(endpoint.port(), 4000);
    }
}
