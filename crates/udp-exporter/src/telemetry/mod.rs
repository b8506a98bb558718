//! Logging initialisation for the OTLP UDP sender.
//!
//! Structured JSON logs on stderr only. The sender is itself part of the
//! telemetry pipeline, so it does not export its own traces.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Crates whose logs follow `LOG_LEVEL`; everything else is held at `warn`.
const OWN_TARGETS: &[&str] = &["udp_exporter", "otlp_udp_send", "common"];

/// Filter directives used when `RUST_LOG` is not set.
///
/// Only this workspace's targets log at `log_level`. The OpenTelemetry SDK and
/// other dependencies stay at `warn` so a `debug` run shows datagrams, not
/// exporter internals.
pub fn default_directives(log_level: &str) -> String {
    let level = log_level.trim();
    std::iter::once("warn".to_owned())
        .chain(OWN_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialise the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
///
/// # Errors
///
/// Returns an error if `log_level` is not a valid level or the subscriber has
/// already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(log_level))
            .map_err(|e| anyhow::anyhow!("invalid LOG_LEVEL {log_level:?}: {e}"))?,
    };

    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise otlp-udp-send tracing subscriber: {e}"))
}
