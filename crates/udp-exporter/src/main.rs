//! `otlp-udp-send`: ships one pre-serialized telemetry batch to the local
//! collector.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Read the batch from stdin and send it as a single datagram.

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::info;
use udp_exporter::config::Config;
use udp_exporter::{telemetry, UdpTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        eprintln!("ERROR: otlp-udp-send configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Send
    // -----------------------------------------------------------------------
    let mut batch = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut batch)
        .await
        .context("failed to read batch from stdin")?;

    let transport = UdpTransport::new(&cfg.otlp_udp_endpoint)
        .context("failed to create UDP transport")?;
    let sent = transport.send(&batch, &cfg.otlp_udp_signal_prefix);
    transport.shutdown();

    let sent = sent.context("failed to send batch")?;
    info!(
        endpoint = %cfg.otlp_udp_endpoint,
        signal_prefix = %cfg.otlp_udp_signal_prefix,
        payload_bytes = batch.len(),
        datagram_bytes = sent,
        "batch sent"
    );
    Ok(())
}
