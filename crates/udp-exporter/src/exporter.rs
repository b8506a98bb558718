//! OpenTelemetry span exporter that ships batches over [`UdpTransport`].
//!
//! Span encoding is not done here: a [`SpanBatchSerializer`] turns each batch
//! into bytes (typically an OTLP `ExportTraceServiceRequest`), and the
//! exporter frames and sends them with its signal prefix.

use std::fmt;

use common::protocol::{SAMPLED_TRACES_PREFIX, UNSAMPLED_TRACES_PREFIX};
use common::TransportError;
use futures_util::future::BoxFuture;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::Resource;
use thiserror::Error;
use tracing::{debug, error};

use crate::transport::UdpTransport;

/// Error returned by a [`SpanBatchSerializer`].
pub type SerializeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Encodes a batch of finished spans for the wire.
pub trait SpanBatchSerializer: Send + Sync + fmt::Debug {
    fn serialize(&self, resource: &Resource, batch: &[SpanData]) -> Result<Vec<u8>, SerializeError>;
}

/// Why a batch was not exported.
#[derive(Debug, Error)]
pub enum UdpExportError {
    #[error("failed to serialize span batch: {0}")]
    Serialize(#[source] SerializeError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl opentelemetry::ExportError for UdpExportError {
    fn exporter_name(&self) -> &'static str {
        "otlp-udp"
    }
}

/// Span exporter for a local collector listening on UDP.
#[derive(Debug)]
pub struct OtlpUdpSpanExporter {
    transport: UdpTransport,
    signal_prefix: String,
    serializer: Box<dyn SpanBatchSerializer>,
    resource: Resource,
}

impl OtlpUdpSpanExporter {
    /// Exporter for sampled spans (`T1S`). `resource` describes the process
    /// and is handed to the serializer with every batch.
    pub fn new(
        endpoint: &str,
        resource: Resource,
        serializer: impl SpanBatchSerializer + 'static,
    ) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            UdpTransport::new(endpoint)?,
            SAMPLED_TRACES_PREFIX,
            resource,
            serializer,
        ))
    }

    /// Exporter for spans that were not sampled (`T1U`).
    pub fn unsampled(
        endpoint: &str,
        resource: Resource,
        serializer: impl SpanBatchSerializer + 'static,
    ) -> Result<Self, TransportError> {
        Ok(Self::with_transport(
            UdpTransport::new(endpoint)?,
            UNSAMPLED_TRACES_PREFIX,
            resource,
            serializer,
        ))
    }

    pub fn with_transport(
        transport: UdpTransport,
        signal_prefix: impl Into<String>,
        resource: Resource,
        serializer: impl SpanBatchSerializer + 'static,
    ) -> Self {
        Self {
            transport,
            signal_prefix: signal_prefix.into(),
            serializer: Box::new(serializer),
            resource,
        }
    }

    pub fn signal_prefix(&self) -> &str {
        &self.signal_prefix
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    fn export_batch(&self, batch: &[SpanData]) -> Result<(), UdpExportError> {
        let bytes = self
            .serializer
            .serialize(&self.resource, batch)
            .map_err(UdpExportError::Serialize)?;
        self.transport.send(&bytes, &self.signal_prefix)?;
        debug!(spans = batch.len(), bytes = bytes.len(), "exported span batch");
        Ok(())
    }
}

impl SpanExporter for OtlpUdpSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result: ExportResult = self.export_batch(&batch).map_err(|e| {
            error!(spans = batch.len(), error = %e, "error exporting spans");
            e.into()
        });
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.transport.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::protocol::SIGNAL_PREFIX_LEN;
    use common::UdpEnvelope;
    use opentelemetry::{Key, KeyValue};
    use std::net::UdpSocket;
    use std::time::Duration;

    /// Writes the span count followed by the resource size.
    #[derive(Debug)]
    struct CountingSerializer;

    impl SpanBatchSerializer for CountingSerializer {
        fn serialize(&self, resource: &Resource, batch: &[SpanData]) -> Result<Vec<u8>, SerializeError> {
            Ok(vec![batch.len() as u8, resource.len() as u8])
        }
    }

    /// Writes the resource's `service.name`.
    #[derive(Debug)]
    struct ServiceNameSerializer;

    impl SpanBatchSerializer for ServiceNameSerializer {
        fn serialize(&self, resource: &Resource, _: &[SpanData]) -> Result<Vec<u8>, SerializeError> {
            let name = resource
                .get(Key::new("service.name"))
                .ok_or("resource has no service.name")?;
            Ok(name.as_str().as_bytes().to_vec())
        }
    }

    #[derive(Debug)]
    struct FailingSerializer;

    impl SpanBatchSerializer for FailingSerializer {
        fn serialize(&self, _: &Resource, _: &[SpanData]) -> Result<Vec<u8>, SerializeError> {
            Err("encoder unavailable".into())
        }
    }

    fn checkout_resource() -> Resource {
        Resource::new([KeyValue::new("service.name", "checkout")])
    }

    fn listener() -> (UdpSocket, String) {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let addr = socket.local_addr().unwrap().to_string();
        (socket, addr)
    }

    fn receive(socket: &UdpSocket) -> UdpEnvelope {
        let mut buf = vec![0u8; 65_536];
        let (n, _) = socket.recv_from(&mut buf).unwrap();
        UdpEnvelope::decode(&buf[..n], SIGNAL_PREFIX_LEN).unwrap()
    }

    #[tokio::test]
    async fn exports_serialized_batch_with_sampled_prefix() {
        let (rx, addr) = listener();
        let mut exporter =
            OtlpUdpSpanExporter::new(&addr, checkout_resource(), CountingSerializer).unwrap();

        exporter.export(Vec::new()).await.unwrap();

        let envelope = receive(&rx);
        assert_eq!(envelope.signal_prefix, "T1S");
        assert_eq!(envelope.payload, vec![0, 1]);
    }

    #[tokio::test]
    async fn process_resource_reaches_the_serializer() {
        let (rx, addr) = listener();
        let mut exporter =
            OtlpUdpSpanExporter::new(&addr, checkout_resource(), ServiceNameSerializer).unwrap();
        assert_eq!(exporter.resource().len(), 1);

        exporter.export(Vec::new()).await.unwrap();

        assert_eq!(receive(&rx).payload, b"checkout".to_vec());
    }

    #[tokio::test]
    async fn empty_resource_is_passed_through() {
        let (_rx, addr) = listener();
        let mut exporter =
            OtlpUdpSpanExporter::new(&addr, Resource::empty(), ServiceNameSerializer).unwrap();
        assert!(exporter.export(Vec::new()).await.is_err());
    }

    #[tokio::test]
    async fn unsampled_exporter_uses_unsampled_prefix() {
        let (rx, addr) = listener();
        let mut exporter =
            OtlpUdpSpanExporter::unsampled(&addr, Resource::empty(), CountingSerializer).unwrap();
        assert_eq!(exporter.signal_prefix(), "T1U");

        exporter.export(Vec::new()).await.unwrap();

        assert_eq!(receive(&rx).signal_prefix, "T1U");
    }

    #[tokio::test]
    async fn serializer_failure_fails_the_batch() {
        let (_rx, addr) = listener();
        let mut exporter =
            OtlpUdpSpanExporter::new(&addr, Resource::empty(), FailingSerializer).unwrap();
        assert!(exporter.export(Vec::new()).await.is_err());
    }

    #[tokio::test]
    async fn export_after_shutdown_fails() {
        let (_rx, addr) = listener();
        let mut exporter =
            OtlpUdpSpanExporter::new(&addr, Resource::empty(), CountingSerializer).unwrap();
        exporter.shutdown();
        assert!(exporter.export(Vec::new()).await.is_err());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = OtlpUdpSpanExporter::new("collector", Resource::empty(), CountingSerializer)
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
