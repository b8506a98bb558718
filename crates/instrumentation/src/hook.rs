//! Boundary used by an AWS SDK interceptor to enrich its client span.
//!
//! The interceptor builds an [`AwsSdkCall`] from what it observed around the
//! SDK call and hands it a span. Everything here is synchronous and runs
//! inline on the calling task.

use crate::attributes::{ExtractedAttributes, SpanWrite};
use crate::aws::{
    normalize_service_name, operation_name, AwsService, FieldSource, NoFields,
    ServiceAttributeResolver,
};
use crate::genai::GenAiInvocation;

const INVOKE_MODEL: &str = "InvokeModel";
const MODEL_ID: &str = "ModelId";

/// One intercepted SDK call.
pub struct AwsSdkCall<'a> {
    service_id: &'a str,
    operation: &'a str,
    request: &'a dyn FieldSource,
    response: &'a dyn FieldSource,
    request_body: Option<&'a [u8]>,
    response_body: Option<&'a [u8]>,
}

impl<'a> AwsSdkCall<'a> {
    /// Start describing a call. `service_id` is the SDK service id (an
    /// `Amazon` prefix is fine) and `operation` the operation or request
    /// type name.
    pub fn new(service_id: &'a str, operation: &'a str) -> Self {
        Self {
            service_id,
            operation,
            request: &NoFields,
            response: &NoFields,
            request_body: None,
            response_body: None,
        }
    }

    pub fn request(mut self, fields: &'a dyn FieldSource) -> Self {
        self.request = fields;
        self
    }

    pub fn response(mut self, fields: &'a dyn FieldSource) -> Self {
        self.response = fields;
        self
    }

    /// Raw `InvokeModel` request body.
    pub fn request_body(mut self, body: &'a [u8]) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Raw `InvokeModel` response body.
    pub fn response_body(mut self, body: &'a [u8]) -> Self {
        self.response_body = Some(body);
        self
    }

    /// All attributes for this call: resource attributes, then GenAI
    /// attributes for Bedrock Runtime `InvokeModel` bodies.
    pub fn attributes(&self) -> ExtractedAttributes {
        let mut attrs = ServiceAttributeResolver::new().resolve(
            self.service_id,
            self.operation,
            self.request,
            self.response,
        );

        if self.is_invoke_model() {
            if let Some(model_id) = self.request.field(MODEL_ID) {
                if let Some(body) = self.request_body {
                    attrs.extend(GenAiInvocation::request(model_id, body).extract());
                }
                if let Some(body) = self.response_body {
                    attrs.extend(GenAiInvocation::response(model_id, body).extract());
                }
            }
        }
        attrs
    }

    /// Write [`AwsSdkCall::attributes`] to `span`.
    pub fn enrich<S: SpanWrite + ?Sized>(&self, span: &mut S) {
        self.attributes().apply_to(span);
    }

    fn is_invoke_model(&self) -> bool {
        AwsService::from_service_id(normalize_service_name(self.service_id))
            == Some(AwsService::BedrockRuntime)
            && operation_name(self.operation) == INVOKE_MODEL
    }
}
