//! GenAI attributes for Bedrock Runtime model invocations.
//!
//! Bedrock's `InvokeModel` takes and returns an opaque JSON body whose schema
//! depends on the model vendor. The vendor is resolved once from the model id
//! and its extractor reads inference parameters (request) or usage and finish
//! reasons (response) from the body.
//!
//! # Token estimates
//!
//! Command and Mistral bodies do not carry token counts. Their counts are
//! estimated as `ceil(characters / 6)` and must be treated as approximations.
//!
//! # Failure policy
//!
//! Extraction never fails from the caller's point of view. A body that is not
//! a JSON object, or a field with an unexpected type, is logged and produces
//! fewer (possibly zero) attributes.

pub mod extractors;
pub mod vendor;

pub use extractors::estimate_tokens;
pub use vendor::ModelVendor;

use thiserror::Error;
use tracing::warn;

use crate::attributes::ExtractedAttributes;

/// Whether a body is an invocation request or its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Request,
    Response,
}

/// Errors while reading a model invocation body. Logged, never returned.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The body is not valid JSON.
    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The body is valid JSON but not an object.
    #[error("body is not a JSON object")]
    NotAnObject,

    /// A field is present but has the wrong type.
    #[error("field {field} is not a {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

/// One model invocation payload.
#[derive(Debug, Clone, Copy)]
pub struct GenAiInvocation<'a> {
    pub model_id: &'a str,
    pub kind: PayloadKind,
    pub body: &'a [u8],
}

impl<'a> GenAiInvocation<'a> {
    pub fn request(model_id: &'a str, body: &'a [u8]) -> Self {
        Self {
            model_id,
            kind: PayloadKind::Request,
            body,
        }
    }

    pub fn response(model_id: &'a str, body: &'a [u8]) -> Self {
        Self {
            model_id,
            kind: PayloadKind::Response,
            body,
        }
    }

    /// Extract attributes for this invocation.
    pub fn extract(&self) -> ExtractedAttributes {
        let Some(vendor) = ModelVendor::from_model_id(self.model_id) else {
            return ExtractedAttributes::new();
        };
        match parse_body(self.body) {
            Ok(body) => extractors::extract(vendor, self.kind, &body),
            Err(e) => {
                warn!(
                    model_id = self.model_id,
                    kind = ?self.kind,
                    error = %e,
                    "failed to read model invocation body"
                );
                ExtractedAttributes::new()
            }
        }
    }
}

/// Extract GenAI attributes from a raw model invocation body.
pub fn extract_genai_attributes(model_id: &str, body: &[u8], is_request: bool) -> ExtractedAttributes {
    let kind = if is_request {
        PayloadKind::Request
    } else {
        PayloadKind::Response
    };
    GenAiInvocation {
        model_id,
        kind,
        body,
    }
    .extract()
}

fn parse_body(body: &[u8]) -> Result<serde_json::Value, ExtractionError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ExtractionError::NotAnObject);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeValue;
    use crate::semconv;

    #[test]
    fn titan_request_body() {
        let body = br#"{"textGenerationConfig":{"topP":0.9,"temperature":0.5,"maxTokenCount":200}}"#;
        let attrs = extract_genai_attributes("amazon.titan-text-express-v1", body, true);
        assert_eq!(attrs.get(semconv::GEN_AI_REQUEST_TOP_P), Some(&AttributeValue::F64(0.9)));
        assert_eq!(
            attrs.get(semconv::GEN_AI_REQUEST_TEMPERATURE),
            Some(&AttributeValue::F64(0.5))
        );
        assert_eq!(
            attrs.get(semconv::GEN_AI_REQUEST_MAX_TOKENS),
            Some(&AttributeValue::I64(200))
        );
    }

    #[test]
    fn command_response_body() {
        let body = br#"{"finish_reason":"COMPLETE","text":"123456"}"#;
        let attrs = GenAiInvocation::response("cohere.command-r-v1:0", body).extract();
        assert_eq!(
            attrs.get(semconv::GEN_AI_RESPONSE_FINISH_REASONS),
            Some(&AttributeValue::StringArray(vec!["COMPLETE".into()]))
        );
        assert_eq!(
            attrs.get(semconv::GEN_AI_USAGE_OUTPUT_TOKENS),
            Some(&AttributeValue::I64(1))
        );
    }

    #[test]
    fn malformed_json_yields_nothing() {
        let attrs = extract_genai_attributes("anthropic.claude-v2", b"{not json", false);
        assert!(attrs.is_empty());
    }

    #[test]
    fn empty_or_non_object_body_yields_nothing() {
        assert!(extract_genai_attributes("anthropic.claude-v2", b"", true).is_empty());
        assert!(extract_genai_attributes("anthropic.claude-v2", b"[1,2,3]", true).is_empty());
    }

    #[test]
    fn unknown_model_yields_nothing() {
        let body = br#"{"top_p":0.5}"#;
        assert!(extract_genai_attributes("stability.sd3-large-v1:0", body, true).is_empty());
    }

    #[test]
    fn parse_body_reports_kind_of_failure() {
        assert!(matches!(parse_body(b"{"), Err(ExtractionError::InvalidJson(_))));
        assert!(matches!(parse_body(b"42"), Err(ExtractionError::NotAnObject)));
    }
}
