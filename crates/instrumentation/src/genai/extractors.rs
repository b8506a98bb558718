//! Per-vendor extraction of inference parameters and usage from JSON bodies.
//!
//! Field locations are JSON pointers into the decoded body. Each field is read
//! independently: a missing field is skipped silently and a wrongly typed
//! field is logged and skipped, so one bad field never hides the others.

use serde_json::Value;
use tracing::debug;

use super::vendor::ModelVendor;
use super::{ExtractionError, PayloadKind};
use crate::attributes::{AttributeValue, ExtractedAttributes};
use crate::semconv::{
    GEN_AI_REQUEST_MAX_TOKENS as MAX_TOKENS, GEN_AI_REQUEST_TEMPERATURE as TEMPERATURE,
    GEN_AI_REQUEST_TOP_P as TOP_P, GEN_AI_RESPONSE_FINISH_REASONS as FINISH_REASONS,
    GEN_AI_USAGE_INPUT_TOKENS as INPUT_TOKENS, GEN_AI_USAGE_OUTPUT_TOKENS as OUTPUT_TOKENS,
};

/// Approximate characters per token, used when a vendor omits token counts.
pub const CHARS_PER_TOKEN: usize = 6;

/// Estimated token count for `text`: `ceil(chars / 6)`.
pub fn estimate_tokens(text: &str) -> i64 {
    text.chars().count().div_ceil(CHARS_PER_TOKEN) as i64
}

/// Run the extractor for `vendor` over a decoded body.
pub fn extract(vendor: ModelVendor, kind: PayloadKind, body: &Value) -> ExtractedAttributes {
    let mut x = Extraction::new(body);
    match vendor {
        ModelVendor::Titan => titan(&mut x, kind),
        ModelVendor::Claude => claude(&mut x, kind),
        ModelVendor::Llama3 => llama3(&mut x, kind),
        ModelVendor::Command => command(&mut x, kind),
        ModelVendor::Jamba => jamba(&mut x, kind),
        ModelVendor::Mistral => mistral(&mut x, kind),
    }
    x.attrs
}

fn titan(x: &mut Extraction<'_>, kind: PayloadKind) {
    match kind {
        PayloadKind::Request => {
            x.double(TOP_P, "/textGenerationConfig/topP");
            x.double(TEMPERATURE, "/textGenerationConfig/temperature");
            x.int(MAX_TOKENS, "/textGenerationConfig/maxTokenCount");
        }
        PayloadKind::Response => {
            x.int(INPUT_TOKENS, "/inputTextTokenCount");
            x.int(OUTPUT_TOKENS, "/results/0/tokenCount");
            x.finish_reason("/results/0/completionReason");
        }
    }
}

fn claude(x: &mut Extraction<'_>, kind: PayloadKind) {
    match kind {
        PayloadKind::Request => {
            x.double(TOP_P, "/top_p");
            x.double(TEMPERATURE, "/temperature");
            x.int(MAX_TOKENS, "/max_tokens");
        }
        PayloadKind::Response => {
            x.int(INPUT_TOKENS, "/usage/input_tokens");
            x.int(OUTPUT_TOKENS, "/usage/output_tokens");
            x.finish_reason("/stop_reason");
        }
    }
}

fn llama3(x: &mut Extraction<'_>, kind: PayloadKind) {
    match kind {
        PayloadKind::Request => {
            x.double(TOP_P, "/top_p");
            x.double(TEMPERATURE, "/temperature");
            x.int(MAX_TOKENS, "/max_gen_len");
        }
        PayloadKind::Response => {
            x.int(INPUT_TOKENS, "/prompt_token_count");
            x.int(OUTPUT_TOKENS, "/generation_token_count");
            x.finish_reason("/stop_reason");
        }
    }
}

// Command bodies carry no token counts; both sides are estimated from text.
fn command(x: &mut Extraction<'_>, kind: PayloadKind) {
    match kind {
        PayloadKind::Request => {
            x.double(TOP_P, "/p");
            x.double(TEMPERATURE, "/temperature");
            x.int(MAX_TOKENS, "/max_tokens");
            x.estimated_tokens(INPUT_TOKENS, "/message");
        }
        PayloadKind::Response => {
            x.finish_reason("/finish_reason");
            x.estimated_tokens(OUTPUT_TOKENS, "/text");
        }
    }
}

fn jamba(x: &mut Extraction<'_>, kind: PayloadKind) {
    match kind {
        PayloadKind::Request => {
            x.double(TOP_P, "/top_p");
            x.double(TEMPERATURE, "/temperature");
            x.int(MAX_TOKENS, "/max_tokens");
        }
        PayloadKind::Response => {
            x.int(INPUT_TOKENS, "/usage/prompt_tokens");
            x.int(OUTPUT_TOKENS, "/usage/completion_tokens");
            x.finish_reason("/choices/0/finish_reason");
        }
    }
}

fn mistral(x: &mut Extraction<'_>, kind: PayloadKind) {
    match kind {
        PayloadKind::Request => {
            x.double(TOP_P, "/top_p");
            x.double(TEMPERATURE, "/temperature");
            x.int(MAX_TOKENS, "/max_tokens");
            x.estimated_tokens(INPUT_TOKENS, "/prompt");
        }
        PayloadKind::Response => {
            x.finish_reason("/outputs/0/stop_reason");
            x.estimated_tokens(OUTPUT_TOKENS, "/outputs/0/text");
        }
    }
}

/// Accumulates attributes read from one body.
struct Extraction<'a> {
    body: &'a Value,
    attrs: ExtractedAttributes,
}

impl<'a> Extraction<'a> {
    fn new(body: &'a Value) -> Self {
        Self {
            body,
            attrs: ExtractedAttributes::new(),
        }
    }

    fn double(&mut self, key: &'static str, pointer: &str) {
        let read = self.read(pointer, "number", Value::as_f64);
        self.record(key, pointer, read);
    }

    fn int(&mut self, key: &'static str, pointer: &str) {
        let read = self.read(pointer, "integer", Value::as_i64);
        self.record(key, pointer, read);
    }

    fn finish_reason(&mut self, pointer: &str) {
        let read = self
            .read_nullable_str(pointer)
            .map(|reason| reason.map(|r| vec![r.to_owned()]));
        self.record(FINISH_REASONS, pointer, read);
    }

    fn estimated_tokens(&mut self, key: &'static str, pointer: &str) {
        let read = self
            .read_nullable_str(pointer)
            .map(|text| text.map(estimate_tokens));
        self.record(key, pointer, read);
    }

    fn read<T>(
        &self,
        pointer: &str,
        expected: &'static str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<Option<T>, ExtractionError> {
        match self.body.pointer(pointer) {
            None => Ok(None),
            Some(v) => convert(v).map(Some).ok_or_else(|| ExtractionError::WrongType {
                field: pointer.to_owned(),
                expected,
            }),
        }
    }

    /// A JSON `null` reads as the empty string.
    fn read_nullable_str(&self, pointer: &str) -> Result<Option<&'a str>, ExtractionError> {
        match self.body.pointer(pointer) {
            None => Ok(None),
            Some(Value::Null) => Ok(Some("")),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(ExtractionError::WrongType {
                field: pointer.to_owned(),
                expected: "string",
            }),
        }
    }

    fn record<T: Into<AttributeValue>>(
        &mut self,
        key: &'static str,
        pointer: &str,
        read: Result<Option<T>, ExtractionError>,
    ) {
        match read {
            Ok(Some(value)) => self.attrs.set(key, value),
            Ok(None) => {}
            Err(e) => debug!(attribute = key, field = pointer, error = %e, "skipping genai attribute"),
        }
    }
}
