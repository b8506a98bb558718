//! Semantic span attributes for AWS SDK client calls.
//!
//! - [`aws`] resolves resource-identifying attributes (table, queue, bucket,
//!   stream, agent, ...) from a request/response pair.
//! - [`genai`] extracts inference parameters and token usage from Bedrock
//!   model invocation bodies.
//! - [`hook`] combines both for an SDK interceptor and writes the result to a
//!   span.
//!
//! Nothing in this crate returns an error to the traced call: attribute
//! enrichment is best-effort and failures are only logged.

pub mod attributes;
pub mod aws;
pub mod genai;
pub mod hook;
pub mod semconv;

pub use attributes::{AttributeValue, ExtractedAttributes, SpanWrite};
pub use genai::{extract_genai_attributes, GenAiInvocation, PayloadKind};
pub use hook::AwsSdkCall;
