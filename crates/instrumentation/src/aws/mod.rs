//! Resource attributes for AWS SDK client spans.
//!
//! # Responsibilities
//!
//! - Hold the static tables of interesting request/response parameters per
//!   service and their semantic attribute keys ([`tables`]).
//! - Disambiguate Bedrock Agent resource ids by operation ([`operations`]).
//! - Walk a request/response pair and emit attributes ([`resolver`]).
//!
//! Resolution is best-effort: unknown services, absent fields and empty
//! values simply produce fewer attributes.

pub mod fields;
pub mod operations;
pub mod resolver;
pub mod tables;

pub use fields::{FieldSource, NoFields};
pub use operations::OperationResourceMap;
pub use resolver::{normalize_service_name, operation_name, resolve, ServiceAttributeResolver};
pub use tables::AwsService;
