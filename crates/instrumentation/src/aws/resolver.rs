//! Resolution of resource attributes for one AWS SDK request/response pair.

use tracing::{debug, trace};

use super::fields::FieldSource;
use super::operations::OperationResourceMap;
use super::tables::{attribute_for_parameter, AwsService};
use crate::attributes::ExtractedAttributes;
use crate::semconv;

/// Strip the SDK provider prefix from a service name (`"AmazonS3"` → `"S3"`).
pub fn normalize_service_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    ["Amazon", "AWS"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map(str::trim_start)
        .filter(|rest| !rest.is_empty())
        .unwrap_or(trimmed)
}

/// Derive an operation name from an SDK request or response type name
/// (`"PutItemRequest"` → `"PutItem"`, `"PutItemOutput"` → `"PutItem"`).
///
/// Names without a known suffix are returned unchanged.
pub fn operation_name(type_name: &str) -> &str {
    // Keep only the last path segment of fully-qualified type names.
    let short = type_name.rsplit("::").next().unwrap_or(type_name);
    ["Request", "Response", "Input", "Output"]
        .iter()
        .find_map(|suffix| short.strip_suffix(suffix))
        .filter(|op| !op.is_empty())
        .unwrap_or(short)
}

/// Resolves resource-identifying attributes from request and response fields.
#[derive(Debug, Clone, Copy)]
pub struct ServiceAttributeResolver {
    operations: &'static OperationResourceMap,
}

impl ServiceAttributeResolver {
    pub fn new() -> Self {
        Self {
            operations: OperationResourceMap::global(),
        }
    }

    /// Resolve attributes for a call.
    ///
    /// `service_id` may carry an SDK provider prefix and `operation` may be an
    /// SDK request type name; both are normalised first. Unknown services
    /// produce an empty set. Absent or empty fields are skipped. The result
    /// depends only on the inputs, so repeated calls agree.
    pub fn resolve<Req, Resp>(
        &self,
        service_id: &str,
        operation: &str,
        request: &Req,
        response: &Resp,
    ) -> ExtractedAttributes
    where
        Req: FieldSource + ?Sized,
        Resp: FieldSource + ?Sized,
    {
        let mut attrs = ExtractedAttributes::new();
        let service_name = normalize_service_name(service_id);
        let Some(service) = AwsService::from_service_id(service_name) else {
            trace!(service = service_name, "no attribute table for service");
            return attrs;
        };
        let operation = operation_name(operation);

        if service == AwsService::BedrockRuntime {
            attrs.set(semconv::GEN_AI_SYSTEM, semconv::GEN_AI_SYSTEM_AWS_BEDROCK);
        }

        // Bedrock Agent ids are ambiguous between resource kinds; only the one
        // the operation targets is recorded.
        let only = if service == AwsService::BedrockAgent {
            match self.operations.resource_parameter(operation) {
                Some(param) => Some(param),
                None => {
                    debug!(operation, "bedrock agent operation targets no single resource");
                    return attrs;
                }
            }
        } else {
            None
        };

        collect(service.request_parameters(), request, only, &mut attrs);
        collect(service.response_parameters(), response, only, &mut attrs);
        attrs
    }
}

impl Default for ServiceAttributeResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn collect<F: FieldSource + ?Sized>(
    parameters: &[&'static str],
    source: &F,
    only: Option<&str>,
    out: &mut ExtractedAttributes,
) {
    for &param in parameters {
        if only.is_some_and(|wanted| wanted != param) {
            continue;
        }
        let Some(value) = source.field(param).filter(|v| !v.is_empty()) else {
            continue;
        };
        if let Some(key) = attribute_for_parameter(param) {
            out.set(key, value);
        }
    }
}

/// Resolve with the process-wide resolver.
pub fn resolve<Req, Resp>(
    service_id: &str,
    operation: &str,
    request: &Req,
    response: &Resp,
) -> ExtractedAttributes
where
    Req: FieldSource + ?Sized,
    Resp: FieldSource + ?Sized,
{
    ServiceAttributeResolver::new().resolve(service_id, operation, request, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeValue;
    use crate::aws::fields::NoFields;
    use serde_json::json;

    fn string(v: &str) -> AttributeValue {
        AttributeValue::String(v.into())
    }

    #[test]
    fn normalizes_service_names() {
        assert_eq!(normalize_service_name("AmazonS3"), "S3");
        assert_eq!(normalize_service_name("Amazon DynamoDB"), "DynamoDB");
        assert_eq!(normalize_service_name("SQS"), "SQS");
        assert_eq!(normalize_service_name("Amazon"), "Amazon");
    }

    #[test]
    fn derives_operation_names() {
        assert_eq!(operation_name("PutItemRequest"), "PutItem");
        assert_eq!(operation_name("aws_sdk_dynamodb::operation::put_item::PutItemInput"), "PutItem");
        assert_eq!(operation_name("GetAgentResponse"), "GetAgent");
        assert_eq!(operation_name("GetAgent"), "GetAgent");
        assert_eq!(operation_name("Request"), "Request");
    }

    #[test]
    fn dynamodb_table_name() {
        let req = [("TableName", "orders"), ("Key", "k")];
        let attrs = resolve("AmazonDynamoDBv2", "PutItemRequest", &req, &NoFields);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get(semconv::AWS_DYNAMODB_TABLE_NAME), Some(&string("orders")));
    }

    #[test]
    fn sqs_request_and_response() {
        let req = [("QueueName", "jobs")];
        let resp = json!({"QueueUrl": "https://sqs.us-west-2.amazonaws.com/123/jobs"});
        let attrs = resolve("SQS", "CreateQueue", &req, &resp);
        assert_eq!(attrs.get(semconv::AWS_SQS_QUEUE_NAME), Some(&string("jobs")));
        assert_eq!(
            attrs.get(semconv::AWS_SQS_QUEUE_URL),
            Some(&string("https://sqs.us-west-2.amazonaws.com/123/jobs"))
        );
    }

    #[test]
    fn empty_values_are_skipped() {
        let req = [("BucketName", "")];
        assert!(resolve("S3", "GetObject", &req, &NoFields).is_empty());
    }

    #[test]
    fn unknown_service_is_empty() {
        let req = [("TableName", "orders")];
        assert!(resolve("EC2", "DescribeInstances", &req, &NoFields).is_empty());
    }

    #[test]
    fn resolve_is_idempotent() {
        let req = [("StateMachineArn", "arn:aws:states:::sm"), ("ActivityArn", "arn:aws:states:::act")];
        let first = resolve("SFN", "DescribeStateMachine", &req, &NoFields);
        let second = resolve("SFN", "DescribeStateMachine", &req, &NoFields);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn bedrock_runtime_sets_system_and_model() {
        let req = [("ModelId", "amazon.titan-text-express-v1")];
        let attrs = resolve("Bedrock Runtime", "InvokeModel", &req, &NoFields);
        assert_eq!(attrs.get(semconv::GEN_AI_SYSTEM), Some(&string("aws_bedrock")));
        assert_eq!(
            attrs.get(semconv::GEN_AI_REQUEST_MODEL),
            Some(&string("amazon.titan-text-express-v1"))
        );
    }

    #[test]
    fn bedrock_agent_keeps_only_the_targeted_resource() {
        let req = [
            ("AgentId", "agent-1"),
            ("KnowledgeBaseId", "kb-1"),
            ("DataSourceId", "ds-1"),
        ];
        let attrs = resolve("Bedrock Agent", "GetDataSource", &req, &NoFields);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get(semconv::AWS_BEDROCK_DATA_SOURCE_ID), Some(&string("ds-1")));

        let attrs = resolve("Bedrock Agent", "GetAgentKnowledgeBase", &req, &NoFields);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get(semconv::AWS_BEDROCK_KNOWLEDGE_BASE_ID), Some(&string("kb-1")));
    }

    #[test]
    fn bedrock_agent_response_ids() {
        let resp = [("AgentId", "agent-9")];
        let attrs = resolve("Bedrock Agent", "CreateAgentAliasRequest", &NoFields, &resp);
        assert_eq!(attrs.get(semconv::AWS_BEDROCK_AGENT_ID), Some(&string("agent-9")));
    }

    #[test]
    fn bedrock_agent_untargeted_operation_is_empty() {
        let req = [("AgentId", "agent-1")];
        assert!(resolve("Bedrock Agent", "ListAgents", &req, &NoFields).is_empty());
    }

    #[test]
    fn bedrock_agent_runtime_uses_generic_walk() {
        let req = [("AgentId", "agent-1"), ("KnowledgeBaseId", "kb-1")];
        let attrs = resolve("Bedrock Agent Runtime", "InvokeAgent", &req, &NoFields);
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn bedrock_guardrail_from_response() {
        let resp = [("GuardrailId", "gr-1")];
        let attrs = resolve("Bedrock", "GetGuardrail", &NoFields, &resp);
        assert_eq!(attrs.get(semconv::AWS_BEDROCK_GUARDRAIL_ID), Some(&string("gr-1")));
    }
}
