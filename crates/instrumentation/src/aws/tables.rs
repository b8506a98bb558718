//! Static tables: which request/response parameters each AWS service exposes,
//! and which semantic attribute each parameter maps to.

use crate::semconv;

/// AWS services with resource-identifying parameters.
///
/// Each variant is one table key, so a service can never be listed twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwsService {
    DynamoDb,
    Sqs,
    S3,
    Kinesis,
    Lambda,
    SecretsManager,
    Sns,
    StepFunctions,
    Bedrock,
    BedrockRuntime,
    BedrockAgent,
    BedrockAgentRuntime,
}

impl AwsService {
    pub const ALL: [AwsService; 12] = [
        AwsService::DynamoDb,
        AwsService::Sqs,
        AwsService::S3,
        AwsService::Kinesis,
        AwsService::Lambda,
        AwsService::SecretsManager,
        AwsService::Sns,
        AwsService::StepFunctions,
        AwsService::Bedrock,
        AwsService::BedrockRuntime,
        AwsService::BedrockAgent,
        AwsService::BedrockAgentRuntime,
    ];

    /// Stable short service identifier as reported by SDK service metadata.
    pub fn service_id(self) -> &'static str {
        match self {
            AwsService::DynamoDb => "DynamoDB",
            AwsService::Sqs => "SQS",
            AwsService::S3 => "S3",
            AwsService::Kinesis => "Kinesis",
            AwsService::Lambda => "Lambda",
            AwsService::SecretsManager => "Secrets Manager",
            AwsService::Sns => "SNS",
            AwsService::StepFunctions => "SFN",
            AwsService::Bedrock => "Bedrock",
            AwsService::BedrockRuntime => "Bedrock Runtime",
            AwsService::BedrockAgent => "Bedrock Agent",
            AwsService::BedrockAgentRuntime => "Bedrock Agent Runtime",
        }
    }

    /// Look up a service by its normalised identifier.
    ///
    /// Matching ignores ASCII case and whitespace, so `"Secrets Manager"`,
    /// `"SecretsManager"` and `"secretsmanager"` are the same service.
    /// Unknown identifiers return `None`.
    pub fn from_service_id(id: &str) -> Option<Self> {
        let wanted = squash(id);
        match wanted.as_str() {
            // The DynamoDB SDK reports its v2 model under this name.
            "dynamodbv2" => Some(AwsService::DynamoDb),
            "stepfunctions" => Some(AwsService::StepFunctions),
            _ => Self::ALL
                .into_iter()
                .find(|svc| squash(svc.service_id()) == wanted),
        }
    }

    /// Request parameters probed for this service, in order.
    pub fn request_parameters(self) -> &'static [&'static str] {
        match self {
            AwsService::DynamoDb => &["TableName"],
            AwsService::Sqs => &["QueueUrl", "QueueName"],
            AwsService::S3 => &["BucketName"],
            AwsService::Kinesis => &["StreamName"],
            AwsService::Lambda => &["UUID"],
            AwsService::SecretsManager => &["SecretId"],
            AwsService::Sns => &["TopicArn"],
            AwsService::StepFunctions => &["ActivityArn", "StateMachineArn"],
            AwsService::Bedrock => &[],
            AwsService::BedrockRuntime => &["ModelId"],
            AwsService::BedrockAgent => &["AgentId", "KnowledgeBaseId", "DataSourceId"],
            AwsService::BedrockAgentRuntime => &["AgentId", "KnowledgeBaseId"],
        }
    }

    /// Response parameters probed for this service, in order.
    pub fn response_parameters(self) -> &'static [&'static str] {
        match self {
            AwsService::SecretsManager => &["ARN"],
            AwsService::Sqs => &["QueueUrl"],
            AwsService::Bedrock => &["GuardrailId"],
            AwsService::BedrockAgent => &["AgentId", "DataSourceId"],
            _ => &[],
        }
    }
}

fn squash(id: &str) -> String {
    id.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Request parameters for a raw service identifier; empty when unknown.
pub fn request_parameters(service_id: &str) -> &'static [&'static str] {
    AwsService::from_service_id(service_id)
        .map(AwsService::request_parameters)
        .unwrap_or(&[])
}

/// Response parameters for a raw service identifier; empty when unknown.
pub fn response_parameters(service_id: &str) -> &'static [&'static str] {
    AwsService::from_service_id(service_id)
        .map(AwsService::response_parameters)
        .unwrap_or(&[])
}

/// Semantic attribute key for an SDK parameter name.
pub fn attribute_for_parameter(parameter: &str) -> Option<&'static str> {
    let key = match parameter {
        "TableName" => semconv::AWS_DYNAMODB_TABLE_NAME,
        "QueueUrl" => semconv::AWS_SQS_QUEUE_URL,
        "QueueName" => semconv::AWS_SQS_QUEUE_NAME,
        "BucketName" => semconv::AWS_S3_BUCKET,
        "StreamName" => semconv::AWS_KINESIS_STREAM_NAME,
        "TopicArn" => semconv::AWS_SNS_TOPIC_ARN,
        "ARN" | "SecretId" => semconv::AWS_SECRETSMANAGER_SECRET_ARN,
        "ActivityArn" => semconv::AWS_STEPFUNCTIONS_ACTIVITY_ARN,
        "StateMachineArn" => semconv::AWS_STEPFUNCTIONS_STATE_MACHINE_ARN,
        "UUID" => semconv::AWS_LAMBDA_RESOURCE_MAPPING_ID,
        "ModelId" => semconv::GEN_AI_REQUEST_MODEL,
        "GuardrailId" => semconv::AWS_BEDROCK_GUARDRAIL_ID,
        "AgentId" => semconv::AWS_BEDROCK_AGENT_ID,
        "KnowledgeBaseId" => semconv::AWS_BEDROCK_KNOWLEDGE_BASE_ID,
        "DataSourceId" => semconv::AWS_BEDROCK_DATA_SOURCE_ID,
        _ => return None,
    };
    Some(key)
}
