//! Semantic attribute keys written to AWS SDK client spans.

// --- AWS resource attributes ---

pub const AWS_DYNAMODB_TABLE_NAME: &str = "aws.table_name";
pub const AWS_SQS_QUEUE_URL: &str = "aws.queue_url";
pub const AWS_SQS_QUEUE_NAME: &str = "aws.sqs.queue_name";
pub const AWS_S3_BUCKET: &str = "aws.s3.bucket";
pub const AWS_KINESIS_STREAM_NAME: &str = "aws.kinesis.stream_name";
pub const AWS_SNS_TOPIC_ARN: &str = "aws.sns.topic.arn";
pub const AWS_SECRETSMANAGER_SECRET_ARN: &str = "aws.secretsmanager.secret.arn";
pub const AWS_STEPFUNCTIONS_ACTIVITY_ARN: &str = "aws.stepfunctions.activity.arn";
pub const AWS_STEPFUNCTIONS_STATE_MACHINE_ARN: &str = "aws.stepfunctions.state_machine.arn";
pub const AWS_LAMBDA_RESOURCE_MAPPING_ID: &str = "aws.lambda.resource_mapping.id";

// --- Bedrock resource attributes ---

pub const AWS_BEDROCK_GUARDRAIL_ID: &str = "aws.bedrock.guardrail.id";
pub const AWS_BEDROCK_AGENT_ID: &str = "aws.bedrock.agent.id";
pub const AWS_BEDROCK_KNOWLEDGE_BASE_ID: &str = "aws.bedrock.knowledge_base.id";
pub const AWS_BEDROCK_DATA_SOURCE_ID: &str = "aws.bedrock.data_source.id";

// --- GenAI attributes ---

/// Provider of the model; always [`GEN_AI_SYSTEM_AWS_BEDROCK`] here.
pub const GEN_AI_SYSTEM: &str = "gen_ai.system";
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";
pub const GEN_AI_REQUEST_TOP_P: &str = "gen_ai.request.top_p";
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";
/// String array, one entry per choice.
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// Value of [`GEN_AI_SYSTEM`] for Bedrock Runtime calls.
pub const GEN_AI_SYSTEM_AWS_BEDROCK: &str = "aws_bedrock";
