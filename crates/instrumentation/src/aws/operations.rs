//! Bedrock Agent operation → resource disambiguation.
//!
//! Bedrock Agent requests may carry several of `AgentId`, `KnowledgeBaseId`
//! and `DataSourceId` at once (a data source lives inside a knowledge base,
//! which is attached to an agent). Which one names the resource an operation
//! acts on depends on the operation, so each supported operation maps to
//! exactly one parameter.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::tables::{attribute_for_parameter, AwsService};

pub const AGENT_ID: &str = "AgentId";
pub const KNOWLEDGE_BASE_ID: &str = "KnowledgeBaseId";
pub const DATA_SOURCE_ID: &str = "DataSourceId";

pub const AGENT_OPERATIONS: &[&str] = &[
    "CreateAgentActionGroup",
    "CreateAgentAlias",
    "DeleteAgentActionGroup",
    "DeleteAgentAlias",
    "DeleteAgent",
    "DeleteAgentVersion",
    "GetAgentActionGroup",
    "GetAgentAlias",
    "GetAgent",
    "GetAgentVersion",
    "ListAgentActionGroups",
    "ListAgentAliases",
    "ListAgentKnowledgeBases",
    "ListAgentVersions",
    "PrepareAgent",
    "UpdateAgentActionGroup",
    "UpdateAgentAlias",
    "UpdateAgent",
];

pub const KNOWLEDGE_BASE_OPERATIONS: &[&str] = &[
    "AssociateAgentKnowledgeBase",
    "CreateDataSource",
    "DeleteKnowledgeBase",
    "DisassociateAgentKnowledgeBase",
    "GetAgentKnowledgeBase",
    "GetKnowledgeBase",
    "ListDataSources",
    "UpdateAgentKnowledgeBase",
];

pub const DATA_SOURCE_OPERATIONS: &[&str] = &["DeleteDataSource", "GetDataSource", "UpdateDataSource"];

/// Flattened operation → resource parameter map.
#[derive(Debug, Clone)]
pub struct OperationResourceMap {
    by_operation: HashMap<&'static str, &'static str>,
}

impl OperationResourceMap {
    /// Build the map from the three operation sets.
    pub fn build() -> Self {
        let groups = [
            (KNOWLEDGE_BASE_ID, KNOWLEDGE_BASE_OPERATIONS),
            (DATA_SOURCE_ID, DATA_SOURCE_OPERATIONS),
            (AGENT_ID, AGENT_OPERATIONS),
        ];
        let by_operation = groups
            .into_iter()
            .flat_map(|(param, ops)| ops.iter().map(move |op| (*op, param)))
            .collect();
        Self { by_operation }
    }

    /// Process-wide instance, built on first use.
    pub fn global() -> &'static Self {
        static MAP: OnceLock<OperationResourceMap> = OnceLock::new();
        MAP.get_or_init(Self::build)
    }

    /// Resource parameter name for a Bedrock Agent operation.
    pub fn resource_parameter(&self, operation: &str) -> Option<&'static str> {
        self.by_operation.get(operation).copied()
    }

    /// Resource attribute key for `operation` on `service_id`.
    ///
    /// Returns `None` for services other than Bedrock Agent and for operations
    /// that do not target a single resource, such as `ListAgents`.
    pub fn resolve_resource_attribute(
        &self,
        service_id: &str,
        operation: &str,
    ) -> Option<&'static str> {
        if AwsService::from_service_id(service_id) != Some(AwsService::BedrockAgent) {
            return None;
        }
        self.resource_parameter(operation)
            .and_then(attribute_for_parameter)
    }

    pub fn len(&self) -> usize {
        self.by_operation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_operation.is_empty()
    }
}

impl Default for OperationResourceMap {
    fn default() -> Self {
        Self::build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semconv;
    use std::collections::HashSet;

    #[test]
    fn operation_sets_are_pairwise_disjoint() {
        let agent: HashSet<_> = AGENT_OPERATIONS.iter().collect();
        let kb: HashSet<_> = KNOWLEDGE_BASE_OPERATIONS.iter().collect();
        let ds: HashSet<_> = DATA_SOURCE_OPERATIONS.iter().collect();
        assert!(agent.is_disjoint(&kb));
        assert!(agent.is_disjoint(&ds));
        assert!(kb.is_disjoint(&ds));
    }

    #[test]
    fn every_operation_is_mapped_once() {
        let map = OperationResourceMap::build();
        assert_eq!(
            map.len(),
            AGENT_OPERATIONS.len() + KNOWLEDGE_BASE_OPERATIONS.len() + DATA_SOURCE_OPERATIONS.len()
        );
    }

    #[test]
    fn resolves_each_resource_kind() {
        let map = OperationResourceMap::global();
        assert_eq!(
            map.resolve_resource_attribute("Bedrock Agent", "GetAgent"),
            Some(semconv::AWS_BEDROCK_AGENT_ID)
        );
        assert_eq!(
            map.resolve_resource_attribute("Bedrock Agent", "GetKnowledgeBase"),
            Some(semconv::AWS_BEDROCK_KNOWLEDGE_BASE_ID)
        );
        assert_eq!(
            map.resolve_resource_attribute("Bedrock Agent", "GetDataSource"),
            Some(semconv::AWS_BEDROCK_DATA_SOURCE_ID)
        );
    }

    #[test]
    fn create_data_source_targets_its_knowledge_base() {
        let map = OperationResourceMap::global();
        assert_eq!(map.resource_parameter("CreateDataSource"), Some(KNOWLEDGE_BASE_ID));
    }

    #[test]
    fn unknown_operation_or_service_yields_none() {
        let map = OperationResourceMap::global();
        assert_eq!(map.resolve_resource_attribute("Bedrock Agent", "ListAgents"), None);
        assert_eq!(map.resolve_resource_attribute("Bedrock Agent Runtime", "GetAgent"), None);
        assert_eq!(map.resolve_resource_attribute("S3", "GetAgent"), None);
    }
}
