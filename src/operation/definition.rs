//! Operation definitions and the catalogs that hold them.
//!
//! JSON shape (camelCase, as served by the operations endpoints):
//! {
//!   "operations": [
//!     {
//!       "type": "GET_PROJECTS",
//!       "dependencies": ["AUTHENTICATE"],   // optional, defaults to []
//!       "required": true,                   // optional, defaults to false
//!       "description": "List projects",     // optional
//!       "requiredParams": ["instanceUrl"],  // optional
//!       "estimatedTimeCost": 1.5            // optional, informational
//!     },
//!     ...
//!   ]
//! }

use crate::Result;
use crate::diagnostics;
use crate::operation::OperationType;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One provider API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDefinition {
    #[serde(rename = "type")]
    pub operation_type: OperationType,

    #[serde(default)]
    pub dependencies: Vec<OperationType>,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub required_params: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_cost: Option<f64>,
}

impl OperationDefinition {
    pub fn new(operation_type: OperationType, description: impl Into<String>) -> Self {
        Self {
            operation_type,
            dependencies: Vec::new(),
            required: false,
            description: description.into(),
            required_params: Vec::new(),
            estimated_time_cost: None,
        }
    }

    pub fn depends_on(mut self, deps: impl IntoIterator<Item = OperationType>) -> Self {
        self.dependencies.extend(deps);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn params(mut self, params: &[&str]) -> Self {
        self.required_params
            .extend(params.iter().map(|p| p.to_string()));
        self
    }

    pub fn cost(mut self, estimated: f64) -> Self {
        self.estimated_time_cost = Some(estimated);
        self
    }
}

/// Request body carrying a flat list of definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperationList {
    #[serde(default)]
    pub operations: Vec<OperationDefinition>,
}

impl OperationList {
    pub fn from_json(text: &str) -> Result<Self> {
        let list: OperationList = serde_json::from_str(text)?;
        Ok(list)
    }
}

/// Definitions keyed by identifier, declaration order retained.
#[derive(Debug, Clone, Default)]
pub struct OperationCatalog {
    definitions: Vec<OperationDefinition>,
    index: HashMap<OperationType, usize>,
}

impl OperationCatalog {
    /// Build a catalog, rejecting a second definition for the same identifier.
    pub fn from_definitions(definitions: Vec<OperationDefinition>) -> Result<Self> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (pos, def) in definitions.iter().enumerate() {
            if index.insert(def.operation_type, pos).is_some() {
                bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "duplicate operation type in catalog: {}",
                        def.operation_type
                    ))
                );
            }
        }
        Ok(Self { definitions, index })
    }

    pub fn get(&self, op: OperationType) -> Option<&OperationDefinition> {
        self.index.get(&op).map(|&pos| &self.definitions[pos])
    }

    pub fn contains(&self, op: OperationType) -> bool {
        self.index.contains_key(&op)
    }

    pub fn definitions(&self) -> &[OperationDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn into_definitions(self) -> Vec<OperationDefinition> {
        self.definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_camel_case_with_defaults() {
        let list = OperationList::from_json(
            r#"{"operations": [
                {"type": "AUTHENTICATE"},
                {"type": "GET_PROJECTS", "dependencies": ["AUTHENTICATE"],
                 "required": true, "requiredParams": ["instanceUrl"], "estimatedTimeCost": 2}
            ]}"#,
        )
        .unwrap();

        assert_eq!(list.operations.len(), 2);
        assert!(list.operations[0].dependencies.is_empty());
        assert!(!list.operations[0].required);
        assert_eq!(
            list.operations[1],
            OperationDefinition::new(OperationType::GetProjects, "")
                .depends_on([OperationType::Authenticate])
                .required()
                .params(&["instanceUrl"])
                .cost(2.0)
        );
    }

    #[test]
    fn serializes_type_field() {
        let def = OperationDefinition::new(OperationType::GetTestCases, "list cases");
        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["type"], "GET_TEST_CASES");
        assert_eq!(value["requiredParams"], serde_json::json!([]));
        assert!(value.get("estimatedTimeCost").is_none());
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let defs = vec![
            OperationDefinition::new(OperationType::Authenticate, "a"),
            OperationDefinition::new(OperationType::Authenticate, "b"),
        ];
        let err = OperationCatalog::from_definitions(defs).unwrap_err();
        assert!(err.to_string().contains("AUTHENTICATE"));
    }

    #[test]
    fn catalog_lookup_keeps_order() {
        let catalog = OperationCatalog::from_definitions(vec![
            OperationDefinition::new(OperationType::GetProjects, "projects"),
            OperationDefinition::new(OperationType::Authenticate, "auth"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(OperationType::Authenticate).map(|d| d.description.as_str()),
            Some("auth")
        );
        assert_eq!(
            catalog.definitions()[0].operation_type,
            OperationType::GetProjects
        );
        assert!(!catalog.contains(OperationType::UploadAttachment));
    }
}
