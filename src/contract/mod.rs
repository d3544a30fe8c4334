//! Provider API contracts: one static catalog of operation definitions per
//! test-management system, plus the parameter rules that system enforces.
//!
//! Contracts are built once and never mutated. Graphs are derived from them
//! per request.

mod providers;
mod rules;

pub use rules::ParameterValidator;

use crate::Result;
use crate::diagnostics;
use crate::graph::DependencyGraph;
use crate::operation::{OperationCatalog, OperationDefinition, OperationType};
use crate::resolver;

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    Zephyr,
    Qtest,
    AzureDevops,
    Rally,
    Testrail,
    Jama,
}

impl ProviderId {
    pub const ALL: [ProviderId; 6] = [
        ProviderId::Zephyr,
        ProviderId::Qtest,
        ProviderId::AzureDevops,
        ProviderId::Rally,
        ProviderId::Testrail,
        ProviderId::Jama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Zephyr => "zephyr",
            ProviderId::Qtest => "qtest",
            ProviderId::AzureDevops => "azure-devops",
            ProviderId::Rally => "rally",
            ProviderId::Testrail => "testrail",
            ProviderId::Jama => "jama",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed parameter check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterError {
    UnknownOperation {
        operation: OperationType,
    },
    MissingParameter {
        operation: OperationType,
        parameter: String,
    },
    InvalidParameter {
        parameter: String,
        rule: String,
    },
}

#[derive(Debug, Clone)]
pub struct ProviderApiContract {
    provider_id: ProviderId,
    catalog: OperationCatalog,
    validation_rules: BTreeMap<String, ParameterValidator>,
}

impl ProviderApiContract {
    pub fn new(
        provider_id: ProviderId,
        operations: Vec<OperationDefinition>,
        validation_rules: BTreeMap<String, ParameterValidator>,
    ) -> Result<Self> {
        let catalog = OperationCatalog::from_definitions(operations).with_context(|| {
            diagnostics::error_message(format!("build {} contract", provider_id))
        })?;
        Ok(Self {
            provider_id,
            catalog,
            validation_rules,
        })
    }

    /// The built-in catalog for `provider`.
    pub fn for_provider(provider: ProviderId) -> Result<Self> {
        let contract = providers::build(provider)?;
        debug!(
            provider = %provider,
            operations = contract.catalog.len(),
            rules = contract.validation_rules.len(),
            "loaded provider contract"
        );
        Ok(contract)
    }

    pub fn provider_id(&self) -> ProviderId {
        self.provider_id
    }

    /// Definitions in declaration order.
    pub fn operations(&self) -> &[OperationDefinition] {
        self.catalog.definitions()
    }

    pub fn operation(&self, op: OperationType) -> Option<&OperationDefinition> {
        self.catalog.get(op)
    }

    pub fn catalog(&self) -> &OperationCatalog {
        &self.catalog
    }

    pub fn required_operations(&self) -> Vec<OperationType> {
        self.operations()
            .iter()
            .filter(|d| d.required)
            .map(|d| d.operation_type)
            .collect()
    }

    pub fn validation_rules(&self) -> &BTreeMap<String, ParameterValidator> {
        &self.validation_rules
    }

    pub fn dependency_graph(&self) -> DependencyGraph<OperationType> {
        resolver::build_dependency_graph(self.operations())
    }

    /// Check one parameter value. Parameters without a rule always pass.
    pub fn validate_parameter(&self, name: &str, value: &Value) -> bool {
        self.validation_rules
            .get(name)
            .is_none_or(|rule| rule.check(value))
    }

    /// Check the parameters supplied for one invocation of `op`.
    ///
    /// Reports every required parameter that is absent and every supplied
    /// parameter whose rule rejects it.
    pub fn check_parameters(&self, op: OperationType, params: &Map<String, Value>) -> Vec<ParameterError> {
        let Some(def) = self.operation(op) else {
            return vec![ParameterError::UnknownOperation { operation: op }];
        };

        let mut errors = Vec::new();
        for name in &def.required_params {
            if !params.contains_key(name) {
                errors.push(ParameterError::MissingParameter {
                    operation: op,
                    parameter: name.clone(),
                });
            }
        }
        for (name, value) in params {
            if let Some(rule) = self.validation_rules.get(name) {
                if !rule.check(value) {
                    errors.push(ParameterError::InvalidParameter {
                        parameter: name.clone(),
                        rule: rule.to_string(),
                    });
                }
            }
        }
        errors
    }
}

/// Every built-in contract, in `ProviderId::ALL` order.
pub fn all_contracts() -> Result<Vec<ProviderApiContract>> {
    ProviderId::ALL
        .iter()
        .map(|p| ProviderApiContract::for_provider(*p))
        .collect()
}

/// The operations a migration from `source` to `target` touches.
///
/// Source definitions come first. A target definition is appended when its
/// identifier is new; for a shared identifier its extra dependencies and
/// parameters are merged into the source definition.
pub fn operations_for_pair(
    source: &ProviderApiContract,
    target: &ProviderApiContract,
) -> Vec<OperationDefinition> {
    let mut merged: Vec<OperationDefinition> = source.operations().to_vec();

    for def in target.operations() {
        match merged
            .iter_mut()
            .find(|m| m.operation_type == def.operation_type)
        {
            Some(existing) => {
                for dep in &def.dependencies {
                    if !existing.dependencies.contains(dep) {
                        existing.dependencies.push(*dep);
                    }
                }
                for param in &def.required_params {
                    if !existing.required_params.contains(param) {
                        existing.required_params.push(param.clone());
                    }
                }
                existing.required |= def.required;
            }
            None => merged.push(def.clone()),
        }
    }
    merged
}
