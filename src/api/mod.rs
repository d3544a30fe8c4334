//! Request handling for the operations surface.
//!
//! Each handler takes already-parsed input, runs the resolver or renderer,
//! and returns the serializable response body:
//! - operations list            -> `Vec<OperationDefinition>`
//! - dependency graph + order   -> `DependencyGraphResponse`
//! - validate                   -> `ValidationReport`
//! - visualize                  -> `VisualizationResponse`
//! - minimal set                -> `MinimalSetResponse`
//! - parameter check            -> `ParameterCheckResponse`

use crate::Result;
use crate::contract::{self, ParameterError, ProviderApiContract, ProviderId};
use crate::operation::{OperationCatalog, OperationDefinition, OperationList, OperationType};
use crate::render::{self, ExecutionResult, VisualizationFormat};
use crate::resolver::{self, ValidationReport};

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::info;

/// Source and target system of a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationPair {
    pub source: ProviderId,
    pub target: ProviderId,
}

impl MigrationPair {
    pub fn new(source: ProviderId, target: ProviderId) -> Self {
        Self { source, target }
    }

    /// Merged definitions of both contracts.
    pub fn operations(&self) -> Result<Vec<OperationDefinition>> {
        let source = ProviderApiContract::for_provider(self.source)?;
        let target = ProviderApiContract::for_provider(self.target)?;
        Ok(contract::operations_for_pair(&source, &target))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraphResponse {
    /// operation -> direct dependencies
    pub graph: BTreeMap<OperationType, Vec<OperationType>>,
    pub execution_order: Vec<OperationType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualizationResponse {
    pub visualization: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MinimalSetResponse {
    pub operations: Vec<OperationType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterCheckResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ParameterError>,
}

pub fn list_operations(pair: MigrationPair) -> Result<Vec<OperationDefinition>> {
    pair.operations()
}

pub fn dependency_graph(pair: MigrationPair) -> Result<DependencyGraphResponse> {
    let operations = pair.operations()?;
    let graph = resolver::build_dependency_graph(&operations);

    let adjacency = graph
        .nodes()
        .map(|op| (*op, graph.get_dependencies(op)))
        .collect();

    Ok(DependencyGraphResponse {
        graph: adjacency,
        execution_order: resolver::execution_order(&graph),
    })
}

pub fn validate(list: &OperationList) -> ValidationReport {
    let report = resolver::validate_dependencies(&list.operations);
    info!(
        operations = list.operations.len(),
        valid = report.valid,
        errors = report.errors.len(),
        "validated operation set"
    );
    report
}

pub fn visualize(
    pair: MigrationPair,
    format: VisualizationFormat,
    results: Option<&[ExecutionResult]>,
) -> Result<VisualizationResponse> {
    let operations = pair.operations()?;
    let graph = resolver::build_dependency_graph(&operations);

    let visualization = match format {
        VisualizationFormat::Mermaid => render::generate_mermaid_diagram(&graph),
        VisualizationFormat::Dot => render::generate_dot_diagram(&graph),
        VisualizationFormat::Html => {
            let catalog = OperationCatalog::from_definitions(operations)?;
            let order = resolver::execution_order(&graph);
            render::generate_html_report(&graph, Some(&catalog), Some(&order), results)
        }
    };

    Ok(VisualizationResponse { visualization })
}

pub fn minimal_set(pair: MigrationPair, goal: OperationType) -> Result<MinimalSetResponse> {
    let operations = pair.operations()?;
    let graph = resolver::build_dependency_graph(&operations);
    Ok(MinimalSetResponse {
        operations: resolver::calculate_minimal_operation_set(&graph, &goal),
    })
}

pub fn check_params(
    provider: ProviderId,
    operation: OperationType,
    params: &Map<String, Value>,
) -> Result<ParameterCheckResponse> {
    let contract = ProviderApiContract::for_provider(provider)?;
    let errors = contract.check_parameters(operation, params);
    Ok(ParameterCheckResponse {
        valid: errors.is_empty(),
        errors,
    })
}
