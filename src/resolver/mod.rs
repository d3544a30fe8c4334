//! Dependency resolver: turns a flat operation list into an executable plan.
//!
//! - `build_dependency_graph`: definitions -> graph
//! - `validate_dependencies`: missing definitions + cycles, aggregated
//! - `resolve_execution_order`: dependency-first linear order
//! - `calculate_minimal_operation_set`: goal plus its transitive dependencies
//!
//! Ordering and minimal-set functions never fail. A cyclic graph has no
//! execution order and an unknown goal has no plan; both come back as an
//! empty list. The `try_` variants return the typed reason instead.

mod error;
mod validation;

pub use error::{ResolveError, ResolveResult};
pub use validation::{ValidationError, ValidationReport};

use crate::graph::DependencyGraph;
use crate::operation::{OperationDefinition, OperationType};

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use tracing::{debug, warn};

/// Build a graph with one node per definition and one edge per declared
/// dependency.
///
/// Nodes are added in declaration order first, so definitions keep their
/// relative order in the graph. Undefined dependencies become nodes too.
pub fn build_dependency_graph(
    operations: &[OperationDefinition],
) -> DependencyGraph<OperationType> {
    let mut graph = DependencyGraph::new();
    for op in operations {
        graph.add_node(op.operation_type);
    }
    for op in operations {
        for dep in &op.dependencies {
            graph.add_dependency(op.operation_type, *dep);
        }
    }

    debug!(
        nodes = graph.len(),
        edges = graph.edge_count(),
        "built dependency graph"
    );
    graph
}

/// Check an operation list for undefined dependencies and cycles.
pub fn validate_dependencies(operations: &[OperationDefinition]) -> ValidationReport {
    let graph = build_dependency_graph(operations);
    let defined: HashSet<OperationType> =
        operations.iter().map(|op| op.operation_type).collect();
    validate_graph(&graph, &defined)
}

/// Check a prebuilt graph against the set of defined operations.
///
/// Both checks always run. At most one `circular_dependency` error is
/// reported regardless of how many cycles exist.
pub fn validate_graph(
    graph: &DependencyGraph<OperationType>,
    defined: &HashSet<OperationType>,
) -> ValidationReport {
    let mut errors = Vec::new();

    for (dependent, dependency) in graph.edges() {
        if !defined.contains(dependency) {
            errors.push(ValidationError::missing_operation(*dependent, *dependency));
        }
    }

    if let Some(cycle) = graph.find_cycle() {
        errors.push(ValidationError::circular_dependency(cycle));
    }

    let report = ValidationReport::from_errors(errors);
    if !report.valid {
        debug!(errors = report.errors.len(), "operation set failed validation");
    }
    report
}

/// Execution order for an operation list. Empty if the dependencies are
/// cyclic.
pub fn resolve_execution_order(operations: &[OperationDefinition]) -> Vec<OperationType> {
    execution_order(&build_dependency_graph(operations))
}

/// Execution order for a prebuilt graph. Empty if the graph is cyclic.
pub fn execution_order<N>(graph: &DependencyGraph<N>) -> Vec<N>
where
    N: Clone + Eq + Hash + Display,
{
    match try_execution_order(graph) {
        Ok(order) => order,
        Err(err) => {
            warn!(error = %err, "no execution order available");
            Vec::new()
        }
    }
}

/// Topological order by DFS post-order.
///
/// Roots are taken in graph insertion order and each node's dependencies in
/// their declared order, so for a given input the output is deterministic.
/// Every dependency lands at a strictly lower index than its dependents.
pub fn try_execution_order<N>(graph: &DependencyGraph<N>) -> ResolveResult<Vec<N>>
where
    N: Clone + Eq + Hash + Display,
{
    if let Some(cycle) = graph.find_cycle() {
        return Err(ResolveError::cycle(&cycle));
    }

    let mut visited = HashSet::with_capacity(graph.len());
    let mut order = Vec::with_capacity(graph.len());
    for node in graph.nodes() {
        post_order(node, graph, &mut visited, &mut order);
    }
    Ok(order)
}

/// Goal plus everything it transitively depends on. Empty if `goal` is not
/// in the graph.
pub fn calculate_minimal_operation_set<N>(graph: &DependencyGraph<N>, goal: &N) -> Vec<N>
where
    N: Clone + Eq + Hash + Display,
{
    match try_minimal_operation_set(graph, goal) {
        Ok(set) => set,
        Err(err) => {
            warn!(error = %err, "no minimal operation set available");
            Vec::new()
        }
    }
}

/// Reachability from `goal` over dependency edges.
///
/// The result is in post-order, which is a valid execution order whenever the
/// reachable subgraph is acyclic. On a cyclic subgraph the members are still
/// all reported, each once.
pub fn try_minimal_operation_set<N>(graph: &DependencyGraph<N>, goal: &N) -> ResolveResult<Vec<N>>
where
    N: Clone + Eq + Hash + Display,
{
    if !graph.contains(goal) {
        return Err(ResolveError::goal_not_found(goal));
    }

    let mut visited = HashSet::new();
    let mut set = Vec::new();
    post_order(goal, graph, &mut visited, &mut set);
    debug!(goal = %goal, size = set.len(), "computed minimal operation set");
    Ok(set)
}

fn post_order<N>(v: &N, graph: &DependencyGraph<N>, visited: &mut HashSet<N>, out: &mut Vec<N>)
where
    N: Clone + Eq + Hash,
{
    // Marking before descending keeps a back edge from looping.
    if !visited.insert(v.clone()) {
        return;
    }
    for dep in graph.dependencies_of(v) {
        post_order(dep, graph, visited, out);
    }
    out.push(v.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use OperationType::*;

    fn op(ty: OperationType, deps: &[OperationType]) -> OperationDefinition {
        OperationDefinition::new(ty, format!("{} operation", ty)).depends_on(deps.iter().copied())
    }

    fn position(order: &[OperationType], ty: OperationType) -> usize {
        order.iter().position(|o| *o == ty).unwrap()
    }

    #[test]
    fn empty_list_builds_empty_graph() {
        let graph = build_dependency_graph(&[]);
        assert!(graph.is_empty());
        assert!(resolve_execution_order(&[]).is_empty());
        assert!(validate_dependencies(&[]).valid);
    }

    #[test]
    fn build_adds_nodes_and_edges() {
        let graph = build_dependency_graph(&[
            op(Authenticate, &[]),
            op(GetProjects, &[Authenticate]),
        ]);
        assert_eq!(graph.get_all_operations(), vec![Authenticate, GetProjects]);
        assert_eq!(graph.get_dependencies(&GetProjects), vec![Authenticate]);
        assert_eq!(graph.get_dependents(&Authenticate), vec![GetProjects]);
    }

    #[test]
    fn build_is_order_independent() {
        let forward = vec![
            op(Authenticate, &[]),
            op(GetProjects, &[Authenticate]),
            op(GetTestCases, &[GetProjects, Authenticate]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();
        reversed[0].dependencies.reverse();

        assert_eq!(
            build_dependency_graph(&forward),
            build_dependency_graph(&reversed)
        );
    }

    #[test]
    fn linear_chain() {
        let ops = vec![
            op(GetTestCases, &[GetProjects]),
            op(Authenticate, &[]),
            op(GetProjects, &[Authenticate]),
        ];
        assert_eq!(
            resolve_execution_order(&ops),
            vec![Authenticate, GetProjects, GetTestCases]
        );

        let graph = build_dependency_graph(&ops);
        let mut set = calculate_minimal_operation_set(&graph, &GetTestCases);
        set.sort();
        assert_eq!(set, vec![Authenticate, GetProjects, GetTestCases]);
    }

    #[test]
    fn diamond() {
        let ops = vec![
            op(Authenticate, &[]),
            op(GetProjects, &[Authenticate]),
            op(GetUsers, &[Authenticate]),
            op(CreateTestCase, &[GetProjects, GetUsers]),
        ];
        let order = resolve_execution_order(&ops);
        assert_eq!(order.len(), 4);
        assert_eq!(order[0], Authenticate);
        assert_eq!(order[3], CreateTestCase);

        let graph = build_dependency_graph(&ops);
        let set = calculate_minimal_operation_set(&graph, &CreateTestCase);
        assert_eq!(set.len(), 4);
        assert_eq!(set.last(), Some(&CreateTestCase));
    }

    #[test]
    fn ties_follow_declaration_order() {
        let ops = vec![
            op(GetUsers, &[]),
            op(Authenticate, &[]),
            op(GetProjects, &[]),
        ];
        assert_eq!(
            resolve_execution_order(&ops),
            vec![GetUsers, Authenticate, GetProjects]
        );
    }

    #[test]
    fn direct_cycle() {
        let ops = vec![op(GetProjects, &[GetTestCases]), op(GetTestCases, &[GetProjects])];
        let graph = build_dependency_graph(&ops);
        assert!(graph.has_cycles());
        assert!(resolve_execution_order(&ops).is_empty());
        assert!(matches!(
            try_execution_order(&graph),
            Err(ResolveError::CycleDetected { .. })
        ));

        let report = validate_dependencies(&ops);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind(), "circular_dependency");
    }

    #[test]
    fn dangling_dependency() {
        let ops = vec![op(GetProjects, &[Authenticate])];
        let report = validate_dependencies(&ops);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![ValidationError::missing_operation(GetProjects, Authenticate)]
        );
    }

    #[test]
    fn validation_aggregates_both_kinds() {
        let ops = vec![
            op(GetProjects, &[GetTestCases, Authenticate]),
            op(GetTestCases, &[GetProjects]),
        ];
        let report = validate_dependencies(&ops);
        assert_eq!(report.count_of("missing_operation"), 1);
        assert_eq!(report.count_of("circular_dependency"), 1);
    }

    #[test]
    fn several_cycles_report_one_error() {
        let ops = vec![
            op(GetProjects, &[GetTestCases]),
            op(GetTestCases, &[GetProjects]),
            op(GetUsers, &[GetFolders]),
            op(GetFolders, &[GetUsers]),
        ];
        assert_eq!(
            validate_dependencies(&ops).count_of("circular_dependency"),
            1
        );
    }

    #[test]
    fn minimal_set_excludes_unrelated_operations() {
        let ops = vec![
            op(Authenticate, &[]),
            op(GetProjects, &[Authenticate]),
            op(GetUsers, &[Authenticate]),
            op(GetTestCases, &[GetProjects]),
        ];
        let graph = build_dependency_graph(&ops);
        assert_eq!(
            calculate_minimal_operation_set(&graph, &GetTestCases),
            vec![Authenticate, GetProjects, GetTestCases]
        );
        assert_eq!(
            calculate_minimal_operation_set(&graph, &Authenticate),
            vec![Authenticate]
        );
    }

    #[test]
    fn minimal_set_for_unknown_goal_is_empty() {
        let graph = build_dependency_graph(&[op(Authenticate, &[])]);
        assert!(calculate_minimal_operation_set(&graph, &UploadAttachment).is_empty());
        assert_eq!(
            try_minimal_operation_set(&graph, &UploadAttachment),
            Err(ResolveError::goal_not_found(UploadAttachment))
        );
    }

    #[test]
    fn minimal_set_survives_cycles() {
        let ops = vec![op(GetProjects, &[GetTestCases]), op(GetTestCases, &[GetProjects])];
        let graph = build_dependency_graph(&ops);
        let mut set = calculate_minimal_operation_set(&graph, &GetProjects);
        set.sort();
        assert_eq!(set, vec![GetProjects, GetTestCases]);
    }

    #[test]
    fn undefined_dependencies_are_still_ordered() {
        let ops = vec![op(GetProjects, &[Authenticate])];
        let order = resolve_execution_order(&ops);
        assert!(position(&order, Authenticate) < position(&order, GetProjects));
    }
}
