//! Generic dependency graph.
//!
//! Knows nothing about operations: nodes are any `Clone + Eq + Hash` token.
//! The resolver instantiates it with `OperationType`; tests use plain strings.

mod dependency_graph;

pub use dependency_graph::DependencyGraph;
