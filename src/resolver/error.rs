//! Typed failures behind the empty-result contract of the resolver.
//!
//! `resolve_execution_order` and `calculate_minimal_operation_set` collapse
//! these to an empty list; the `try_` variants surface them.

use std::fmt::Display;
use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolveError {
    /// The graph has at least one cycle, so no execution order exists.
    #[error("cycle detected in dependency graph: {path}")]
    CycleDetected {
        /// Cycle members joined with ` -> `
        path: String,
    },

    /// The goal operation is not a node of the graph.
    #[error("goal operation not found in dependency graph: {goal}")]
    GoalNotFound { goal: String },
}

impl ResolveError {
    pub fn cycle<N: Display>(members: &[N]) -> Self {
        let path = members
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::CycleDetected { path }
    }

    pub fn goal_not_found(goal: impl Display) -> Self {
        Self::GoalNotFound {
            goal: goal.to_string(),
        }
    }
}
