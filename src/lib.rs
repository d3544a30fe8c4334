//! Operation dependency resolution for test-management migrations.
//!
//! Provider API operations form a directed graph: an operation depends on the
//! operations that must run before it. This crate builds that graph from
//! operation definitions, validates it, orders it for execution, computes
//! the minimal subset needed for a goal, and renders it for operators.
//!
//! ```
//! use opgraph::operation::{OperationDefinition, OperationType::*};
//! use opgraph::resolver;
//!
//! let ops = vec![
//!     OperationDefinition::new(Authenticate, "log in"),
//!     OperationDefinition::new(GetProjects, "list projects").depends_on([Authenticate]),
//! ];
//! assert!(resolver::validate_dependencies(&ops).valid);
//! assert_eq!(resolver::resolve_execution_order(&ops), vec![Authenticate, GetProjects]);
//! ```

pub mod api;
pub mod contract;
pub mod diagnostics;
pub mod graph;
pub mod operation;
pub mod render;
pub mod resolver;

pub type Result<T> = anyhow::Result<T>;
