//! Structured validation results.
//!
//! Validation never fails: every problem becomes a `ValidationError` so the
//! caller can inspect `{ valid, errors }` before acting.
//!
//! JSON shape:
//! {"valid": false, "errors": [
//!   {"type": "missing_operation", "operation": "GET_PROJECTS",
//!    "missingDependency": "AUTHENTICATE", "message": "..."},
//!   {"type": "circular_dependency", "cycle": ["A", "B", "A"], "message": "..."}
//! ]}

use crate::operation::OperationType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationError {
    /// A declared dependency has no definition.
    #[serde(rename_all = "camelCase")]
    MissingOperation {
        operation: OperationType,
        missing_dependency: OperationType,
        message: String,
    },

    /// The dependency graph contains a cycle. `cycle` lists one detected
    /// cycle with its first member repeated at the end.
    #[serde(rename_all = "camelCase")]
    CircularDependency {
        cycle: Vec<OperationType>,
        message: String,
    },
}

impl ValidationError {
    pub fn missing_operation(operation: OperationType, missing: OperationType) -> Self {
        Self::MissingOperation {
            operation,
            missing_dependency: missing,
            message: format!(
                "operation {} depends on {}, which is not defined",
                operation, missing
            ),
        }
    }

    pub fn circular_dependency(cycle: Vec<OperationType>) -> Self {
        let path = cycle
            .iter()
            .map(OperationType::as_str)
            .collect::<Vec<_>>()
            .join(" -> ");
        Self::CircularDependency {
            message: format!("circular dependency detected: {}", path),
            cycle,
        }
    }

    /// Wire name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingOperation { .. } => "missing_operation",
            ValidationError::CircularDependency { .. } => "circular_dependency",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::MissingOperation { message, .. }
            | ValidationError::CircularDependency { message, .. } => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn count_of(&self, kind: &str) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }
}
