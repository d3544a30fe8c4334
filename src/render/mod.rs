//! Graph visualizer: Mermaid, Graphviz DOT and a standalone HTML report.
//!
//! Rendering is read-only and performs no validation, so cyclic or otherwise
//! broken graphs can be rendered for debugging.

mod dot;
mod html;
mod mermaid;

pub use dot::generate_dot_diagram;
pub use html::generate_html_report;
pub use mermaid::generate_mermaid_diagram;

use crate::Result;
use crate::operation::OperationType;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Outcome of running one operation, as reported by the migration engine.
///
/// JSON: {"operation": "GET_PROJECTS", "success": false, "durationMs": 812,
///        "timestamp": "2024-05-01T10:00:00Z", "error": "HTTP 503"}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub operation: OperationType,
    pub success: bool,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Parse a JSON array of results.
    pub fn list_from_json(text: &str) -> Result<Vec<ExecutionResult>> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationFormat {
    #[default]
    Html,
    Mermaid,
    Dot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_result_list() {
        let results = ExecutionResult::list_from_json(
            r#"[{"operation": "AUTHENTICATE", "success": true, "durationMs": 5,
                 "timestamp": "2024-05-01T10:00:00Z"},
                {"operation": "GET_PROJECTS", "success": false, "error": "boom"}]"#,
        )
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].duration_ms, 5);
        assert_eq!(results[1].error.as_deref(), Some("boom"));
        assert_eq!(results[1].timestamp, "");
    }
}
