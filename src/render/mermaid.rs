use crate::graph::DependencyGraph;

use std::fmt::{Display, Write};
use std::hash::Hash;

/// Render the graph as a Mermaid flowchart.
///
/// Arrows follow execution order: `DEP --> DEPENDENT`. An empty graph renders
/// as the bare `flowchart TD` header.
pub fn generate_mermaid_diagram<N>(graph: &DependencyGraph<N>) -> String
where
    N: Clone + Eq + Hash + Display,
{
    let mut out = String::from("flowchart TD\n");

    for node in graph.nodes() {
        let label = node.to_string();
        let _ = writeln!(
            out,
            "    {}[\"{}\"]",
            mermaid_id(&label),
            label.replace('"', "#quot;")
        );
    }
    for (dependent, dependency) in graph.edges() {
        let _ = writeln!(
            out,
            "    {} --> {}",
            mermaid_id(&dependency.to_string()),
            mermaid_id(&dependent.to_string())
        );
    }

    out
}

/// Mermaid node ids must be bare words.
pub(crate) fn mermaid_id(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_graph_is_bare_header() {
        let graph = DependencyGraph::<&str>::new();
        assert_eq!(generate_mermaid_diagram(&graph), "flowchart TD\n");
    }

    #[test]
    fn edges_point_from_dependency_to_dependent() {
        let mut graph = DependencyGraph::new();
        graph.add_node("AUTHENTICATE");
        graph.add_dependency("GET_PROJECTS", "AUTHENTICATE");

        assert_eq!(
            generate_mermaid_diagram(&graph),
            "flowchart TD\n\
             \x20   AUTHENTICATE[\"AUTHENTICATE\"]\n\
             \x20   GET_PROJECTS[\"GET_PROJECTS\"]\n\
             \x20   AUTHENTICATE --> GET_PROJECTS\n"
        );
    }

    #[test]
    fn cyclic_graph_still_renders() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A", "B");
        graph.add_dependency("B", "A");
        let out = generate_mermaid_diagram(&graph);
        assert!(out.contains("B --> A"));
        assert!(out.contains("A --> B"));
    }

    #[test]
    fn ids_are_sanitized() {
        assert_eq!(mermaid_id("get test-cases"), "get_test_cases");
    }
}
