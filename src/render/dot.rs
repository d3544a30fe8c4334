use crate::graph::DependencyGraph;

use std::fmt::{Display, Write};
use std::hash::Hash;

const HEADER: &str = "digraph DependencyGraph {\n  rankdir=LR;\n  node [shape=box, style=filled, fillcolor=lightblue];\n";
const FOOTER: &str = "}\n";

/// Render the graph in Graphviz DOT.
///
/// Edges run dependency -> dependent. Nodes without any edge get a
/// standalone declaration so they still show up.
pub fn generate_dot_diagram<N>(graph: &DependencyGraph<N>) -> String
where
    N: Clone + Eq + Hash + Display,
{
    let mut out = String::from(HEADER);

    for (dependent, dependency) in graph.edges() {
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\";",
            dot_escape(&dependency.to_string()),
            dot_escape(&dependent.to_string())
        );
    }
    for node in graph.nodes() {
        if graph.get_dependencies(node).is_empty() && graph.get_dependents(node).is_empty() {
            let _ = writeln!(out, "  \"{}\";", dot_escape(&node.to_string()));
        }
    }

    out.push_str(FOOTER);
    out
}

fn dot_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_graph_is_header_and_footer() {
        let graph = DependencyGraph::<&str>::new();
        assert_eq!(
            generate_dot_diagram(&graph),
            format!("{}{}", HEADER, FOOTER)
        );
    }

    #[test]
    fn edges_and_isolated_nodes() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("GET_PROJECTS", "AUTHENTICATE");
        graph.add_node("GET_USERS");

        let out = generate_dot_diagram(&graph);
        assert!(out.starts_with("digraph DependencyGraph {\n  rankdir=LR;\n"));
        assert!(out.contains("  \"AUTHENTICATE\" -> \"GET_PROJECTS\";\n"));
        assert!(out.contains("  \"GET_USERS\";\n"));
        assert!(!out.contains("  \"AUTHENTICATE\";\n"));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn quotes_are_escaped() {
        let mut graph = DependencyGraph::new();
        graph.add_node("say \"hi\"");
        assert!(generate_dot_diagram(&graph).contains(r#"  "say \"hi\"";"#));
    }
}
