use crate::graph::DependencyGraph;
use crate::operation::{OperationCatalog, OperationType};
use crate::render::{ExecutionResult, generate_mermaid_diagram};

use std::fmt::Write;

/// Render a self-contained HTML report for an operation graph.
///
/// Sections:
/// - Mermaid diagram (rendered client-side by the Mermaid script)
/// - one detail block per operation; description and parameters come from
///   `catalog` when given
/// - "Execution Order" list when `execution_order` is given
/// - one result block per entry of `execution_results` when given
///
/// The template is filled with `replace` rather than `format!()` because the
/// CSS and JS contain many literal braces.
pub fn generate_html_report(
    graph: &DependencyGraph<OperationType>,
    catalog: Option<&OperationCatalog>,
    execution_order: Option<&[OperationType]>,
    execution_results: Option<&[ExecutionResult]>,
) -> String {
    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Operation Dependency Report</title>
<script src="https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js"></script>
<script>mermaid.initialize({ startOnLoad: true, theme: "default" });</script>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  main { padding: 12px 16px; }
  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }
  .operation { border-bottom: 1px solid #eee; padding: 4px 0 8px; }
  .muted { color: #777; font-size: 12px; }
  .result { padding: 6px 8px; margin: 6px 0; border-radius: 4px; }
  .result.success { background: #eaf7ea; border: 1px solid #b9e2b9; }
  .result.failure { background: #fdecec; border: 1px solid #f2b8b8; }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
</style>
</head>
<body>
<header>
  <h1>Operation Dependency Report</h1>
  <div class="summary">__SUMMARY__</div>
</header>
<main>
<section>
<h2>Dependency Graph</h2>
<pre class="mermaid">
__MERMAID__</pre>
</section>
<section>
<h2>Operations</h2>
__OPERATIONS__</section>
__ORDER____RESULTS__</main>
</body>
</html>
"#;

    let summary = format!(
        "<span class=\"pill\">operations: <b>{}</b></span>\n  \
         <span class=\"pill\">dependencies: <b>{}</b></span>\n  \
         <span class=\"pill\">cyclic: <b>{}</b></span>",
        graph.len(),
        graph.edge_count(),
        graph.has_cycles()
    );

    TEMPLATE
        .replace("__SUMMARY__", &summary)
        .replace("__MERMAID__", &escape_html(&generate_mermaid_diagram(graph)))
        .replace("__OPERATIONS__", &render_operations(graph, catalog))
        .replace(
            "__ORDER__",
            &execution_order.map(render_order).unwrap_or_default(),
        )
        .replace(
            "__RESULTS__",
            &execution_results.map(render_results).unwrap_or_default(),
        )
}

fn render_operations(
    graph: &DependencyGraph<OperationType>,
    catalog: Option<&OperationCatalog>,
) -> String {
    let mut out = String::new();
    for op in graph.nodes() {
        let _ = writeln!(out, "<div class=\"operation\" id=\"op-{}\">", op);
        let _ = writeln!(out, "<h3>{}</h3>", op);

        match catalog.and_then(|c| c.get(*op)) {
            Some(def) => {
                let _ = writeln!(out, "<p>{}</p>", escape_html(&def.description));
                if def.required {
                    out.push_str("<p class=\"muted\">required</p>\n");
                }
                if !def.required_params.is_empty() {
                    let params = def
                        .required_params
                        .iter()
                        .map(|p| format!("<code>{}</code>", escape_html(p)))
                        .collect::<Vec<_>>()
                        .join(", ");
                    let _ = writeln!(out, "<p>Parameters: {}</p>", params);
                }
            }
            None if catalog.is_some() => {
                out.push_str("<p class=\"muted\">not defined in this catalog</p>\n");
            }
            None => {}
        }

        let deps = graph.get_dependencies(op);
        if !deps.is_empty() {
            let deps = deps
                .iter()
                .map(OperationType::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "<p class=\"muted\">Depends on: {}</p>", deps);
        }
        out.push_str("</div>\n");
    }
    out
}

fn render_order(order: &[OperationType]) -> String {
    let mut out = String::from("<section>\n<h2>Execution Order</h2>\n<ol>\n");
    for op in order {
        let _ = writeln!(out, "<li>{}</li>", op);
    }
    out.push_str("</ol>\n</section>\n");
    out
}

fn render_results(results: &[ExecutionResult]) -> String {
    let mut out = String::from("<section>\n<h2>Execution Results</h2>\n");
    for result in results {
        let status = if result.success { "success" } else { "failure" };
        let _ = writeln!(out, "<div class=\"result {}\">", status);
        let _ = writeln!(out, "<h3>{}</h3>", result.operation);
        let _ = writeln!(out, "<p>Status: {}</p>", status);
        let _ = writeln!(out, "<p>Duration: {} ms</p>", result.duration_ms);
        let _ = writeln!(out, "<p>Timestamp: {}</p>", escape_html(&result.timestamp));
        if !result.success {
            if let Some(error) = &result.error {
                let _ = writeln!(out, "<p>Error: {}</p>", escape_html(error));
            }
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
    out
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::OperationDefinition;
    use crate::resolver;
    use OperationType::*;

    fn sample() -> (DependencyGraph<OperationType>, OperationCatalog) {
        let defs = vec![
            OperationDefinition::new(Authenticate, "Log in")
                .required()
                .params(&["apiToken"]),
            OperationDefinition::new(GetProjects, "List <all> projects").depends_on([Authenticate]),
        ];
        let graph = resolver::build_dependency_graph(&defs);
        (graph, OperationCatalog::from_definitions(defs).unwrap())
    }

    #[test]
    fn embeds_mermaid_and_details() {
        let (graph, catalog) = sample();
        let html = generate_html_report(&graph, Some(&catalog), None, None);

        assert!(html.contains("mermaid.min.js"));
        assert!(html.contains("mermaid.initialize"));
        assert!(html.contains("flowchart TD"));
        assert!(html.contains("AUTHENTICATE --&gt; GET_PROJECTS"));
        assert!(html.contains("<h3>AUTHENTICATE</h3>"));
        assert!(html.contains("<h3>GET_PROJECTS</h3>"));
        assert!(html.contains("List &lt;all&gt; projects"));
        assert!(html.contains("<code>apiToken</code>"));
        assert!(!html.contains("Execution Order"));
        assert!(!html.contains("__"));
    }

    #[test]
    fn includes_execution_order() {
        let (graph, catalog) = sample();
        let order = resolver::execution_order(&graph);
        let html = generate_html_report(&graph, Some(&catalog), Some(&order), None);

        assert!(html.contains("<h2>Execution Order</h2>"));
        assert!(html.contains("<li>AUTHENTICATE</li>\n<li>GET_PROJECTS</li>"));
    }

    #[test]
    fn includes_results_with_failure_message() {
        let (graph, _) = sample();
        let results = vec![
            ExecutionResult {
                operation: Authenticate,
                success: true,
                duration_ms: 120,
                timestamp: "2024-05-01T10:00:00Z".to_string(),
                error: None,
            },
            ExecutionResult {
                operation: GetProjects,
                success: false,
                duration_ms: 3400,
                timestamp: "2024-05-01T10:00:01Z".to_string(),
                error: Some("HTTP 503 <gateway>".to_string()),
            },
        ];
        let html = generate_html_report(&graph, None, None, Some(&results));

        assert!(html.contains("<div class=\"result success\">"));
        assert!(html.contains("<div class=\"result failure\">"));
        assert!(html.contains("Duration: 3400 ms"));
        assert!(html.contains("Timestamp: 2024-05-01T10:00:01Z"));
        assert!(html.contains("Error: HTTP 503 &lt;gateway&gt;"));
    }

    #[test]
    fn tolerates_cycles_and_unknown_definitions() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(GetProjects, GetTestCases);
        graph.add_dependency(GetTestCases, GetProjects);
        let catalog = OperationCatalog::default();

        let html = generate_html_report(&graph, Some(&catalog), None, None);
        assert!(html.contains("cyclic: <b>true</b>"));
        assert!(html.contains("not defined in this catalog"));
    }
}
