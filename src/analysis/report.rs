//! Per-graph results and their text/JSON rendering

use crate::config::{AnalysisMode, EngineBackend};
use crate::decomposition::Decomposition;
use anyhow::{Context, Result};
use serde::Serialize;

/// Result of analysing one graph. Fields a mode does not compute stay `None`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub id: i64,
    pub vertices: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridgeless: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decomposable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decomposition: Option<Decomposition>,
    /// Set when the validator was run on the produced decomposition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    /// Pre-rendered coloring lines for text output
    #[serde(skip)]
    pub coloring: Option<String>,
}

impl GraphReport {
    pub fn new(id: i64, vertices: usize) -> Self {
        Self {
            id,
            vertices,
            bridgeless: None,
            decomposable: None,
            count: None,
            decomposition: None,
            verified: None,
            coloring: None,
        }
    }

    /// Decomposable according to the engine; graphs skipped for having a
    /// bridge report `false` here
    pub fn is_decomposable(&self) -> bool {
        self.decomposable.unwrap_or(false)
    }
}

/// Results of one batch
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub mode: AnalysisMode,
    pub backend: EngineBackend,
    pub graphs: Vec<GraphReport>,
    pub elapsed_ms: u64,
}

impl AnalysisReport {
    /// Plain text in the layout of the selected mode
    pub fn render_text(&self, show_time: bool) -> String {
        let mut out = String::new();

        match self.mode {
            AnalysisMode::OnlyResult => {
                for graph in &self.graphs {
                    out.push_str(&format!("{}: {}\n", graph.id, graph.is_decomposable()));
                }
            }
            AnalysisMode::NotDecomposable => {
                out.push_str("Not decomposable graphs:\n");
                for graph in self.graphs.iter().filter(|g| !g.is_decomposable()) {
                    out.push_str(&format!("{}\n", graph.id));
                }
            }
            AnalysisMode::NotDecomposableBridgeless => {
                out.push_str("Not decomposable and bridgeless graphs:\n");
                for graph in self
                    .graphs
                    .iter()
                    .filter(|g| g.bridgeless == Some(true) && !g.is_decomposable())
                {
                    out.push_str(&format!("{}\n", graph.id));
                }
            }
            AnalysisMode::Coloring => {
                for graph in &self.graphs {
                    out.push_str(&format!("graph {}:\n", graph.id));
                    match (&graph.coloring, graph.is_decomposable()) {
                        (Some(coloring), true) => out.push_str(coloring),
                        _ => out.push_str("false\n"),
                    }
                }
            }
            AnalysisMode::Count => {
                for graph in &self.graphs {
                    out.push_str(&format!("{}: {}\n", graph.id, graph.count.unwrap_or(0)));
                }
            }
        }

        if show_time {
            out.push_str(&format!("execution time: {} milliseconds\n", self.elapsed_ms));
        }

        out
    }

    pub fn render_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize analysis report")
    }

    /// Ids of graphs the engine found no decomposition for
    pub fn not_decomposable_ids(&self) -> Vec<i64> {
        self.graphs
            .iter()
            .filter(|g| g.decomposable == Some(false))
            .map(|g| g.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(mode: AnalysisMode, graphs: Vec<GraphReport>) -> AnalysisReport {
        AnalysisReport {
            mode,
            backend: EngineBackend::Backtracking,
            graphs,
            elapsed_ms: 12,
        }
    }

    fn graph(id: i64, bridgeless: bool, decomposable: Option<bool>) -> GraphReport {
        GraphReport {
            bridgeless: Some(bridgeless),
            decomposable,
            ..GraphReport::new(id, 4)
        }
    }

    #[test]
    fn test_only_result() {
        let report = report(
            AnalysisMode::OnlyResult,
            vec![graph(1, true, Some(true)), graph(2, false, Some(false))],
        );
        assert_eq!(report.render_text(false), "1: true\n2: false\n");
        assert_eq!(
            report.render_text(true),
            "1: true\n2: false\nexecution time: 12 milliseconds\n"
        );
    }

    #[test]
    fn test_not_decomposable_headers() {
        let graphs = vec![
            graph(1, true, Some(true)),
            graph(2, false, Some(false)),
            graph(3, true, Some(false)),
            graph(4, false, None),
        ];

        let text = report(AnalysisMode::NotDecomposable, graphs.clone()).render_text(false);
        assert_eq!(text, "Not decomposable graphs:\n2\n3\n4\n");

        let text = report(AnalysisMode::NotDecomposableBridgeless, graphs).render_text(false);
        assert_eq!(text, "Not decomposable and bridgeless graphs:\n3\n");
    }

    #[test]
    fn test_coloring_and_count() {
        let mut colored = graph(5, true, Some(true));
        colored.coloring = Some("1M 2C 3C\n".to_string());
        let text = report(AnalysisMode::Coloring, vec![colored, graph(6, true, Some(false))])
            .render_text(false);
        assert_eq!(text, "graph 5:\n1M 2C 3C\ngraph 6:\nfalse\n");

        let mut counted = graph(7, true, Some(true));
        counted.count = Some(15);
        let text = report(AnalysisMode::Count, vec![counted]).render_text(false);
        assert_eq!(text, "7: 15\n");
    }

    #[test]
    fn test_json_skips_missing_fields() {
        let report = report(AnalysisMode::OnlyResult, vec![graph(1, true, Some(true))]);
        let json = report.render_json().unwrap();
        assert!(json.contains("\"mode\": \"only_result\""));
        assert!(json.contains("\"decomposable\": true"));
        assert!(!json.contains("\"count\""));
        assert!(!json.contains("coloring"));
        assert_eq!(report.not_decomposable_ids(), Vec::<i64>::new());
    }
}
