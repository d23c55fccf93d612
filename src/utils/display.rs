//! Display and output formatting utilities

use crate::decomposition::Decomposition;
use crate::graph::{BridgeDetector, CubicGraph, Traversal};
use itertools::Itertools;

/// Format graphs and decompositions for reports and the console
pub struct DecompositionFormatter;

impl DecompositionFormatter {
    /// One line per vertex: each neighbor followed by the type of the edge to it,
    /// e.g. `1M 2C 3C`
    pub fn format_coloring(graph: &CubicGraph, decomposition: &Decomposition) -> String {
        let mut output = String::new();
        for v in 0..graph.vertex_count() {
            let line = (0..3)
                .map(|slot| format!("{}{}", graph.neighbor(v, slot), decomposition.get(v, slot)))
                .join(" ");
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// Adjacency list, traversal orders and bridge statistics of one graph
    pub fn format_graph_summary(id: i64, graph: &CubicGraph) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Graph {} ===\n", id));
        output.push_str(&format!(
            "Vertices: {}  Edges: {}\n",
            graph.vertex_count(),
            graph.edge_count()
        ));
        output.push_str(&graph.to_string());
        output.push_str(&format!(
            "DFS order: {}\n",
            graph.search_order(Traversal::Dfs).iter().join(" ")
        ));
        output.push_str(&format!(
            "BFS order: {}\n",
            graph.search_order(Traversal::Bfs).iter().join(" ")
        ));

        let bridges = graph.bridges_count();
        output.push_str(&format!("Bridges: {}", bridges));
        if bridges == 0 {
            output.push_str(" (bridgeless)");
        }
        output.push('\n');
        output.push_str(&format!(
            "Bridges (brute force): {}\n",
            BridgeDetector::count_bridges_naive(graph)
        ));

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::BacktrackingDecomposer;
    use crate::graph::catalog;

    #[test]
    fn test_coloring_lines() {
        let graph = catalog::k4();
        let decomposition = BacktrackingDecomposer::new(&graph).decomposition();
        let coloring = DecompositionFormatter::format_coloring(&graph, &decomposition);

        let lines: Vec<&str> = coloring.lines().collect();
        assert_eq!(lines.len(), 4);
        for (v, line) in lines.iter().enumerate() {
            let tokens: Vec<&str> = line.split(' ').collect();
            assert_eq!(tokens.len(), 3);
            for (slot, token) in tokens.iter().enumerate() {
                assert!(token.starts_with(&graph.neighbor(v, slot).to_string()));
                assert!(!token.ends_with('-'));
            }
        }
    }

    #[test]
    fn test_unassigned_coloring_uses_dashes() {
        let graph = catalog::k4();
        let coloring = DecompositionFormatter::format_coloring(&graph, &Decomposition::empty(4));
        assert_eq!(coloring.lines().next(), Some("1- 2- 3-"));
    }

    #[test]
    fn test_graph_summary() {
        let summary = DecompositionFormatter::format_graph_summary(7, &catalog::bridged_k4_pair());
        assert!(summary.contains("=== Graph 7 ==="));
        assert!(summary.contains("Vertices: 10  Edges: 15"));
        assert!(summary.contains("Bridges: 1\n"));
        assert!(summary.contains("Bridges (brute force): 1"));

        let summary = DecompositionFormatter::format_graph_summary(1, &catalog::petersen());
        assert!(summary.contains("DFS order: 0 1 4 7 2 6 5 9 3 8"));
        assert!(summary.contains("(bridgeless)"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
