//! Reading and writing batches of cubic graphs
//!
//! Format: whitespace-separated integers. The number of graphs comes first,
//! then for each graph its identifier, its vertex count `n` and `n` rows of
//! three neighbor indices.

use super::catalog;
use super::cubic::{CubicGraph, Vertex};
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// A graph as read from input, tagged with its identifier
#[derive(Debug, Clone)]
pub struct GraphRecord {
    pub id: i64,
    pub graph: CubicGraph,
}

/// Malformed graph input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphFormatError {
    #[error("unexpected end of input while reading {what}")]
    MissingToken { what: String },

    #[error("expected an integer for {what}, found '{token}'")]
    NotAnInteger { what: String, token: String },

    #[error("{what} must not be negative, found {value}")]
    Negative { what: String, value: i64 },

    #[error("graph {graph} has no vertices")]
    EmptyGraph { graph: i64 },

    #[error("graph {graph}: vertex {vertex} lists neighbor {neighbor}, outside 0..{count}")]
    NeighborOutOfRange {
        graph: i64,
        vertex: usize,
        neighbor: i64,
        count: usize,
    },

    #[error("graph {graph}: vertex {vertex} lists itself as a neighbor")]
    SelfLoop { graph: i64, vertex: usize },

    #[error("graph {graph}: vertex {vertex} lists neighbor {neighbor} more than once")]
    RepeatedNeighbor {
        graph: i64,
        vertex: usize,
        neighbor: usize,
    },

    #[error("graph {graph}: vertex {vertex} lists {neighbor}, but {neighbor} does not list {vertex}")]
    Asymmetric {
        graph: i64,
        vertex: usize,
        neighbor: usize,
    },
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            inner: content.split_whitespace(),
        }
    }

    fn next_int(&mut self, what: impl Fn() -> String) -> Result<i64, GraphFormatError> {
        let token = self
            .inner
            .next()
            .ok_or_else(|| GraphFormatError::MissingToken { what: what() })?;
        token.parse().map_err(|_| GraphFormatError::NotAnInteger {
            what: what(),
            token: token.to_string(),
        })
    }

    fn next_count(&mut self, what: impl Fn() -> String) -> Result<usize, GraphFormatError> {
        let value = self.next_int(&what)?;
        usize::try_from(value).map_err(|_| GraphFormatError::Negative { what: what(), value })
    }
}

/// Parse a batch of graphs from a string
pub fn parse_graphs(content: &str) -> Result<Vec<GraphRecord>, GraphFormatError> {
    let mut tokens = Tokens::new(content);
    let count = tokens.next_count(|| "graph count".to_string())?;
    // counts are untrusted until their tokens have been read
    let mut records = Vec::new();

    for index in 0..count {
        let id = tokens.next_int(|| format!("identifier of graph #{}", index + 1))?;
        let n = tokens.next_count(|| format!("vertex count of graph {}", id))?;

        let mut rows = Vec::new();
        for v in 0..n {
            let mut row = [0i64; 3];
            for (slot, entry) in row.iter_mut().enumerate() {
                *entry = tokens.next_int(|| format!("neighbor {} of vertex {} in graph {}", slot, v, id))?;
            }
            rows.push(row);
        }

        let adjacency = validate_rows(id, &rows)?;
        records.push(GraphRecord {
            id,
            graph: CubicGraph::new(adjacency),
        });
    }

    Ok(records)
}

/// Check that raw rows describe a simple cubic graph and convert them
pub fn validate_rows(id: i64, rows: &[[i64; 3]]) -> Result<Vec<[Vertex; 3]>, GraphFormatError> {
    let n = rows.len();
    if n == 0 {
        return Err(GraphFormatError::EmptyGraph { graph: id });
    }

    let mut adjacency = Vec::with_capacity(n);
    for (v, row) in rows.iter().enumerate() {
        let mut converted = [0usize; 3];
        for (slot, &neighbor) in row.iter().enumerate() {
            let u = usize::try_from(neighbor)
                .ok()
                .filter(|&u| u < n)
                .ok_or(GraphFormatError::NeighborOutOfRange {
                    graph: id,
                    vertex: v,
                    neighbor,
                    count: n,
                })?;
            if u == v {
                return Err(GraphFormatError::SelfLoop { graph: id, vertex: v });
            }
            if converted[..slot].contains(&u) {
                return Err(GraphFormatError::RepeatedNeighbor {
                    graph: id,
                    vertex: v,
                    neighbor: u,
                });
            }
            converted[slot] = u;
        }
        adjacency.push(converted);
    }

    for (v, row) in adjacency.iter().enumerate() {
        for &u in row {
            if !adjacency[u].contains(&v) {
                return Err(GraphFormatError::Asymmetric {
                    graph: id,
                    vertex: v,
                    neighbor: u,
                });
            }
        }
    }

    Ok(adjacency)
}

/// Read a batch of graphs from any reader, e.g. stdin
pub fn read_graphs<R: Read>(mut reader: R) -> Result<Vec<GraphRecord>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("Failed to read graph input")?;
    Ok(parse_graphs(&content)?)
}

/// Load a batch of graphs from a text file
pub fn load_graphs_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<GraphRecord>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read graph file: {}", path.as_ref().display()))?;

    parse_graphs(&content)
        .with_context(|| format!("Failed to parse graphs from file: {}", path.as_ref().display()))
}

/// Convert graph records to the batch text format
pub fn graphs_to_string(records: &[GraphRecord]) -> String {
    let mut result = format!("{}\n", records.len());
    for record in records {
        result.push_str(&format!("{} {}\n", record.id, record.graph.vertex_count()));
        for row in record.graph.adjacency() {
            result.push_str(&format!("{} {} {}\n", row[0], row[1], row[2]));
        }
    }
    result
}

/// Save graph records to a text file
pub fn save_graphs_to_file<P: AsRef<Path>>(records: &[GraphRecord], path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, graphs_to_string(records))
        .with_context(|| format!("Failed to write graphs to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Write the catalog graphs to `<output_dir>/catalog.txt`
pub fn create_catalog_file<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let path = output_dir.as_ref().join("catalog.txt");
    save_graphs_to_file(&catalog::records(), &path)?;
    tracing::info!("Wrote catalog graphs to {}", path.display());
    Ok(())
}
