//! Named cubic graphs used by `setup`, the cross-check command and tests

use super::cubic::CubicGraph;
use super::io::GraphRecord;

/// Complete graph on four vertices
pub fn k4() -> CubicGraph {
    CubicGraph::new(vec![[1, 2, 3], [0, 2, 3], [0, 1, 3], [0, 1, 2]])
}

/// Complete bipartite graph K3,3
pub fn k33() -> CubicGraph {
    CubicGraph::new(vec![
        [3, 4, 5],
        [3, 4, 5],
        [3, 4, 5],
        [0, 1, 2],
        [0, 1, 2],
        [0, 1, 2],
    ])
}

/// Triangular prism
pub fn prism() -> CubicGraph {
    CubicGraph::new(vec![
        [1, 2, 3],
        [0, 2, 4],
        [0, 1, 5],
        [0, 4, 5],
        [1, 3, 5],
        [2, 3, 4],
    ])
}

/// Three-dimensional hypercube
pub fn cube() -> CubicGraph {
    CubicGraph::new(vec![
        [1, 3, 4],
        [0, 2, 5],
        [1, 3, 6],
        [0, 2, 7],
        [0, 5, 7],
        [1, 4, 6],
        [2, 5, 7],
        [3, 4, 6],
    ])
}

/// Petersen graph, labelled breadth-first from vertex 0
pub fn petersen() -> CubicGraph {
    CubicGraph::new(vec![
        [1, 2, 3],
        [0, 4, 5],
        [0, 6, 7],
        [0, 8, 9],
        [1, 7, 8],
        [1, 6, 9],
        [2, 5, 8],
        [2, 4, 9],
        [3, 4, 6],
        [3, 5, 7],
    ])
}

/// Two copies of K4, each with one edge subdivided, joined through the
/// subdivision vertices 4 and 9. Exactly one bridge and one decomposition.
pub fn bridged_k4_pair() -> CubicGraph {
    CubicGraph::new(vec![
        [1, 2, 3],
        [0, 2, 4],
        [0, 1, 3],
        [0, 2, 4],
        [1, 3, 9],
        [6, 7, 8],
        [5, 7, 9],
        [5, 6, 8],
        [5, 7, 9],
        [6, 8, 4],
    ])
}

/// Twelve vertices with a single bridge (0-3) and no MED decomposition
pub fn bridged_twelve() -> CubicGraph {
    CubicGraph::new(vec![
        [9, 3, 10],
        [3, 11, 7],
        [7, 5, 4],
        [1, 0, 7],
        [2, 11, 5],
        [11, 2, 4],
        [8, 10, 9],
        [2, 3, 1],
        [10, 9, 6],
        [0, 8, 6],
        [8, 6, 0],
        [1, 5, 4],
    ])
}

/// Every catalog graph with its name
pub fn all() -> Vec<(&'static str, CubicGraph)> {
    vec![
        ("k4", k4()),
        ("k33", k33()),
        ("prism", prism()),
        ("cube", cube()),
        ("petersen", petersen()),
        ("bridged_k4_pair", bridged_k4_pair()),
        ("bridged_twelve", bridged_twelve()),
    ]
}

/// Catalog graphs as input records, numbered from 1
pub fn records() -> Vec<GraphRecord> {
    all()
        .into_iter()
        .enumerate()
        .map(|(index, (_, graph))| GraphRecord {
            id: index as i64 + 1,
            graph,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::io::validate_rows;

    #[test]
    fn test_catalog_graphs_are_well_formed() {
        for (name, graph) in all() {
            let rows: Vec<[i64; 3]> = graph
                .adjacency()
                .iter()
                .map(|r| [r[0] as i64, r[1] as i64, r[2] as i64])
                .collect();
            assert!(validate_rows(1, &rows).is_ok(), "{} is malformed", name);
            assert_eq!(graph.edge_count() * 2, graph.vertex_count() * 3);
        }
    }

    #[test]
    fn test_records_numbering() {
        let records = records();
        assert_eq!(records.len(), 7);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[4].graph.vertex_count(), 10);
    }
}
