use med_tester::decomposition::{BacktrackingDecomposer, DecompositionValidator};
use med_tester::graph::{BridgeDetector, CubicGraph, Traversal};
use med_tester::sat::SatDecomposer;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Random simple cubic edge list on `n` vertices by pairing stubs and
/// rejecting loops and parallel edges
fn random_cubic_edges(rng: &mut StdRng, n: usize) -> Vec<(usize, usize)> {
    loop {
        let mut stubs: Vec<usize> = (0..n).flat_map(|v| [v, v, v]).collect();
        stubs.shuffle(rng);

        let mut edges: Vec<(usize, usize)> = Vec::with_capacity(stubs.len() / 2);
        let simple = stubs.chunks(2).all(|pair| {
            let (u, v) = (pair[0].min(pair[1]), pair[0].max(pair[1]));
            if u == v || edges.contains(&(u, v)) {
                return false;
            }
            edges.push((u, v));
            true
        });
        if simple {
            return edges;
        }
    }
}

fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> CubicGraph {
    let mut rows: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &(u, v) in edges {
        rows[u].push(v);
        rows[v].push(u);
    }
    CubicGraph::new(rows.into_iter().map(|row| [row[0], row[1], row[2]]).collect())
}

/// Two random cubic pieces, each with one edge subdivided, joined by a bridge
/// between the subdivision vertices
fn bridged_pair_edges(rng: &mut StdRng, n1: usize, n2: usize) -> (usize, Vec<(usize, usize)>) {
    let mut edges = Vec::new();

    let mut left = random_cubic_edges(rng, n1);
    let (a, b) = left.remove(0);
    edges.extend(left);
    let x1 = n1 + n2;
    edges.extend([(a, x1), (b, x1)]);

    let right = random_cubic_edges(rng, n2);
    let (c, d) = right[0];
    edges.extend(right[1..].iter().map(|&(u, v)| (u + n1, v + n1)));
    let x2 = x1 + 1;
    edges.extend([(c + n1, x2), (d + n1, x2)]);

    edges.push((x1, x2));
    (n1 + n2 + 2, edges)
}

fn assert_engines_agree(graph: &CubicGraph, label: &str) {
    let validator = DecompositionValidator::new(graph);

    let mut dfs = BacktrackingDecomposer::with_traversal(graph, Traversal::Dfs);
    let mut bfs = BacktrackingDecomposer::with_traversal(graph, Traversal::Bfs);
    let count = dfs.decompositions_count();
    assert_eq!(count, bfs.decompositions_count(), "DFS/BFS counts differ on {}", label);

    let mut sat = SatDecomposer::new(graph);
    let decided = sat.is_decomposable().unwrap();
    assert_eq!(decided, count > 0, "SAT disagrees with the count on {}", label);
    assert_eq!(dfs.is_decomposable(), decided);

    if decided {
        let result = validator.validate(&dfs.decomposition());
        assert!(result.is_valid, "{}: {}", label, result);
        let result = validator.validate(&sat.decomposition().unwrap());
        assert!(result.is_valid, "{}: {}", label, result);
    }

    assert_eq!(
        BridgeDetector::count_bridges(graph, false),
        BridgeDetector::count_bridges_naive(graph),
        "bridge counters differ on {}",
        label
    );
}

#[test]
fn random_cubic_graphs() {
    let mut rng = StdRng::seed_from_u64(0x4d45_4400);

    for round in 0..30 {
        let n = [8, 10, 12, 14][round % 4];
        let graph = graph_from_edges(n, &random_cubic_edges(&mut rng, n));
        assert_engines_agree(&graph, &format!("random graph #{} ({} vertices)", round, n));
    }
}

#[test]
fn random_bridged_graphs() {
    let mut rng = StdRng::seed_from_u64(0x4d45_4401);

    for round in 0..12 {
        let (n1, n2) = [(4, 4), (4, 6), (6, 6), (6, 8)][round % 4];
        let (n, edges) = bridged_pair_edges(&mut rng, n1, n2);
        let graph = graph_from_edges(n, &edges);

        assert!(!graph.is_bridgeless());
        assert!(graph.bridges_count() >= 1);
        assert_engines_agree(&graph, &format!("bridged graph #{} ({}+{} vertices)", round, n1, n2));
    }
}
