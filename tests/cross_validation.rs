use med_tester::analysis::{cross_check, GraphAnalyser};
use med_tester::config::{AnalysisMode, EngineBackend, Settings};
use med_tester::decomposition::{check_cycles, check_double_stars, BacktrackingDecomposer, DecompositionValidator};
use med_tester::graph::{catalog, io, BridgeDetector, CubicGraph};
use med_tester::sat::SatDecomposer;

const EXPECTED: [(&str, u64, usize); 7] = [
    ("k4", 3, 0),
    ("k33", 6, 0),
    ("prism", 3, 0),
    ("cube", 9, 0),
    ("petersen", 15, 0),
    ("bridged_k4_pair", 1, 1),
    ("bridged_twelve", 0, 1),
];

fn two_k4s() -> CubicGraph {
    CubicGraph::new(vec![
        [1, 2, 3],
        [0, 2, 3],
        [0, 1, 3],
        [0, 1, 2],
        [5, 6, 7],
        [4, 6, 7],
        [4, 5, 7],
        [4, 5, 6],
    ])
}

#[test]
fn catalog_counts_and_bridges() {
    for ((name, graph), (expected_name, count, bridges)) in catalog::all().into_iter().zip(EXPECTED) {
        assert_eq!(name, expected_name);
        assert_eq!(graph.bridges_count(), bridges, "bridges of {}", name);
        assert_eq!(graph.is_bridgeless(), bridges == 0);
        assert_eq!(BridgeDetector::count_bridges_naive(&graph), bridges);

        let mut decomposer = BacktrackingDecomposer::new(&graph);
        assert_eq!(decomposer.decompositions_count(), count, "count of {}", name);
        assert_eq!(decomposer.decompositions_count(), count);
        assert_eq!(decomposer.is_decomposable(), count > 0);
    }
}

#[test]
fn engines_agree_and_witnesses_validate() {
    for (name, graph) in catalog::all() {
        let validator = DecompositionValidator::new(&graph);

        let mut backtracking = BacktrackingDecomposer::new(&graph);
        let mut sat = SatDecomposer::new(&graph);
        let decided = backtracking.is_decomposable();
        assert_eq!(decided, sat.is_decomposable().unwrap(), "engines disagree on {}", name);

        for decomposition in [backtracking.decomposition(), sat.decomposition().unwrap()] {
            if decided {
                assert!(decomposition.is_symmetric(&graph));
                assert!(check_cycles(&graph, &decomposition));
                assert!(check_double_stars(&graph, &decomposition));
                let result = validator.validate(&decomposition);
                assert!(result.is_valid, "{}: {}", name, result);
            } else {
                assert!(decomposition.is_unassigned());
            }
        }
    }
}

#[test]
fn disconnected_graph_is_handled_per_component() {
    let graph = two_k4s();
    assert_eq!(graph.bridges_count(), 0);
    assert_eq!(BacktrackingDecomposer::new(&graph).decompositions_count(), 9);
    assert!(SatDecomposer::new(&graph).is_decomposable().unwrap());
}

#[test]
fn cross_check_on_written_catalog() {
    let dir = tempfile::tempdir().unwrap();
    io::create_catalog_file(dir.path()).unwrap();
    let records = io::load_graphs_from_file(dir.path().join("catalog.txt")).unwrap();

    for record in &records {
        let check = cross_check(record).unwrap();
        assert!(check.agrees(), "{}", check);
    }
}

#[test]
fn batch_analysis_matches_between_backends() {
    let records = catalog::records();
    let mut reports = Vec::new();

    for backend in [EngineBackend::Backtracking, EngineBackend::Sat] {
        let mut settings = Settings::default();
        settings.engine.backend = backend;
        settings.analysis.mode = AnalysisMode::Coloring;
        settings.analysis.verify = true;
        let report = GraphAnalyser::new(settings).analyze_records(&records).unwrap();
        assert_eq!(report.not_decomposable_ids(), vec![7]);
        reports.push(report);
    }

    for (left, right) in reports[0].graphs.iter().zip(&reports[1].graphs) {
        assert_eq!(left.id, right.id);
        assert_eq!(left.decomposable, right.decomposable);
        assert_eq!(left.verified, right.verified);
    }
}
