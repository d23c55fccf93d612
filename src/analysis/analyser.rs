//! Batch analysis of graph records

use super::engine::DecompositionEngine;
use super::report::{AnalysisReport, GraphReport};
use crate::config::{AnalysisMode, OutputFormat, Settings};
use crate::decomposition::{BacktrackingDecomposer, DecompositionValidator};
use crate::graph::{io, BridgeDetector, GraphRecord};
use crate::sat::SatDecomposer;
use crate::utils::DecompositionFormatter;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fmt;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the configured mode over a batch of graphs
pub struct GraphAnalyser {
    settings: Settings,
}

impl GraphAnalyser {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read the configured graphs file, or stdin when none is set
    pub fn load_input(&self) -> Result<Vec<GraphRecord>> {
        match &self.settings.input.graphs_file {
            Some(path) => io::load_graphs_from_file(path),
            None => io::read_graphs(std::io::stdin().lock()).context("Failed to read graphs from stdin"),
        }
    }

    /// Load the input and analyse every graph in it
    pub fn run(&self) -> Result<AnalysisReport> {
        let records = self.load_input()?;
        self.analyze_records(&records)
    }

    /// Analyse a batch; report order follows input order
    pub fn analyze_records(&self, records: &[GraphRecord]) -> Result<AnalysisReport> {
        let mode = self.settings.analysis.mode;
        let backend = self.settings.effective_backend();
        info!(
            "Analysing {} graph(s) in {:?} mode with the {:?} engine",
            records.len(),
            mode,
            backend
        );
        if backend != self.settings.engine.backend {
            warn!("Counting decompositions uses the backtracking engine");
        }

        let start_time = Instant::now();
        let graphs = if self.settings.analysis.parallel {
            records
                .par_iter()
                .map(|record| self.analyze_record(record))
                .collect::<Result<Vec<_>>>()?
        } else {
            records
                .iter()
                .map(|record| self.analyze_record(record))
                .collect::<Result<Vec<_>>>()?
        };
        let elapsed = start_time.elapsed();
        info!("Analysed {} graph(s) in {:.3}s", graphs.len(), elapsed.as_secs_f64());

        Ok(AnalysisReport {
            mode,
            backend,
            graphs,
            elapsed_ms: elapsed.as_millis() as u64,
        })
    }

    /// Analyse one graph in the configured mode
    pub fn analyze_record(&self, record: &GraphRecord) -> Result<GraphReport> {
        let graph = &record.graph;
        let mode = self.settings.analysis.mode;
        let mut report = GraphReport::new(record.id, graph.vertex_count());
        report.bridgeless = Some(graph.is_bridgeless());

        if mode == AnalysisMode::NotDecomposableBridgeless && report.bridgeless == Some(false) {
            debug!("Graph {} has a bridge, skipping the engine", record.id);
            return Ok(report);
        }

        let mut engine = DecompositionEngine::new(self.settings.effective_backend(), graph, &self.settings.engine);

        if mode == AnalysisMode::Count {
            let count = engine
                .decompositions_count()
                .with_context(|| format!("Failed to count decompositions of graph {}", record.id))?;
            report.count = Some(count);
            report.decomposable = Some(count > 0);
        } else {
            report.decomposable = Some(
                engine
                    .is_decomposable()
                    .with_context(|| format!("Failed to decide graph {}", record.id))?,
            );
        }
        debug!("Graph {}: decomposable = {:?}", record.id, report.decomposable);

        let wants_decomposition = mode == AnalysisMode::Coloring || self.settings.analysis.verify;
        if wants_decomposition && report.is_decomposable() {
            let decomposition = engine.decomposition()?;

            if self.settings.analysis.verify {
                let result = DecompositionValidator::new(graph).validate(&decomposition);
                if !result.is_valid {
                    warn!("Graph {}: produced decomposition is invalid: {}", record.id, result);
                }
                report.verified = Some(result.is_valid);
            }

            if mode == AnalysisMode::Coloring {
                report.coloring = Some(DecompositionFormatter::format_coloring(graph, &decomposition));
            }
            report.decomposition = Some(decomposition);
        }

        Ok(report)
    }

    /// Render the report in the configured output format
    pub fn render(&self, report: &AnalysisReport) -> Result<String> {
        match self.settings.output.format {
            OutputFormat::Text => Ok(report.render_text(self.settings.output.show_time)),
            OutputFormat::Json => report.render_json(),
        }
    }

    /// Write the rendered report to the output file, or stdout when none is set
    pub fn write_report(&self, report: &AnalysisReport) -> Result<()> {
        let content = self.render(report)?;

        match &self.settings.output.output_file {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
                }
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write report: {}", path.display()))?;
                info!("Report written to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(content.as_bytes())
                    .context("Failed to write report to stdout")?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Both engines and both bridge counters run on one graph
#[derive(Debug, Clone)]
pub struct CrossCheck {
    pub id: i64,
    pub backtracking: bool,
    pub sat: bool,
    pub bridges: usize,
    pub bridges_naive: usize,
    /// Whether each engine's decomposition passed the validator (`true` when there is none)
    pub backtracking_valid: bool,
    pub sat_valid: bool,
}

impl CrossCheck {
    pub fn agrees(&self) -> bool {
        self.backtracking == self.sat
            && self.bridges == self.bridges_naive
            && self.backtracking_valid
            && self.sat_valid
    }
}

impl fmt::Display for CrossCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "graph {}: backtracking={} sat={} bridges={} bridges(naive)={}",
            self.id, self.backtracking, self.sat, self.bridges, self.bridges_naive
        )?;
        if !self.backtracking_valid {
            write!(f, " [invalid backtracking decomposition]")?;
        }
        if !self.sat_valid {
            write!(f, " [invalid SAT decomposition]")?;
        }
        Ok(())
    }
}

/// Run every engine and bridge routine on one graph and compare
pub fn cross_check(record: &GraphRecord) -> Result<CrossCheck> {
    let graph = &record.graph;
    let validator = DecompositionValidator::new(graph);

    let mut backtracking = BacktrackingDecomposer::new(graph);
    let backtracking_result = backtracking.is_decomposable();
    let backtracking_valid =
        !backtracking_result || validator.validate(&backtracking.decomposition()).is_valid;

    let mut sat = SatDecomposer::new(graph);
    let sat_result = sat
        .is_decomposable()
        .with_context(|| format!("SAT engine failed on graph {}", record.id))?;
    let sat_valid = !sat_result || validator.validate(&sat.decomposition()?).is_valid;

    let check = CrossCheck {
        id: record.id,
        backtracking: backtracking_result,
        sat: sat_result,
        bridges: BridgeDetector::count_bridges(graph, false),
        bridges_naive: BridgeDetector::count_bridges_naive(graph),
        backtracking_valid,
        sat_valid,
    };
    if !check.agrees() {
        warn!("Cross-check disagreement: {}", check);
    }
    Ok(check)
}
