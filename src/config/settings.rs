//! Configuration settings for the MED decomposition tester

use crate::graph::Traversal;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub engine: EngineConfig,
    pub analysis: AnalysisConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub backend: EngineBackend,
    /// Forwarded to the SAT solver; CaDiCaL itself runs on one thread
    pub num_threads: usize,
    pub traversal: Traversal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EngineBackend {
    Backtracking,
    Sat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub mode: AnalysisMode,
    /// Analyse graphs of one batch concurrently
    pub parallel: bool,
    /// Run the full validator on every decomposition produced
    pub verify: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    #[value(alias = "or")]
    OnlyResult,
    #[value(alias = "nd")]
    NotDecomposable,
    #[value(alias = "ndb")]
    NotDecomposableBridgeless,
    #[value(alias = "c")]
    Coloring,
    #[value(alias = "n")]
    Count,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Graph batch file; stdin when unset
    pub graphs_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Report destination; stdout when unset
    pub output_file: Option<PathBuf>,
    pub show_time: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                backend: EngineBackend::Backtracking,
                num_threads: 1,
                traversal: Traversal::Dfs,
            },
            analysis: AnalysisConfig {
                mode: AnalysisMode::OnlyResult,
                parallel: false,
                verify: false,
            },
            input: InputConfig { graphs_file: None },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_file: None,
                show_time: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.engine.num_threads == 0 {
            anyhow::bail!("Number of solver threads must be positive");
        }

        if let Some(ref graphs_file) = self.input.graphs_file {
            if !graphs_file.exists() {
                anyhow::bail!("Graphs file does not exist: {}", graphs_file.display());
            }
        }

        Ok(())
    }

    /// Engine actually used for the configured mode: counting is only
    /// supported by the backtracking search
    pub fn effective_backend(&self) -> EngineBackend {
        match self.analysis.mode {
            AnalysisMode::Count => EngineBackend::Backtracking,
            _ => self.engine.backend,
        }
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref graphs_file) = cli_overrides.graphs_file {
            self.input.graphs_file = Some(graphs_file.clone());
        }
        if let Some(ref output_file) = cli_overrides.output_file {
            self.output.output_file = Some(output_file.clone());
        }
        if let Some(mode) = cli_overrides.mode {
            self.analysis.mode = mode;
        }
        if let Some(backend) = cli_overrides.backend {
            self.engine.backend = backend;
        }
        if let Some(num_threads) = cli_overrides.num_threads {
            self.engine.num_threads = num_threads;
        }
        if let Some(traversal) = cli_overrides.traversal {
            self.engine.traversal = traversal;
        }
        if cli_overrides.json {
            self.output.format = OutputFormat::Json;
        }
        if cli_overrides.show_time {
            self.output.show_time = true;
        }
        if cli_overrides.parallel {
            self.analysis.parallel = true;
        }
        if cli_overrides.verify {
            self.analysis.verify = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub graphs_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub mode: Option<AnalysisMode>,
    pub backend: Option<EngineBackend>,
    pub num_threads: Option<usize>,
    pub traversal: Option<Traversal>,
    pub json: bool,
    pub show_time: bool,
    pub parallel: bool,
    pub verify: bool,
}
