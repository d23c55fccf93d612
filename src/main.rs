//! Main CLI application for the MED decomposition tester

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use med_tester::{
    analysis::{cross_check, GraphAnalyser},
    config::{AnalysisMode, CliOverrides, EngineBackend, Settings},
    graph::{catalog, io, GraphRecord, Traversal},
    utils::{ColorOutput, DecompositionFormatter},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "med")]
#[command(about = "Tests cubic graphs for matching, even cycle and double star decompositions")]
#[command(version = "0.1.0")]
struct Cli {
    /// Debug logging on stderr (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a batch of graphs
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Graph batch file (overrides config; stdin when neither is set)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Report file (overrides config; stdout when neither is set)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Analysis mode
        #[arg(short, long, value_enum)]
        mode: Option<AnalysisMode>,

        /// Decomposition engine
        #[arg(short, long, value_enum)]
        engine: Option<EngineBackend>,

        /// Solver threads
        #[arg(short, long)]
        threads: Option<usize>,

        /// Vertex order of the backtracking search
        #[arg(long, value_enum)]
        traversal: Option<Traversal>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Append the execution time
        #[arg(long)]
        time: bool,

        /// Analyse graphs concurrently
        #[arg(long)]
        parallel: bool,

        /// Validate every decomposition produced
        #[arg(long)]
        verify: bool,
    },

    /// Run both engines and both bridge counters and report disagreements
    Check {
        /// Graph batch file (catalog graphs when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Create a default configuration and the catalog input file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print adjacency lists, traversal orders and bridge statistics
    Show {
        /// Graph batch file (catalog graphs when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            config,
            input,
            output,
            mode,
            engine,
            threads,
            traversal,
            json,
            time,
            parallel,
            verify,
        } => {
            let overrides = CliOverrides {
                graphs_file: input,
                output_file: output,
                mode,
                backend: engine,
                num_threads: threads,
                traversal,
                json,
                show_time: time,
                parallel,
                verify,
            };
            analyze_command(&config, &overrides)
        }
        Commands::Check { input } => check_command(input.as_deref()),
        Commands::Setup { directory, force } => setup_command(&directory, force),
        Commands::Show { input } => show_command(input.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(&config_path.to_path_buf())
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        tracing::debug!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn load_records(input: Option<&Path>) -> Result<Vec<GraphRecord>> {
    match input {
        Some(path) => io::load_graphs_from_file(path),
        None => Ok(catalog::records()),
    }
}

fn analyze_command(config_path: &Path, overrides: &CliOverrides) -> Result<()> {
    let mut settings = load_settings(config_path)?;
    settings.merge_with_cli(overrides);
    settings.validate().context("Configuration validation failed")?;

    let analyser = GraphAnalyser::new(settings);
    let report = analyser.run().context("Graph analysis failed")?;
    analyser.write_report(&report)?;

    if let Some(path) = &analyser.settings().output.output_file {
        eprintln!(
            "{}",
            ColorOutput::success(&format!(
                "Analysed {} graph(s), report saved to {}",
                report.graphs.len(),
                path.display()
            ))
        );
    }

    Ok(())
}

fn check_command(input: Option<&Path>) -> Result<()> {
    let records = load_records(input)?;
    eprintln!(
        "{}",
        ColorOutput::info(&format!("Cross-checking {} graph(s)...", records.len()))
    );

    let mut disagreements = 0;
    for record in &records {
        let check = cross_check(record)?;
        if check.agrees() {
            println!("{}", check);
        } else {
            disagreements += 1;
            println!("{}", ColorOutput::error(&check.to_string()));
        }
    }

    if disagreements > 0 {
        anyhow::bail!("{} graph(s) with disagreeing results", disagreements);
    }

    eprintln!("{}", ColorOutput::success("All engines and bridge counters agree"));
    Ok(())
}

fn setup_command(directory: &Path, force: bool) -> Result<()> {
    eprintln!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input");

    for dir in [&config_dir, &input_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let mut settings = Settings::default();
        settings.input.graphs_file = Some(PathBuf::from("input/catalog.txt"));
        settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        eprintln!("Created: {}", config_path.display());
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", config_path.display()))
        );
    }

    let catalog_path = input_dir.join("catalog.txt");
    if !catalog_path.exists() || force {
        io::create_catalog_file(&input_dir).context("Failed to create catalog graphs")?;
        eprintln!("Created: {}", catalog_path.display());
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!("Skipped: {} (already exists)", catalog_path.display()))
        );
    }

    eprintln!("\n{}", ColorOutput::success("Setup complete!"));
    eprintln!("Run: med analyze --config {}", config_path.display());

    Ok(())
}

fn show_command(input: Option<&Path>) -> Result<()> {
    for record in load_records(input)? {
        println!("{}", DecompositionFormatter::format_graph_summary(record.id, &record.graph));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "med", "analyze", "--config", "test.yaml", "--mode", "ndb", "--engine", "sat", "--time",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze {
                mode, engine, time, ..
            } => {
                assert_eq!(mode, Some(AnalysisMode::NotDecomposableBridgeless));
                assert_eq!(engine, Some(EngineBackend::Sat));
                assert!(time);
            }
            _ => panic!("expected analyze"),
        }

        assert!(Cli::try_parse_from(["med", "analyze", "--mode", "everything"]).is_err());
        assert!(Cli::try_parse_from(["med", "check", "--verbose"]).unwrap().verbose);
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        let records = io::load_graphs_from_file(temp_dir.path().join("input/catalog.txt")).unwrap();
        assert_eq!(records.len(), 7);

        // Second run keeps existing files
        setup_command(temp_dir.path(), false).unwrap();
    }

    #[test]
    fn test_analyze_command_writes_report() {
        let temp_dir = tempdir().unwrap();
        io::create_catalog_file(temp_dir.path()).unwrap();
        let output = temp_dir.path().join("report.txt");

        let overrides = CliOverrides {
            graphs_file: Some(temp_dir.path().join("catalog.txt")),
            output_file: Some(output.clone()),
            mode: Some(AnalysisMode::NotDecomposable),
            ..Default::default()
        };
        analyze_command(&temp_dir.path().join("missing.yaml"), &overrides).unwrap();

        let report = std::fs::read_to_string(output).unwrap();
        assert_eq!(report, "Not decomposable graphs:\n7\n");
    }

    #[test]
    fn test_check_and_show_on_catalog() {
        let temp_dir = tempdir().unwrap();
        io::create_catalog_file(temp_dir.path()).unwrap();
        let path = temp_dir.path().join("catalog.txt");

        assert!(check_command(Some(&path)).is_ok());
        assert!(show_command(Some(&path)).is_ok());
        assert!(check_command(Some(&temp_dir.path().join("missing.txt"))).is_err());
    }
}
