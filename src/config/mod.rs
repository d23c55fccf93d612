//! Configuration management for the MED decomposition tester

pub mod settings;

pub use settings::{
    AnalysisConfig, AnalysisMode, CliOverrides, EngineBackend, EngineConfig, InputConfig, OutputConfig,
    OutputFormat, Settings,
};
