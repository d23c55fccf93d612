//! Engine dispatch, batch analysis and reports

pub mod analyser;
pub mod engine;
pub mod report;

pub use analyser::{cross_check, CrossCheck, GraphAnalyser};
pub use engine::DecompositionEngine;
pub use report::{AnalysisReport, GraphReport};
