//! Utility functions and helpers

pub mod display;

pub use display::{Color, ColorOutput, DecompositionFormatter};
