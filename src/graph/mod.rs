//! Cubic graphs: representation, bridge detection and batch I/O

pub mod bridges;
pub mod catalog;
pub mod cubic;
pub mod io;

pub use bridges::BridgeDetector;
pub use cubic::{CubicGraph, Edge, Traversal, Vertex};
pub use io::{GraphFormatError, GraphRecord};
