//! Visualizer widget context.
//!
//! The widget itself is external. This module owns the configuration handed
//! to it and the lifecycle of one widget instance.

pub mod options;
pub mod session;

// Re-export main types
pub use options::VisualizerOptions;
pub use session::{Delivery, RecordingSink, TraceSink, VisualizerSession};
