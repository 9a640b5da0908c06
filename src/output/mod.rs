//! Output writers for traces and page scripts.
//!
//! This module handles reading and writing data on disk:
//! - JSON trace documents (pretty and compact)
//! - Bootstrap scripts for the visualizer widget

pub mod json;
pub mod script;

// Re-export main functions
pub use json::{read_trace, validate_path, write_text, write_trace};
pub use script::{render_bootstrap_script, ScriptSink};
