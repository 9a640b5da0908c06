//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod emit;
pub mod models;
pub mod utils;
pub mod validate;

// Re-export main command functions
pub use emit::{execute_emit, validate_args};
pub use models::{EmitArgs, InspectArgs};
pub use utils::{display_schema, display_version};
pub use validate::{check_trace_file, inspect_trace_file, validate_trace_file};
