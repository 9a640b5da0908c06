//! Diagnostics over decoded traces.
//!
//! This module provides:
//! - Heap id continuity checking across steps
//! - Plain-text step listings

pub mod continuity;
pub mod summary;

// Re-export main types and functions
pub use continuity::{check_continuity, ContinuityIssue, ContinuityReport};
pub use summary::{describe_object, describe_value, summarize_step};
