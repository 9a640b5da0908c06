//! Trace Visualizer
//!
//! Execution-trace data model, codec and diagnostics for the
//! `ExecutionVisualizer` widget.
//!
//! A trace is an ordered list of step events, each carrying a call stack,
//! global bindings and a heap snapshot. Heap objects are referenced by id
//! (`["REF", id]`), so aliasing and cycles are represented without
//! ownership.
//!
//! ## Getting Started
//!
//! ```ignore
//! let trace = trace_visualizer::codec::decode(&json)?;
//! let report = trace_visualizer::inspect::check_continuity(&trace);
//! ```
//!
//! The `trace-viz` binary wraps these for the command line.

pub mod codec;
pub mod commands;
pub mod inspect;
pub mod model;
pub mod output;
pub mod utils;
pub mod visualizer;

pub use codec::{decode, encode};
pub use model::{ExecutionTrace, HeapId, HeapObject, StepEvent, Value};
