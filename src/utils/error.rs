//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::model::HeapId;
use thiserror::Error;

/// Structural violations found while decoding a trace
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformation {
    #[error("reference to heap object {0} which is not in this step's heap")]
    DanglingReference(HeapId),

    #[error("'{0}' has a value but is missing from the ordered name list")]
    UndeclaredName(String),

    #[error("'{0}' is declared in the ordered name list but has no value")]
    MissingValue(String),

    #[error("'{0}' appears more than once in the ordered name list")]
    DuplicateName(String),

    #[error("invalid heap object id '{0}'")]
    InvalidHeapId(String),

    #[error("{0}")]
    InvalidShape(String),
}

/// Errors that can occur during trace decoding
///
/// Any error aborts the whole load: a partially decoded trace cannot
/// guarantee identifier stability across steps.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Malformed trace at step {step}: {kind}")]
    MalformedTrace { step: usize, kind: Malformation },

    #[error("Unsupported heap object type '{tag}' for object {id} at step {step}")]
    UnsupportedHeapType { step: usize, id: String, tag: String },
}

impl DecodeError {
    /// Step index the error was found at, if it is tied to one
    pub fn step(&self) -> Option<usize> {
        match self {
            DecodeError::JsonError(_) => None,
            DecodeError::MalformedTrace { step, .. } => Some(*step),
            DecodeError::UnsupportedHeapType { step, .. } => Some(*step),
        }
    }
}

/// Errors that can occur while encoding interpreter snapshots
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Snapshot {step} references object {key} which is not registered in its object table")]
    UnregisteredObject { step: usize, key: u64 },

    #[error("Snapshot {step} binds '{name}' more than once in {scope}")]
    DuplicateName {
        step: usize,
        scope: String,
        name: String,
    },

    #[error("Snapshot {step} has line {line}; lines start at 1")]
    InvalidLine { step: usize, line: u32 },
}

/// Errors in visualizer options
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Trace has no steps to show")]
    EmptyTrace,

    #[error("startingInstruction {index} is past the last step ({steps} steps)")]
    StartingInstructionOutOfRange { index: usize, steps: usize },

    #[error("visualizerIdOverride cannot be empty")]
    EmptyVisualizerId,
}

/// Errors from a visualizer session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Visualizer session for '{0}' is closed")]
    Closed(String),

    #[error("Invalid visualizer options: {0}")]
    Options(#[from] OptionsError),

    #[error("Failed to serialize trace for the widget: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink rejected delivery: {0}")]
    DeliveryFailed(String),
}

/// Errors that can occur during file input and output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to read file: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to decode trace: {0}")]
    DecodeFailed(#[from] DecodeError),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
