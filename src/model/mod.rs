//! Execution-trace data model.
//!
//! This module defines:
//! - The decoded trace (`ExecutionTrace`, `StepEvent`, `Frame`)
//! - Values and weak heap references (`Value`, `HeapId`)
//! - Heap objects as an explicit sum type (`HeapObject`)
//! - Producer-side snapshots fed to the encoder (`History`)

pub mod frame;
pub mod heap;
pub mod history;
pub mod step;
pub mod trace;
pub mod value;

// Re-export main types
pub use frame::{Bindings, Frame};
pub use heap::{Field, HeapObject, Instance, ObjectShape};
pub use history::{
    History, ObjectKey, Snapshot, SnapshotFrame, SnapshotInstance, SnapshotObject, SnapshotValue,
};
pub use step::{StepEvent, StepKind};
pub use trace::ExecutionTrace;
pub use value::{HeapId, ParseHeapIdError, Value};
