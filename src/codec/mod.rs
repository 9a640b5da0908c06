//! Trace encoding and decoding.
//!
//! This module handles:
//! - Decoding the visualizer JSON wire format into the typed model
//! - Encoding interpreter snapshots into a trace with stable heap ids
//! - Serializing a trace back into the wire format

pub mod decode;
pub mod encode;
pub mod serialize;
pub mod wire;

// Re-export main functions
pub use decode::{decode, decode_value};
pub use encode::{encode, HeapIdAllocator};
pub use serialize::{to_json, to_raw, to_string};
pub use wire::{RawFrame, RawStep, RawTrace};
