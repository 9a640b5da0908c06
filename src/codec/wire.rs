//! Wire-format schema definitions.
//!
//! These structs mirror the JSON document the visualizer widget consumes.
//! Values and heap objects stay as raw `serde_json::Value` here; the decoder
//! turns them into the typed model.

use serde::{Deserialize, Serialize};
use serde_json::Map;

/// Top-level trace document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrace {
    /// Program source text
    #[serde(default)]
    pub code: String,

    /// Program standard input
    #[serde(default)]
    pub stdin: String,

    /// Step events in chronological order
    pub trace: Vec<RawStep>,

    /// Producer diagnostics
    #[serde(default)]
    pub userlog: String,
}

/// One step event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStep {
    /// Signed so that zero and negative lines reach validation
    pub line: i64,

    /// Step discriminator (e.g. "step_line")
    pub event: String,

    #[serde(default)]
    pub func_name: String,

    #[serde(default)]
    pub stdout: String,

    #[serde(default)]
    pub stack_to_render: Vec<RawFrame>,

    #[serde(default)]
    pub globals: Map<String, serde_json::Value>,

    #[serde(default)]
    pub ordered_globals: Vec<String>,

    /// Object id (decimal string) -> tagged array
    #[serde(default)]
    pub heap: Map<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_msg: Option<String>,
}

/// One call-stack frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFrame {
    pub func_name: String,

    #[serde(default)]
    pub encoded_locals: Map<String, serde_json::Value>,

    #[serde(default)]
    pub ordered_varnames: Vec<String>,

    #[serde(default)]
    pub parent_frame_id_list: Vec<u64>,

    #[serde(default)]
    pub is_highlighted: bool,

    #[serde(default)]
    pub is_zombie: bool,

    #[serde(default)]
    pub is_parent: bool,

    /// Defaults to the frame id when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_hash: Option<String>,

    pub frame_id: u64,
}
