//! Configuration and constants for the trace format and the CLI.

/// Current trace wire-format version understood by this crate
pub const SCHEMA_VERSION: &str = "1.0.0";

// Discriminator tags used in the wire format.
// A reference is encoded as ["REF", id]; heap objects lead with their kind.
pub const REF_TAG: &str = "REF";
pub const INSTANCE_TAG: &str = "INSTANCE";
pub const STACK_TAG: &str = "STACK";
pub const QUEUE_TAG: &str = "QUEUE";
pub const LIST_TAG: &str = "LIST";
pub const SET_TAG: &str = "SET";

/// Every heap discriminator the decoder accepts
pub const HEAP_TAGS: &[&str] = &[INSTANCE_TAG, STACK_TAG, QUEUE_TAG, LIST_TAG, SET_TAG];

/// DOM element the widget is attached to when none is given
pub const DEFAULT_ROOT_ID: &str = "root";

/// Language tag passed to the widget for syntax highlighting
pub const DEFAULT_LANG: &str = "java";

/// Default DOM scoping id for a single visualizer on a page
pub const DEFAULT_VISUALIZER_ID: &str = "1";

/// Name of the constructor the bootstrap script calls
pub const WIDGET_CONSTRUCTOR: &str = "ExecutionVisualizer";

/// Prefix used for textual reference labels (e.g. "ref#145")
pub const REF_LABEL_PREFIX: &str = "ref#";
