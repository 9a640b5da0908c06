use crate::utils::config::DEFAULT_ROOT_ID;
use crate::visualizer::VisualizerOptions;
use std::path::PathBuf;

/// Arguments for the emit command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct EmitArgs {
    /// Trace JSON to embed
    pub input: PathBuf,

    /// Output path for the bootstrap script
    pub output: PathBuf,

    /// DOM element the widget attaches to
    pub root_id: String,

    /// Widget options
    pub options: VisualizerOptions,

    /// Refuse traces with continuity issues
    pub strict: bool,
}

impl Default for EmitArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("trace.json"),
            output: PathBuf::from("visualizer.js"),
            root_id: DEFAULT_ROOT_ID.to_string(),
            options: VisualizerOptions::default(),
            strict: false,
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone)]
pub struct InspectArgs {
    pub input: PathBuf,

    /// Step to list; all steps when `None`
    pub step: Option<usize>,

    /// Print references as `ref#<id>` labels
    pub textual: bool,
}
