//! Options recognized by the visualizer widget.

use crate::model::ExecutionTrace;
use crate::utils::config::{DEFAULT_LANG, DEFAULT_VISUALIZER_ID};
use crate::utils::error::OptionsError;
use serde::{Deserialize, Serialize};

/// Widget configuration map, serialized with the widget's camelCase keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualizerOptions {
    /// Suppress the source code panel
    pub hide_code: bool,

    /// Suppress the stdout panel
    pub hide_output: bool,

    /// Render heap objects flat instead of nested inline
    pub disable_heap_nesting: bool,

    /// Render references as text labels instead of arrows
    pub textual_memory_labels: bool,

    /// DOM scoping id for this widget instance
    pub visualizer_id_override: String,

    /// Step shown first (0-based)
    pub starting_instruction: usize,

    /// Source language tag, cosmetic only
    pub lang: String,
}

impl Default for VisualizerOptions {
    fn default() -> Self {
        Self {
            hide_code: true,
            hide_output: true,
            disable_heap_nesting: true,
            textual_memory_labels: false,
            visualizer_id_override: DEFAULT_VISUALIZER_ID.to_string(),
            starting_instruction: 0,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl VisualizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_starting_instruction(mut self, index: usize) -> Self {
        self.starting_instruction = index;
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_visualizer_id(mut self, id: impl Into<String>) -> Self {
        self.visualizer_id_override = id.into();
        self
    }

    pub fn with_textual_labels(mut self, textual: bool) -> Self {
        self.textual_memory_labels = textual;
        self
    }

    /// Check the options make sense for `trace`
    ///
    /// # Errors
    /// * `OptionsError::EmptyTrace` - nothing to show
    /// * `OptionsError::StartingInstructionOutOfRange` - start past the last step
    /// * `OptionsError::EmptyVisualizerId` - blank DOM scoping id
    pub fn validate_for(&self, trace: &ExecutionTrace) -> Result<(), OptionsError> {
        if trace.is_empty() {
            return Err(OptionsError::EmptyTrace);
        }
        if self.starting_instruction >= trace.len() {
            return Err(OptionsError::StartingInstructionOutOfRange {
                index: self.starting_instruction,
                steps: trace.len(),
            });
        }
        if self.visualizer_id_override.trim().is_empty() {
            return Err(OptionsError::EmptyVisualizerId);
        }
        Ok(())
    }

    /// Options as the JSON object handed to the widget
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_page_glue() {
        let json = VisualizerOptions::default().to_json().unwrap();
        assert_eq!(
            json,
            json!({
                "hideCode": true,
                "hideOutput": true,
                "disableHeapNesting": true,
                "textualMemoryLabels": false,
                "visualizerIdOverride": "1",
                "startingInstruction": 0,
                "lang": "java"
            })
        );
    }

    #[test]
    fn test_partial_options_fill_defaults() {
        let opts: VisualizerOptions =
            serde_json::from_value(json!({"hideCode": false, "lang": "py3"})).unwrap();
        assert!(!opts.hide_code);
        assert!(opts.hide_output);
        assert_eq!(opts.lang, "py3");
    }

    #[test]
    fn test_validate_empty_trace() {
        let trace = ExecutionTrace::default();
        assert_eq!(
            VisualizerOptions::default().validate_for(&trace),
            Err(OptionsError::EmptyTrace)
        );
    }
}
