//! Page bootstrap script for the visualizer widget.
//!
//! Emits the document-ready hook that builds the trace literal and hands it
//! to the widget constructor together with its options.

use super::json::write_text;
use crate::utils::config::WIDGET_CONSTRUCTOR;
use crate::utils::error::{OutputError, SessionError};
use crate::visualizer::{Delivery, TraceSink};
use chrono::Utc;
use log::info;
use std::path::PathBuf;

/// Render the bootstrap script for one delivery
///
/// **Public** - used by ScriptSink and tests
pub fn render_bootstrap_script(delivery: &Delivery) -> Result<String, serde_json::Error> {
    // A JSON string literal is also a valid JS string literal
    let root = serde_json::to_string(&delivery.root_id)?;
    let options = indent(&serde_json::to_string_pretty(&delivery.options)?);
    let trace = indent(&serde_json::to_string_pretty(&delivery.trace)?);

    Ok(format!(
        "// Generated by trace-viz v{} at {}\n\
         $(document).ready(function () {{\n\
         \tvar opts = {};\n\
         \tvar trace = {};\n\
         \tvar v = new {}({}, trace, opts);\n\
         }});\n",
        env!("CARGO_PKG_VERSION"),
        Utc::now().to_rfc3339(),
        options,
        trace,
        WIDGET_CONSTRUCTOR,
        root,
    ))
}

/// **Private** - indent continuation lines by one tab
fn indent(block: &str) -> String {
    block.replace('\n', "\n\t")
}

/// Sink that writes each delivery as a bootstrap script file
#[derive(Debug, Clone)]
pub struct ScriptSink {
    path: PathBuf,
}

impl ScriptSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TraceSink for ScriptSink {
    fn deliver(&mut self, delivery: Delivery) -> Result<(), SessionError> {
        let script = render_bootstrap_script(&delivery)?;
        write_text(&script, &self.path).map_err(|e: OutputError| {
            SessionError::DeliveryFailed(format!("{}: {}", self.path.display(), e))
        })?;
        info!("Bootstrap script written to: {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_bootstrap_script() {
        let delivery = Delivery {
            root_id: "root".to_string(),
            trace: json!({"code": "", "stdin": "", "trace": [], "userlog": ""}),
            options: json!({"hideCode": true}),
        };

        let script = render_bootstrap_script(&delivery).unwrap();
        assert!(script.contains("$(document).ready(function () {"));
        assert!(script.contains("new ExecutionVisualizer(\"root\", trace, opts);"));
        assert!(script.contains("\"hideCode\": true"));
        assert!(script.trim_end().ends_with("});"));
    }

    #[test]
    fn test_script_sink_writes_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("page/visualizer.js");
        let mut sink = ScriptSink::new(&path);

        sink.deliver(Delivery {
            root_id: "root".to_string(),
            trace: json!({"trace": []}),
            options: json!({}),
        })
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("ExecutionVisualizer"));
    }
}
