//! JSON trace reader and writer.

use crate::codec::{decode, to_string};
use crate::model::ExecutionTrace;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a trace to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `trace` - Trace to write
/// * `output_path` - Path to output JSON file
/// * `pretty` - Indent the output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_trace(
    trace: &ExecutionTrace,
    output_path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing trace to: {}", output_path.display());

    let content = to_string(trace, pretty)?;
    write_text(&content, output_path)?;

    info!(
        "Trace written successfully ({} steps, {} bytes)",
        trace.len(),
        content.len()
    );

    Ok(())
}

/// Read and decode a trace from a JSON file
///
/// **Public** - used by every CLI command
///
/// # Errors
/// * `OutputError::ReadFailed` - File read error
/// * `OutputError::DecodeFailed` - JSON is not a valid trace
pub fn read_trace(input_path: impl AsRef<Path>) -> Result<ExecutionTrace, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading trace from: {}", input_path.display());

    let content = std::fs::read_to_string(input_path).map_err(OutputError::ReadFailed)?;
    let trace = decode(&content)?;

    debug!(
        "Trace loaded: {} steps, {} heap objects in total",
        trace.len(),
        trace.total_objects()
    );

    Ok(trace)
}

/// Write text to a file, creating parent directories
///
/// **Public** - shared by the JSON and script writers
pub fn write_text(content: &str, output_path: &Path) -> Result<(), OutputError> {
    validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}

/// Validate that output path is writable
///
/// **Public** - also used by the CLI before doing any work
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bindings, StepEvent, StepKind};
    use std::collections::BTreeMap;
    use tempfile::NamedTempFile;

    fn create_test_trace() -> ExecutionTrace {
        ExecutionTrace {
            code: "class Main {}".to_string(),
            stdin: String::new(),
            steps: vec![StepEvent {
                line: 1,
                event: StepKind::StepLine,
                func_name: "main".to_string(),
                stdout: "hi\n".to_string(),
                stack: Vec::new(),
                globals: Bindings::new(),
                heap: BTreeMap::new(),
                exception_msg: None,
            }],
            userlog: String::new(),
        }
    }

    #[test]
    fn test_write_and_read_trace() {
        let trace = create_test_trace();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_trace(&trace, path, true).unwrap();
        let loaded = read_trace(path).unwrap();

        assert_eq!(loaded, trace);
    }

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/trace.json");

        write_trace(&create_test_trace(), &nested_path, false).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = read_trace(temp_dir.path().join("missing.json"));
        let err = result.unwrap_err();
        assert!(matches!(err, OutputError::ReadFailed(_)));
        assert!(err.to_string().starts_with("Failed to read file"));
    }
}
