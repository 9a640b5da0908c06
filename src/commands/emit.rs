//! Emit command implementation.
//!
//! The emit command:
//! 1. Reads and decodes the trace
//! 2. Runs the continuity check
//! 3. Opens a visualizer session bound to a script file
//! 4. Delivers the trace and closes the session

use super::models::EmitArgs;
use crate::inspect::check_continuity;
use crate::output::{read_trace, validate_path, ScriptSink};
use crate::visualizer::VisualizerSession;
use anyhow::{Context, Result};
use log::{info, warn};
use std::time::Instant;

/// Execute the emit command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace decoding failures
/// * Continuity issues when `strict` is set
/// * Invalid widget options for this trace
/// * File write errors
pub fn execute_emit(args: EmitArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/3: Reading trace from {}", args.input.display());
    let trace = read_trace(&args.input).context("Failed to read trace")?;

    info!("Step 2/3: Checking heap continuity...");
    let report = check_continuity(&trace);
    if !report.is_clean() {
        if args.strict {
            anyhow::bail!(
                "Refusing to emit: {} heap continuity issues",
                report.issues.len()
            );
        }
        warn!("Emitting despite {}", report.summary());
    }

    info!("Step 3/3: Writing bootstrap script...");
    let mut session = VisualizerSession::new(
        args.root_id.clone(),
        args.options.clone(),
        ScriptSink::new(&args.output),
    );
    session.mark_ready().context("Failed to open visualizer session")?;
    let delivered = session
        .push_trace(trace)
        .context("Failed to deliver trace to the visualizer")?;
    session.close();

    if !delivered {
        anyhow::bail!("Trace was not delivered");
    }

    info!("✓ Script written to: {}", args.output.display());
    info!(
        "Emit completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Validate emit arguments
///
/// **Public** - can be called before execute_emit for early validation
pub fn validate_args(args: &EmitArgs) -> Result<()> {
    if args.root_id.trim().is_empty() {
        anyhow::bail!("Root element id cannot be empty");
    }

    if args.options.visualizer_id_override.trim().is_empty() {
        anyhow::bail!("Visualizer id cannot be empty");
    }

    if args.input == args.output {
        anyhow::bail!("Output would overwrite the input trace");
    }

    validate_path(&args.output).context("Invalid output path")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_valid() {
        let args = EmitArgs::default();
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_root() {
        let args = EmitArgs {
            root_id: "  ".to_string(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_same_paths() {
        let args = EmitArgs {
            input: PathBuf::from("trace.json"),
            output: PathBuf::from("trace.json"),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_is_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = EmitArgs {
            output: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }
}
