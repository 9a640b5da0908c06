//! Validation, continuity and listing commands.

use super::models::InspectArgs;
use crate::inspect::{check_continuity, summarize_step, ContinuityReport};
use crate::model::ExecutionTrace;
use crate::output::read_trace;
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Validate a trace JSON file
///
/// **Public** - decoding enforces every format invariant
pub fn validate_trace_file(file_path: &Path) -> Result<ExecutionTrace> {
    println!("Validating trace: {}", file_path.display());

    let trace = read_trace(file_path)
        .with_context(|| format!("Invalid trace {}", file_path.display()))?;

    let frames: usize = trace.iter().map(|s| s.stack.len()).sum();

    println!("✓ Valid trace JSON");
    println!("  Steps: {}", trace.len());
    println!("  Frames: {}", frames);
    println!("  Heap objects: {}", trace.total_objects());
    println!("  Stdout bytes: {}", trace.final_stdout().len());

    Ok(trace)
}

/// Run the continuity check on a trace file
///
/// **Public** - with `strict`, any issue is an error
pub fn check_trace_file(file_path: &Path, strict: bool) -> Result<ContinuityReport> {
    let trace = read_trace(file_path)
        .with_context(|| format!("Invalid trace {}", file_path.display()))?;

    let report = check_continuity(&trace);
    info!("Continuity: {}", report.summary());

    for issue in &report.issues {
        println!("  ! {}", issue);
    }

    if strict && !report.is_clean() {
        anyhow::bail!(
            "{} heap continuity issues in {}",
            report.issues.len(),
            file_path.display()
        );
    }

    if report.is_clean() {
        println!("✓ Heap ids are stable across {} steps", report.steps_checked);
    }

    Ok(report)
}

/// Print a listing of one step or all steps
pub fn inspect_trace_file(args: &InspectArgs) -> Result<()> {
    let trace = read_trace(&args.input)
        .with_context(|| format!("Invalid trace {}", args.input.display()))?;

    let selected: Vec<usize> = match args.step {
        Some(index) if index >= trace.len() => {
            anyhow::bail!(
                "Step {} is out of range (trace has {} steps)",
                index,
                trace.len()
            );
        }
        Some(index) => vec![index],
        None => (0..trace.len()).collect(),
    };

    for index in selected {
        if let Some(step) = trace.step(index) {
            for line in summarize_step(index, step, args.textual) {
                println!("{}", line);
            }
            println!();
        }
    }

    Ok(())
}
