//! Trace Visualizer CLI
//!
//! Validates, checks, lists and emits execution traces for the
//! `ExecutionVisualizer` widget.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_visualizer::commands::{
    check_trace_file, display_schema, display_version, execute_emit, inspect_trace_file,
    validate_args, validate_trace_file, EmitArgs, InspectArgs,
};
use trace_visualizer::utils::config::{DEFAULT_LANG, DEFAULT_ROOT_ID, DEFAULT_VISUALIZER_ID};
use trace_visualizer::visualizer::VisualizerOptions;

/// Trace Visualizer - execution traces for the Java visualizer
#[derive(Parser, Debug)]
#[command(name = "trace-viz")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a trace JSON file
    Validate {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Check heap id continuity across steps
    Check {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Fail when any issue is found
        #[arg(long)]
        strict: bool,
    },

    /// Print a plain-text listing of trace steps
    Inspect {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Step index to list (all steps if omitted)
        #[arg(short, long)]
        step: Option<usize>,

        /// Print references as ref#<id> labels
        #[arg(long)]
        textual: bool,
    },

    /// Write a page bootstrap script embedding the trace
    Emit {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Output path for the script
        #[arg(short, long, default_value = "visualizer.js")]
        output: PathBuf,

        /// DOM element the widget attaches to
        #[arg(long, env = "TRACE_VIZ_ROOT", default_value = DEFAULT_ROOT_ID)]
        root: String,

        /// Source language tag for highlighting
        #[arg(long, env = "TRACE_VIZ_LANG", default_value = DEFAULT_LANG)]
        lang: String,

        /// Widget DOM scoping id
        #[arg(long, default_value = DEFAULT_VISUALIZER_ID)]
        visualizer_id: String,

        /// Step shown first (0-based)
        #[arg(long, default_value = "0")]
        start: usize,

        /// Show the source code panel
        #[arg(long)]
        show_code: bool,

        /// Show the stdout panel
        #[arg(long)]
        show_output: bool,

        /// Nest heap objects inline
        #[arg(long)]
        heap_nesting: bool,

        /// Render references as text labels
        #[arg(long)]
        textual_labels: bool,

        /// Refuse traces with continuity issues
        #[arg(long)]
        strict: bool,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Validate { file } => {
            validate_trace_file(&file)?;
        }

        Commands::Check { file, strict } => {
            check_trace_file(&file, strict)?;
        }

        Commands::Inspect {
            file,
            step,
            textual,
        } => {
            inspect_trace_file(&InspectArgs {
                input: file,
                step,
                textual,
            })?;
        }

        Commands::Emit {
            file,
            output,
            root,
            lang,
            visualizer_id,
            start,
            show_code,
            show_output,
            heap_nesting,
            textual_labels,
            strict,
        } => {
            let options = VisualizerOptions {
                hide_code: !show_code,
                hide_output: !show_output,
                disable_heap_nesting: !heap_nesting,
                textual_memory_labels: textual_labels,
                visualizer_id_override: visualizer_id,
                starting_instruction: start,
                lang,
            };

            let args = EmitArgs {
                input: file,
                output,
                root_id: root,
                options,
                strict,
            };

            // Validate args first
            validate_args(&args)?;

            execute_emit(args)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
