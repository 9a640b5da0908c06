use crate::utils::config::{HEAP_TAGS, SCHEMA_VERSION};

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Execution Trace Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  code: string               - Program source");
        println!("  stdin: string              - Program input");
        println!("  userlog: string            - Producer diagnostics");
        println!("  trace: array               - Step events, chronological");
        println!("    line: number             - 1-based source line");
        println!("    event: string            - Step kind (e.g. 'step_line')");
        println!("    func_name: string        - Executing function");
        println!("    stdout: string           - Cumulative output");
        println!("    stack_to_render: array   - Call-stack frames");
        println!("      func_name: string      - Function and line label");
        println!("      encoded_locals: object - Name -> value");
        println!("      ordered_varnames: array - Display order of locals");
        println!("      frame_id, unique_hash  - Stable frame identity");
        println!("      is_highlighted, is_zombie, is_parent: bool");
        println!("    globals: object          - Name -> value");
        println!("    ordered_globals: array   - Display order of globals");
        println!("    heap: object             - Id -> tagged object");
        println!("  value: null | bool | number | string | [\"REF\", id]");
        println!("  heap tags: {}", HEAP_TAGS.join(", "));
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Trace Visualizer v{}", env!("CARGO_PKG_VERSION"));
    println!("Trace Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Execution-trace codec and checks for the Java visualizer widget.");
}
