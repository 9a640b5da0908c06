//! Plain-text listing of a single step, used by the `inspect` command.

use crate::model::{HeapObject, StepEvent, Value};

/// Render a value for the listing
///
/// With `textual_labels` references print as `ref#<id>`; otherwise they
/// print as `-> <shape>#<id>` using the target's kind from the same step.
pub fn describe_value(step: &StepEvent, value: &Value, textual_labels: bool) -> String {
    match (value, textual_labels) {
        (Value::Ref(id), false) => match step.object(*id) {
            Some(HeapObject::Instance(inst)) => format!("-> {}#{}", inst.class_name, id),
            Some(object) => format!("-> {}#{}", object.tag(), id),
            None => format!("-> ?#{}", id),
        },
        _ => value.to_string(),
    }
}

/// Render one heap object on a single line
pub fn describe_object(step: &StepEvent, object: &HeapObject, textual_labels: bool) -> String {
    match object {
        HeapObject::Instance(inst) => {
            let fields: Vec<String> = inst
                .fields
                .iter()
                .map(|f| format!("{} = {}", f.name, describe_value(step, &f.value, textual_labels)))
                .collect();
            format!("INSTANCE {} {{ {} }}", inst.class_name, fields.join(", "))
        }
        other => {
            let items: Vec<String> = other
                .elements()
                .unwrap_or_default()
                .iter()
                .map(|v| describe_value(step, v, textual_labels))
                .collect();
            format!("{} [{}]", other.tag(), items.join(", "))
        }
    }
}

/// Produce the text lines describing a step
///
/// **Public** - main entry point for step listings
pub fn summarize_step(index: usize, step: &StepEvent, textual_labels: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "Step {} [{}] line {} in {}",
        index, step.event, step.line, step.func_name
    )];

    if let Some(msg) = &step.exception_msg {
        lines.push(format!("Exception: {}", msg));
    }

    lines.push("Frames:".to_string());
    if step.stack.is_empty() {
        lines.push("  (none)".to_string());
    }
    for frame in &step.stack {
        let marker = if frame.is_highlighted {
            "*"
        } else if frame.is_zombie {
            "z"
        } else {
            " "
        };
        lines.push(format!(
            "  {} {} (frame {})",
            marker, frame.func_name, frame.frame_id
        ));
        for (name, value) in frame.locals.iter() {
            lines.push(format!(
                "      {} = {}",
                name,
                describe_value(step, value, textual_labels)
            ));
        }
    }

    lines.push("Globals:".to_string());
    if step.globals.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (name, value) in step.globals.iter() {
        lines.push(format!(
            "  {} = {}",
            name,
            describe_value(step, value, textual_labels)
        ));
    }

    lines.push("Heap:".to_string());
    if step.heap.is_empty() {
        lines.push("  (empty)".to_string());
    }
    for (id, object) in &step.heap {
        lines.push(format!(
            "  {}: {}",
            id,
            describe_object(step, object, textual_labels)
        ));
    }

    if !step.stdout.is_empty() {
        lines.push("Stdout:".to_string());
        lines.extend(step.stdout.lines().map(|l| format!("  {}", l)));
    }

    lines
}
