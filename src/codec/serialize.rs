//! Serialize a trace back into the visualizer wire format.

use super::wire::{RawFrame, RawStep, RawTrace};
use crate::model::{Bindings, ExecutionTrace, Frame, HeapObject, StepEvent, Value};
use crate::utils::config::REF_TAG;
use serde_json::{json, Map, Value as Json};

/// Build the wire document for a trace
///
/// **Public** - used by output writers and the visualizer session
pub fn to_raw(trace: &ExecutionTrace) -> RawTrace {
    RawTrace {
        code: trace.code.clone(),
        stdin: trace.stdin.clone(),
        trace: trace.steps.iter().map(step_to_raw).collect(),
        userlog: trace.userlog.clone(),
    }
}

/// Serialize a trace to a JSON value
pub fn to_json(trace: &ExecutionTrace) -> Result<Json, serde_json::Error> {
    serde_json::to_value(to_raw(trace))
}

/// Serialize a trace to JSON text
pub fn to_string(trace: &ExecutionTrace, pretty: bool) -> Result<String, serde_json::Error> {
    let raw = to_raw(trace);
    if pretty {
        serde_json::to_string_pretty(&raw)
    } else {
        serde_json::to_string(&raw)
    }
}

/// Encode a single value: primitives as-is, references as `["REF", id]`
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => Json::Number(n.clone()),
        Value::Str(s) => Json::String(s.clone()),
        Value::Ref(id) => json!([REF_TAG, id.0]),
    }
}

/// Encode a heap object as its tagged array
pub fn heap_object_to_json(object: &HeapObject) -> Json {
    let mut items = vec![Json::String(object.tag().to_string())];
    match object {
        HeapObject::Instance(inst) => {
            items.push(Json::String(inst.class_name.clone()));
            items.extend(
                inst.fields
                    .iter()
                    .map(|field| json!([field.name, value_to_json(&field.value)])),
            );
        }
        HeapObject::Stack(elements)
        | HeapObject::Queue(elements)
        | HeapObject::List(elements)
        | HeapObject::Set(elements) => {
            items.extend(elements.iter().map(value_to_json));
        }
    }
    Json::Array(items)
}

/// **Private** - internal helper for to_raw
fn step_to_raw(step: &StepEvent) -> RawStep {
    let (ordered_globals, globals) = bindings_to_raw(&step.globals);

    RawStep {
        line: i64::from(step.line),
        event: step.event.as_str().to_string(),
        func_name: step.func_name.clone(),
        stdout: step.stdout.clone(),
        stack_to_render: step.stack.iter().map(frame_to_raw).collect(),
        globals,
        ordered_globals,
        heap: step
            .heap
            .iter()
            .map(|(id, object)| (id.to_string(), heap_object_to_json(object)))
            .collect(),
        exception_msg: step.exception_msg.clone(),
    }
}

/// **Private** - internal helper for step_to_raw
fn frame_to_raw(frame: &Frame) -> RawFrame {
    let (ordered_varnames, encoded_locals) = bindings_to_raw(&frame.locals);

    RawFrame {
        func_name: frame.func_name.clone(),
        encoded_locals,
        ordered_varnames,
        parent_frame_id_list: frame.parent_frame_ids.clone(),
        is_highlighted: frame.is_highlighted,
        is_zombie: frame.is_zombie,
        is_parent: frame.is_parent,
        unique_hash: Some(frame.unique_hash.clone()),
        frame_id: frame.frame_id,
    }
}

/// **Private** - split bindings into (ordered names, value map)
fn bindings_to_raw(bindings: &Bindings) -> (Vec<String>, Map<String, Json>) {
    let encoded = bindings
        .iter()
        .map(|(name, value)| (name.to_string(), value_to_json(value)))
        .collect();
    (bindings.names().to_vec(), encoded)
}
