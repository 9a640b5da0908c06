//! Trace decoder for the visualizer wire format.
//!
//! Parses JSON into the typed model and checks every format invariant:
//! references resolve within their step, ordered name lists match their
//! maps, and heap discriminators are recognized. The first violation
//! aborts the whole load.

use super::wire::{RawFrame, RawStep, RawTrace};
use crate::model::{
    Bindings, ExecutionTrace, Field, Frame, HeapId, HeapObject, Instance, StepEvent, StepKind,
    Value,
};
use crate::utils::config::{INSTANCE_TAG, LIST_TAG, QUEUE_TAG, REF_TAG, SET_TAG, STACK_TAG};
use crate::utils::error::{DecodeError, Malformation};
use log::debug;
use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;

/// Decode a trace document from JSON text
///
/// **Public** - main entry point for decoding
///
/// # Errors
/// * `DecodeError::JsonError` - not JSON, or missing required fields
/// * `DecodeError::MalformedTrace` - structural violation in a step
/// * `DecodeError::UnsupportedHeapType` - unknown heap discriminator
pub fn decode(json: &str) -> Result<ExecutionTrace, DecodeError> {
    let raw: Json = serde_json::from_str(json)?;
    decode_value(&raw)
}

/// Decode an already parsed JSON document
///
/// Accepts either the full `{code, stdin, trace, userlog}` object or a bare
/// array of steps, which is what the debugger pushes to the page.
pub fn decode_value(raw: &Json) -> Result<ExecutionTrace, DecodeError> {
    let raw_trace = match raw {
        Json::Object(_) => serde_json::from_value(raw.clone())?,
        Json::Array(_) => {
            debug!("Trace is a bare step array, wrapping in document");
            RawTrace {
                code: String::new(),
                stdin: String::new(),
                trace: serde_json::from_value(raw.clone())?,
                userlog: String::new(),
            }
        }
        _ => {
            return Err(DecodeError::JsonError(serde::de::Error::custom(
                "trace must be a JSON object or array",
            )))
        }
    };

    decode_raw(raw_trace)
}

/// Convert a raw wire document into a validated trace
pub fn decode_raw(raw: RawTrace) -> Result<ExecutionTrace, DecodeError> {
    debug!("Decoding trace with {} steps", raw.trace.len());

    let steps = raw
        .trace
        .into_iter()
        .enumerate()
        .map(|(index, step)| decode_step(index, step))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExecutionTrace {
        code: raw.code,
        stdin: raw.stdin,
        steps,
        userlog: raw.userlog,
    })
}

/// Decode and validate one step
///
/// **Private** - internal helper for decode_raw
fn decode_step(index: usize, raw: RawStep) -> Result<StepEvent, DecodeError> {
    let malformed = |kind: Malformation| DecodeError::MalformedTrace { step: index, kind };

    let line = u32::try_from(raw.line)
        .ok()
        .filter(|line| *line >= 1)
        .ok_or_else(|| {
            malformed(Malformation::InvalidShape(format!(
                "line must be a positive integer, found {}",
                raw.line
            )))
        })?;

    let mut heap = BTreeMap::new();
    for (key, encoded) in &raw.heap {
        let id = key
            .parse::<HeapId>()
            .map_err(|_| malformed(Malformation::InvalidHeapId(key.clone())))?;
        let object = decode_heap_object(index, key, encoded)?;
        heap.insert(id, object);
    }

    let stack = raw
        .stack_to_render
        .into_iter()
        .map(|frame| decode_frame(frame).map_err(malformed))
        .collect::<Result<Vec<_>, _>>()?;

    let globals = decode_bindings(raw.ordered_globals, &raw.globals).map_err(malformed)?;

    let step = StepEvent {
        line,
        event: StepKind::from(raw.event.as_str()),
        func_name: raw.func_name,
        stdout: raw.stdout,
        stack,
        globals,
        heap,
        exception_msg: raw.exception_msg,
    };

    if let Some(missing) = step.dangling_references().into_iter().next() {
        return Err(malformed(Malformation::DanglingReference(missing)));
    }

    debug!(
        "Step {}: line {}, {} frames, {} heap objects",
        index,
        step.line,
        step.stack.len(),
        step.heap.len()
    );

    Ok(step)
}

/// Decode one frame
///
/// **Private** - internal helper for decode_step
fn decode_frame(raw: RawFrame) -> Result<Frame, Malformation> {
    let locals = decode_bindings(raw.ordered_varnames, &raw.encoded_locals)?;
    let unique_hash = raw
        .unique_hash
        .unwrap_or_else(|| raw.frame_id.to_string());

    Ok(Frame {
        func_name: raw.func_name,
        locals,
        parent_frame_ids: raw.parent_frame_id_list,
        frame_id: raw.frame_id,
        unique_hash,
        is_highlighted: raw.is_highlighted,
        is_zombie: raw.is_zombie,
        is_parent: raw.is_parent,
    })
}

/// Pair an ordered name list with its value map
///
/// **Private** - internal helper for frames and globals
fn decode_bindings(order: Vec<String>, encoded: &Map<String, Json>) -> Result<Bindings, Malformation> {
    let values = encoded
        .iter()
        .map(|(name, value)| decode_value_entry(value).map(|v| (name.clone(), v)))
        .collect::<Result<BTreeMap<_, _>, Malformation>>()?;

    Bindings::from_parts(order, values)
}

/// Decode a single encoded value
///
/// `null` is a terminal value, not an absent one.
pub fn decode_value_entry(encoded: &Json) -> Result<Value, Malformation> {
    match encoded {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => Ok(Value::Number(n.clone())),
        Json::String(s) => Ok(Value::Str(s.clone())),
        Json::Array(items) => match items.as_slice() {
            [Json::String(tag), id] if tag == REF_TAG => decode_ref_id(id).map(Value::Ref),
            _ => Err(Malformation::InvalidShape(format!(
                "expected a primitive or [\"{}\", id], found {}",
                REF_TAG, encoded
            ))),
        },
        Json::Object(_) => Err(Malformation::InvalidShape(format!(
            "objects must live in the heap, found inline {}",
            encoded
        ))),
    }
}

/// Parse the id inside a `REF`, given as an integer or a numeric string
///
/// **Private** - internal utility
fn decode_ref_id(id: &Json) -> Result<HeapId, Malformation> {
    match id {
        Json::Number(n) => n
            .as_u64()
            .map(HeapId)
            .ok_or_else(|| Malformation::InvalidHeapId(n.to_string())),
        Json::String(s) => s
            .parse::<HeapId>()
            .map_err(|_| Malformation::InvalidHeapId(s.clone())),
        other => Err(Malformation::InvalidHeapId(other.to_string())),
    }
}

/// Decode one heap entry by its leading discriminator
///
/// **Private** - internal helper for decode_step
fn decode_heap_object(step: usize, key: &str, encoded: &Json) -> Result<HeapObject, DecodeError> {
    let malformed = |reason: String| DecodeError::MalformedTrace {
        step,
        kind: Malformation::InvalidShape(format!("heap object {}: {}", key, reason)),
    };

    let items = encoded
        .as_array()
        .ok_or_else(|| malformed(format!("expected a tagged array, found {}", encoded)))?;

    let (tag, rest) = match items.split_first() {
        Some((Json::String(tag), rest)) => (tag.as_str(), rest),
        _ => return Err(malformed("missing type discriminator".to_string())),
    };

    let elements = |rest: &[Json]| {
        rest.iter()
            .map(decode_value_entry)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|kind| DecodeError::MalformedTrace { step, kind })
    };

    match tag {
        INSTANCE_TAG => {
            let (class_name, fields) = match rest.split_first() {
                Some((Json::String(class_name), fields)) => (class_name.clone(), fields),
                _ => return Err(malformed("instance without a class name".to_string())),
            };
            let fields = fields
                .iter()
                .map(|field| decode_field(field).map_err(&malformed))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(HeapObject::Instance(Instance { class_name, fields }))
        }
        STACK_TAG => Ok(HeapObject::Stack(elements(rest)?)),
        QUEUE_TAG => Ok(HeapObject::Queue(elements(rest)?)),
        LIST_TAG => Ok(HeapObject::List(elements(rest)?)),
        SET_TAG => Ok(HeapObject::Set(elements(rest)?)),
        other => Err(DecodeError::UnsupportedHeapType {
            step,
            id: key.to_string(),
            tag: other.to_string(),
        }),
    }
}

/// Decode a `[fieldName, value]` pair
///
/// **Private** - internal helper for decode_heap_object
fn decode_field(encoded: &Json) -> Result<Field, String> {
    match encoded.as_array().map(Vec::as_slice) {
        Some([Json::String(name), value]) => Ok(Field {
            name: name.clone(),
            value: decode_value_entry(value).map_err(|e| format!("field '{}': {}", name, e))?,
        }),
        _ => Err(format!("expected [name, value] field, found {}", encoded)),
    }
}
