//! Encode interpreter snapshots into an execution trace.
//!
//! The encoder assigns heap ids from one table shared by the whole history,
//! so the same logical allocation keeps its id in every step and an id is
//! never handed to a different allocation.

use crate::model::{
    Bindings, ExecutionTrace, Field, Frame, HeapId, HeapObject, History, Instance, ObjectKey,
    Snapshot, SnapshotFrame, SnapshotObject, SnapshotValue, StepEvent, Value,
};
use crate::utils::error::EncodeError;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// First id handed out by the allocator
const FIRST_HEAP_ID: u64 = 1;

/// Assigns stable heap ids to interpreter allocations
#[derive(Debug)]
pub struct HeapIdAllocator {
    assigned: HashMap<ObjectKey, HeapId>,
    next: u64,
}

impl Default for HeapIdAllocator {
    fn default() -> Self {
        Self {
            assigned: HashMap::new(),
            next: FIRST_HEAP_ID,
        }
    }
}

impl HeapIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `key`, allocating the next unused one on first sight
    pub fn id_for(&mut self, key: ObjectKey) -> HeapId {
        if let Some(id) = self.assigned.get(&key) {
            return *id;
        }
        let id = HeapId(self.next);
        self.next += 1;
        self.assigned.insert(key, id);
        id
    }

    /// Number of distinct allocations seen so far
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// Encode a recorded history into a trace
///
/// **Public** - main entry point for producers
///
/// # Errors
/// * `EncodeError::UnregisteredObject` - a reference names an object missing
///   from that snapshot's object table
/// * `EncodeError::DuplicateName` - a frame or the globals bind a name twice
/// * `EncodeError::InvalidLine` - a snapshot or frame has line 0
pub fn encode(history: &History) -> Result<ExecutionTrace, EncodeError> {
    debug!("Encoding {} snapshots", history.snapshots.len());

    let mut allocator = HeapIdAllocator::new();
    let steps = history
        .snapshots
        .iter()
        .enumerate()
        .map(|(index, snapshot)| encode_snapshot(index, snapshot, &mut allocator))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Assigned {} heap ids", allocator.len());

    Ok(ExecutionTrace {
        code: history.code.clone(),
        stdin: history.stdin.clone(),
        steps,
        userlog: history.userlog.clone(),
    })
}

/// Per-snapshot encoding context
struct SnapshotEncoder<'a> {
    step: usize,
    objects: &'a BTreeMap<ObjectKey, SnapshotObject>,
    allocator: &'a mut HeapIdAllocator,
}

impl SnapshotEncoder<'_> {
    fn value(&mut self, value: &SnapshotValue) -> Result<Value, EncodeError> {
        Ok(match value {
            SnapshotValue::Null => Value::Null,
            SnapshotValue::Bool(b) => Value::Bool(*b),
            SnapshotValue::Number(n) => Value::Number(n.clone()),
            SnapshotValue::Str(s) => Value::Str(s.clone()),
            SnapshotValue::Object(key) => {
                if !self.objects.contains_key(key) {
                    return Err(EncodeError::UnregisteredObject {
                        step: self.step,
                        key: key.0,
                    });
                }
                Value::Ref(self.allocator.id_for(*key))
            }
        })
    }

    fn values(&mut self, values: &[SnapshotValue]) -> Result<Vec<Value>, EncodeError> {
        values.iter().map(|v| self.value(v)).collect()
    }

    fn object(&mut self, object: &SnapshotObject) -> Result<HeapObject, EncodeError> {
        Ok(match object {
            SnapshotObject::Instance(instance) => {
                let mut encoded = Vec::with_capacity(instance.fields.len());
                for (name, value) in &instance.fields {
                    encoded.push(Field {
                        name: name.clone(),
                        value: self.value(value)?,
                    });
                }
                HeapObject::Instance(Instance {
                    class_name: instance.class_name.clone(),
                    fields: encoded,
                })
            }
            SnapshotObject::Stack(items) => HeapObject::Stack(self.values(items)?),
            SnapshotObject::Queue(items) => HeapObject::Queue(self.values(items)?),
            SnapshotObject::List(items) => HeapObject::List(self.values(items)?),
            SnapshotObject::Set(items) => HeapObject::Set(self.values(items)?),
        })
    }

    fn bindings(
        &mut self,
        scope: &str,
        pairs: &[(String, SnapshotValue)],
    ) -> Result<Bindings, EncodeError> {
        let mut bindings = Bindings::new();
        for (name, value) in pairs {
            let value = self.value(value)?;
            bindings
                .push(name.clone(), value)
                .map_err(|_| EncodeError::DuplicateName {
                    step: self.step,
                    scope: scope.to_string(),
                    name: name.clone(),
                })?;
        }
        Ok(bindings)
    }

    fn frame(&mut self, frame: &SnapshotFrame) -> Result<Frame, EncodeError> {
        if frame.line == 0 {
            return Err(EncodeError::InvalidLine {
                step: self.step,
                line: frame.line,
            });
        }
        let scope = format!("frame {}", frame.frame_id);
        Ok(Frame {
            func_name: format!("{}:{}", frame.function, frame.line),
            locals: self.bindings(&scope, &frame.locals)?,
            parent_frame_ids: frame.parent_frame_ids.clone(),
            frame_id: frame.frame_id,
            unique_hash: frame.frame_id.to_string(),
            is_highlighted: frame.is_highlighted,
            is_zombie: frame.is_zombie,
            is_parent: frame.is_parent,
        })
    }
}

/// Encode one snapshot against the shared allocator
///
/// **Private** - internal helper for encode
fn encode_snapshot(
    step: usize,
    snapshot: &Snapshot,
    allocator: &mut HeapIdAllocator,
) -> Result<StepEvent, EncodeError> {
    if snapshot.line == 0 {
        return Err(EncodeError::InvalidLine {
            step,
            line: snapshot.line,
        });
    }

    let mut encoder = SnapshotEncoder {
        step,
        objects: &snapshot.objects,
        allocator,
    };

    // New allocations get ids in key order, before any field can reference them
    for key in snapshot.objects.keys() {
        encoder.allocator.id_for(*key);
    }

    let mut heap = BTreeMap::new();
    for (key, object) in &snapshot.objects {
        let id = encoder.allocator.id_for(*key);
        heap.insert(id, encoder.object(object)?);
    }

    let stack = snapshot
        .frames
        .iter()
        .map(|frame| encoder.frame(frame))
        .collect::<Result<Vec<_>, _>>()?;
    let globals = encoder.bindings("globals", &snapshot.globals)?;

    Ok(StepEvent {
        line: snapshot.line,
        event: snapshot.event.clone(),
        func_name: snapshot.function.clone(),
        stdout: snapshot.stdout.clone(),
        stack,
        globals,
        heap,
        exception_msg: snapshot.exception_msg.clone(),
    })
}
