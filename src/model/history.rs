//! Producer-side interpreter snapshots, the input to the encoder.
//!
//! An instrumented interpreter records one `Snapshot` per paused step.
//! Objects are keyed by `ObjectKey`, the interpreter's own notion of
//! allocation identity; the encoder maps keys to stable `HeapId`s.

use super::step::StepKind;
use std::collections::BTreeMap;
use std::fmt;

/// Interpreter-side identity of one logical allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectKey(pub u64);

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value as the interpreter sees it
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Str(String),
    Object(ObjectKey),
}

impl From<&str> for SnapshotValue {
    fn from(s: &str) -> Self {
        SnapshotValue::Str(s.to_string())
    }
}

impl From<i64> for SnapshotValue {
    fn from(n: i64) -> Self {
        SnapshotValue::Number(n.into())
    }
}

impl From<bool> for SnapshotValue {
    fn from(b: bool) -> Self {
        SnapshotValue::Bool(b)
    }
}

impl From<ObjectKey> for SnapshotValue {
    fn from(key: ObjectKey) -> Self {
        SnapshotValue::Object(key)
    }
}

/// An object instance with fields in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotInstance {
    pub class_name: String,
    pub fields: Vec<(String, SnapshotValue)>,
}

impl SnapshotInstance {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<SnapshotValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// A live object in one snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotObject {
    Instance(SnapshotInstance),
    Stack(Vec<SnapshotValue>),
    Queue(Vec<SnapshotValue>),
    List(Vec<SnapshotValue>),
    Set(Vec<SnapshotValue>),
}

impl SnapshotObject {
    /// Start an instance; fields are added on the returned builder
    pub fn instance(class_name: impl Into<String>) -> SnapshotInstance {
        SnapshotInstance::new(class_name)
    }
}

impl From<SnapshotInstance> for SnapshotObject {
    fn from(instance: SnapshotInstance) -> Self {
        SnapshotObject::Instance(instance)
    }
}

/// A call-stack frame as the interpreter sees it
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotFrame {
    pub function: String,
    /// Line the frame is currently at
    pub line: u32,
    pub frame_id: u64,
    pub locals: Vec<(String, SnapshotValue)>,
    pub parent_frame_ids: Vec<u64>,
    pub is_highlighted: bool,
    pub is_zombie: bool,
    pub is_parent: bool,
}

impl SnapshotFrame {
    pub fn new(function: impl Into<String>, line: u32, frame_id: u64) -> Self {
        Self {
            function: function.into(),
            line,
            frame_id,
            locals: Vec::new(),
            parent_frame_ids: Vec::new(),
            is_highlighted: false,
            is_zombie: false,
            is_parent: false,
        }
    }

    pub fn with_local(mut self, name: impl Into<String>, value: impl Into<SnapshotValue>) -> Self {
        self.locals.push((name.into(), value.into()));
        self
    }

    pub fn highlighted(mut self) -> Self {
        self.is_highlighted = true;
        self
    }
}

/// State of the program at one paused step
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub line: u32,
    pub event: StepKind,
    pub function: String,
    pub stdout: String,
    pub frames: Vec<SnapshotFrame>,
    pub globals: Vec<(String, SnapshotValue)>,
    /// Every live object, keyed by allocation identity
    pub objects: BTreeMap<ObjectKey, SnapshotObject>,
    pub exception_msg: Option<String>,
}

impl Snapshot {
    pub fn new(line: u32, function: impl Into<String>) -> Self {
        Self {
            line,
            event: StepKind::StepLine,
            function: function.into(),
            stdout: String::new(),
            frames: Vec::new(),
            globals: Vec::new(),
            objects: BTreeMap::new(),
            exception_msg: None,
        }
    }

    pub fn with_frame(mut self, frame: SnapshotFrame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn with_global(mut self, name: impl Into<String>, value: impl Into<SnapshotValue>) -> Self {
        self.globals.push((name.into(), value.into()));
        self
    }

    pub fn with_object(mut self, key: ObjectKey, object: impl Into<SnapshotObject>) -> Self {
        self.objects.insert(key, object.into());
        self
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_event(mut self, event: StepKind) -> Self {
        self.event = event;
        self
    }
}

/// Everything the interpreter recorded for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub code: String,
    pub stdin: String,
    pub userlog: String,
    pub snapshots: Vec<Snapshot>,
}

impl History {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_builder_keeps_field_order() {
        let snapshot = Snapshot::new(1, "main").with_object(
            ObjectKey(1),
            SnapshotObject::instance("Node")
                .with_field("next", SnapshotValue::Null)
                .with_field("name", "DK"),
        );

        let Some(SnapshotObject::Instance(node)) = snapshot.objects.get(&ObjectKey(1)) else {
            panic!("expected an instance");
        };
        assert_eq!(node.class_name, "Node");
        assert_eq!(
            node.fields,
            vec![
                ("next".to_string(), SnapshotValue::Null),
                ("name".to_string(), SnapshotValue::from("DK")),
            ]
        );
    }

    #[test]
    fn test_containers_take_elements_directly() {
        let snapshot = Snapshot::new(1, "main")
            .with_object(ObjectKey(2), SnapshotObject::Stack(vec!["a".into(), "b".into()]));
        assert_eq!(
            snapshot.objects.get(&ObjectKey(2)),
            Some(&SnapshotObject::Stack(vec!["a".into(), "b".into()]))
        );
    }
}
