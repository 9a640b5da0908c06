//! Step events: one point-in-time snapshot of the program.

use super::frame::{Bindings, Frame};
use super::heap::HeapObject;
use super::value::{HeapId, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// What kind of step an event records
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepKind {
    StepLine,
    Call,
    Return,
    Exception,
    UncaughtException,
    InstructionLimitReached,
    /// Any tag this crate does not know, kept verbatim
    Other(String),
}

impl StepKind {
    pub fn as_str(&self) -> &str {
        match self {
            StepKind::StepLine => "step_line",
            StepKind::Call => "call",
            StepKind::Return => "return",
            StepKind::Exception => "exception",
            StepKind::UncaughtException => "uncaught_exception",
            StepKind::InstructionLimitReached => "instruction_limit_reached",
            StepKind::Other(tag) => tag,
        }
    }

    pub fn is_exception(&self) -> bool {
        matches!(self, StepKind::Exception | StepKind::UncaughtException)
    }
}

impl From<&str> for StepKind {
    fn from(tag: &str) -> Self {
        match tag {
            "step_line" => StepKind::StepLine,
            "call" => StepKind::Call,
            "return" => StepKind::Return,
            "exception" => StepKind::Exception,
            "uncaught_exception" => StepKind::UncaughtException,
            "instruction_limit_reached" => StepKind::InstructionLimitReached,
            other => StepKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One snapshot of program state at a source line
#[derive(Debug, Clone, PartialEq)]
pub struct StepEvent {
    /// Source line being executed (1-based)
    pub line: u32,

    pub event: StepKind,

    /// Name of the executing function
    pub func_name: String,

    /// Cumulative standard output up to this step
    pub stdout: String,

    /// Active call stack in the order the producer emitted it
    pub stack: Vec<Frame>,

    pub globals: Bindings,

    /// Every live object at this step, not only those reachable from the stack
    pub heap: BTreeMap<HeapId, HeapObject>,

    /// Message attached to exception steps
    pub exception_msg: Option<String>,
}

impl StepEvent {
    pub fn object(&self, id: HeapId) -> Option<&HeapObject> {
        self.heap.get(&id)
    }

    /// Resolve a value one hop into this step's heap
    ///
    /// Returns `None` for primitives. Resolution is on demand, so cyclic
    /// object graphs are fine.
    pub fn resolve(&self, value: &Value) -> Option<&HeapObject> {
        value.heap_ref().and_then(|id| self.object(id))
    }

    /// The frame currently executing, if any
    pub fn highlighted_frame(&self) -> Option<&Frame> {
        self.stack.iter().find(|frame| frame.is_highlighted)
    }

    /// Heap ids referenced directly from frames and globals
    pub fn roots(&self) -> BTreeSet<HeapId> {
        self.stack
            .iter()
            .flat_map(|frame| frame.locals.values())
            .chain(self.globals.values())
            .filter_map(Value::heap_ref)
            .collect()
    }

    /// Every reference in this step: locals, globals and heap contents
    pub fn references(&self) -> impl Iterator<Item = HeapId> + '_ {
        self.roots()
            .into_iter()
            .chain(self.heap.values().flat_map(HeapObject::references))
    }

    /// References whose target is not in this step's heap
    pub fn dangling_references(&self) -> BTreeSet<HeapId> {
        self.references()
            .filter(|id| !self.heap.contains_key(id))
            .collect()
    }

    /// All ids reachable from `start`, including `start` itself if present
    ///
    /// Walks with a visited set so self-referential graphs terminate.
    pub fn reachable_from(&self, start: HeapId) -> BTreeSet<HeapId> {
        let mut visited = BTreeSet::new();
        let mut pending = vec![start];

        while let Some(id) = pending.pop() {
            let Some(object) = self.heap.get(&id) else {
                continue;
            };
            if !visited.insert(id) {
                continue;
            }
            pending.extend(object.references().filter(|next| !visited.contains(next)));
        }

        visited
    }

    /// Heap objects not reachable from any frame or global
    pub fn unreachable_objects(&self) -> BTreeSet<HeapId> {
        let mut reachable = BTreeSet::new();
        for root in self.roots() {
            reachable.extend(self.reachable_from(root));
        }
        self.heap
            .keys()
            .filter(|id| !reachable.contains(id))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::heap::Instance;

    fn step_with_heap(heap: Vec<(u64, HeapObject)>, locals: Bindings) -> StepEvent {
        StepEvent {
            line: 1,
            event: StepKind::StepLine,
            func_name: "main".to_string(),
            stdout: String::new(),
            stack: vec![Frame {
                func_name: "main:1".to_string(),
                locals,
                parent_frame_ids: Vec::new(),
                frame_id: 1,
                unique_hash: "1".to_string(),
                is_highlighted: true,
                is_zombie: false,
                is_parent: false,
            }],
            globals: Bindings::new(),
            heap: heap.into_iter().map(|(id, o)| (HeapId(id), o)).collect(),
            exception_msg: None,
        }
    }

    #[test]
    fn test_step_kind_round_trip() {
        for tag in ["step_line", "call", "return", "exception", "uncaught_exception"] {
            assert_eq!(StepKind::from(tag).as_str(), tag);
        }
        assert_eq!(
            StepKind::from("opcode"),
            StepKind::Other("opcode".to_string())
        );
        assert!(StepKind::UncaughtException.is_exception());
    }

    #[test]
    fn test_reachable_from_terminates_on_cycle() {
        let locals = Bindings::from_pairs([("n", Value::Ref(HeapId(1)))]).unwrap();
        let step = step_with_heap(
            vec![
                (1, HeapObject::Instance(Instance::new("Node").with_field("next", HeapId(2)))),
                (2, HeapObject::Instance(Instance::new("Node").with_field("next", HeapId(1)))),
                (3, HeapObject::Instance(Instance::new("Node").with_field("next", HeapId(3)))),
            ],
            locals,
        );

        let reachable = step.reachable_from(HeapId(1));
        assert_eq!(reachable, BTreeSet::from([HeapId(1), HeapId(2)]));
        assert_eq!(step.unreachable_objects(), BTreeSet::from([HeapId(3)]));
        assert!(step.dangling_references().is_empty());
    }

    #[test]
    fn test_dangling_references() {
        let locals = Bindings::from_pairs([("n", Value::Ref(HeapId(5)))]).unwrap();
        let step = step_with_heap(Vec::new(), locals);
        assert_eq!(step.dangling_references(), BTreeSet::from([HeapId(5)]));
    }

    #[test]
    fn test_resolve_and_highlighted_frame() {
        let locals = Bindings::from_pairs([("s", Value::Ref(HeapId(1))), ("k", Value::Null)])
            .unwrap();
        let step = step_with_heap(vec![(1, HeapObject::Stack(Vec::new()))], locals);

        let frame = step.highlighted_frame().unwrap();
        let s = frame.locals.get("s").unwrap();
        assert_eq!(step.resolve(s), Some(&HeapObject::Stack(Vec::new())));
        assert_eq!(step.resolve(&Value::Null), None);
    }
}
