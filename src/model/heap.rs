//! Heap objects as an explicit sum type.
//!
//! The wire format encodes an object as an array whose first element is the
//! kind tag. Here each kind is its own variant so consumers match exhaustively.

use super::value::{HeapId, Value};
use crate::utils::config::{INSTANCE_TAG, LIST_TAG, QUEUE_TAG, SET_TAG, STACK_TAG};
use std::fmt;

/// A named field of an instance
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

/// An object instance with named fields in declaration order
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub class_name: String,
    pub fields: Vec<Field>,
}

impl Instance {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Look up a field by name
    ///
    /// `None` means the field is absent; a present `null` field is `Some(&Value::Null)`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }
}

/// A heap-allocated object in one step
#[derive(Debug, Clone, PartialEq)]
pub enum HeapObject {
    Instance(Instance),
    Stack(Vec<Value>),
    Queue(Vec<Value>),
    List(Vec<Value>),
    Set(Vec<Value>),
}

/// What kind of object an id holds, used to compare objects across steps
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectShape {
    Instance(String),
    Stack,
    Queue,
    List,
    Set,
}

impl fmt::Display for ObjectShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectShape::Instance(class) => write!(f, "{} {}", INSTANCE_TAG, class),
            ObjectShape::Stack => f.write_str(STACK_TAG),
            ObjectShape::Queue => f.write_str(QUEUE_TAG),
            ObjectShape::List => f.write_str(LIST_TAG),
            ObjectShape::Set => f.write_str(SET_TAG),
        }
    }
}

impl HeapObject {
    /// Wire discriminator of this object
    pub fn tag(&self) -> &'static str {
        match self {
            HeapObject::Instance(_) => INSTANCE_TAG,
            HeapObject::Stack(_) => STACK_TAG,
            HeapObject::Queue(_) => QUEUE_TAG,
            HeapObject::List(_) => LIST_TAG,
            HeapObject::Set(_) => SET_TAG,
        }
    }

    pub fn shape(&self) -> ObjectShape {
        match self {
            HeapObject::Instance(inst) => ObjectShape::Instance(inst.class_name.clone()),
            HeapObject::Stack(_) => ObjectShape::Stack,
            HeapObject::Queue(_) => ObjectShape::Queue,
            HeapObject::List(_) => ObjectShape::List,
            HeapObject::Set(_) => ObjectShape::Set,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            HeapObject::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    /// Elements of a linear container, `None` for instances
    pub fn elements(&self) -> Option<&[Value]> {
        match self {
            HeapObject::Instance(_) => None,
            HeapObject::Stack(items)
            | HeapObject::Queue(items)
            | HeapObject::List(items)
            | HeapObject::Set(items) => Some(items),
        }
    }

    /// Ordered display labels of a container's elements
    pub fn labels(&self) -> Vec<String> {
        self.elements()
            .map(|items| items.iter().map(Value::label).collect())
            .unwrap_or_default()
    }

    /// Every heap id this object points at directly
    pub fn references(&self) -> impl Iterator<Item = HeapId> + '_ {
        let values: Box<dyn Iterator<Item = &Value> + '_> = match self {
            HeapObject::Instance(inst) => Box::new(inst.fields.iter().map(|f| &f.value)),
            HeapObject::Stack(items)
            | HeapObject::Queue(items)
            | HeapObject::List(items)
            | HeapObject::Set(items) => Box::new(items.iter()),
        };
        values.filter_map(Value::heap_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_field_lookup() {
        let node = Instance::new("Node")
            .with_field("next", Value::Null)
            .with_field("name", "DK");

        assert_eq!(node.field("name"), Some(&Value::from("DK")));
        assert_eq!(node.field("next"), Some(&Value::Null));
        assert_eq!(node.field("prev"), None);
    }

    #[test]
    fn test_container_labels() {
        let stack = HeapObject::Stack(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(stack.labels(), vec!["a", "b"]);
        assert_eq!(stack.tag(), "STACK");

        let queue = HeapObject::Queue(Vec::new());
        assert!(queue.labels().is_empty());
        assert_eq!(queue.elements().map(<[Value]>::len), Some(0));
    }

    #[test]
    fn test_references() {
        let list = HeapObject::List(vec![
            Value::Ref(HeapId(3)),
            Value::from(1i64),
            Value::Ref(HeapId(4)),
        ]);
        let refs: Vec<HeapId> = list.references().collect();
        assert_eq!(refs, vec![HeapId(3), HeapId(4)]);

        let inst = HeapObject::Instance(Instance::new("Node").with_field("next", HeapId(9)));
        assert_eq!(inst.references().collect::<Vec<_>>(), vec![HeapId(9)]);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(
            HeapObject::Instance(Instance::new("Node")).shape().to_string(),
            "INSTANCE Node"
        );
        assert_eq!(HeapObject::Set(Vec::new()).shape().to_string(), "SET");
    }
}
