//! Values held by variables, instance fields and container elements.

use crate::utils::config::REF_LABEL_PREFIX;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a heap object within a trace
///
/// Wire form is a decimal string as a heap key and an integer inside `REF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeapId(pub u64);

impl fmt::Display for HeapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A heap id not written in canonical decimal form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{0}' is not a canonical heap id")]
pub struct ParseHeapIdError(pub String);

impl FromStr for HeapId {
    type Err = ParseHeapIdError;

    /// Only the form `Display` writes is accepted, so two spellings can
    /// never name the same id ("7" parses, "07", "+7" and " 7" do not).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .parse::<u64>()
            .map(HeapId)
            .map_err(|_| ParseHeapIdError(s.to_string()))?;
        if id.to_string() != s {
            return Err(ParseHeapIdError(s.to_string()));
        }
        Ok(id)
    }
}

/// A variable, field or element value
///
/// `Ref` is a non-owning lookup key into the heap of the same step.
/// The same object may be referenced from any number of places.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Kept as the exact JSON number so integers and floats round-trip
    Number(serde_json::Number),
    Str(String),
    Ref(HeapId),
}

impl Value {
    /// Heap id this value points at, if it is a reference
    pub fn heap_ref(&self) -> Option<HeapId> {
        match self {
            Value::Ref(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Display label: primitives as their literal, references as `ref#<id>`
    pub fn label(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Str(s) => s.clone(),
            Value::Ref(id) => format!("{}{}", REF_LABEL_PREFIX, id),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            other => f.write_str(&other.label()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<HeapId> for Value {
    fn from(id: HeapId) -> Self {
        Value::Ref(id)
    }
}
