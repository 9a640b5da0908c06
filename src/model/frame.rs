//! Call-stack frames and ordered variable bindings.

use super::value::Value;
use crate::utils::error::Malformation;
use std::collections::BTreeMap;

/// Name-to-value map with a separate display order
///
/// The order list and the key set always hold the same names, each once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    order: Vec<String>,
    values: BTreeMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the wire pair (ordered names, name -> value map)
    ///
    /// # Errors
    /// * `Malformation::DuplicateName` - a name is listed twice
    /// * `Malformation::MissingValue` - a listed name has no value
    /// * `Malformation::UndeclaredName` - a value's name is not listed
    pub fn from_parts(
        order: Vec<String>,
        mut values: BTreeMap<String, Value>,
    ) -> Result<Self, Malformation> {
        let mut bindings = Self::new();
        for name in order {
            if bindings.values.contains_key(&name) {
                return Err(Malformation::DuplicateName(name));
            }
            let value = values
                .remove(&name)
                .ok_or_else(|| Malformation::MissingValue(name.clone()))?;
            bindings.order.push(name.clone());
            bindings.values.insert(name, value);
        }

        if let Some(extra) = values.into_keys().next() {
            return Err(Malformation::UndeclaredName(extra));
        }

        Ok(bindings)
    }

    /// Build from ordered (name, value) pairs
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, Malformation>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut bindings = Self::new();
        for (name, value) in pairs {
            bindings.push(name.into(), value)?;
        }
        Ok(bindings)
    }

    pub(crate) fn push(&mut self, name: String, value: Value) -> Result<(), Malformation> {
        if self.values.contains_key(&name) {
            return Err(Malformation::DuplicateName(name));
        }
        self.order.push(name.clone());
        self.values.insert(name, value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Names in display order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// (name, value) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.values.get(name).map(|v| (name.as_str(), v)))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.values.values()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// One activation record on the call stack
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Display label, function name plus current line (e.g. "main:40")
    pub func_name: String,

    pub locals: Bindings,

    /// Ancestor frame ids, for closure/nesting display
    pub parent_frame_ids: Vec<u64>,

    /// Stable id of this activation across steps
    pub frame_id: u64,

    pub unique_hash: String,

    /// Currently executing
    pub is_highlighted: bool,

    /// Returned but still displayed
    pub is_zombie: bool,

    /// Ancestor of the highlighted frame
    pub is_parent: bool,
}
