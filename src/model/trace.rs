//! The full recorded execution of one program run.

use super::step::StepEvent;

/// Ordered step events plus the program text and I/O that produced them
///
/// Index 0 is the initial step; order is chronological.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionTrace {
    pub code: String,
    pub stdin: String,
    pub steps: Vec<StepEvent>,
    pub userlog: String,
}

impl ExecutionTrace {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&StepEvent> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepEvent> {
        self.steps.iter()
    }

    /// Final cumulative stdout, empty when there are no steps
    pub fn final_stdout(&self) -> &str {
        self.steps.last().map(|s| s.stdout.as_str()).unwrap_or("")
    }

    /// Total number of heap objects across all steps
    pub fn total_objects(&self) -> usize {
        self.steps.iter().map(|s| s.heap.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ExecutionTrace {
    type Item = &'a StepEvent;
    type IntoIter = std::slice::Iter<'a, StepEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
