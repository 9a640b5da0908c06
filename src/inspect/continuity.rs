//! Heap identifier continuity across steps.
//!
//! The format promises that an id names the same allocation in every step
//! it appears in, but nothing on the wire enforces it. This check flags ids
//! whose object kind changes, or that vanish and come back, as likely
//! producer bugs. It never rejects a trace.

use crate::model::{ExecutionTrace, HeapId, ObjectShape};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

/// A suspicious use of one heap id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinuityIssue {
    /// The id holds a different kind of object than it did before
    ShapeChanged {
        id: HeapId,
        previous_step: usize,
        step: usize,
        before: ObjectShape,
        after: ObjectShape,
    },

    /// The id was absent for at least one step and then reappeared
    Resurrected {
        id: HeapId,
        last_seen: usize,
        step: usize,
    },
}

impl ContinuityIssue {
    pub fn id(&self) -> HeapId {
        match self {
            ContinuityIssue::ShapeChanged { id, .. } | ContinuityIssue::Resurrected { id, .. } => {
                *id
            }
        }
    }

    pub fn step(&self) -> usize {
        match self {
            ContinuityIssue::ShapeChanged { step, .. } | ContinuityIssue::Resurrected { step, .. } => {
                *step
            }
        }
    }
}

impl fmt::Display for ContinuityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContinuityIssue::ShapeChanged {
                id,
                previous_step,
                step,
                before,
                after,
            } => write!(
                f,
                "object {} was {} at step {} but is {} at step {}",
                id, before, previous_step, after, step
            ),
            ContinuityIssue::Resurrected {
                id,
                last_seen,
                step,
            } => write!(
                f,
                "object {} disappeared after step {} and reappeared at step {}",
                id, last_seen, step
            ),
        }
    }
}

/// Result of a continuity check
///
/// **Public** - returned from check_continuity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuityReport {
    /// Number of steps examined
    pub steps_checked: usize,

    /// Number of distinct heap ids seen
    pub distinct_ids: usize,

    /// Issues in the order they were found
    pub issues: Vec<ContinuityIssue>,
}

impl ContinuityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} steps, {} distinct heap ids, {} continuity issues",
            self.steps_checked,
            self.distinct_ids,
            self.issues.len()
        )
    }
}

/// Where an id was last seen and what it held
struct Sighting {
    step: usize,
    shape: ObjectShape,
}

/// Check heap id stability across the steps of a trace
///
/// **Public** - main entry point for continuity checking
///
/// # Arguments
/// * `trace` - A decoded trace
///
/// # Returns
/// Report listing every shape change and resurrection
pub fn check_continuity(trace: &ExecutionTrace) -> ContinuityReport {
    debug!("Checking heap id continuity across {} steps", trace.len());

    let mut last_seen: HashMap<HeapId, Sighting> = HashMap::new();
    let mut issues = Vec::new();

    for (index, step) in trace.iter().enumerate() {
        for (id, object) in &step.heap {
            let shape = object.shape();

            if let Some(previous) = last_seen.get(id) {
                if previous.shape != shape {
                    issues.push(ContinuityIssue::ShapeChanged {
                        id: *id,
                        previous_step: previous.step,
                        step: index,
                        before: previous.shape.clone(),
                        after: shape.clone(),
                    });
                } else if previous.step + 1 < index {
                    issues.push(ContinuityIssue::Resurrected {
                        id: *id,
                        last_seen: previous.step,
                        step: index,
                    });
                }
            }

            last_seen.insert(*id, Sighting { step: index, shape });
        }
    }

    for issue in &issues {
        warn!("Heap continuity: {}", issue);
    }

    ContinuityReport {
        steps_checked: trace.len(),
        distinct_ids: last_seen.len(),
        issues,
    }
}
