//! An explicit visualizer context.
//!
//! A session owns one widget instance attached to one root element. It is
//! created with `VisualizerSession::new`, becomes ready once the page has
//! loaded (`mark_ready`), and is torn down with `close`. A trace pushed
//! before the page is ready is held and delivered when it becomes ready.

use super::options::VisualizerOptions;
use crate::codec::to_json;
use crate::model::ExecutionTrace;
use crate::utils::error::SessionError;
use log::{debug, info};

/// One hand-off of a trace to the widget
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub root_id: String,
    pub trace: serde_json::Value,
    pub options: serde_json::Value,
}

/// Where a session sends traces (a page bridge, a file, a test recorder)
pub trait TraceSink {
    fn deliver(&mut self, delivery: Delivery) -> Result<(), SessionError>;
}

/// Sink that keeps every delivery in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub deliveries: Vec<Delivery>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Delivery> {
        self.deliveries.last()
    }
}

impl TraceSink for RecordingSink {
    fn deliver(&mut self, delivery: Delivery) -> Result<(), SessionError> {
        self.deliveries.push(delivery);
        Ok(())
    }
}

/// A single widget instance bound to a root element
pub struct VisualizerSession<S: TraceSink> {
    root_id: String,
    options: VisualizerOptions,
    sink: Option<S>,
    ready: bool,
    last_trace: Option<ExecutionTrace>,
    deliveries: usize,
}

impl<S: TraceSink> VisualizerSession<S> {
    pub fn new(root_id: impl Into<String>, options: VisualizerOptions, sink: S) -> Self {
        let root_id = root_id.into();
        info!(
            "Opening visualizer session on '{}' (id {})",
            root_id, options.visualizer_id_override
        );
        Self {
            root_id,
            options,
            sink: Some(sink),
            ready: false,
            last_trace: None,
            deliveries: 0,
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn options(&self) -> &VisualizerOptions {
        &self.options
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    pub fn last_trace(&self) -> Option<&ExecutionTrace> {
        self.last_trace.as_ref()
    }

    /// Number of traces handed to the sink so far
    pub fn deliveries(&self) -> usize {
        self.deliveries
    }

    pub fn sink(&self) -> Option<&S> {
        self.sink.as_ref()
    }

    /// Mark the page as loaded and flush any held trace
    ///
    /// Returns whether a trace was delivered.
    pub fn mark_ready(&mut self) -> Result<bool, SessionError> {
        self.ensure_open()?;
        self.ready = true;
        debug!("Visualizer '{}' is ready", self.root_id);
        self.flush()
    }

    /// Hand a new trace to the widget, replacing the previous one
    ///
    /// Delivered right away when ready, otherwise held until `mark_ready`.
    /// Returns whether the trace was delivered now.
    pub fn push_trace(&mut self, trace: ExecutionTrace) -> Result<bool, SessionError> {
        self.ensure_open()?;
        self.options.validate_for(&trace)?;
        debug!(
            "Visualizer '{}' received a trace with {} steps",
            self.root_id,
            trace.len()
        );
        self.last_trace = Some(trace);
        self.flush()
    }

    /// Deliver the current trace again, e.g. after the page reloads
    pub fn refresh(&mut self) -> Result<bool, SessionError> {
        self.ensure_open()?;
        self.flush()
    }

    /// Tear the session down and hand back its sink
    ///
    /// Later pushes fail with `SessionError::Closed`.
    pub fn close(&mut self) -> Option<S> {
        if self.sink.is_some() {
            info!(
                "Closing visualizer session on '{}' after {} deliveries",
                self.root_id, self.deliveries
            );
        }
        self.ready = false;
        self.last_trace = None;
        self.sink.take()
    }

    /// **Private** - deliver the held trace if the page is ready
    fn flush(&mut self) -> Result<bool, SessionError> {
        if !self.ready {
            return Ok(false);
        }
        let Some(trace) = &self.last_trace else {
            return Ok(false);
        };
        let Some(sink) = self.sink.as_mut() else {
            return Err(SessionError::Closed(self.root_id.clone()));
        };

        let delivery = Delivery {
            root_id: self.root_id.clone(),
            trace: to_json(trace)?,
            options: self.options.to_json()?,
        };
        sink.deliver(delivery)?;
        self.deliveries += 1;
        Ok(true)
    }

    /// **Private**
    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.sink.is_none() {
            return Err(SessionError::Closed(self.root_id.clone()));
        }
        Ok(())
    }
}
