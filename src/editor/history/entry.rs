//! Snapshot type stored in the history stack.

use chrono::{DateTime, Local};

use crate::page::ComponentRecord;

/// Full copy of the component collection at one point in time
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub components: Vec<ComponentRecord>,
    pub timestamp: DateTime<Local>,
    /// Short description of the action that produced this state
    pub label: String,
}

impl HistoryEntry {
    pub fn new(components: Vec<ComponentRecord>, label: impl Into<String>) -> Self {
        Self {
            components,
            timestamp: Local::now(),
            label: label.into(),
        }
    }

    /// Wall-clock time formatted for the history panel
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}
