//! Stall events raised during analysis.
//!
//! Events and their descriptions are appended together through
//! [`EventLog::record`], so the two lists always line up one to one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of anomaly an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Motion in the measured region dropped below the stall limit.
    #[serde(rename = "movement stall")]
    MovementStall,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::MovementStall => "movement stall",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timestamped anomaly at a sampled frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Wall-clock time of detection, `HH:MM:SS.ffffff`.
    pub timestamp: String,

    /// Frame index of the sample that closed the stalled interval.
    pub frame_index: u64,

    pub category: EventCategory,
}

impl Event {
    pub fn movement_stall(timestamp: impl Into<String>, frame_index: u64) -> Self {
        Self {
            timestamp: timestamp.into(),
            frame_index,
            category: EventCategory::MovementStall,
        }
    }

    /// Human-readable description of the event.
    pub fn describe(&self) -> String {
        match self.category {
            EventCategory::MovementStall => format!(
                "At frame {} a possible stall was detected in the zone.",
                self.frame_index
            ),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Frame {} - {}",
            self.timestamp, self.frame_index, self.category
        )
    }
}

/// Ordered events with their aligned descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
    descriptions: Vec<String>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and its description.
    pub fn record(&mut self, event: Event) {
        self.descriptions.push(event.describe());
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate events paired with their descriptions.
    pub fn iter(&self) -> impl Iterator<Item = (&Event, &str)> {
        self.events
            .iter()
            .zip(self.descriptions.iter().map(String::as_str))
    }

    pub fn into_parts(self) -> (Vec<Event>, Vec<String>) {
        (self.events, self.descriptions)
    }
}
