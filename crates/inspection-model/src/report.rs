//! Results of an inspection run, as handed to a presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventLog};
use crate::timeline::Timeline;
use crate::video::VideoInfo;

/// Coarse activity band derived from the mean motion score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Balanced,
    High,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "low",
            ActivityLevel::Balanced => "balanced",
            ActivityLevel::High => "high",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One piece of advice attached to a recorded event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub frame_index: u64,
    pub description: String,
    pub advice: String,
}

/// Outcome of the reporting step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    /// Events were recorded; one recommendation per event.
    EventDriven {
        recommendations: Vec<Recommendation>,
    },

    /// No events, full analysis requested.
    ActivityOverview {
        average_score: f64,
        level: ActivityLevel,
        message: String,
    },

    /// No events and no overview requested.
    NoEvents,
}

impl Summary {
    /// Activity band, when an overview was computed.
    pub fn activity_level(&self) -> Option<ActivityLevel> {
        match self {
            Summary::ActivityOverview { level, .. } => Some(*level),
            _ => None,
        }
    }
}

/// Everything gathered during one inspection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub video: VideoInfo,

    /// Number of frames successfully sampled.
    pub sampled_frames: usize,

    pub events: Vec<Event>,

    /// Aligned 1:1 with `events`.
    pub event_descriptions: Vec<String>,

    pub timeline: Timeline,

    pub summary: Summary,
}

impl AnalysisReport {
    pub fn new(
        video: VideoInfo,
        sampled_frames: usize,
        log: EventLog,
        timeline: Timeline,
        summary: Summary,
    ) -> Self {
        let (events, event_descriptions) = log.into_parts();
        Self {
            video,
            sampled_frames,
            events,
            event_descriptions,
            timeline,
            summary,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
