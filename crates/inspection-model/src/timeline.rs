//! Motion timeline: one score per sampled interval, in frame order.

use serde::{Deserialize, Serialize};

/// Motion score of the interval ending at `frame_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub frame_index: u64,
    pub score: u64,
}

/// Ordered per-interval motion record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame_index: u64, score: u64) {
        debug_assert!(
            self.entries
                .last()
                .map_or(true, |last| last.frame_index < frame_index),
            "timeline entries must be appended in frame order"
        );
        self.entries.push(TimelineEntry { frame_index, score });
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scores(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|e| e.score)
    }

    /// Mean score, or 0.0 for an empty timeline.
    pub fn mean_score(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let total: u128 = self.scores().map(u128::from).sum();
        total as f64 / self.entries.len() as f64
    }

    pub fn max_score(&self) -> Option<u64> {
        self.scores().max()
    }

    /// `(frame_index, score)` pairs for charting.
    pub fn points(&self) -> Vec<(u64, u64)> {
        self.entries
            .iter()
            .map(|e| (e.frame_index, e.score))
            .collect()
    }
}
