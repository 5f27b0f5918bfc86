//! Per-run analysis configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vidinspect_common::config::AnalysisDefaults;
use vidinspect_common::error::{InspectorError, InspectorResult};

use crate::video::VideoInfo;
use crate::zone::Zone;

/// Lowest accepted movement threshold.
pub const MIN_MOVEMENT_THRESHOLD: u32 = 10;

/// Highest accepted movement threshold.
pub const MAX_MOVEMENT_THRESHOLD: u32 = 100;

/// Factor turning the sensitivity threshold into a pixel count.
pub const THRESHOLD_SCALE: u64 = 100;

/// Analysis template chosen by the operator. Only affects advice text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisTemplate {
    #[default]
    Default,
    StopControl,
    AssemblyAnalysis,
    RotationDetection,
}

impl AnalysisTemplate {
    pub const ALL: [AnalysisTemplate; 4] = [
        AnalysisTemplate::Default,
        AnalysisTemplate::StopControl,
        AnalysisTemplate::AssemblyAnalysis,
        AnalysisTemplate::RotationDetection,
    ];

    /// Display name used in advice text.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisTemplate::Default => "Default",
            AnalysisTemplate::StopControl => "Stop control",
            AnalysisTemplate::AssemblyAnalysis => "Assembly analysis",
            AnalysisTemplate::RotationDetection => "Rotation detection",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            AnalysisTemplate::Default => "default",
            AnalysisTemplate::StopControl => "stop-control",
            AnalysisTemplate::AssemblyAnalysis => "assembly-analysis",
            AnalysisTemplate::RotationDetection => "rotation-detection",
        }
    }
}

impl fmt::Display for AnalysisTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AnalysisTemplate {
    type Err = InspectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|template| template.slug() == s.trim())
            .ok_or_else(|| InspectorError::configuration(format!("unknown template: {s}")))
    }
}

/// Immutable configuration for one inspection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Record stall events.
    pub track_movement: bool,

    /// Sensitivity in `[10, 100]`.
    pub movement_threshold: u32,

    /// Produce an activity overview when no events were recorded.
    pub full_analysis: bool,

    /// Restrict measurement to `zone` when one is set.
    pub use_zone: bool,

    /// Zone of interest, in source pixels.
    pub zone: Option<Zone>,

    /// Draw the zone on display frames.
    pub zone_overlay: bool,

    /// Template used for advice text.
    pub template: AnalysisTemplate,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_defaults(&AnalysisDefaults::default())
    }
}

impl AnalysisConfig {
    /// Seed a run configuration from application defaults.
    pub fn from_defaults(defaults: &AnalysisDefaults) -> Self {
        Self {
            track_movement: defaults.track_movement,
            movement_threshold: defaults.movement_threshold,
            full_analysis: defaults.full_analysis,
            use_zone: false,
            zone: None,
            zone_overlay: defaults.zone_overlay,
            template: AnalysisTemplate::Default,
        }
    }

    /// Set the zone and enable it.
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self.use_zone = true;
        self
    }

    /// The zone measurement is restricted to, if any.
    pub fn active_zone(&self) -> Option<Zone> {
        if self.use_zone {
            self.zone
        } else {
            None
        }
    }

    /// Score below which an interval counts as a stall.
    pub fn stall_limit(&self) -> u64 {
        self.movement_threshold as u64 * THRESHOLD_SCALE
    }

    /// Whether a score classifies as a stall under this configuration.
    pub fn is_stall(&self, score: u64) -> bool {
        self.track_movement && score < self.stall_limit()
    }

    /// Check options that do not depend on the video.
    pub fn validate(&self) -> InspectorResult<()> {
        if !(MIN_MOVEMENT_THRESHOLD..=MAX_MOVEMENT_THRESHOLD).contains(&self.movement_threshold) {
            return Err(InspectorError::configuration(format!(
                "movement threshold must be in [{MIN_MOVEMENT_THRESHOLD}, {MAX_MOVEMENT_THRESHOLD}], got {}",
                self.movement_threshold
            )));
        }
        Ok(())
    }

    /// Full entry validation against the video about to be analyzed.
    pub fn validate_for(&self, video: &VideoInfo) -> InspectorResult<()> {
        self.validate()?;
        video.validate()?;
        if let Some(zone) = self.active_zone() {
            zone.validate_within(video.width, video.height)?;
        }
        Ok(())
    }
}
