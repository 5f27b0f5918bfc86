//! Motion analysis: frame differencing and stall classification.
//!
//! # Algorithm
//!
//! 1. **Baseline:** the first sample only primes the previous-frame slot.
//! 2. **Difference:** absolute per-pixel delta between consecutive samples.
//! 3. **Crop:** restrict the difference image to the zone, if one is active.
//! 4. **Score:** count pixels whose delta exceeds the noise threshold.
//! 5. **Classify:** a score below `threshold * 100` is a movement stall.
//!
//! A failed step leaves the timeline, event log, and previous frame exactly
//! as they were before the call.

use image::{GrayImage, Luma};
use vidinspect_common::clock::{format_timestamp, Clock};
use vidinspect_common::error::{InspectorError, InspectorResult};
use vidinspect_model::config::AnalysisConfig;
use vidinspect_model::event::{Event, EventLog};
use vidinspect_model::timeline::Timeline;
use vidinspect_model::zone::Zone;

/// Per-pixel delta (0-255) at or below which a change is treated as noise.
pub const PIXEL_NOISE_THRESHOLD: u8 = 25;

/// Absolute per-pixel difference of two equally sized frames.
pub fn abs_diff(previous: &GrayImage, current: &GrayImage) -> InspectorResult<GrayImage> {
    if previous.dimensions() != current.dimensions() {
        let (pw, ph) = previous.dimensions();
        let (cw, ch) = current.dimensions();
        return Err(InspectorError::geometry(format!(
            "frame size changed from {pw}x{ph} to {cw}x{ch}"
        )));
    }
    let (width, height) = current.dimensions();
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let a = previous.get_pixel(x, y)[0];
        let b = current.get_pixel(x, y)[0];
        Luma([a.abs_diff(b)])
    }))
}

/// Count pixels of `diff` above `noise`, inside `zone` when given.
pub fn count_above(diff: &GrayImage, zone: Option<&Zone>, noise: u8) -> InspectorResult<u64> {
    let above = |pixels: &[u8]| pixels.iter().filter(|&&v| v > noise).count() as u64;

    match zone {
        None => Ok(above(diff.as_raw())),
        Some(zone) => {
            let (width, height) = diff.dimensions();
            if !zone.fits_crop(width, height) {
                return Err(InspectorError::InvalidZone {
                    zone: zone.to_string(),
                    width,
                    height,
                });
            }
            let roi = image::imageops::crop_imm(diff, zone.x1(), zone.y1(), zone.width(), zone.height())
                .to_image();
            Ok(above(roi.as_raw()))
        }
    }
}

/// Motion score of the interval between two frames.
pub fn motion_score(
    previous: &GrayImage,
    current: &GrayImage,
    zone: Option<&Zone>,
) -> InspectorResult<u64> {
    let diff = abs_diff(previous, current)?;
    count_above(&diff, zone, PIXEL_NOISE_THRESHOLD)
}

/// Whether the analyzer has a frame to compare against yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerState {
    AwaitingBaseline,
    Comparing,
}

/// Result of scoring one sampled interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalOutcome {
    pub frame_index: u64,
    pub score: u64,
    pub stalled: bool,
}

/// Stateful analyzer fed one grayscale sample at a time.
pub struct MotionAnalyzer<'a> {
    config: &'a AnalysisConfig,
    clock: &'a dyn Clock,
    zone: Option<Zone>,
    previous: Option<GrayImage>,
    timeline: Timeline,
    log: EventLog,
    samples: usize,
}

impl<'a> MotionAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig, clock: &'a dyn Clock) -> Self {
        Self {
            config,
            clock,
            zone: config.active_zone(),
            previous: None,
            timeline: Timeline::new(),
            log: EventLog::new(),
            samples: 0,
        }
    }

    pub fn state(&self) -> AnalyzerState {
        if self.previous.is_some() {
            AnalyzerState::Comparing
        } else {
            AnalyzerState::AwaitingBaseline
        }
    }

    /// Feed the next sample. Returns `None` for the baseline sample.
    pub fn process(
        &mut self,
        frame_index: u64,
        gray: GrayImage,
    ) -> InspectorResult<Option<IntervalOutcome>> {
        let Some(previous) = self.previous.as_ref() else {
            self.previous = Some(gray);
            self.samples += 1;
            return Ok(None);
        };

        let score = motion_score(previous, &gray, self.zone.as_ref())?;
        self.timeline.push(frame_index, score);

        let stalled = self.config.is_stall(score);
        if stalled {
            let event = Event::movement_stall(format_timestamp(self.clock.now()), frame_index);
            tracing::info!(
                frame_index,
                score,
                limit = self.config.stall_limit(),
                timestamp = %event.timestamp,
                "Movement stall detected"
            );
            self.log.record(event);
        } else {
            tracing::debug!(frame_index, score, "Interval active");
        }

        self.previous = Some(gray);
        self.samples += 1;

        Ok(Some(IntervalOutcome {
            frame_index,
            score,
            stalled,
        }))
    }

    /// Samples accepted so far, baseline included.
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    pub fn finish(self) -> (Timeline, EventLog) {
        (self.timeline, self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidinspect_common::clock::FixedClock;

    fn solid(width: u32, height: u32, value: u8) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([value]))
    }

    fn clock() -> FixedClock {
        FixedClock::from_hms_micro(14, 5, 9, 123_456).unwrap()
    }

    #[test]
    fn test_noise_threshold_is_exclusive() {
        let a = solid(4, 4, 100);
        assert_eq!(motion_score(&a, &solid(4, 4, 125), None).unwrap(), 0);
        assert_eq!(motion_score(&a, &solid(4, 4, 126), None).unwrap(), 16);
        assert_eq!(motion_score(&a, &solid(4, 4, 74), None).unwrap(), 16);
    }

    #[test]
    fn test_zone_crop_counts_only_inside() {
        let previous = solid(100, 100, 0);
        let mut current = solid(100, 100, 0);
        for y in 50..60 {
            for x in 50..60 {
                current.put_pixel(x, y, Luma([255]));
            }
        }
        let inside = Zone::new(45, 45, 55, 55).unwrap();
        let outside = Zone::new(0, 0, 10, 10).unwrap();

        assert_eq!(motion_score(&previous, &current, None).unwrap(), 100);
        assert_eq!(motion_score(&previous, &current, Some(&inside)).unwrap(), 25);
        assert_eq!(motion_score(&previous, &current, Some(&outside)).unwrap(), 0);
    }

    #[test]
    fn test_size_mismatch_is_geometry_error() {
        let err = motion_score(&solid(4, 4, 0), &solid(5, 4, 0), None).unwrap_err();
        assert!(matches!(err, InspectorError::Geometry { .. }));
    }

    #[test]
    fn test_out_of_range_crop_is_rejected() {
        let zone = Zone::new(0, 0, 10, 10).unwrap();
        let err = count_above(&solid(8, 8, 255), Some(&zone), PIXEL_NOISE_THRESHOLD).unwrap_err();
        assert!(matches!(err, InspectorError::InvalidZone { .. }));
    }

    #[test]
    fn test_state_machine() {
        let config = AnalysisConfig::default();
        let clock = clock();
        let mut analyzer = MotionAnalyzer::new(&config, &clock);
        assert_eq!(analyzer.state(), AnalyzerState::AwaitingBaseline);

        assert_eq!(analyzer.process(0, solid(4, 4, 0)).unwrap(), None);
        assert_eq!(analyzer.state(), AnalyzerState::Comparing);
        assert!(analyzer.timeline().is_empty());

        let outcome = analyzer.process(30, solid(4, 4, 0)).unwrap().unwrap();
        assert_eq!(outcome.score, 0);
        assert!(outcome.stalled);
        assert_eq!(analyzer.state(), AnalyzerState::Comparing);
        assert_eq!(analyzer.samples(), 2);
    }

    #[test]
    fn test_stall_event_uses_clock_and_description() {
        let config = AnalysisConfig::default();
        let clock = clock();
        let mut analyzer = MotionAnalyzer::new(&config, &clock);
        analyzer.process(0, solid(4, 4, 0)).unwrap();
        analyzer.process(30, solid(4, 4, 0)).unwrap();

        let (timeline, log) = analyzer.finish();
        assert_eq!(timeline.points(), vec![(30, 0)]);
        assert_eq!(log.events()[0].timestamp, "14:05:09.123456");
        assert_eq!(log.events()[0].frame_index, 30);
        assert_eq!(
            log.descriptions()[0],
            "At frame 30 a possible stall was detected in the zone."
        );
    }

    #[test]
    fn test_active_interval_records_no_event() {
        let config = AnalysisConfig {
            movement_threshold: 10,
            ..AnalysisConfig::default()
        };
        let clock = clock();
        let mut analyzer = MotionAnalyzer::new(&config, &clock);
        analyzer.process(0, solid(40, 40, 0)).unwrap();
        let outcome = analyzer.process(30, solid(40, 40, 255)).unwrap().unwrap();

        assert_eq!(outcome.score, 1600);
        assert!(!outcome.stalled);
        assert!(analyzer.event_log().is_empty());
        assert_eq!(analyzer.timeline().len(), 1);
    }

    #[test]
    fn test_failed_step_leaves_state_untouched() {
        let config = AnalysisConfig::default();
        let clock = clock();
        let mut analyzer = MotionAnalyzer::new(&config, &clock);
        analyzer.process(0, solid(4, 4, 0)).unwrap();
        analyzer.process(30, solid(4, 4, 0)).unwrap();

        assert!(analyzer.process(60, solid(6, 6, 0)).is_err());
        assert_eq!(analyzer.timeline().len(), 1);
        assert_eq!(analyzer.event_log().len(), 1);
        assert_eq!(analyzer.samples(), 2);

        // The previous frame is still the 4x4 one.
        let outcome = analyzer.process(90, solid(4, 4, 255)).unwrap().unwrap();
        assert_eq!(outcome.score, 16);
    }
}
