//! One inspection run, from source to report.

use vidinspect_common::clock::Clock;
use vidinspect_common::error::{InspectorError, InspectorResult};
use vidinspect_media::VideoSource;
use vidinspect_model::config::AnalysisConfig;
use vidinspect_model::report::AnalysisReport;

use crate::analyzer::{IntervalOutcome, MotionAnalyzer};
use crate::frame::to_gray;
use crate::sampler::{FrameSampler, SampledFrame};
use crate::summary::summarize;

/// Report of a run plus the error that cut it short, if any.
#[derive(Debug)]
pub struct InspectionRun {
    /// Everything gathered up to the point the run ended.
    pub report: AnalysisReport,

    /// `SampleFailure` or geometry error that ended the run early.
    pub stopped_by: Option<InspectorError>,
}

impl InspectionRun {
    pub fn is_complete(&self) -> bool {
        self.stopped_by.is_none()
    }

    /// The report, or the stopping error if the run ended early.
    pub fn into_result(self) -> InspectorResult<AnalysisReport> {
        match self.stopped_by {
            None => Ok(self.report),
            Some(err) => Err(err),
        }
    }
}

/// Owns the source for the duration of a run and releases it exactly once.
struct ReleaseGuard<S: VideoSource> {
    source: S,
}

impl<S: VideoSource> Drop for ReleaseGuard<S> {
    fn drop(&mut self) {
        self.source.release();
        tracing::debug!(source = self.source.name(), "Video source released");
    }
}

/// Analyze `source` under `config`.
///
/// Configuration problems are returned as `Err` before any frame is read.
/// Failures during sampling end the run but still produce a report.
pub fn run_inspection<S: VideoSource>(
    source: S,
    config: &AnalysisConfig,
    clock: &dyn Clock,
) -> InspectorResult<InspectionRun> {
    run_inspection_with_observer(source, config, clock, |_, _| {})
}

/// Like [`run_inspection`], calling `observer` after each sample is analyzed.
///
/// The observer receives the sampled frame and the interval outcome, which
/// is `None` for the first sample. The display copy carries the zone outline
/// when requested and the stall badge when the interval stalled.
pub fn run_inspection_with_observer<S, F>(
    source: S,
    config: &AnalysisConfig,
    clock: &dyn Clock,
    mut observer: F,
) -> InspectorResult<InspectionRun>
where
    S: VideoSource,
    F: FnMut(&SampledFrame, Option<&IntervalOutcome>),
{
    let mut guard = ReleaseGuard { source };
    let video = *guard.source.info();
    config.validate_for(&video)?;

    let zone = config.active_zone();
    let overlay = if config.zone_overlay { zone } else { None };
    if config.use_zone && zone.is_none() {
        tracing::debug!("Zone requested but none set, measuring the full frame");
    }

    tracing::info!(
        source = guard.source.name(),
        frame_count = video.frame_count,
        fps = video.fps,
        width = video.width,
        height = video.height,
        threshold = config.movement_threshold,
        zone = ?zone,
        "Starting inspection"
    );

    let mut analyzer = MotionAnalyzer::new(config, clock);
    let mut sampled_frames = 0usize;
    let mut stopped_by = None;

    for item in FrameSampler::new(&mut guard.source, overlay)? {
        let mut frame = match item {
            Ok(frame) => frame,
            Err(err) => {
                stopped_by = Some(err);
                break;
            }
        };
        sampled_frames += 1;

        match analyzer.process(frame.index, to_gray(&frame.raw)) {
            Ok(outcome) => {
                if outcome.is_some_and(|o| o.stalled) {
                    frame.mark_stall();
                }
                observer(&frame, outcome.as_ref());
            }
            Err(err) => {
                tracing::error!(index = frame.index, error = %err, "Analysis aborted");
                stopped_by = Some(err);
                break;
            }
        }
    }
    drop(guard);

    let (timeline, log) = analyzer.finish();
    let summary = summarize(&timeline, &log, config);

    tracing::info!(
        sampled_frames,
        intervals = timeline.len(),
        events = log.len(),
        complete = stopped_by.is_none(),
        "Inspection finished"
    );

    Ok(InspectionRun {
        report: AnalysisReport::new(video, sampled_frames, log, timeline, summary),
        stopped_by,
    })
}
