//! Frame sampling at one frame per second of video.
//!
//! The stride is the integer part of the native frame rate, clamped to at
//! least 1 so sub-1 fps sources still advance. Sampling stops at the first
//! frame that cannot be retrieved; later indices are never attempted.

use std::iter::{FusedIterator, StepBy};
use std::ops::Range;

use vidinspect_common::error::{InspectorError, InspectorResult};
use vidinspect_media::{RawFrame, VideoSource};
use vidinspect_model::zone::Zone;

use crate::frame::{draw_stall_marker, draw_zone_overlay};

/// Frame indices visited by the sampler.
pub type SampleIndices = StepBy<Range<u64>>;

/// Sampling stride for a native frame rate: `max(1, floor(fps))`.
pub fn sample_stride(fps: f64) -> InspectorResult<u64> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(InspectorError::configuration(format!(
            "fps must be a positive number, got {fps}"
        )));
    }
    Ok((fps.floor() as u64).max(1))
}

/// Indices `0, s, 2s, ...` below `frame_count`, with `s = sample_stride(fps)`.
pub fn sample_indices(frame_count: u64, fps: f64) -> InspectorResult<SampleIndices> {
    let stride = sample_stride(fps)?;
    let step = usize::try_from(stride).unwrap_or(usize::MAX);
    Ok((0..frame_count).step_by(step))
}

/// A frame retrieved by the sampler.
#[derive(Debug, Clone)]
pub struct SampledFrame {
    pub index: u64,

    /// The decoded frame, untouched. This is what gets measured.
    pub raw: RawFrame,

    /// Copy with the zone outline drawn, when an overlay was requested.
    pub display: Option<RawFrame>,
}

impl SampledFrame {
    /// The frame to show a viewer: the overlay copy if any, else the raw frame.
    pub fn display_frame(&self) -> &RawFrame {
        self.display.as_ref().unwrap_or(&self.raw)
    }

    /// Stamp the stall badge on the display copy, creating it if needed.
    pub fn mark_stall(&mut self) {
        let display = match self.display.take() {
            Some(display) => display,
            None => self.raw.clone(),
        };
        let display = self.display.insert(display);
        draw_stall_marker(display);
    }
}

/// Iterator over sampled frames of a source.
///
/// Yields `Err(SampleFailure)` once for the first unreadable frame, then ends.
pub struct FrameSampler<'s, S: VideoSource + ?Sized> {
    source: &'s mut S,
    indices: SampleIndices,
    overlay: Option<Zone>,
    halted: bool,
}

impl<'s, S: VideoSource + ?Sized> FrameSampler<'s, S> {
    /// Sample `source` at its native rate. `overlay` is drawn on display copies only.
    pub fn new(source: &'s mut S, overlay: Option<Zone>) -> InspectorResult<Self> {
        let info = *source.info();
        let indices = sample_indices(info.frame_count, info.fps)?;
        Ok(Self {
            source,
            indices,
            overlay,
            halted: false,
        })
    }
}

impl<S: VideoSource + ?Sized> Iterator for FrameSampler<'_, S> {
    type Item = InspectorResult<SampledFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        let index = self.indices.next()?;

        match self.source.fetch_frame(index) {
            Ok(raw) => {
                let display = self.overlay.map(|zone| {
                    let mut copy = raw.clone();
                    draw_zone_overlay(&mut copy, &zone);
                    copy
                });
                Some(Ok(SampledFrame {
                    index,
                    raw,
                    display,
                }))
            }
            Err(err) => {
                self.halted = true;
                let err = if err.is_sample_failure() {
                    err
                } else {
                    InspectorError::sample_failure(index, err.to_string())
                };
                tracing::warn!(index, error = %err, "Sampling stopped");
                Some(Err(err))
            }
        }
    }
}

impl<S: VideoSource + ?Sized> FusedIterator for FrameSampler<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use vidinspect_media::MemoryVideo;

    fn collect(frame_count: u64, fps: f64) -> Vec<u64> {
        sample_indices(frame_count, fps).unwrap().collect()
    }

    #[test]
    fn test_one_sample_per_second() {
        assert_eq!(collect(90, 30.0), vec![0, 30, 60]);
        assert_eq!(collect(91, 30.0), vec![0, 30, 60, 90]);
        assert_eq!(collect(0, 30.0), Vec::<u64>::new());
    }

    #[test]
    fn test_fractional_fps_truncates() {
        assert_eq!(sample_stride(29.97).unwrap(), 29);
        assert_eq!(collect(60, 29.97), vec![0, 29, 58]);
    }

    #[test]
    fn test_sub_one_fps_uses_stride_one() {
        assert_eq!(sample_stride(0.5).unwrap(), 1);
        assert_eq!(collect(3, 0.5), vec![0, 1, 2]);
    }

    #[test]
    fn test_invalid_fps_is_configuration_error() {
        for fps in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            assert!(sample_stride(fps).unwrap_err().is_configuration());
            assert!(sample_indices(10, fps).is_err());
        }
    }

    #[test]
    fn test_sampler_stops_at_first_failure() {
        let frames = (0..3)
            .map(|_| RawFrame::from_pixel(4, 4, Rgb([1, 2, 3])))
            .collect();
        // Reports 5 frames but only 3 are decodable.
        let mut video = MemoryVideo::new(4, 4, 1.0, frames).with_frame_count(5);

        let results: Vec<_> = FrameSampler::new(&mut video, None).unwrap().collect();
        assert_eq!(results.len(), 4);
        assert!(results[..3].iter().all(|r| r.is_ok()));
        match &results[3] {
            Err(InspectorError::SampleFailure { frame_index, .. }) => assert_eq!(*frame_index, 3),
            other => panic!("expected sample failure, got {other:?}"),
        }
    }

    #[test]
    fn test_overlay_only_touches_display_copy() {
        let frames = vec![RawFrame::from_pixel(10, 10, Rgb([0, 0, 0]))];
        let mut video = MemoryVideo::new(10, 10, 1.0, frames);
        let zone = Zone::new(2, 2, 8, 8).unwrap();

        let frame = FrameSampler::new(&mut video, Some(zone))
            .unwrap()
            .next()
            .unwrap()
            .unwrap();

        assert_eq!(*frame.raw.get_pixel(2, 2), Rgb([0, 0, 0]));
        let display = frame.display.as_ref().unwrap();
        assert_eq!(*display.get_pixel(2, 2), crate::frame::OVERLAY_COLOR);
        assert_eq!(*frame.display_frame().get_pixel(2, 2), crate::frame::OVERLAY_COLOR);
    }

    #[test]
    fn test_display_falls_back_to_raw() {
        let mut video = MemoryVideo::new(2, 2, 1.0, vec![RawFrame::new(2, 2)]);
        let frame = FrameSampler::new(&mut video, None)
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        assert!(frame.display.is_none());
        assert_eq!(frame.display_frame().dimensions(), (2, 2));
    }

    #[test]
    fn test_mark_stall_leaves_raw_untouched() {
        let black = Rgb([0, 0, 0]);
        let frames = vec![RawFrame::from_pixel(64, 64, black)];
        let mut video = MemoryVideo::new(64, 64, 1.0, frames);
        let zone = Zone::new(2, 2, 60, 60).unwrap();
        let mut frame = FrameSampler::new(&mut video, Some(zone))
            .unwrap()
            .next()
            .unwrap()
            .unwrap();

        frame.mark_stall();

        let display = frame.display.as_ref().unwrap();
        assert_eq!(*display.get_pixel(20, 20), crate::frame::STALL_MARKER_COLOR);
        assert_eq!(*display.get_pixel(2, 2), crate::frame::OVERLAY_COLOR);
        assert_eq!(*frame.raw.get_pixel(20, 20), black);
    }
}
