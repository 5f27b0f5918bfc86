//! Properties of a decodable video source.

use serde::{Deserialize, Serialize};
use vidinspect_common::error::{InspectorError, InspectorResult};

/// Frame count, native frame rate, and frame size of a video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    /// Total number of decodable frames.
    pub frame_count: u64,

    /// Native frames per second.
    pub fps: f64,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,
}

impl VideoInfo {
    pub fn new(frame_count: u64, fps: f64, width: u32, height: u32) -> Self {
        Self {
            frame_count,
            fps,
            width,
            height,
        }
    }

    /// Reject a non-positive frame rate or an empty frame size.
    pub fn validate(&self) -> InspectorResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(InspectorError::configuration(format!(
                "fps must be a positive number, got {}",
                self.fps
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(InspectorError::configuration(format!(
                "frame size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Video length in seconds. Zero when the frame rate is unusable.
    pub fn duration_secs(&self) -> f64 {
        if self.fps > 0.0 && self.fps.is_finite() {
            self.frame_count as f64 / self.fps
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_typical_video() {
        assert!(VideoInfo::new(900, 29.97, 1920, 1080).validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_fps() {
        for fps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = VideoInfo::new(10, fps, 10, 10).validate().unwrap_err();
            assert!(err.is_configuration(), "fps {fps} should be rejected");
        }
    }

    #[test]
    fn validate_rejects_empty_frame() {
        let err = VideoInfo::new(10, 30.0, 0, 10).validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn duration_from_frame_count() {
        let info = VideoInfo::new(90, 30.0, 10, 10);
        assert!((info.duration_secs() - 3.0).abs() < 1e-9);
        assert_eq!(VideoInfo::new(90, 0.0, 10, 10).duration_secs(), 0.0);
    }
}
