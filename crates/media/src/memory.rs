//! In-memory frames.

use vidinspect_common::error::{InspectorError, InspectorResult};
use vidinspect_model::video::VideoInfo;

use crate::source::{RawFrame, VideoSource};

/// Frames held in memory and served by index.
///
/// The reported frame count can exceed the stored frames to mimic
/// containers whose header over-reports length; fetching a missing frame
/// fails like a truncated file would.
#[derive(Debug, Clone)]
pub struct MemoryVideo {
    frames: Vec<RawFrame>,
    info: VideoInfo,
    released: bool,
}

impl MemoryVideo {
    /// Frames of `width`x`height` at `fps`. The frame count is `frames.len()`.
    pub fn new(width: u32, height: u32, fps: f64, frames: Vec<RawFrame>) -> Self {
        let info = VideoInfo::new(frames.len() as u64, fps, width, height);
        Self {
            frames,
            info,
            released: false,
        }
    }

    /// Override the reported frame count.
    pub fn with_frame_count(mut self, frame_count: u64) -> Self {
        self.info.frame_count = frame_count;
        self
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl VideoSource for MemoryVideo {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn fetch_frame(&mut self, index: u64) -> InspectorResult<RawFrame> {
        if self.released {
            return Err(InspectorError::sample_failure(index, "video already released"));
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| self.frames.get(i))
            .cloned()
            .ok_or_else(|| InspectorError::sample_failure(index, "frame not available"))
    }

    fn release(&mut self) {
        self.released = true;
        self.frames.clear();
    }

    fn name(&self) -> &str {
        "memory"
    }
}
