//! A directory of still images treated as a video.
//!
//! Files are ordered by name, so `frame_0001.png`-style numbering (as
//! produced by `ffmpeg -i clip.mp4 frame_%04d.png`) plays back in order.

use std::path::{Path, PathBuf};

use vidinspect_common::error::{InspectorError, InspectorResult};
use vidinspect_model::video::VideoInfo;

use crate::source::{RawFrame, VideoSource};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Frames stored as individual image files.
#[derive(Debug)]
pub struct ImageSequence {
    frames: Vec<PathBuf>,
    info: VideoInfo,
    released: bool,
}

impl ImageSequence {
    /// Index the images in `dir` and play them back at `fps`.
    ///
    /// Frame size is taken from the first image.
    pub fn open(dir: impl AsRef<Path>, fps: f64) -> InspectorResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(InspectorError::media(format!(
                "image sequence directory not found: {}",
                dir.display()
            )));
        }

        let mut frames = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                frames.push(path);
            }
        }
        frames.sort();

        let first = frames.first().ok_or_else(|| {
            InspectorError::media(format!("no images found in {}", dir.display()))
        })?;
        let (width, height) = image::image_dimensions(first).map_err(|e| {
            InspectorError::media(format!("failed to read {}: {e}", first.display()))
        })?;

        let info = VideoInfo::new(frames.len() as u64, fps, width, height);
        tracing::info!(
            dir = %dir.display(),
            frame_count = info.frame_count,
            fps,
            width,
            height,
            "Opened image sequence"
        );

        Ok(Self {
            frames,
            info,
            released: false,
        })
    }
}

impl VideoSource for ImageSequence {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn fetch_frame(&mut self, index: u64) -> InspectorResult<RawFrame> {
        if self.released {
            return Err(InspectorError::sample_failure(index, "sequence already released"));
        }
        let path = usize::try_from(index)
            .ok()
            .and_then(|i| self.frames.get(i))
            .ok_or_else(|| InspectorError::sample_failure(index, "no image for frame"))?;

        let frame = image::open(path).map_err(|e| {
            InspectorError::sample_failure(index, format!("failed to decode {}: {e}", path.display()))
        })?;
        Ok(frame.to_rgb8())
    }

    fn release(&mut self) {
        self.released = true;
    }

    fn name(&self) -> &str {
        "image-sequence"
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
