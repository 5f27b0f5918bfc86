pub mod analyze;
pub mod probe;

use std::path::Path;

use vidinspect_common::config::AppConfig;
use vidinspect_media::{FfmpegVideo, ImageSequence, VideoSource};

/// Open `input` as an image sequence if it is a directory, else through ffmpeg.
pub fn open_source(
    config: &AppConfig,
    input: &Path,
    sequence_fps: f64,
) -> anyhow::Result<Box<dyn VideoSource>> {
    let source: Box<dyn VideoSource> = if input.is_dir() {
        Box::new(
            ImageSequence::open(input, sequence_fps)
                .map_err(|e| anyhow::anyhow!("Failed to open image sequence: {e}"))?,
        )
    } else {
        Box::new(
            FfmpegVideo::open(input, &config.media)
                .map_err(|e| anyhow::anyhow!("Failed to open video: {e}"))?,
        )
    };
    Ok(source)
}
