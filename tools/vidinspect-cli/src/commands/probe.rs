//! Show video metadata and the sampling plan.

use std::path::PathBuf;

use vidinspect_common::config::AppConfig;
use vidinspect_motion::{sample_indices, sample_stride};

pub fn run(config: &AppConfig, input: PathBuf, sequence_fps: f64) -> anyhow::Result<()> {
    let mut source = super::open_source(config, &input, sequence_fps)?;
    let info = *source.info();
    source.release();

    println!("Video: {}", input.display());
    println!("  Source: {}", source.name());
    println!("  Resolution: {}x{}", info.width, info.height);
    println!("  Frame rate: {:.3} fps", info.fps);
    println!("  Frames: {}", info.frame_count);
    println!("  Duration: {:.1}s", info.duration_secs());
    println!();

    let stride = sample_stride(info.fps)?;
    let samples = sample_indices(info.frame_count, info.fps)?.count();
    println!("Sampling:");
    println!("  Every {stride} frames");
    println!("  {samples} samples, {} intervals", samples.saturating_sub(1));

    Ok(())
}
