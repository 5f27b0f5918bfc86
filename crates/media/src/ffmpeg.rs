//! ffmpeg-backed video source.
//!
//! Metadata comes from one `ffprobe` call at open time. Each sampled frame
//! is decoded by a short-lived `ffmpeg` process that seeks to the frame's
//! timestamp and writes a single raw `rgb24` frame to stdout.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use vidinspect_common::config::MediaToolsConfig;
use vidinspect_common::error::{InspectorError, InspectorResult};
use vidinspect_model::video::VideoInfo;

use crate::source::{RawFrame, VideoSource};

/// A video file decoded through the ffmpeg command-line tools.
#[derive(Debug)]
pub struct FfmpegVideo {
    path: PathBuf,
    ffmpeg: PathBuf,
    info: VideoInfo,
    released: bool,
}

impl FfmpegVideo {
    /// Probe `path` and prepare it for frame retrieval.
    pub fn open(path: impl AsRef<Path>, tools: &MediaToolsConfig) -> InspectorResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(InspectorError::media(format!(
                "video file not found: {}",
                path.display()
            )));
        }
        if !tool_available(&tools.ffmpeg) {
            return Err(InspectorError::media(format!(
                "ffmpeg not found at {}",
                tools.ffmpeg.display()
            )));
        }

        let info = probe(path, &tools.ffprobe)?;
        tracing::info!(
            path = %path.display(),
            frame_count = info.frame_count,
            fps = info.fps,
            width = info.width,
            height = info.height,
            "Opened video"
        );

        Ok(Self {
            path: path.to_path_buf(),
            ffmpeg: tools.ffmpeg.clone(),
            info,
            released: false,
        })
    }

    fn decode_args(&self, index: u64) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-nostdin".to_string(),
            "-noautorotate".to_string(),
            "-ss".to_string(),
            format!("{:.6}", seek_time_secs(index, self.info.fps)),
            "-i".to_string(),
            self.path.to_string_lossy().into_owned(),
            "-frames:v".to_string(),
            "1".to_string(),
            "-f".to_string(),
            "rawvideo".to_string(),
            "-pix_fmt".to_string(),
            "rgb24".to_string(),
            "-".to_string(),
        ]
    }
}

impl VideoSource for FfmpegVideo {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn fetch_frame(&mut self, index: u64) -> InspectorResult<RawFrame> {
        if self.released {
            return Err(InspectorError::sample_failure(index, "video already released"));
        }
        if index >= self.info.frame_count {
            return Err(InspectorError::sample_failure(
                index,
                format!("frame is past the end ({} frames)", self.info.frame_count),
            ));
        }

        let args = self.decode_args(index);
        tracing::trace!(index, ?args, "Decoding frame");
        let output = Command::new(&self.ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| InspectorError::sample_failure(index, format!("failed to run ffmpeg: {e}")))?;

        if !output.status.success() {
            return Err(InspectorError::sample_failure(
                index,
                format!(
                    "ffmpeg exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        frame_from_rgb24(index, self.info.width, self.info.height, output.stdout)
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            tracing::debug!(path = %self.path.display(), "Released video");
        }
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

/// Input seek position that lands on frame `index`.
///
/// ffmpeg's accurate seek drops every frame with a timestamp before the
/// target, so aiming half a frame early selects exactly `index`.
fn seek_time_secs(index: u64, fps: f64) -> f64 {
    ((index as f64 - 0.5) / fps).max(0.0)
}

/// Wrap a raw `rgb24` buffer as an image, rejecting short reads.
fn frame_from_rgb24(
    index: u64,
    width: u32,
    height: u32,
    mut bytes: Vec<u8>,
) -> InspectorResult<RawFrame> {
    let expected = width as usize * height as usize * 3;
    if bytes.len() < expected {
        return Err(InspectorError::sample_failure(
            index,
            format!("decoded {} bytes, expected {expected}", bytes.len()),
        ));
    }
    bytes.truncate(expected);
    RawFrame::from_raw(width, height, bytes).ok_or_else(|| {
        InspectorError::sample_failure(index, "decoded buffer does not match frame size")
    })
}

fn tool_available(binary: &Path) -> bool {
    Command::new(binary)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn probe(path: &Path, ffprobe: &Path) -> InspectorResult<VideoInfo> {
    let output = Command::new(ffprobe)
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate,avg_frame_rate,nb_frames,duration:format=duration",
            "-of",
            "json",
        ])
        .arg(path)
        .output()
        .map_err(|e| {
            InspectorError::media(format!("failed to run {}: {e}", ffprobe.display()))
        })?;

    if !output.status.success() {
        return Err(InspectorError::media(format!(
            "ffprobe failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    nb_frames: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Turn `ffprobe -of json` output into [`VideoInfo`].
pub fn parse_probe_output(json: &str) -> InspectorResult<VideoInfo> {
    let probe: ProbeOutput = serde_json::from_str(json)?;
    let stream = probe
        .streams
        .first()
        .ok_or_else(|| InspectorError::media("no video stream found"))?;

    let width = stream.width.unwrap_or(0);
    let height = stream.height.unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(InspectorError::media("video stream has no frame size"));
    }

    let fps = [&stream.r_frame_rate, &stream.avg_frame_rate]
        .into_iter()
        .flatten()
        .find_map(|rate| parse_frame_rate(rate))
        .ok_or_else(|| InspectorError::media("video stream has no usable frame rate"))?;

    let frame_count = stream
        .nb_frames
        .as_deref()
        .and_then(|n| n.parse::<u64>().ok())
        .filter(|n| *n > 0)
        .or_else(|| {
            let duration = stream
                .duration
                .as_deref()
                .or_else(|| probe.format.as_ref()?.duration.as_deref())?
                .parse::<f64>()
                .ok()?;
            (duration.is_finite() && duration > 0.0).then(|| (duration * fps).round() as u64)
        })
        .unwrap_or(0);

    Ok(VideoInfo::new(frame_count, fps, width, height))
}

/// Parse `"30000/1001"` or `"25"` into frames per second.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let fps = match rate.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => rate.trim().parse::<f64>().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}
