//! VidInspect Media Sources
//!
//! Frame retrieval is consumed by the analysis core as a capability:
//! "given a video, seek to frame index `i` and hand back a decoded frame".
//! This crate defines that contract ([`VideoSource`]) and its backends:
//! - **ffmpeg:** probes with `ffprobe`, decodes single frames with `ffmpeg`
//! - **Image sequence:** a directory of still images at a declared rate
//! - **Memory:** frames held in memory, for tests and embedding

pub mod ffmpeg;
pub mod memory;
pub mod sequence;
pub mod source;

pub use ffmpeg::FfmpegVideo;
pub use memory::MemoryVideo;
pub use sequence::ImageSequence;
pub use source::{RawFrame, VideoSource};
