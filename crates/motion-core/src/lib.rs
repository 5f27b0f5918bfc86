//! VidInspect Motion Core
//!
//! Turns a video into a stall report:
//! - **Sampler:** One frame per second of video, fetched in frame order
//! - **Analyzer:** Inter-frame difference scores and stall classification
//! - **Summary:** Activity bands and recommendation text
//! - **Inspection:** One run end to end, with guaranteed source release
//!
//! Everything runs synchronously on the caller's thread.

pub mod analyzer;
pub mod frame;
pub mod inspection;
pub mod sampler;
pub mod summary;

pub use analyzer::{motion_score, AnalyzerState, IntervalOutcome, MotionAnalyzer};
pub use inspection::{run_inspection, run_inspection_with_observer, InspectionRun};
pub use sampler::{sample_indices, sample_stride, FrameSampler, SampledFrame};
pub use summary::{classify_activity, summarize};
