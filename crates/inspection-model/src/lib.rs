//! VidInspect Inspection Model
//!
//! Defines the data contracts of a single inspection run:
//! - **Video:** Frame count, frame rate, and dimensions of a source
//! - **Zone:** Validated pixel rectangle restricting motion measurement
//! - **Config:** The immutable analysis configuration
//! - **Events:** Timestamped stall events and their descriptions
//! - **Timeline:** Per-interval motion scores in frame order
//! - **Report:** Everything a presentation layer needs after a run
//!
//! Zone coordinates are absolute pixels of the source frame.

pub mod config;
pub mod event;
pub mod report;
pub mod timeline;
pub mod video;
pub mod zone;

pub use config::*;
pub use event::*;
pub use report::*;
pub use timeline::*;
pub use video::*;
pub use zone::*;
