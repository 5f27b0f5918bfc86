//! VidInspect Common Utilities
//!
//! Shared infrastructure for all VidInspect crates:
//! - Error taxonomy and result alias
//! - Injectable wall-clock abstraction for event timestamps
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
