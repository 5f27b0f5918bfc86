//! Error types shared across VidInspect crates.

/// Top-level error type for VidInspect operations.
#[derive(Debug, thiserror::Error)]
pub enum InspectorError {
    /// A sampled frame could not be retrieved. Sampling stops here.
    #[error("Sample failure at frame {frame_index}: {message}")]
    SampleFailure { frame_index: u64, message: String },

    /// The zone rectangle does not fit inside the frame.
    #[error("Invalid zone {zone} for a {width}x{height} frame")]
    InvalidZone {
        zone: String,
        width: u32,
        height: u32,
    },

    #[error("Geometry error: {message}")]
    Geometry { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Media error: {message}")]
    Media { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using InspectorError.
pub type InspectorResult<T> = Result<T, InspectorError>;

impl InspectorError {
    pub fn sample_failure(frame_index: u64, msg: impl Into<String>) -> Self {
        Self::SampleFailure {
            frame_index,
            message: msg.into(),
        }
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry {
            message: msg.into(),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }

    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media {
            message: msg.into(),
        }
    }

    /// Whether the error concerns frame or zone geometry.
    pub fn is_geometry(&self) -> bool {
        matches!(self, Self::InvalidZone { .. } | Self::Geometry { .. })
    }

    pub fn is_sample_failure(&self) -> bool {
        matches!(self, Self::SampleFailure { .. })
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
