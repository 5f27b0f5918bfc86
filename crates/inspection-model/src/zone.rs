//! Zone-of-interest rectangle.
//!
//! A zone is given in absolute pixel coordinates as `(x1, y1)` top-left
//! and `(x2, y2)` bottom-right, with `x2`/`y2` exclusive when cropping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vidinspect_common::error::{InspectorError, InspectorResult};

/// A non-degenerate pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawZone", into = "RawZone")]
pub struct Zone {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

#[derive(Serialize, Deserialize)]
struct RawZone {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl Zone {
    /// Create a zone. Fails unless `x1 < x2` and `y1 < y2`.
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> InspectorResult<Self> {
        if x1 >= x2 || y1 >= y2 {
            return Err(InspectorError::configuration(format!(
                "zone ({x1}, {y1})-({x2}, {y2}) is degenerate: need x1 < x2 and y1 < y2"
            )));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Parse `"x1,y1,x2,y2"`.
    pub fn parse(input: &str) -> InspectorResult<Self> {
        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        let &[x1, y1, x2, y2] = parts.as_slice() else {
            return Err(InspectorError::configuration(format!(
                "zone must be four comma-separated integers, got {input:?}"
            )));
        };
        let coord = |s: &str| {
            s.parse::<u32>().map_err(|e| {
                InspectorError::configuration(format!("invalid zone coordinate {s:?}: {e}"))
            })
        };
        Self::new(coord(x1)?, coord(y1)?, coord(x2)?, coord(y2)?)
    }

    pub fn x1(&self) -> u32 {
        self.x1
    }

    pub fn y1(&self) -> u32 {
        self.y1
    }

    pub fn x2(&self) -> u32 {
        self.x2
    }

    pub fn y2(&self) -> u32 {
        self.y2
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Pixel count covered by the zone.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Check that every coordinate lies in `[0, width) x [0, height)`.
    pub fn validate_within(&self, width: u32, height: u32) -> InspectorResult<()> {
        if self.x2 >= width || self.y2 >= height {
            return Err(InspectorError::InvalidZone {
                zone: self.to_string(),
                width,
                height,
            });
        }
        Ok(())
    }

    /// Whether the crop `[x1, x2) x [y1, y2)` fits in an image of this size.
    pub fn fits_crop(&self, width: u32, height: u32) -> bool {
        self.x2 <= width && self.y2 <= height
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

impl FromStr for Zone {
    type Err = InspectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<RawZone> for Zone {
    type Error = InspectorError;

    fn try_from(raw: RawZone) -> Result<Self, Self::Error> {
        Self::new(raw.x1, raw.y1, raw.x2, raw.y2)
    }
}

impl From<Zone> for RawZone {
    fn from(zone: Zone) -> Self {
        Self {
            x1: zone.x1,
            y1: zone.y1,
            x2: zone.x2,
            y2: zone.y2,
        }
    }
}
