//! Dimension configuration: body mount geometry and per-pair segment lengths.
//!
//! The body is a hexagon described by three half-dimensions (`front`, `side`,
//! `middle`); each leg pair (front, middle, back) carries its own coxia /
//! femur / tibia lengths. Deserializes from TOML with every field optional,
//! defaulting to a 100-unit regular build.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::hexapod::LegPosition;
use crate::point::Point;

const fn default_dimension() -> f64 {
    100.0
}

/// Lengths of the three segments of one leg, proximal to distal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentLengths {
    #[serde(default = "default_dimension")]
    pub coxia: f64,
    #[serde(default = "default_dimension")]
    pub femur: f64,
    #[serde(default = "default_dimension")]
    pub tibia: f64,
}

impl Default for SegmentLengths {
    fn default() -> Self {
        Self {
            coxia: default_dimension(),
            femur: default_dimension(),
            tibia: default_dimension(),
        }
    }
}

impl SegmentLengths {
    pub const fn new(coxia: f64, femur: f64, tibia: f64) -> Self {
        Self {
            coxia,
            femur,
            tibia,
        }
    }
}

/// Segment lengths per leg pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegSegments {
    #[serde(default)]
    pub front: SegmentLengths,
    #[serde(default)]
    pub middle: SegmentLengths,
    #[serde(default)]
    pub back: SegmentLengths,
}

impl LegSegments {
    /// The same lengths for every pair.
    pub const fn uniform(lengths: SegmentLengths) -> Self {
        Self {
            front: lengths,
            middle: lengths,
            back: lengths,
        }
    }
}

/// Full dimension configuration for a [`VirtualHexapod`](crate::VirtualHexapod).
///
/// ```text
///        x2 ---- x1          x1 = ( front, side)
///       /          \         x2 = (-front, side)
///     x3            x0       x0 = ( middle, 0)
///       \          /         x3 = (-middle, 0)
///        x4 ---- x5          x4 = (-front, -side), x5 = (front, -side)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Half-distance between the two front (or back) mounts, along x.
    #[serde(default = "default_dimension")]
    pub front: f64,
    /// Distance from the body center line to a front mount, along y.
    #[serde(default = "default_dimension")]
    pub side: f64,
    /// Half-distance between the two middle mounts, along x.
    #[serde(default = "default_dimension")]
    pub middle: f64,
    /// Segment lengths per leg pair.
    #[serde(default)]
    pub legs: LegSegments,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            front: default_dimension(),
            side: default_dimension(),
            middle: default_dimension(),
            legs: LegSegments::default(),
        }
    }
}

impl Dimensions {
    /// Validate all dimensions: finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("front", self.front),
            ("side", self.side),
            ("middle", self.middle),
            ("front coxia", self.legs.front.coxia),
            ("front femur", self.legs.front.femur),
            ("front tibia", self.legs.front.tibia),
            ("middle coxia", self.legs.middle.coxia),
            ("middle femur", self.legs.middle.femur),
            ("middle tibia", self.legs.middle.tibia),
            ("back coxia", self.legs.back.coxia),
            ("back femur", self.legs.back.femur),
            ("back tibia", self.legs.back.tibia),
        ];
        for (name, value) in checks {
            check_positive(name, value)?;
        }
        Ok(())
    }

    /// Load from a TOML file and validate.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The mount point of a leg relative to the body center.
    pub fn mount_origin(&self, leg: LegPosition) -> Point {
        use LegPosition::*;
        let (x, y) = match leg {
            RightMiddle => (self.middle, 0.0),
            RightFront => (self.front, self.side),
            LeftFront => (-self.front, self.side),
            LeftMiddle => (-self.middle, 0.0),
            LeftBack => (-self.front, -self.side),
            RightBack => (self.front, -self.side),
        };
        Point::named(x, y, 0.0, leg.as_str())
    }

    /// The segment lengths of a leg's pair.
    pub const fn segments(&self, leg: LegPosition) -> SegmentLengths {
        use LegPosition::*;
        match leg {
            RightFront | LeftFront => self.legs.front,
            RightMiddle | LeftMiddle => self.legs.middle,
            LeftBack | RightBack => self.legs.back,
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteValue { name });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositiveLength { name, value });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
