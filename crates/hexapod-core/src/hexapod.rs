//! The six-legged body model.
//!
//! A [`VirtualHexapod`] owns six [`Linkage`]s placed at the body's mount
//! points, one per [`LegPosition`]. Construction puts every leg at the
//! neutral pose; afterwards poses are mutated through [`VirtualHexapod::update`]
//! (or a direct point injection, which bypasses the angles).

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::Dimensions;
use crate::error::ConfigError;
use crate::linkage::Linkage;

/// Number of legs.
pub const LEG_COUNT: usize = 6;

/// Default tolerance when classifying stance vs swing legs, in the same
/// units as the dimension configuration.
pub const STANCE_TOLERANCE: f64 = 1e-4;

/// Leg positions in model order, counterclockwise from the right middle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegPosition {
    RightMiddle,
    RightFront,
    LeftFront,
    LeftMiddle,
    LeftBack,
    RightBack,
}

impl LegPosition {
    /// All positions in model order.
    pub const ALL: [Self; LEG_COUNT] = [
        Self::RightMiddle,
        Self::RightFront,
        Self::LeftFront,
        Self::LeftMiddle,
        Self::LeftBack,
        Self::RightBack,
    ];

    /// Index into leg arrays.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Fixed mounting azimuth of the coxia's zero direction, in degrees.
    pub const fn coxia_axis(self) -> f64 {
        match self {
            Self::RightMiddle => 0.0,
            Self::RightFront => 45.0,
            Self::LeftFront => 135.0,
            Self::LeftMiddle => 180.0,
            Self::LeftBack => 225.0,
            Self::RightBack => 315.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RightMiddle => "right-middle",
            Self::RightFront => "right-front",
            Self::LeftFront => "left-front",
            Self::LeftMiddle => "left-middle",
            Self::LeftBack => "left-back",
            Self::RightBack => "right-back",
        }
    }
}

impl std::fmt::Display for LegPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One leg's joint angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LegPose {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LegPose {
    pub const fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Joint angles for all six legs, in model order.
pub type Poses = [LegPose; LEG_COUNT];

/// Whether a leg currently bears weight or is lifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegState {
    Stance,
    Swing,
}

/// Six legs mounted on a hexagonal body, body-centered coordinates.
#[derive(Debug, Clone)]
pub struct VirtualHexapod {
    dimensions: Dimensions,
    legs: [Linkage; LEG_COUNT],
}

impl VirtualHexapod {
    /// Build a hexapod at the neutral pose from a dimension configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any dimension is non-positive or
    /// non-finite.
    pub fn new(dimensions: Dimensions) -> Result<Self, ConfigError> {
        dimensions.validate()?;
        let legs = LegPosition::ALL.map(|position| {
            let segments = dimensions.segments(position);
            Linkage::new(
                segments.coxia,
                segments.femur,
                segments.tibia,
                position.coxia_axis(),
                dimensions.mount_origin(position),
                position.as_str(),
                position.index(),
            )
        });
        Ok(Self { dimensions, legs })
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn leg(&self, position: LegPosition) -> &Linkage {
        &self.legs[position.index()]
    }

    pub fn leg_mut(&mut self, position: LegPosition) -> &mut Linkage {
        &mut self.legs[position.index()]
    }

    pub fn legs(&self) -> &[Linkage; LEG_COUNT] {
        &self.legs
    }

    pub fn legs_mut(&mut self) -> &mut [Linkage; LEG_COUNT] {
        &mut self.legs
    }

    /// Recompute every leg's pose from an ordered set of angle triples.
    pub fn update(&mut self, poses: &Poses) {
        trace!(?poses, "updating hexapod pose");
        for (leg, pose) in self.legs.iter_mut().zip(poses.iter()) {
            leg.change_pose(pose.alpha, pose.beta, pose.gamma);
        }
    }

    /// Classify each leg as stance or swing.
    ///
    /// A leg is in stance when its ground-contact height is within
    /// `tolerance` of the lowest ground contact across all legs.
    pub fn leg_states(&self, tolerance: f64) -> [LegState; LEG_COUNT] {
        let floor = self
            .legs
            .iter()
            .map(|leg| leg.ground_contact().z)
            .fold(f64::INFINITY, f64::min);
        self.legs.each_ref().map(|leg| {
            if leg.ground_contact().z <= floor + tolerance {
                LegState::Stance
            } else {
                LegState::Swing
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
