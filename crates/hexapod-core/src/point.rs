//! 3D points and the frame transforms used to chain leg segments.
//!
//! A [`Frame`] maps a point expressed in one coordinate frame into another.
//! Applied as `R * p + t`: the rotation acts on the point, the translation is
//! expressed in the target frame and is not rotated. Two builders cover
//! everything the leg model needs: [`link_frame`] steps from one segment to
//! the next, [`mount_frame`] places a whole leg into body-centered
//! coordinates.
//!
//! All angles at this boundary are in degrees.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A rigid transform between two coordinate frames.
pub type Frame = Isometry3<f64>;

/// Rotate about the Y axis by `theta_deg`, then translate `length` along X.
///
/// Steps from one leg segment's frame to the next along the kinematic chain.
pub fn link_frame(theta_deg: f64, length: f64) -> Frame {
    Frame::from_parts(
        Translation3::new(length, 0.0, 0.0),
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), theta_deg.to_radians()),
    )
}

/// Rotate about the Z axis by `azimuth_deg`, then translate `(x, y)` in the
/// horizontal plane.
///
/// Re-expresses leg-local points in body-centered coordinates, one such frame
/// per leg mount.
pub fn mount_frame(azimuth_deg: f64, x: f64, y: f64) -> Frame {
    Frame::from_parts(
        Translation3::new(x, y, 0.0),
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), azimuth_deg.to_radians()),
    )
}

/// A named point in 3D space.
///
/// Equality compares coordinates only; the name is a label carried along for
/// debugging and display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub name: String,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            name: String::new(),
        }
    }

    pub fn named(x: f64, y: f64, z: f64, name: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            name: name.into(),
        }
    }

    /// Coordinates as a nalgebra point.
    pub fn coords(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// This point re-expressed in another frame. The name is kept.
    pub fn wrt(&self, frame: &Frame) -> Self {
        let p = frame * self.coords();
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            name: self.name.clone(),
        }
    }

    /// This point re-expressed in another frame, with a new name.
    pub fn wrt_named(&self, frame: &Frame, name: impl Into<String>) -> Self {
        let p = frame * self.coords();
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            name: name.into(),
        }
    }

    /// Re-express this point in another frame, then raise it by `height`.
    ///
    /// Mutates in place; callers that still need the original must clone it
    /// first. Used when the whole body frame shifts, e.g. after a leveling
    /// correction.
    pub fn update_wrt(&mut self, frame: &Frame, height: f64) {
        let p = frame * self.coords();
        self.x = p.x;
        self.y = p.y;
        self.z = p.z + height;
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Point({:.4}, {:.4}, {:.4}, name={})",
            self.x, self.y, self.z, self.name
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
