//! Machinery shared by both solver formulations.
//!
//! Target resolution (body pose applied to per-leg foot targets), the
//! clamp-or-fail arccosine policy, reachability checks, solve diagnostics,
//! and the direct point-injection path.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use hexapod_core::{LegPosition, Point, SolveError, VirtualHexapod, LEG_COUNT};

/// How far outside `[-1, 1]` an arccosine argument may drift from
/// floating-point error at a reachability boundary before the solve fails.
pub const DOMAIN_EPSILON: f64 = 1e-9;

/// Desired outcome handed to a solver.
///
/// Rotation angles are in degrees about the body x, y, z axes; translation
/// is in configuration units. A missing foot target keeps that foot at its
/// current position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IkParameters {
    /// Per-leg target foot-tip positions in ground coordinates, model order.
    #[serde(default)]
    pub targets: [Option<Point>; LEG_COUNT],
    /// Body translation before leg placement.
    #[serde(default)]
    pub body_translation: [f64; 3],
    /// Body rotation before leg placement: degrees about x, y, z.
    #[serde(default)]
    pub body_rotation: [f64; 3],
}

impl IkParameters {
    pub fn with_target(mut self, leg: LegPosition, target: Point) -> Self {
        self.targets[leg.index()] = Some(target);
        self
    }
}

/// Per-leg solve record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LegDiagnostics {
    /// Distance from the femur joint to the target in the leg plane.
    pub reach: f64,
    /// Whether any trigonometric argument was clamped at a domain boundary.
    pub clamped: bool,
}

/// What both solvers report alongside the poses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverDiagnostics {
    pub legs: [LegDiagnostics; LEG_COUNT],
}

impl SolverDiagnostics {
    /// True if any leg needed a domain clamp.
    pub fn any_clamped(&self) -> bool {
        self.legs.iter().any(|leg| leg.clamped)
    }
}

/// The requested body pose as an isometry over ground coordinates.
pub fn body_frame(params: &IkParameters) -> Isometry3<f64> {
    let [rx, ry, rz] = params.body_rotation;
    let [tx, ty, tz] = params.body_translation;
    Isometry3::from_parts(
        Translation3::new(tx, ty, tz),
        UnitQuaternion::from_euler_angles(rx.to_radians(), ry.to_radians(), rz.to_radians()),
    )
}

/// Resolve every leg's target foot tip into body-frame coordinates.
///
/// Explicit targets are taken from the parameters; a leg without one keeps
/// its current foot tip. The requested body pose is then inverted: moving
/// the body while the feet stay put is the same as moving the feet the
/// opposite way in the body frame.
pub fn resolve_targets(
    hexapod: &VirtualHexapod,
    params: &IkParameters,
) -> [Point3<f64>; LEG_COUNT] {
    let body = body_frame(params);
    LegPosition::ALL.map(|position| {
        let world = match &params.targets[position.index()] {
            Some(target) => target.coords(),
            None => hexapod.leg(position).foot_tip().coords(),
        };
        body.inverse_transform_point(&world)
    })
}

/// Arccosine in degrees with the clamp-or-fail domain policy.
///
/// Arguments within [`DOMAIN_EPSILON`] outside `[-1, 1]` are clamped and
/// flagged; anything farther out (including NaN) is a
/// [`SolveError::DomainViolation`].
pub fn checked_acos(value: f64, context: &'static str) -> Result<(f64, bool), SolveError> {
    if value.abs() <= 1.0 {
        return Ok((value.acos().to_degrees(), false));
    }
    if value.abs() - 1.0 <= DOMAIN_EPSILON {
        return Ok((value.clamp(-1.0, 1.0).acos().to_degrees(), true));
    }
    Err(SolveError::DomainViolation { context, value })
}

/// Check that a target lies within a leg's planar reach.
///
/// `distance` is measured from the femur joint; the reachable band is
/// `[|femur - tibia|, femur + tibia]`.
pub fn reach_check(
    leg: LegPosition,
    distance: f64,
    femur: f64,
    tibia: f64,
) -> Result<(), SolveError> {
    let min_reach = (femur - tibia).abs();
    let max_reach = femur + tibia;
    if distance < min_reach || distance > max_reach {
        return Err(SolveError::UnreachableTarget {
            leg: leg.as_str(),
            distance,
            min_reach,
            max_reach,
        });
    }
    Ok(())
}

/// Directly overwrite one leg's four points, bypassing angle inversion.
///
/// The leg's stored angles are left untouched and therefore go stale
/// relative to the injected points; callers must not rely on them
/// afterwards.
///
/// # Panics
///
/// Panics if `leg_index >= 6`.
pub fn set_leg_points(hexapod: &mut VirtualHexapod, leg_index: usize, points: [Point; 4]) {
    let leg = &mut hexapod.legs_mut()[leg_index];
    for (index, point) in points.into_iter().enumerate() {
        leg.set_p(index, point);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
