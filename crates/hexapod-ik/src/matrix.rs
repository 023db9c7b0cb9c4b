//! Frame-based solver.
//!
//! Solves the identical geometric problem as [`crate::trig`] but formulated
//! over nalgebra isometries and vectors: the target is pulled into the leg's
//! local frame by inverting the mount transform, and the knee is located by
//! intersecting the femur and tibia circles in the leg's sagittal plane.
//! Both solvers fix the same elbow branch (knee above the chord to the
//! target, i.e. the knee bends downward), so their outputs must match.

use nalgebra::Vector2;
use tracing::debug;

use hexapod_core::{mount_frame, LegPose, LegPosition, Poses, SolveError, VirtualHexapod};

use crate::shared::{
    reach_check, resolve_targets, IkParameters, LegDiagnostics, SolverDiagnostics, DOMAIN_EPSILON,
};

/// Solve for the joint angles that realize the requested body pose and foot
/// targets, then apply them to the hexapod.
///
/// Same contract and error taxonomy as
/// [`crate::trig::inverse_kinematics_update`]; the two must agree within
/// numeric tolerance on every valid input.
pub fn inverse_kinematics_update(
    hexapod: &mut VirtualHexapod,
    params: &IkParameters,
) -> Result<(Poses, SolverDiagnostics), SolveError> {
    hexapod.dimensions().validate()?;
    let targets = resolve_targets(hexapod, params);

    let mut poses = Poses::default();
    let mut diagnostics = SolverDiagnostics::default();

    for position in LegPosition::ALL {
        let index = position.index();
        let leg = hexapod.leg(position);
        let (a, b, c) = (leg.coxia_length(), leg.femur_length(), leg.tibia_length());
        let origin = leg.origin();

        // Invert the mount transform (azimuth only; alpha is the unknown).
        let unmount = mount_frame(position.coxia_axis(), origin.x, origin.y).inverse();
        let local = unmount * targets[index];

        let alpha = local.y.atan2(local.x).to_degrees();

        // Sagittal plane: x radial from the body contact, y up.
        let foot = Vector2::new(local.x.hypot(local.y), local.z);
        let femur_joint = Vector2::new(a, 0.0);
        let chord = foot - femur_joint;
        let distance = chord.norm();
        reach_check(position, distance, b, c)?;

        // Knee = intersection of the circle of radius b around the femur
        // joint with the circle of radius c around the foot, on the upper
        // side of the chord.
        let along = (b * b - c * c + distance * distance) / (2.0 * distance);
        let perp_sq = b * b - along * along;
        let (perp, clamped) = if perp_sq >= 0.0 {
            (perp_sq.sqrt(), false)
        } else if perp_sq >= -DOMAIN_EPSILON * b * b {
            (0.0, true)
        } else {
            return Err(SolveError::DomainViolation {
                context: "knee circle intersection",
                value: perp_sq,
            });
        };
        let direction = chord / distance;
        let normal = Vector2::new(-direction.y, direction.x);
        let knee = femur_joint + direction * along + normal * perp;

        let femur_vec = knee - femur_joint;
        let tibia_vec = foot - knee;
        let beta = femur_vec.y.atan2(femur_vec.x).to_degrees();
        // Signed angle from femur to tibia; gamma is zero on the femur's
        // perpendicular, which sits at -90 degrees.
        let bend = femur_vec.perp(&tibia_vec).atan2(femur_vec.dot(&tibia_vec));
        let gamma = bend.to_degrees() + 90.0;

        poses[index] = LegPose::new(alpha, beta, gamma);
        diagnostics.legs[index] = LegDiagnostics {
            reach: distance,
            clamped,
        };
    }

    debug!(clamped = diagnostics.any_clamped(), "matrix solve complete");
    hexapod.update(&poses);
    Ok((poses, diagnostics))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
