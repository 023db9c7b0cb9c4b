//! Closed-form trigonometric solver.
//!
//! Works each leg in its own sagittal plane with plain scalar math: the
//! azimuth comes straight from the horizontal projection of the local
//! target, and the two remaining angles from the law of cosines over the
//! femur/tibia triangle. Must agree with the frame-based formulation in
//! [`crate::matrix`] on every valid input.

use tracing::debug;

use hexapod_core::{LegPose, LegPosition, Poses, SolveError, VirtualHexapod};

use crate::shared::{
    checked_acos, reach_check, resolve_targets, IkParameters, LegDiagnostics, SolverDiagnostics,
};

/// Solve for the joint angles that realize the requested body pose and foot
/// targets, then apply them to the hexapod.
///
/// Returns the poses (degrees, model leg order) and per-leg diagnostics.
/// On error the hexapod is left unchanged.
///
/// # Errors
///
/// [`SolveError::UnreachableTarget`] when a foot target violates the
/// triangle inequality for its leg, [`SolveError::DomainViolation`] when a
/// trigonometric argument falls too far outside its domain, and
/// [`SolveError::Config`] when the hexapod's dimensions are invalid.
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

        // Leg-local target: shift to the mount point, then unwind the fixed
        // mounting azimuth so x points along the coxia's zero direction.
        let dx = targets[index].x - origin.x;
        let dy = targets[index].y - origin.y;
        let dz = targets[index].z - origin.z;
        let (sin_axis, cos_axis) = position.coxia_axis().to_radians().sin_cos();
        let local_x = cos_axis * dx + sin_axis * dy;
        let local_y = -sin_axis * dx + cos_axis * dy;

        let alpha = local_y.atan2(local_x).to_degrees();

        // Planar problem: rho is the horizontal distance from the body
        // contact, height the target's offset from the femur joint plane.
        let rho = local_x.hypot(local_y);
        let height = dz;
        let forward = rho - a;
        let distance = forward.hypot(height);
        reach_check(position, distance, b, c)?;

        let (shoulder, clamped_shoulder) = checked_acos(
            (b * b + distance * distance - c * c) / (2.0 * b * distance),
            "femur-to-target angle",
        )?;
        let beta = height.atan2(forward).to_degrees() + shoulder;

        let (knee, clamped_knee) = checked_acos(
            (b * b + c * c - distance * distance) / (2.0 * b * c),
            "knee angle",
        )?;
        // At 90 degrees of knee the tibia sits on the perpendicular of the
        // femur, which is gamma's zero.
        let gamma = knee - 90.0;

        poses[index] = LegPose::new(alpha, beta, gamma);
        diagnostics.legs[index] = LegDiagnostics {
            reach: distance,
            clamped: clamped_shoulder || clamped_knee,
        };
    }

    debug!(clamped = diagnostics.any_clamped(), "trig solve complete");
    hexapod.update(&poses);
    Ok((poses, diagnostics))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::body_frame;
    use approx::assert_relative_eq;
    use hexapod_core::{Dimensions, Point};

    fn hexapod() -> VirtualHexapod {
        VirtualHexapod::new(Dimensions::default()).unwrap()
    }

    #[test]
    fn neutral_targets_solve_to_neutral_poses() {
        let mut hexapod = hexapod();
        let (poses, diagnostics) =
            inverse_kinematics_update(&mut hexapod, &IkParameters::default()).unwrap();
        for pose in poses {
            assert_relative_eq!(pose.alpha, 0.0, epsilon = 1e-9);
            assert_relative_eq!(pose.beta, 0.0, epsilon = 1e-9);
            assert_relative_eq!(pose.gamma, 0.0, epsilon = 1e-9);
        }
        assert!(!diagnostics.any_clamped());
    }

    #[test]
    fn round_trip_recovers_pose() {
        // FK at a known pose, then IK on the resulting tip must recover it.
        let mut reference = hexapod();
        let pose = LegPose::new(15.0, 25.0, -10.0);
        reference.update(&[pose; 6]);

        let mut params = IkParameters::default();
        for position in LegPosition::ALL {
            params.targets[position.index()] =
                Some(reference.leg(position).foot_tip().clone());
        }

        let mut solved = hexapod();
        let (poses, _) = inverse_kinematics_update(&mut solved, &params).unwrap();
        for position in LegPosition::ALL {
            let recovered = poses[position.index()];
            assert_relative_eq!(recovered.alpha, 15.0, epsilon = 1e-6);
            assert_relative_eq!(recovered.beta, 25.0, epsilon = 1e-6);
            assert_relative_eq!(recovered.gamma, -10.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn solved_poses_reproduce_targets() {
        let mut hexapod = hexapod();
        let target = Point::new(220.0, 40.0, -80.0);
        let params =
            IkParameters::default().with_target(LegPosition::RightMiddle, target.clone());
        inverse_kinematics_update(&mut hexapod, &params).unwrap();

        let tip = hexapod.leg(LegPosition::RightMiddle).foot_tip();
        assert_relative_eq!(tip.x, target.x, epsilon = 1e-6);
        assert_relative_eq!(tip.y, target.y, epsilon = 1e-6);
        assert_relative_eq!(tip.z, target.z, epsilon = 1e-6);
    }

    #[test]
    fn target_beyond_full_reach_fails() {
        let mut hexapod = hexapod();
        // Straight out past coxia + femur + tibia.
        let params = IkParameters::default()
            .with_target(LegPosition::RightMiddle, Point::new(420.0, 0.0, 0.0));
        let err = inverse_kinematics_update(&mut hexapod, &params).unwrap_err();
        assert!(matches!(err, SolveError::UnreachableTarget { .. }));
        // The hexapod must be untouched on failure.
        assert_relative_eq!(hexapod.leg(LegPosition::RightMiddle).beta(), 0.0);
    }

    #[test]
    fn target_at_boundary_of_reach_solves() {
        let mut hexapod = hexapod();
        // Exactly coxia + femur + tibia along the leg axis: fully extended.
        let params = IkParameters::default()
            .with_target(LegPosition::RightMiddle, Point::new(400.0, 0.0, 0.0));
        let (poses, _) = inverse_kinematics_update(&mut hexapod, &params).unwrap();
        let pose = poses[LegPosition::RightMiddle.index()];
        assert_relative_eq!(pose.alpha, 0.0, epsilon = 1e-6);
        assert_relative_eq!(pose.beta, 0.0, epsilon = 1e-6);
        assert_relative_eq!(pose.gamma, 90.0, epsilon = 1e-6);
    }

    #[test]
    fn target_inside_minimum_reach_fails() {
        let mut dims = Dimensions::default();
        dims.legs.middle.tibia = 40.0;
        let mut hexapod = VirtualHexapod::new(dims).unwrap();
        // Target exactly at the femur joint: distance 0 < |femur - tibia|.
        let params = IkParameters::default()
            .with_target(LegPosition::RightMiddle, Point::new(200.0, 0.0, 0.0));
        let err = inverse_kinematics_update(&mut hexapod, &params).unwrap_err();
        match err {
            SolveError::UnreachableTarget {
                leg,
                distance,
                min_reach,
                ..
            } => {
                assert_eq!(leg, "right-middle");
                assert_relative_eq!(distance, 0.0, epsilon = 1e-9);
                assert_relative_eq!(min_reach, 60.0, epsilon = 1e-9);
            }
            other => panic!("expected UnreachableTarget, got {other:?}"),
        }
    }

    #[test]
    fn body_translation_lowers_feet_in_body_frame() {
        let mut hexapod = hexapod();
        let params = IkParameters {
            body_translation: [0.0, 0.0, 20.0],
            ..IkParameters::default()
        };
        inverse_kinematics_update(&mut hexapod, &params).unwrap();
        for position in LegPosition::ALL {
            assert_relative_eq!(
                hexapod.leg(position).foot_tip().z,
                -120.0,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn body_rotation_keeps_feet_planted() {
        // The feet stay at their ground positions; in the body frame they
        // appear rotated the opposite way, and the solved pose must
        // reproduce exactly that.
        let mut hexapod = hexapod();
        let params = IkParameters {
            body_rotation: [4.0, -3.0, 10.0],
            ..IkParameters::default()
        };
        let body = body_frame(&params);
        let expected = LegPosition::ALL
            .map(|p| body.inverse_transform_point(&hexapod.leg(p).foot_tip().coords()));

        inverse_kinematics_update(&mut hexapod, &params).unwrap();
        for position in LegPosition::ALL {
            let tip = hexapod.leg(position).foot_tip();
            let want = expected[position.index()];
            assert_relative_eq!(tip.x, want.x, epsilon = 1e-6);
            assert_relative_eq!(tip.y, want.y, epsilon = 1e-6);
            assert_relative_eq!(tip.z, want.z, epsilon = 1e-6);
        }
    }
}
