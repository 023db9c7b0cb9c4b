//! Cross-solver scenarios: both formulations must agree on every valid
//! input, and solved poses must reproduce the requested geometry point for
//! point.

use hexapod_core::{LegPose, LegPosition, Point, SolveError, VirtualHexapod};
use hexapod_ik::{matrix, trig, IkParameters};
use hexapod_test_utils::{
    assert_hexapods_eq, assert_points_eq, assert_poses_eq, base_dimensions, wide_dimensions,
};

/// Build IK parameters whose targets are the foot tips of a hexapod posed
/// with `poses`.
fn targets_from_pose(dimensions: hexapod_core::Dimensions, poses: &hexapod_core::Poses) -> IkParameters {
    let mut reference = VirtualHexapod::new(dimensions).unwrap();
    reference.update(poses);
    let mut params = IkParameters::default();
    for position in LegPosition::ALL {
        params.targets[position.index()] = Some(reference.leg(position).foot_tip().clone());
    }
    params
}

#[test]
fn solvers_agree_across_pose_grid() {
    for dimensions in [base_dimensions(), wide_dimensions()] {
        for alpha in [-30.0, 0.0, 30.0] {
            for beta in [-30.0, 0.0, 45.0] {
                for gamma in [-30.0, 0.0, 30.0] {
                    let pose = LegPose::new(alpha, beta, gamma);
                    let params = targets_from_pose(dimensions, &[pose; 6]);

                    let mut via_trig = VirtualHexapod::new(dimensions).unwrap();
                    let mut via_matrix = VirtualHexapod::new(dimensions).unwrap();
                    let (trig_poses, _) =
                        trig::inverse_kinematics_update(&mut via_trig, &params).unwrap();
                    let (matrix_poses, _) =
                        matrix::inverse_kinematics_update(&mut via_matrix, &params).unwrap();

                    let label = format!("grid ({alpha}, {beta}, {gamma})");
                    assert_poses_eq(&trig_poses, &matrix_poses, &label);
                    assert_hexapods_eq(&via_trig, &via_matrix, &label);
                }
            }
        }
    }
}

#[test]
fn round_trip_recovers_generating_pose() {
    let poses = [
        LegPose::new(10.0, 20.0, -15.0),
        LegPose::new(-10.0, 35.0, 5.0),
        LegPose::new(0.0, -20.0, 25.0),
        LegPose::new(25.0, 15.0, 0.0),
        LegPose::new(-25.0, 0.0, -25.0),
        LegPose::new(5.0, 45.0, 10.0),
    ];
    let params = targets_from_pose(base_dimensions(), &poses);

    let mut hexapod = VirtualHexapod::new(base_dimensions()).unwrap();
    let (solved, _) = trig::inverse_kinematics_update(&mut hexapod, &params).unwrap();
    assert_poses_eq(&solved, &poses, "trig round trip");

    let mut hexapod = VirtualHexapod::new(base_dimensions()).unwrap();
    let (solved, _) = matrix::inverse_kinematics_update(&mut hexapod, &params).unwrap();
    assert_poses_eq(&solved, &poses, "matrix round trip");
}

#[test]
fn scenario_known_pose_equals_solved_pose() {
    // Fixture scenario: the targets come from a documented pose set, so that
    // pose set is an independently known-correct solution. A hexapod driven
    // by the solver must equal one driven by the known angles, point for
    // point.
    let known = [
        LegPose::new(15.0, 30.0, -10.0),
        LegPose::new(-5.0, 25.0, 0.0),
        LegPose::new(10.0, 10.0, 15.0),
        LegPose::new(0.0, 40.0, -20.0),
        LegPose::new(-15.0, 20.0, 10.0),
        LegPose::new(5.0, 35.0, -5.0),
    ];
    let params = targets_from_pose(wide_dimensions(), &known);

    for solver in [
        trig::inverse_kinematics_update,
        matrix::inverse_kinematics_update,
    ] {
        let mut solved_hexapod = VirtualHexapod::new(wide_dimensions()).unwrap();
        let (poses, diagnostics) = solver(&mut solved_hexapod, &params).unwrap();
        assert_poses_eq(&poses, &known, "scenario poses");
        assert!(!diagnostics.any_clamped());

        let mut known_hexapod = VirtualHexapod::new(wide_dimensions()).unwrap();
        known_hexapod.update(&known);
        assert_hexapods_eq(&solved_hexapod, &known_hexapod, "scenario hexapods");
    }
}

#[test]
fn solvers_interleave_without_drift() {
    // Alternating solvers on fresh hexapods keeps producing the same poses.
    let pose = LegPose::new(12.0, 28.0, -8.0);
    let params = targets_from_pose(base_dimensions(), &[pose; 6]);

    let mut first = None;
    for _ in 0..2 {
        for solver in [
            trig::inverse_kinematics_update,
            matrix::inverse_kinematics_update,
        ] {
            let mut hexapod = VirtualHexapod::new(base_dimensions()).unwrap();
            let (poses, _) = solver(&mut hexapod, &params).unwrap();
            if let Some(expected) = &first {
                assert_poses_eq(&poses, expected, "interleaved");
            } else {
                first = Some(poses);
            }
        }
    }
}

#[test]
fn body_pose_contract_holds_for_both_solvers() {
    // Whatever body pose is requested, forward kinematics at the solved
    // angles must land every tip on the pulled-back target.
    let params = IkParameters {
        body_translation: [10.0, -5.0, 25.0],
        body_rotation: [3.0, 5.0, -8.0],
        ..IkParameters::default()
    };

    for solver in [
        trig::inverse_kinematics_update,
        matrix::inverse_kinematics_update,
    ] {
        let mut hexapod = VirtualHexapod::new(base_dimensions()).unwrap();
        let expected = {
            let body = hexapod_ik::shared::body_frame(&params);
            LegPosition::ALL.map(|p| {
                let tip = hexapod.leg(p).foot_tip().coords();
                let pulled = body.inverse_transform_point(&tip);
                Point::new(pulled.x, pulled.y, pulled.z)
            })
        };
        solver(&mut hexapod, &params).unwrap();
        for position in LegPosition::ALL {
            assert_points_eq(
                hexapod.leg(position).foot_tip(),
                &expected[position.index()],
                &format!("body pose contract, {position}"),
            );
        }
    }
}

#[test]
fn both_solvers_report_unreachable_identically() {
    let params = IkParameters::default()
        .with_target(LegPosition::RightBack, Point::new(600.0, -600.0, 0.0));

    for solver in [
        trig::inverse_kinematics_update,
        matrix::inverse_kinematics_update,
    ] {
        let mut hexapod = VirtualHexapod::new(base_dimensions()).unwrap();
        let err = solver(&mut hexapod, &params).unwrap_err();
        match err {
            SolveError::UnreachableTarget { leg, distance, max_reach, .. } => {
                assert_eq!(leg, "right-back");
                assert!(distance > max_reach);
            }
            other => panic!("expected UnreachableTarget, got {other:?}"),
        }
        // Failure leaves the hexapod at its prior pose.
        let fresh = VirtualHexapod::new(base_dimensions()).unwrap();
        assert_hexapods_eq(&hexapod, &fresh, "untouched after failure");
    }
}
