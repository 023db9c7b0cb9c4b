//! Shared fixtures and assertion helpers for the hexapod kinematics tests.

use approx::abs_diff_eq;

use hexapod_core::{Dimensions, LegPosition, LegSegments, Point, Poses, SegmentLengths, VirtualHexapod};

/// Tolerance for point and angle comparisons across crates.
pub const EPSILON: f64 = 1e-6;

/// The regular 100-unit build.
pub fn base_dimensions() -> Dimensions {
    Dimensions::default()
}

/// A wider, uneven build: long middle legs, short body.
pub fn wide_dimensions() -> Dimensions {
    Dimensions {
        front: 60.0,
        side: 110.0,
        middle: 95.0,
        legs: LegSegments {
            front: SegmentLengths::new(80.0, 110.0, 130.0),
            middle: SegmentLengths::new(90.0, 120.0, 140.0),
            back: SegmentLengths::new(80.0, 100.0, 120.0),
        },
    }
}

/// Assert two points are equal within [`EPSILON`], with a label in the
/// failure message. Names are not compared.
pub fn assert_points_eq(actual: &Point, expected: &Point, label: &str) {
    let ok = abs_diff_eq!(actual.x, expected.x, epsilon = EPSILON)
        && abs_diff_eq!(actual.y, expected.y, epsilon = EPSILON)
        && abs_diff_eq!(actual.z, expected.z, epsilon = EPSILON);
    assert!(ok, "{label}: {actual} != {expected}");
}

/// Assert two pose sets match angle for angle within [`EPSILON`].
pub fn assert_poses_eq(actual: &Poses, expected: &Poses, description: &str) {
    for position in LegPosition::ALL {
        let a = actual[position.index()];
        let e = expected[position.index()];
        let ok = abs_diff_eq!(a.alpha, e.alpha, epsilon = EPSILON)
            && abs_diff_eq!(a.beta, e.beta, epsilon = EPSILON)
            && abs_diff_eq!(a.gamma, e.gamma, epsilon = EPSILON);
        assert!(ok, "{description}: {position} leg pose {a:?} != {e:?}");
    }
}

/// Assert two hexapods are point-for-point equal, every leg, every point.
pub fn assert_hexapods_eq(actual: &VirtualHexapod, expected: &VirtualHexapod, description: &str) {
    for position in LegPosition::ALL {
        let a = actual.leg(position);
        let e = expected.leg(position);
        for index in 0..4 {
            assert_points_eq(
                a.p(index),
                e.p(index),
                &format!("{description}: {position} leg point {index}"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_valid() {
        assert!(base_dimensions().validate().is_ok());
        assert!(wide_dimensions().validate().is_ok());
    }

    #[test]
    fn point_assertion_tolerates_epsilon_noise() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(1.0 + 1e-9, 2.0, 3.0 - 1e-9);
        assert_points_eq(&a, &b, "noise");
    }

    #[test]
    #[should_panic(expected = "off")]
    fn point_assertion_panics_on_mismatch() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(1.1, 2.0, 3.0);
        assert_points_eq(&a, &b, "off");
    }
}
