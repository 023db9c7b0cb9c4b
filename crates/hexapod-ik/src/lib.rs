//! Inverse kinematics for the hexapod leg geometry model.
//!
//! Two interchangeable solver formulations over the same contract:
//!
//! ```text
//! VirtualHexapod + IkParameters ──► per-leg (alpha, beta, gamma) ──► update
//! ```
//!
//! [`trig`] solves each leg's sagittal plane in closed form with the law of
//! cosines; [`matrix`] formulates the same problem over nalgebra isometries
//! and a circle-intersection construction. Given identical inputs they must
//! produce angle triples whose forward kinematics agree within numeric
//! tolerance, including picking the same elbow branch (knee bends downward).
//!
//! A failed solve reports why — unreachable target, trigonometric domain
//! violation, or invalid configuration — and never hands back NaN angles or
//! a partially updated hexapod.

pub mod matrix;
pub mod shared;
pub mod trig;

pub use shared::{
    set_leg_points, IkParameters, LegDiagnostics, SolverDiagnostics, DOMAIN_EPSILON,
};
