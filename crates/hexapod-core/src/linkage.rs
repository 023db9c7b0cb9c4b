//! Single-leg forward kinematics.
//!
//! A leg is a chain of three segments: coxia (`a`), femur (`b`), tibia (`c`).
//! Joint angles, in degrees: `alpha` is the azimuth of the whole leg about
//! the vertical axis, `beta` the elevation of the femur relative to the
//! coxia, `gamma` the tilt of the tibia away from the perpendicular of the
//! femur.
//!
//! At the neutral pose (all angles zero) the coxia and femur lie on one
//! straight line along the leg's local X axis and the tibia hangs straight
//! down, perpendicular to the femur:
//!
//! ```text
//!   |---- a ----|-- b --|
//!   p0          p1      p2
//!                       |
//!                       c
//!                       |
//!                       p3
//! ```
//!
//! `p0` is the body contact, `p1` the coxia point, `p2` the femur point,
//! `p3` the foot tip. Any pose change recomputes all four points from
//! scratch; they are always mutually consistent with the stored angles,
//! lengths, and mount geometry — except after a direct point injection,
//! which deliberately bypasses the angles.

use crate::point::{link_frame, mount_frame, Frame, Point};

/// Index of the body-contact point in a leg's point set.
pub const BODY_CONTACT: usize = 0;
/// Index of the coxia point.
pub const COXIA: usize = 1;
/// Index of the femur point.
pub const FEMUR: usize = 2;
/// Index of the foot tip.
pub const FOOT_TIP: usize = 3;

/// One leg of the hexapod: segment lengths, joint angles, mount geometry,
/// and the four chained points they produce.
#[derive(Debug, Clone)]
pub struct Linkage {
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
    coxia_axis: f64,
    origin: Point,
    name: String,
    id: usize,
    points: [Point; 4],
    ground_contact: usize,
}

impl Linkage {
    /// Build a leg at the neutral pose (all joint angles zero).
    ///
    /// `coxia_axis` is the fixed mounting azimuth in degrees, `origin` the
    /// mount point relative to the body center. The full pose computation
    /// runs immediately.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        a: f64,
        b: f64,
        c: f64,
        coxia_axis: f64,
        origin: Point,
        name: impl Into<String>,
        id: usize,
    ) -> Self {
        Self::with_pose(a, b, c, 0.0, 0.0, 0.0, coxia_axis, origin, name, id)
    }

    /// Build a leg with explicit initial joint angles.
    #[allow(clippy::too_many_arguments)]
    pub fn with_pose(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
        coxia_axis: f64,
        origin: Point,
        name: impl Into<String>,
        id: usize,
    ) -> Self {
        let mut leg = Self {
            a,
            b,
            c,
            alpha: 0.0,
            beta: 0.0,
            gamma: 0.0,
            coxia_axis,
            origin,
            name: name.into(),
            id,
            points: [
                Point::default(),
                Point::default(),
                Point::default(),
                Point::default(),
            ],
            ground_contact: FOOT_TIP,
        };
        leg.change_pose(alpha, beta, gamma);
        leg
    }

    /// Recompute all four points for the given joint angles (degrees).
    ///
    /// Idempotent: the points depend only on the stored lengths, mount
    /// geometry, and these angles. A fresh point set is built and swapped in
    /// whole, so readers never observe a partially updated leg.
    pub fn change_pose(&mut self, alpha: f64, beta: f64, gamma: f64) {
        self.alpha = alpha;
        self.beta = beta;
        self.gamma = gamma;

        // frame_ab maps frame-b coordinates into frame a. The 90 degree
        // offset on the femur-to-tibia step encodes the neutral-pose
        // perpendicularity of segments b and c; the tibia's own step adds no
        // rotation, its direction is fixed by the chain above it.
        let frame_01 = link_frame(-beta, self.a);
        let frame_12 = link_frame(90.0 - gamma, self.b);
        let frame_23 = link_frame(0.0, self.c);
        let frame_02 = frame_01 * frame_12;
        let frame_03 = frame_02 * frame_23;

        // Points relative to the body contact.
        let local = Point::new(0.0, 0.0, 0.0);
        let p1 = local.wrt(&frame_01);
        let p2 = local.wrt(&frame_02);
        let p3 = local.wrt(&frame_03);

        // Into body-centered coordinates. Alpha feeds the mount azimuth so
        // the coxia's rotation moves every downstream point.
        let mount = mount_frame(self.coxia_axis + alpha, self.origin.x, self.origin.y);
        let points = [
            Point::named(
                self.origin.x,
                self.origin.y,
                self.origin.z,
                format!("{}-body-contact", self.name),
            ),
            p1.wrt_named(&mount, format!("{}-coxia", self.name)),
            p2.wrt_named(&mount, format!("{}-femur", self.name)),
            p3.wrt_named(&mount, format!("{}-tibia", self.name)),
        ];

        self.ground_contact = lowest_point(&points);
        self.points = points;
    }

    /// Re-express all four stored points in a new frame, raised by `height`.
    ///
    /// Used when the body frame itself moves without any joint angle
    /// changing. Does not rescan the ground contact.
    pub fn update_wrt(&mut self, frame: &Frame, height: f64) {
        for point in &mut self.points {
            point.update_wrt(frame, height);
        }
    }

    /// Point by index (0 = body contact .. 3 = foot tip).
    pub fn p(&self, index: usize) -> &Point {
        &self.points[index]
    }

    /// Overwrite a single point. Leaves the stored angles untouched, so they
    /// go stale relative to the injected point.
    pub fn set_p(&mut self, index: usize, point: Point) {
        self.points[index] = point;
    }

    pub fn body_contact(&self) -> &Point {
        &self.points[BODY_CONTACT]
    }

    pub fn coxia_point(&self) -> &Point {
        &self.points[COXIA]
    }

    pub fn femur_point(&self) -> &Point {
        &self.points[FEMUR]
    }

    pub fn foot_tip(&self) -> &Point {
        &self.points[FOOT_TIP]
    }

    /// The point judged to be touching the ground plane.
    ///
    /// This is the lowest of the four points, a heuristic rather than a
    /// guarantee: a strongly retracted leg can dip its femur or coxia below
    /// the tip. See [`lowest_point`].
    pub fn ground_contact(&self) -> &Point {
        &self.points[self.ground_contact]
    }

    pub fn coxia_length(&self) -> f64 {
        self.a
    }

    pub fn femur_length(&self) -> f64 {
        self.b
    }

    pub fn tibia_length(&self) -> f64 {
        self.c
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn coxia_axis(&self) -> f64 {
        self.coxia_axis
    }

    pub fn origin(&self) -> &Point {
        &self.origin
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Display for Linkage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Linkage {} (a={}, b={}, c={}, alpha={}, beta={}, gamma={})",
            self.name, self.a, self.b, self.c, self.alpha, self.beta, self.gamma
        )?;
        for point in &self.points {
            writeln!(f, "  {point}")?;
        }
        write!(f, "  ground contact: {}", self.ground_contact())
    }
}

/// Index of the lowest point, scanned tip to body.
///
/// Assumes the lowest point is the one touching the ground. The strict `<`
/// keeps the point closer to the tip on an exact tie.
fn lowest_point(points: &[Point; 4]) -> usize {
    let mut lowest = FOOT_TIP;
    for index in (BODY_CONTACT..FOOT_TIP).rev() {
        if points[index].z < points[lowest].z {
            lowest = index;
        }
    }
    lowest
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
