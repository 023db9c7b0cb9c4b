// hexapod-core: points, frames, single-leg forward kinematics, body model.

pub mod config;
pub mod error;
pub mod hexapod;
pub mod linkage;
pub mod point;

pub use config::{Dimensions, LegSegments, SegmentLengths};
pub use error::{ConfigError, HexapodError, SolveError};
pub use hexapod::{LegPose, LegPosition, LegState, Poses, VirtualHexapod, LEG_COUNT, STANCE_TOLERANCE};
pub use linkage::{Linkage, BODY_CONTACT, COXIA, FEMUR, FOOT_TIP};
pub use point::{link_frame, mount_frame, Frame, Point};
