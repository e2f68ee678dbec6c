//! Camera Module
//!
//! First-person look math, the per-tick camera pose, and ray primitives.
//! Window-system agnostic: it only deals with camera state and math.

pub mod fps_controller;
pub mod pose;
pub mod raycast;

pub use fps_controller::{LookController, direction_from_angles};
pub use pose::CameraPose;
pub use raycast::{Ray, ray_aabb, ray_triangle};
