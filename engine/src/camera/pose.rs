//! Camera pose handed to the renderer and used as the origin of every ray.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::fps_controller::direction_from_angles;
use super::raycast::Ray;
use crate::world::Transform;

/// Final view for one tick: eye position plus yaw/pitch orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraPose {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        direction_from_angles(self.yaw, self.pitch)
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// View ray from the eye along the view direction.
    #[inline]
    pub fn ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    /// The pose as a rigid transform (camera space to world space).
    #[inline]
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation())
    }

    /// World-space point at `offset` in camera space.
    pub fn point_in_view(&self, offset: Vec3) -> Vec3 {
        self.transform().transform_point(offset)
    }
}
