//! Target shapes the carver is working toward, as signed distance fields.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Shape hidden inside a carvable block, in the block's local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TargetShape {
    Sphere { center: Vec3, radius: f32 },
    Box { center: Vec3, half_extents: Vec3 },
}

/// SDF for a box centered at the origin
pub fn sdf_box(p: Vec3, half_extents: Vec3) -> f32 {
    let q = p.abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
}

/// SDF for a sphere centered at the origin
pub fn sdf_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

/// Hermite step between `edge0` and `edge1`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl TargetShape {
    /// Signed distance from `p` to the shape surface (negative inside).
    pub fn sdf(&self, p: Vec3) -> f32 {
        match *self {
            TargetShape::Sphere { center, radius } => sdf_sphere(p - center, radius),
            TargetShape::Box {
                center,
                half_extents,
            } => sdf_box(p - center, half_extents),
        }
    }

    /// Glow weight in [0, 1]: 1 on the target surface, fading to 0 at
    /// `thickness` away from it on either side.
    pub fn reveal_hint(&self, p: Vec3, thickness: f32) -> f32 {
        1.0 - smoothstep(0.0, thickness, self.sdf(p).abs())
    }
}
