//! Raycast Module
//!
//! Ray primitives used for hover, grab and carve targeting. All functions are
//! pure and work in whatever space the caller supplies.

use glam::Vec3;

/// Directions shorter than this are treated as degenerate.
const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// Tolerance for ray/triangle parallelism.
const TRIANGLE_EPSILON: f32 = 1e-7;

/// A half-line with a normalized direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`.
    ///
    /// A zero-length direction falls back to -Z (the default view direction).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = if direction.length() < MIN_DIRECTION_LENGTH {
            Vec3::NEG_Z
        } else {
            direction.normalize()
        };
        Self { origin, direction }
    }

    /// Point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Intersect a ray with an axis-aligned box (slab method).
///
/// # Returns
/// * `Some(t)` - Distance to the entry point, or 0.0 if the origin is inside the box
/// * `None` - If the ray misses or the box is entirely behind the origin
pub fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = f32::NEG_INFINITY;
    let mut t_far = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        if dir.abs() < MIN_DIRECTION_LENGTH {
            // Parallel to this slab: must already be between the planes
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / dir;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    if t_far < 0.0 {
        return None;
    }
    Some(t_near.max(0.0))
}

/// Intersect a ray with a triangle (Moller-Trumbore). Both faces count as hits.
///
/// # Returns
/// Distance along the ray to the hit point, or `None` on a miss.
pub fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < TRIANGLE_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(ray.at(2.0), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_degenerate_direction_falls_back() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(ray.direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_ray_aabb_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let t = ray_aabb(&ray, Vec3::new(-1.0, -1.0, -6.0), Vec3::new(1.0, 1.0, -4.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_aabb_miss_and_behind() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(ray_aabb(&ray, Vec3::new(2.0, 2.0, -6.0), Vec3::new(3.0, 3.0, -4.0)).is_none());
        assert!(ray_aabb(&ray, Vec3::new(-1.0, -1.0, 4.0), Vec3::new(1.0, 1.0, 6.0)).is_none());
    }

    #[test]
    fn test_ray_aabb_origin_inside() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray_aabb(&ray, Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::NEG_Z);
        let a = Vec3::ZERO;
        let b = Vec3::X;
        let c = Vec3::Y;
        let t = ray_triangle(&ray, a, b, c).unwrap();
        assert!((t - 1.0).abs() < 1e-5);

        let off = Ray::new(Vec3::new(0.9, 0.9, 1.0), Vec3::NEG_Z);
        assert!(ray_triangle(&off, a, b, c).is_none());
    }

    #[test]
    fn test_ray_triangle_parallel() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::X);
        assert!(ray_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }
}
