//! Rigid transforms and local bounds for scene nodes.

use std::ops::Mul;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::raycast::{Ray, ray_aabb};

/// Translation plus rotation. Scene nodes never carry scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Map a point from this transform's local space into its parent space.
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }

    /// Rotate a direction without translating it.
    #[inline]
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// The transform that undoes this one.
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            translation: -(rotation * self.translation),
            rotation,
        }
    }

    /// Express a ray given in parent space in this transform's local space.
    pub fn ray_to_local(&self, ray: &Ray) -> Ray {
        let inverse = self.inverse();
        Ray::new(
            inverse.transform_point(ray.origin),
            inverse.transform_vector(ray.direction),
        )
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// `parent * child` gives the child's transform in the parent's parent space.
    fn mul(self, child: Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }
}

/// Axis-aligned box in a node's local space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box centered on the origin with the given half extents.
    pub fn from_half_extents(half: Vec3) -> Self {
        Self::new(-half.abs(), half.abs())
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Distance along a local-space ray to the box, if hit.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        ray_aabb(ray, self.min, self.max)
    }
}
