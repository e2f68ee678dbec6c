//! Deformable Surface
//!
//! A triangle mesh whose vertices the carving engine moves in place. The
//! surface keeps, per vertex, how far it has travelled in total, and a
//! progress value derived from that which only ever grows.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::target::TargetShape;
use crate::camera::{Ray, ray_triangle};
use crate::world::{Aabb, Transform};

/// Handle of a carvable surface within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u32);

/// GPU vertex layout for surface uploads.
///
/// - position: vec3<f32> at @location(0)
/// - normal: vec3<f32> at @location(1)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl SurfaceVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeformableSurface {
    id: SurfaceId,
    material: String,
    transform: Transform,
    /// Vertex positions in local space
    pub(crate) positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    /// Total distance each vertex has moved
    pub(crate) displacement: Vec<f32>,
    pub(crate) dirty: bool,
    pub(crate) progress: f32,
    target: Option<TargetShape>,
}

impl DeformableSurface {
    /// Build a surface from an indexed triangle list.
    ///
    /// Triangles referencing out-of-range vertices are discarded.
    pub fn from_mesh(
        id: SurfaceId,
        material: impl Into<String>,
        transform: Transform,
        positions: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Self {
        let count = positions.len() as u32;
        let indices: Vec<u32> = indices
            .chunks_exact(3)
            .filter(|tri| tri.iter().all(|&i| i < count))
            .flatten()
            .copied()
            .collect();
        let mut surface = Self {
            id,
            material: material.into(),
            transform,
            normals: vec![Vec3::Y; positions.len()],
            displacement: vec![0.0; positions.len()],
            positions,
            indices,
            dirty: true,
            progress: 0.0,
            target: None,
        };
        surface.recompute_normals();
        surface
    }

    /// Axis-aligned block centered on the local origin, each face split into
    /// `subdivisions` x `subdivisions` quads so the carver has vertices to move.
    pub fn subdivided_box(
        id: SurfaceId,
        material: impl Into<String>,
        transform: Transform,
        size: Vec3,
        subdivisions: u32,
    ) -> Self {
        let n = subdivisions.max(1);
        let half = size * 0.5;
        let mut positions = Vec::new();
        let mut indices = Vec::new();

        // (normal, u axis, v axis) with u x v = normal so windings face outward
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        for (normal, u, v) in faces {
            let base = positions.len() as u32;
            for j in 0..=n {
                for i in 0..=n {
                    let s = i as f32 / n as f32 * 2.0 - 1.0;
                    let t = j as f32 / n as f32 * 2.0 - 1.0;
                    positions.push((normal + u * s + v * t) * half);
                }
            }
            let row = n + 1;
            for j in 0..n {
                for i in 0..n {
                    let a = base + j * row + i;
                    let b = a + 1;
                    let c = a + row;
                    let d = c + 1;
                    indices.extend_from_slice(&[a, b, d, a, d, c]);
                }
            }
        }

        Self::from_mesh(id, material, transform, positions, indices)
    }

    /// Attach the shape the carver is meant to reveal.
    pub fn with_target(mut self, target: TargetShape) -> Self {
        self.target = Some(target);
        self
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn displacement(&self) -> &[f32] {
        &self.displacement
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Carve progress in [0, 1]. Never decreases.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn target(&self) -> Option<&TargetShape> {
        self.target.as_ref()
    }

    /// Vertex position in world space.
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        self.positions
            .get(index)
            .map(|&p| self.transform.transform_point(p))
    }

    /// Local-space bounds of the current vertices.
    pub fn bounds(&self) -> Option<Aabb> {
        let first = *self.positions.first()?;
        let (min, max) = self
            .positions
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        Some(Aabb::new(min, max))
    }

    /// Recompute vertex normals as area-weighted averages of face normals.
    ///
    /// Vertices with no usable faces keep their previous normal.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            // Unnormalized cross product: length is twice the triangle area
            let face = (self.positions[b] - self.positions[a])
                .cross(self.positions[c] - self.positions[a]);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        for (normal, sum) in self.normals.iter_mut().zip(accum) {
            let n = sum.normalize_or_zero();
            if n != Vec3::ZERO {
                *normal = n;
            }
        }
    }

    /// Nearest world-space hit of `ray` against the triangles, within
    /// `max_distance`.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<f32> {
        let local = self.transform.ray_to_local(ray);
        if let Some(bounds) = self.bounds() {
            bounds.intersect(&local)?;
        }
        self.indices
            .chunks_exact(3)
            .filter_map(|tri| {
                ray_triangle(
                    &local,
                    self.positions[tri[0] as usize],
                    self.positions[tri[1] as usize],
                    self.positions[tri[2] as usize],
                )
            })
            .filter(|&t| t <= max_distance)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Mean of the per-vertex cumulative displacement.
    pub fn mean_displacement(&self) -> f32 {
        if self.displacement.is_empty() {
            return 0.0;
        }
        self.displacement.iter().sum::<f32>() / self.displacement.len() as f32
    }

    /// Glow weight of the target reveal band at a local-space point.
    pub fn reveal_hint(&self, local_point: Vec3, thickness: f32) -> f32 {
        self.target
            .map_or(0.0, |t| t.reveal_hint(local_point, thickness))
    }

    /// Mean absolute distance from the vertices to the target shape.
    pub fn target_deviation(&self) -> Option<f32> {
        let target = self.target?;
        if self.positions.is_empty() {
            return None;
        }
        let total: f32 = self.positions.iter().map(|&p| target.sdf(p).abs()).sum();
        Some(total / self.positions.len() as f32)
    }

    /// Interleaved vertex records for upload.
    pub fn vertices(&self) -> Vec<SurfaceVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(&p, &n)| SurfaceVertex::new(p, n))
            .collect()
    }

    /// Vertex data if the surface changed since the last call, clearing the
    /// dirty flag.
    pub fn take_upload(&mut self) -> Option<Vec<SurfaceVertex>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.vertices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> DeformableSurface {
        DeformableSurface::subdivided_box(
            SurfaceId(1),
            "wood",
            Transform::from_translation(Vec3::new(0.0, 1.0, -2.0)),
            Vec3::splat(0.4),
            4,
        )
    }

    #[test]
    fn test_box_topology() {
        let surface = block();
        assert_eq!(surface.vertex_count(), 6 * 25);
        assert_eq!(surface.indices().len(), 6 * 16 * 6);
        assert!(surface.is_dirty());
        assert_eq!(surface.progress(), 0.0);
    }

    #[test]
    fn test_box_normals_point_outward() {
        let surface = block();
        for (p, n) in surface.positions().iter().zip(surface.normals()) {
            // Every vertex normal leans away from the center
            assert!(p.dot(*n) > 0.0);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_raycast_hits_front_face() {
        let surface = block();
        let ray = Ray::new(Vec3::new(0.05, 1.03, 0.0), Vec3::NEG_Z);
        let t = surface.raycast(&ray, 3.0).unwrap();
        assert!((t - 1.8).abs() < 1e-4);
        assert!(surface.raycast(&ray, 1.0).is_none());

        let miss = Ray::new(Vec3::new(2.0, 1.0, 0.0), Vec3::NEG_Z);
        assert!(surface.raycast(&miss, 10.0).is_none());
    }

    #[test]
    fn test_take_upload_clears_dirty() {
        let mut surface = block();
        let upload = surface.take_upload().unwrap();
        assert_eq!(upload.len(), surface.vertex_count());
        assert!(surface.take_upload().is_none());
        let bytes: &[u8] = bytemuck::cast_slice(&upload);
        assert_eq!(bytes.len(), upload.len() * 24);
    }

    #[test]
    fn test_bad_indices_discarded() {
        let surface = DeformableSurface::from_mesh(
            SurfaceId(2),
            "stone",
            Transform::IDENTITY,
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2, 0, 1, 9],
        );
        assert_eq!(surface.indices(), &[0, 1, 2]);
        assert!((surface.normals()[0] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_target_deviation() {
        let surface = block().with_target(TargetShape::Sphere {
            center: Vec3::ZERO,
            radius: 0.1,
        });
        let deviation = surface.target_deviation().unwrap();
        // Vertices sit between 0.2 and 0.2 * sqrt(3) from the center
        assert!(deviation > 0.1 && deviation < 0.25);
        assert!(block().target_deviation().is_none());
        assert_eq!(block().reveal_hint(Vec3::ZERO, 0.05), 0.0);
    }
}
