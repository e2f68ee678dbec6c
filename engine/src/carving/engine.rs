//! Carving Engine
//!
//! Pulls surface vertices near a contact point toward it with a linear
//! falloff. Each pass is a partial blend, so repeated passes at the same
//! point converge on it without overshooting.

use glam::Vec3;
use tracing::{debug, info};

use super::surface::DeformableSurface;
use crate::camera::Ray;
use crate::config::CarvingConfig;
use crate::tools::ToolManager;

/// Largest blend fraction a single pass may apply.
pub const MAX_STRENGTH: f32 = 1.0 - f32::EPSILON;

/// Result of one carve pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarveOutcome {
    /// Index into the surface list passed to `carve_tick`
    pub surface: usize,
    /// World-space contact point
    pub contact: Vec3,
    /// Vertices inside the brush radius
    pub affected: usize,
    pub progress: f32,
    /// Whether this pass took the surface to 1.0
    pub completed_now: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarvingEngine {
    pub radius: f32,
    pub strength: f32,
    pub reach: f32,
    pub target_depth: f32,
}

impl Default for CarvingEngine {
    fn default() -> Self {
        Self::from_config(&CarvingConfig::default())
    }
}

impl CarvingEngine {
    pub fn from_config(config: &CarvingConfig) -> Self {
        Self {
            radius: config.radius,
            strength: config.strength,
            reach: config.reach,
            target_depth: config.target_depth,
        }
    }

    /// Deform `surface` around `contact_world`.
    ///
    /// Returns the number of vertices moved and the updated progress.
    pub fn carve(
        &self,
        surface: &mut DeformableSurface,
        contact_world: Vec3,
        radius: f32,
        strength: f32,
    ) -> CarveOutcome {
        let strength = if strength.is_finite() {
            strength.clamp(0.0, MAX_STRENGTH)
        } else {
            0.0
        };
        let transform = surface.transform();
        let to_local = transform.inverse();

        let mut affected = 0;
        if radius > 0.0 && radius.is_finite() && strength > 0.0 && contact_world.is_finite() {
            for (local, total) in surface
                .positions
                .iter_mut()
                .zip(surface.displacement.iter_mut())
            {
                let world = transform.transform_point(*local);
                let distance = world.distance(contact_world);
                if distance >= radius {
                    continue;
                }
                let t = 1.0 - distance / radius;
                let moved = world.lerp(contact_world, t * strength);
                *total += moved.distance(world);
                *local = to_local.transform_point(moved);
                affected += 1;
            }
        }

        if affected > 0 {
            surface.dirty = true;
            surface.recompute_normals();
        }

        let was_complete = surface.is_complete();
        if self.target_depth > 0.0 {
            let measured = (surface.mean_displacement() / self.target_depth).min(1.0);
            surface.progress = surface.progress.max(measured);
        }
        let completed_now = !was_complete && surface.is_complete();
        if completed_now {
            info!(surface = surface.id().0, "surface carving complete");
        }

        CarveOutcome {
            surface: 0,
            contact: contact_world,
            affected,
            progress: surface.progress,
            completed_now,
        }
    }

    /// Run one tick of tool carving.
    ///
    /// Carves the nearest surface the tool ray hits within reach, provided a
    /// tool is equipped, the carve gesture is held and the tool works on the
    /// surface's material. Any failed precondition skips the tick.
    pub fn carve_tick(
        &self,
        tools: &ToolManager,
        surfaces: &mut [DeformableSurface],
        ray: &Ray,
        carve_held: bool,
    ) -> Option<CarveOutcome> {
        if !carve_held {
            return None;
        }
        tools.equipped()?;

        let (index, distance) = surfaces
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.raycast(ray, self.reach).map(|t| (i, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        let surface = &mut surfaces[index];
        if !tools.is_compatible(surface) {
            debug!(
                surface = surface.id().0,
                material = surface.material(),
                "tool does not work on this material"
            );
            return None;
        }

        let contact = ray.at(distance);
        let outcome = self.carve(surface, contact, self.radius, self.strength);
        Some(CarveOutcome {
            surface: index,
            ..outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carving::SurfaceId;
    use crate::world::Transform;

    fn plate() -> DeformableSurface {
        DeformableSurface::subdivided_box(
            SurfaceId(7),
            "wood",
            Transform::from_translation(Vec3::new(0.0, 1.0, -2.0)),
            Vec3::new(0.4, 0.4, 0.4),
            8,
        )
    }

    #[test]
    fn test_only_vertices_in_radius_move() {
        let engine = CarvingEngine::default();
        let mut surface = plate();
        let before = surface.positions().to_vec();
        let contact = Vec3::new(0.0, 1.0, -1.8);

        let outcome = engine.carve(&mut surface, contact, 0.1, 0.5);
        assert!(outcome.affected > 0);

        for (i, (old, new)) in before.iter().zip(surface.positions()).enumerate() {
            let world_old = surface.transform().transform_point(*old);
            if world_old.distance(contact) >= 0.1 {
                assert_eq!(old, new, "vertex {i} outside the radius moved");
            } else {
                let world_new = surface.world_position(i).unwrap();
                assert!(world_new.distance(contact) < world_old.distance(contact) + 1e-6);
            }
        }
    }

    #[test]
    fn test_converges_without_overshoot() {
        let engine = CarvingEngine::default();
        let mut surface = plate();
        let contact = Vec3::new(0.0, 1.0, -1.8);
        // Center vertex of the +Z face sits exactly at the contact point;
        // pick a neighbour instead
        let index = (0..surface.vertex_count())
            .find(|&i| {
                let d = surface.world_position(i).unwrap().distance(contact);
                d > 0.04 && d < 0.06
            })
            .unwrap();

        let mut last = surface.world_position(index).unwrap().distance(contact);
        for _ in 0..50 {
            engine.carve(&mut surface, contact, 0.12, 0.9);
            let d = surface.world_position(index).unwrap().distance(contact);
            assert!(d <= last + 1e-6);
            last = d;
        }
        assert!(last < 1e-3);
    }

    #[test]
    fn test_strength_is_clamped() {
        let engine = CarvingEngine::default();
        let mut surface = plate();
        let contact = Vec3::new(0.0, 1.0, -1.8);
        engine.carve(&mut surface, contact, 0.12, 5.0);
        // A clamped pass never lands a distant vertex exactly on the contact
        let reached = (0..surface.vertex_count())
            .filter(|&i| surface.world_position(i).unwrap().distance(contact) < 1e-7)
            .count();
        assert!(reached <= 1);

        let mut untouched = plate();
        let outcome = engine.carve(&mut untouched, contact, 0.12, -1.0);
        assert_eq!(outcome.affected, 0);
        let outcome = engine.carve(&mut untouched, contact, 0.12, f32::NAN);
        assert_eq!(outcome.affected, 0);
    }

    #[test]
    fn test_progress_monotonic_and_clamped() {
        let engine = CarvingEngine {
            target_depth: 0.0002,
            ..CarvingEngine::default()
        };
        let mut surface = plate();
        surface.take_upload();
        let mut last = 0.0;
        let mut completions = 0;
        for step in 0..40 {
            let x = (step % 5) as f32 * 0.05 - 0.1;
            let outcome = engine.carve(&mut surface, Vec3::new(x, 1.0, -1.8), 0.12, 0.25);
            assert!(outcome.progress >= last);
            assert!(outcome.progress <= 1.0);
            if outcome.completed_now {
                completions += 1;
            }
            last = outcome.progress;
        }
        assert_eq!(last, 1.0);
        assert_eq!(completions, 1);
        assert!(surface.is_dirty());
    }

    #[test]
    fn test_miss_leaves_surface_clean() {
        let engine = CarvingEngine::default();
        let mut surface = plate();
        surface.take_upload();
        let outcome = engine.carve(&mut surface, Vec3::new(5.0, 5.0, 5.0), 0.12, 0.25);
        assert_eq!(outcome.affected, 0);
        assert!(!surface.is_dirty());
        assert_eq!(surface.progress(), 0.0);
    }

    #[test]
    fn test_non_finite_contact_leaves_surface_intact() {
        let engine = CarvingEngine::default();
        let mut surface = plate();
        surface.take_upload();
        let before = surface.positions().to_vec();

        for contact in [
            Vec3::new(f32::NAN, 1.0, -1.8),
            Vec3::new(0.0, f32::INFINITY, -1.8),
        ] {
            let outcome = engine.carve(&mut surface, contact, 0.12, 0.25);
            assert_eq!(outcome.affected, 0);
        }
        assert!(!surface.is_dirty());
        assert_eq!(surface.positions(), &before[..]);
        assert!(surface.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_tick_preconditions() {
        let engine = CarvingEngine::default();
        let mut tools = ToolManager::default();
        let mut surfaces = vec![plate()];
        let ray = Ray::new(Vec3::new(0.013, 1.007, 0.0), Vec3::NEG_Z);

        // No tool
        assert!(engine.carve_tick(&tools, &mut surfaces, &ray, true).is_none());

        // Incompatible tool
        tools.equip("hammer").unwrap();
        assert!(engine.carve_tick(&tools, &mut surfaces, &ray, true).is_none());

        // Compatibility is the material set alone, so the brush works on wood
        tools.equip("brush").unwrap();
        assert!(tools.is_compatible(&surfaces[0]));

        tools.equip("chisel").unwrap();
        // Gesture not held
        assert!(engine.carve_tick(&tools, &mut surfaces, &ray, false).is_none());
        // Out of reach
        let far = Ray::new(Vec3::new(0.013, 1.007, 5.0), Vec3::NEG_Z);
        assert!(engine.carve_tick(&tools, &mut surfaces, &far, true).is_none());

        let outcome = engine.carve_tick(&tools, &mut surfaces, &ray, true).unwrap();
        assert_eq!(outcome.surface, 0);
        assert!((outcome.contact - Vec3::new(0.013, 1.007, -1.8)).length() < 1e-4);
        assert!(outcome.affected > 0);
        assert!(outcome.progress > 0.0);
    }
}
