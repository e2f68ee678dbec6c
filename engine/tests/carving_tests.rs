//! Carving Tests - Falloff, Convergence and Progress
//!
//! Drives the CarvingEngine directly against subdivided blocks.

use glam::{Quat, Vec3};
use workshop_engine::camera::Ray;
use workshop_engine::carving::{CarvingEngine, DeformableSurface, SurfaceId, TargetShape};
use workshop_engine::tools::ToolManager;
use workshop_engine::world::Transform;

fn block_at(transform: Transform) -> DeformableSurface {
    DeformableSurface::subdivided_box(SurfaceId(1), "wood", transform, Vec3::splat(0.4), 8)
}

fn world_distances(surface: &DeformableSurface, point: Vec3) -> Vec<f32> {
    (0..surface.vertex_count())
        .map(|i| surface.world_position(i).unwrap().distance(point))
        .collect()
}

// ============================================================================
// Deformation
// ============================================================================

#[test]
fn test_repeated_carving_converges_on_contact() {
    let engine = CarvingEngine::default();
    let mut surface = block_at(Transform::from_translation(Vec3::new(0.0, 1.0, -2.0)));
    let contact = Vec3::new(0.02, 1.01, -1.8);

    let mut previous = world_distances(&surface, contact);
    for _ in 0..60 {
        engine.carve(&mut surface, contact, 0.12, 0.5);
        let current = world_distances(&surface, contact);
        for (before, after) in previous.iter().zip(&current) {
            // Never overshoots: every vertex is at most as far as before
            assert!(*after <= *before + 1e-6);
        }
        previous = current;
    }

    let initially_inside = world_distances(&block_at(surface.transform()), contact)
        .into_iter()
        .filter(|d| *d < 0.12)
        .count();
    let converged = previous.iter().filter(|d| **d < 1e-3).count();
    assert!(initially_inside > 0);
    assert_eq!(converged, initially_inside);
}

#[test]
fn test_carving_respects_rotated_surface() {
    let engine = CarvingEngine::default();
    let transform = Transform::new(
        Vec3::new(0.0, 1.0, -2.0),
        Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
    );
    let mut surface = block_at(transform);
    let original = block_at(transform);

    // A world-space contact on the rotated block's surface
    let ray = Ray::new(Vec3::new(0.01, 1.013, 0.0), Vec3::NEG_Z);
    let distance = surface.raycast(&ray, 5.0).unwrap();
    let contact = ray.at(distance);

    let outcome = engine.carve(&mut surface, contact, 0.12, 0.5);
    assert!(outcome.affected > 0);

    for i in 0..surface.vertex_count() {
        let original = original.world_position(i).unwrap();
        let moved = surface.world_position(i).unwrap();
        if original.distance(contact) >= 0.12 {
            assert!(moved.distance(original) < 1e-5);
        } else {
            assert!(moved.distance(contact) <= original.distance(contact) + 1e-6);
        }
    }
}

#[test]
fn test_normals_follow_the_dent() {
    let engine = CarvingEngine::default();
    let mut surface = block_at(Transform::IDENTITY);
    let flat = surface.normals().to_vec();

    // Pull the +Z face toward a point behind it
    engine.carve(&mut surface, Vec3::new(0.0, 0.0, 0.15), 0.12, 0.9);

    let changed = flat
        .iter()
        .zip(surface.normals())
        .filter(|(a, b)| (**a - **b).length() > 1e-3)
        .count();
    assert!(changed > 0);
    for n in surface.normals() {
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}

// ============================================================================
// Progress
// ============================================================================

#[test]
fn test_progress_is_monotonic_and_clamped() {
    let engine = CarvingEngine::default();
    let mut surface = block_at(Transform::IDENTITY);
    let contacts = [
        Vec3::new(0.0, 0.0, 0.2),
        Vec3::new(0.1, 0.05, 0.2),
        Vec3::new(5.0, 5.0, 5.0),
        Vec3::new(-0.1, -0.1, 0.2),
        Vec3::new(0.2, 0.0, 0.0),
        Vec3::new(0.0, 0.2, 0.0),
    ];

    let mut last = surface.progress();
    let mut completions = 0;
    for round in 0..400 {
        let contact = contacts[round % contacts.len()];
        let outcome = engine.carve(&mut surface, contact, 0.15, 0.3);
        assert!(outcome.progress >= last);
        assert!(outcome.progress <= 1.0);
        assert_eq!(outcome.progress, surface.progress());
        completions += outcome.completed_now as usize;
        last = outcome.progress;
    }
    assert!(last > 0.0);
    assert!(completions <= 1);
    assert_eq!(completions == 1, surface.is_complete());
}

#[test]
fn test_progress_reaches_one_with_shallow_target() {
    let engine = CarvingEngine {
        target_depth: 1e-4,
        ..CarvingEngine::default()
    };
    let mut surface = block_at(Transform::IDENTITY);
    let first = engine.carve(&mut surface, Vec3::new(0.0, 0.0, 0.2), 0.12, 0.5);
    let second = engine.carve(&mut surface, Vec3::new(0.05, 0.0, 0.2), 0.12, 0.5);
    assert!(first.completed_now || second.completed_now);
    assert_eq!(surface.progress(), 1.0);

    let third = engine.carve(&mut surface, Vec3::new(0.0, 0.05, 0.2), 0.12, 0.5);
    assert!(!third.completed_now);
    assert_eq!(third.progress, 1.0);
}

// ============================================================================
// Activation
// ============================================================================

#[test]
fn test_tick_picks_nearest_surface() {
    let engine = CarvingEngine::default();
    let mut tools = ToolManager::default();
    tools.equip("chisel").unwrap();

    let near = DeformableSurface::subdivided_box(
        SurfaceId(1),
        "wood",
        Transform::from_translation(Vec3::new(0.0, 1.0, -1.5)),
        Vec3::splat(0.4),
        4,
    );
    let far = DeformableSurface::subdivided_box(
        SurfaceId(2),
        "wood",
        Transform::from_translation(Vec3::new(0.0, 1.0, -2.5)),
        Vec3::splat(0.4),
        4,
    );
    let mut surfaces = vec![far, near];
    let ray = Ray::new(Vec3::new(0.013, 1.007, 0.0), Vec3::NEG_Z);

    let outcome = engine.carve_tick(&tools, &mut surfaces, &ray, true).unwrap();
    assert_eq!(outcome.surface, 1);
    assert!(surfaces[1].is_dirty());
    assert_eq!(surfaces[0].progress(), 0.0);
}

#[test]
fn test_incompatible_material_skips_tick() {
    let engine = CarvingEngine::default();
    let mut tools = ToolManager::default();
    tools.equip("brush").unwrap();

    let mut surfaces = vec![DeformableSurface::subdivided_box(
        SurfaceId(3),
        "stone",
        Transform::from_translation(Vec3::new(0.0, 1.0, -1.5)),
        Vec3::splat(0.4),
        4,
    )];
    surfaces[0].take_upload();
    let ray = Ray::new(Vec3::new(0.013, 1.007, 0.0), Vec3::NEG_Z);

    assert!(engine.carve_tick(&tools, &mut surfaces, &ray, true).is_none());
    assert!(!surfaces[0].is_dirty());

    tools.equip("chisel").unwrap();
    assert!(engine.carve_tick(&tools, &mut surfaces, &ray, true).is_some());
}

#[test]
fn test_any_tool_listing_the_material_carves() {
    let engine = CarvingEngine::default();
    let mut tools = ToolManager::default();
    tools.equip("brush").unwrap();

    let mut surfaces = vec![DeformableSurface::subdivided_box(
        SurfaceId(4),
        "wood",
        Transform::from_translation(Vec3::new(0.0, 1.0, -1.5)),
        Vec3::splat(0.4),
        4,
    )];
    let ray = Ray::new(Vec3::new(0.013, 1.007, 0.0), Vec3::NEG_Z);

    // The brush lists wood, so the gate passes even though it paints
    assert_eq!(tools.current_action(), Some("paint"));
    let outcome = engine.carve_tick(&tools, &mut surfaces, &ray, true).unwrap();
    assert!(outcome.affected > 0);
}

// ============================================================================
// Target reveal
// ============================================================================

#[test]
fn test_target_deviation_shrinks_toward_sphere() {
    let engine = CarvingEngine::default();
    let target = TargetShape::Sphere {
        center: Vec3::ZERO,
        radius: 0.15,
    };
    let mut surface = block_at(Transform::IDENTITY).with_target(target);
    let before = surface.target_deviation().unwrap();

    // Press the +Z face in toward the sphere
    for _ in 0..20 {
        engine.carve(&mut surface, Vec3::new(0.0, 0.0, 0.15), 0.12, 0.5);
    }
    let after = surface.target_deviation().unwrap();
    assert!(after < before);
    assert!((surface.reveal_hint(Vec3::new(0.0, 0.0, 0.15), 0.05) - 1.0).abs() < 1e-6);
}
