//! Workshop Session
//!
//! Owns every subsystem and runs them in a fixed order once per frame:
//!
//! 1. input snapshot and equip request
//! 2. player controller
//! 3. grab anchor published to the world
//! 4. interaction housekeeping, hover, then grab or drop
//! 5. carving
//! 6. handoff to the renderer
//!
//! Events arriving between two ticks are coalesced into the next tick's
//! `InputState`.

use glam::{Quat, Vec3};
use tracing::{debug, warn};

use crate::camera::{CameraPose, Ray};
use crate::carving::{CarveOutcome, CarvingEngine, DeformableSurface, SurfaceId, SurfaceVertex};
use crate::config::WorkshopConfig;
use crate::error::{ConfigError, ToolError};
use crate::input::{InputAggregator, InputEvent, InputState};
use crate::interaction::InteractionManager;
use crate::player::{LookMode, PlayerController};
use crate::tools::{ToolCatalog, ToolManager};
use crate::world::{NodeId, SceneRegistry, Transform, WorldScene};

/// New vertex data for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceUpload {
    pub surface: SurfaceId,
    pub vertices: Vec<SurfaceVertex>,
    pub indices: Vec<u32>,
}

impl SurfaceUpload {
    /// Vertex data as raw bytes for a vertex buffer write.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Everything the renderer needs after a tick.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub camera: CameraPose,
    pub view_direction: Vec3,
    pub look_mode: LookMode,
    /// Whether the host should hold pointer capture
    pub pointer_capture: bool,
    pub bob_offset: f32,
    /// Idle sway roll for the held tool, radians
    pub hand_roll: f32,
    /// Seconds of reveal-glow animation
    pub hint_phase: f32,
    pub hovered: Option<NodeId>,
    pub held: Option<NodeId>,
    pub equipped_tool: Option<String>,
    pub carve: Option<CarveOutcome>,
    pub uploads: Vec<SurfaceUpload>,
}

pub struct WorkshopSession<W: WorldScene = SceneRegistry> {
    config: WorkshopConfig,
    input: InputAggregator,
    player: PlayerController,
    interaction: InteractionManager,
    tools: ToolManager,
    carving: CarvingEngine,
    surfaces: Vec<DeformableSurface>,
    world: W,
    hint_phase: f32,
    /// Last tick's input, kept for inspection
    last_input: InputState,
}

impl<W: WorldScene> WorkshopSession<W> {
    /// Build a session around `world`, rejecting an invalid configuration.
    pub fn new(config: WorkshopConfig, catalog: ToolCatalog, world: W) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            input: InputAggregator::from_config(&config),
            player: PlayerController::from_config(&config),
            interaction: InteractionManager::from_config(&config.interaction),
            tools: ToolManager::new(catalog),
            carving: CarvingEngine::from_config(&config.carving),
            surfaces: Vec::new(),
            world,
            hint_phase: 0.0,
            last_input: InputState::new(),
            config,
        })
    }

    /// Replace the player, e.g. to choose a spawn point.
    pub fn with_player(mut self, player: PlayerController) -> Self {
        self.player = player;
        self
    }

    /// Register a carvable surface. Returns its index in `surfaces()`.
    pub fn add_surface(&mut self, surface: DeformableSurface) -> usize {
        debug!(surface = surface.id().0, material = surface.material(), "surface added");
        self.surfaces.push(surface);
        self.surfaces.len() - 1
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        self.input.handle_event(event);
    }

    /// Advance the session by `delta` seconds.
    pub fn tick(&mut self, delta: f32) -> FrameOutput {
        let dt = if delta.is_finite() {
            delta.clamp(0.0, self.config.movement.max_frame_delta)
        } else {
            0.0
        };

        let input = self.input.snapshot(dt);

        if let Some(slot) = input.equip_slot {
            match self.tools.equip_slot(slot) {
                Ok(_) => self.refresh_grip(),
                Err(err) => warn!(%err, "equip request ignored"),
            }
        }

        self.player.update(dt, &input);
        let pose = self.player.camera_pose();

        let anchor = pose.transform()
            * Transform::from_translation(self.config.interaction.grab_anchor_offset);
        self.world.set_player_anchor(anchor);

        self.interaction.update(dt, &mut self.world);

        let ray = pose.ray();
        let hovered = self.interaction.hover_test(&mut self.world, &ray);

        if input.grab_requested && self.interaction.held().is_none() {
            self.grab(&ray);
        } else if input.drop_requested {
            self.drop_held();
        }
        self.refresh_grip();

        let carve_active = input.carve_held && self.player.look_mode().allows_carving();
        let carve = self
            .carving
            .carve_tick(&self.tools, &mut self.surfaces, &ray, carve_active);

        self.hint_phase += dt;

        let uploads = self
            .surfaces
            .iter_mut()
            .filter_map(|surface| {
                let vertices = surface.take_upload()?;
                Some(SurfaceUpload {
                    surface: surface.id(),
                    vertices,
                    indices: surface.indices().to_vec(),
                })
            })
            .collect();

        self.last_input = input;

        FrameOutput {
            camera: pose,
            view_direction: pose.forward(),
            look_mode: self.player.look_mode(),
            pointer_capture: self.player.wants_pointer_capture(),
            bob_offset: self.player.bob_offset(),
            hand_roll: self.player.hand_roll(),
            hint_phase: self.hint_phase,
            hovered: hovered.or(self.interaction.hovered()),
            held: self.interaction.held_node(),
            equipped_tool: self.tools.equipped_id().map(str::to_string),
            carve,
            uploads,
        }
    }

    /// Equip a tool by id. An unknown id leaves the current tool and grip
    /// untouched.
    pub fn equip_tool(&mut self, id: &str) -> Result<(), ToolError> {
        self.tools.equip(id)?;
        self.refresh_grip();
        Ok(())
    }

    pub fn unequip_tool(&mut self) -> Option<String> {
        let id = self.tools.unequip();
        self.refresh_grip();
        id
    }

    fn grab(&mut self, ray: &Ray) {
        let grip = self.grip();
        if !self.interaction.try_grab(&mut self.world, ray, grip) {
            return;
        }
        let tool_kind = self
            .interaction
            .held_node()
            .and_then(|node| self.world.interactable(node))
            .and_then(|i| i.tool_kind.clone());
        if let Some(kind) = tool_kind {
            if let Err(err) = self.tools.equip(&kind) {
                warn!(%err, "grabbed tool is not in the catalog");
            }
        }
    }

    fn drop_held(&mut self) {
        let tool_kind = self
            .interaction
            .held_node()
            .and_then(|node| self.world.interactable(node))
            .and_then(|i| i.tool_kind.clone());
        if !self.interaction.drop(&mut self.world) {
            return;
        }
        if let Some(kind) = tool_kind {
            if self.tools.equipped_id() == Some(kind.as_str()) {
                self.tools.unequip();
            }
        }
    }

    /// Grip of the equipped tool with the current hand sway applied.
    fn grip(&self) -> Transform {
        let grip = self.tools.grip_transform();
        Transform::new(
            grip.translation,
            Quat::from_rotation_z(self.player.hand_roll()) * grip.rotation,
        )
    }

    fn refresh_grip(&mut self) {
        let grip = self.grip();
        self.interaction.reapply_grip(&mut self.world, grip);
    }

    pub fn config(&self) -> &WorkshopConfig {
        &self.config
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn interaction(&self) -> &InteractionManager {
        &self.interaction
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn carving(&self) -> &CarvingEngine {
        &self.carving
    }

    pub fn surfaces(&self) -> &[DeformableSurface] {
        &self.surfaces
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&DeformableSurface> {
        self.surfaces.iter().find(|s| s.id() == id)
    }

    pub fn last_input(&self) -> &InputState {
        &self.last_input
    }

    /// Reveal-glow weight at a world-space point on a surface.
    pub fn reveal_hint(&self, id: SurfaceId, world_point: Vec3) -> Option<f32> {
        let surface = self.surface(id)?;
        let local = surface.transform().inverse().transform_point(world_point);
        Some(surface.reveal_hint(local, self.config.carving.hint_thickness))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::world::{Aabb, Interactable};

    fn key(key: KeyCode, pressed: bool) -> InputEvent {
        InputEvent::Key { key, pressed }
    }

    fn session() -> (WorkshopSession, NodeId) {
        let mut world = SceneRegistry::new();
        let root = world.root();
        let chisel = world.add_interactable(
            "chisel",
            root,
            Transform::from_translation(Vec3::new(0.0, 1.6, -1.5)),
            Vec3::new(0.1, 0.1, 0.1),
            Interactable::tool("chisel", "steel"),
        );
        let session = WorkshopSession::new(WorkshopConfig::default(), ToolCatalog::builtin(), world)
            .unwrap();
        (session, chisel)
    }

    #[test]
    fn test_first_tick_has_no_uploads() {
        let (mut session, _) = session();
        let frame = session.tick(0.016);
        assert!(frame.uploads.is_empty());
        assert_eq!(frame.look_mode, LookMode::Unlocked);
        assert!(!frame.pointer_capture);
        assert!((frame.hint_phase - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_grab_tool_equips_and_drop_unequips() {
        let (mut session, chisel) = session();
        session.handle_event(key(KeyCode::G, true));
        let frame = session.tick(0.016);
        assert_eq!(frame.held, Some(chisel));
        assert_eq!(frame.equipped_tool.as_deref(), Some("chisel"));

        session.handle_event(key(KeyCode::G, false));
        session.handle_event(key(KeyCode::Q, true));
        let frame = session.tick(0.016);
        assert_eq!(frame.held, None);
        assert_eq!(frame.equipped_tool, None);
    }

    #[test]
    fn test_equip_unknown_keeps_tool() {
        let (mut session, _) = session();
        session.equip_tool("brush").unwrap();
        let err = session.equip_tool("nonexistent_tool").unwrap_err();
        assert_eq!(err, ToolError::UnknownTool("nonexistent_tool".into()));
        assert_eq!(session.tools().equipped_id(), Some("brush"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = WorkshopConfig::default();
        config.movement.walk_speed = -1.0;
        let result = WorkshopSession::new(config, ToolCatalog::builtin(), SceneRegistry::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_anchor_published() {
        let (mut session, _) = session();
        session.tick(0.016);
        let anchor = session.world().player_anchor();
        let eye = session.player().camera_pose().position;
        let expected = eye + session.config().interaction.grab_anchor_offset;
        assert!((anchor.translation - expected).length() < 1e-4);
    }

    #[test]
    fn test_occluder_blocks_hover() {
        let (mut session, _) = session();
        let root = session.world().root();
        session.world_mut().add_node(
            "wall",
            root,
            Transform::IDENTITY,
            Some(Aabb::new(Vec3::new(-1.0, 0.0, -1.2), Vec3::new(1.0, 3.0, -1.1))),
        );
        let frame = session.tick(0.016);
        assert_eq!(frame.hovered, None);
    }
}
