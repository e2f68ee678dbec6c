//! Player Controller
//!
//! Owns the kinematic body and the look-mode state machine. One `update` per
//! tick consumes the aggregated input in a fixed order:
//!
//! 1. Mode transition (entering or leaving the inspect orbit)
//! 2. Planar movement (suppressed while orbiting)
//! 3. Jump and gravity
//! 4. Head bob and idle sway
//! 5. Look
//!
//! The result depends only on the inputs and deltas fed in.

use glam::Vec3;
use tracing::debug;

use super::head_bob::{HeadBob, IdleSway};
use super::look_mode::LookMode;
use super::movement_controller::{KinematicBody, MovementController};
use crate::camera::{CameraPose, LookController, direction_from_angles};
use crate::config::WorkshopConfig;
use crate::input::InputState;

/// Orbit around a fixed focus, entered from locked look.
#[derive(Debug, Clone, Copy, PartialEq)]
struct InspectOrbit {
    focus: Vec3,
    yaw: f32,
    pitch: f32,
    /// First-person orientation to restore on exit
    saved_yaw: f32,
    saved_pitch: f32,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    body: KinematicBody,
    look: LookController,
    movement: MovementController,
    mode: LookMode,
    head_bob: HeadBob,
    sway: IdleSway,
    orbit: Option<InspectOrbit>,
    orbit_distance: f32,
    max_frame_delta: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::from_config(&WorkshopConfig::default())
    }
}

impl PlayerController {
    pub fn from_config(config: &WorkshopConfig) -> Self {
        let mut body = KinematicBody::default();
        body.position.y = config.movement.eye_height;
        Self {
            body,
            look: LookController::with_tuning(
                config.look.mouse_sensitivity,
                config.look.pitch_limit(),
            ),
            movement: MovementController::from_config(&config.movement),
            mode: LookMode::Unlocked,
            head_bob: HeadBob::from_config(&config.head_bob),
            sway: IdleSway::from_config(&config.head_bob),
            orbit: None,
            orbit_distance: config.look.orbit_distance,
            max_frame_delta: config.movement.max_frame_delta,
        }
    }

    /// Place the body. Height below the floor is clamped on the next update.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.body.position = position;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.look.yaw = yaw;
        self
    }

    /// Advance one tick.
    ///
    /// Negative deltas become 0, non-finite deltas become 0, and anything above
    /// the configured maximum is clamped to it.
    pub fn update(&mut self, delta: f32, input: &InputState) {
        let dt = if delta.is_finite() {
            delta.clamp(0.0, self.max_frame_delta)
        } else {
            0.0
        };

        let next = self.mode.transition(input);
        if next != self.mode {
            self.change_mode(next);
        }

        let orbiting = self.mode == LookMode::InspectOrbit;
        if !orbiting {
            self.body.position += self.movement.planar_step(input.move_axis, self.look.yaw, dt);
        }

        self.movement
            .vertical_step(&mut self.body, input.jump_requested, dt);

        let walking = !orbiting && input.is_moving() && self.body.grounded;
        self.head_bob.update(dt, walking);
        self.sway.update(dt);

        let (dx, dy) = (input.look_delta.x, input.look_delta.y);
        match self.mode {
            LookMode::LockedLook | LookMode::FreeLook => self.look.apply_look_delta(dx, dy),
            LookMode::InspectOrbit => {
                if let Some(orbit) = self.orbit.as_mut() {
                    let sensitivity = self.look.sensitivity;
                    let limit = self.look.pitch_limit();
                    orbit.yaw -= dx * sensitivity;
                    orbit.pitch = (orbit.pitch - dy * sensitivity).clamp(-limit, limit);
                }
            }
            LookMode::Unlocked => {}
        }

        self.body.yaw = self.look.yaw;
        self.body.pitch = self.look.pitch;
    }

    fn change_mode(&mut self, next: LookMode) {
        debug!(from = ?self.mode, to = ?next, "look mode transition");

        if let Some(orbit) = self.orbit.take() {
            self.look.yaw = orbit.saved_yaw;
            self.look.set_pitch(orbit.saved_pitch);
        }

        if next == LookMode::InspectOrbit {
            let focus = self.view_origin() + self.look.forward() * self.orbit_distance;
            self.orbit = Some(InspectOrbit {
                focus,
                yaw: self.look.yaw,
                pitch: self.look.pitch,
                saved_yaw: self.look.yaw,
                saved_pitch: self.look.pitch,
            });
        }

        self.mode = next;
    }

    /// Eye position including head bob.
    #[inline]
    pub fn view_origin(&self) -> Vec3 {
        self.body.position + Vec3::new(0.0, self.head_bob.offset(), 0.0)
    }

    /// The pose the renderer should draw from and rays should start at.
    pub fn camera_pose(&self) -> CameraPose {
        match self.orbit {
            Some(orbit) => {
                let direction = direction_from_angles(orbit.yaw, orbit.pitch);
                CameraPose::new(
                    orbit.focus - direction * self.orbit_distance,
                    orbit.yaw,
                    orbit.pitch,
                )
            }
            None => CameraPose::new(self.view_origin(), self.look.yaw, self.look.pitch),
        }
    }

    #[inline]
    pub fn view_direction(&self) -> Vec3 {
        self.camera_pose().forward()
    }

    #[inline]
    pub fn look_mode(&self) -> LookMode {
        self.mode
    }

    /// Focus point while orbiting.
    pub fn orbit_focus(&self) -> Option<Vec3> {
        self.orbit.map(|o| o.focus)
    }

    #[inline]
    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.look.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.look.pitch
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    #[inline]
    pub fn bob_offset(&self) -> f32 {
        self.head_bob.offset()
    }

    /// Idle roll for the held tool.
    #[inline]
    pub fn hand_roll(&self) -> f32 {
        self.sway.roll()
    }

    #[inline]
    pub fn wants_pointer_capture(&self) -> bool {
        self.mode.wants_pointer_capture()
    }
}
