//! Player Movement Controller
//!
//! Kinematic movement for the workshop body: camera-relative planar walking at
//! a constant speed, plus a single vertical jump/gravity integrator against a
//! flat floor. There is no acceleration curve; a held direction moves the body
//! at exactly `walk_speed`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let movement = MovementController::from_config(&config.movement);
//! body.position += movement.planar_step(input.move_axis, yaw, dt);
//! movement.vertical_step(&mut body, input.jump_requested, dt);
//! ```

use glam::{Vec2, Vec3};

use crate::config::MovementConfig;

/// Walk speed in units per second
pub const WALK_SPEED: f32 = 5.0;

/// Vertical velocity applied by a jump
pub const JUMP_IMPULSE: f32 = 10.0;

/// Gravity acceleration in units per second squared
pub const GRAVITY: f32 = 30.0;

/// Eye height, which is also the lowest allowed `position.y`
pub const EYE_HEIGHT: f32 = 1.6;

/// Kinematic state of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    /// Eye position in world space
    pub position: Vec3,
    /// Horizontal look angle (radians)
    pub yaw: f32,
    /// Vertical look angle (radians)
    pub pitch: f32,
    /// Upward velocity in units per second
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
        }
    }
}

/// Horizontal forward for a yaw angle (-Z at yaw = 0).
#[inline]
pub fn planar_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Horizontal right for a yaw angle (+X at yaw = 0).
#[inline]
pub fn planar_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Planar movement and vertical integration with fixed tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementController {
    walk_speed: f32,
    jump_impulse: f32,
    gravity: f32,
    floor_height: f32,
}

impl Default for MovementController {
    fn default() -> Self {
        Self {
            walk_speed: WALK_SPEED,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            floor_height: EYE_HEIGHT,
        }
    }
}

impl MovementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            jump_impulse: config.jump_impulse,
            gravity: config.gravity,
            floor_height: config.eye_height,
        }
    }

    #[inline]
    pub fn walk_speed(&self) -> f32 {
        self.walk_speed
    }

    #[inline]
    pub fn floor_height(&self) -> f32 {
        self.floor_height
    }

    /// World-space displacement for one tick of planar input.
    ///
    /// `move_axis.y` is forward, `move_axis.x` is strafe right. The combined
    /// direction is normalized so diagonals are not faster.
    pub fn planar_step(&self, move_axis: Vec2, yaw: f32, dt: f32) -> Vec3 {
        let direction = planar_forward(yaw) * move_axis.y + planar_right(yaw) * move_axis.x;
        direction.normalize_or_zero() * self.walk_speed * dt
    }

    /// Jump, apply gravity, integrate height and clamp to the floor.
    pub fn vertical_step(&self, body: &mut KinematicBody, jump_requested: bool, dt: f32) {
        if body.grounded && jump_requested {
            body.vertical_velocity = self.jump_impulse;
            body.grounded = false;
        }

        body.vertical_velocity -= self.gravity * dt;
        body.position.y += body.vertical_velocity * dt;

        if body.position.y <= self.floor_height {
            body.position.y = self.floor_height;
            body.vertical_velocity = 0.0;
            body.grounded = true;
        }
    }
}
