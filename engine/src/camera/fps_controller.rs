//! First-Person Look Module
//!
//! Yaw/pitch orientation driven directly by pointer deltas. There is no
//! smoothing: one pixel of motion always maps to the same rotation, so the
//! resulting orientation depends only on the sequence of deltas fed in.
//!
//! Conventions:
//! - +X = right, +Y = up, -Z = forward at yaw = 0
//! - Positive dx (pointer moved right) turns right, which decreases yaw
//! - Positive dy (pointer moved down) looks down, which decreases pitch

use glam::{Quat, Vec3};

/// Default pitch clamp: 80 degrees either side of the horizon.
pub const DEFAULT_PITCH_LIMIT: f32 = 80.0 * std::f32::consts::PI / 180.0;

/// First-person yaw/pitch state.
///
/// ## Usage
/// ```rust,ignore
/// let mut look = LookController::new();
/// look.apply_look_delta(dx, dy);
/// let forward = look.forward();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LookController {
    /// Horizontal angle (radians), unrestricted
    pub yaw: f32,
    /// Vertical angle (radians), clamped to +/- pitch_limit
    pub pitch: f32,
    /// Radians per pixel of pointer motion
    pub sensitivity: f32,
    pitch_limit: f32,
}

impl Default for LookController {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.002,
            pitch_limit: DEFAULT_PITCH_LIMIT,
        }
    }
}

impl LookController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a look controller with custom sensitivity and pitch limit (radians).
    pub fn with_tuning(sensitivity: f32, pitch_limit: f32) -> Self {
        Self {
            sensitivity,
            pitch_limit: pitch_limit.abs(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    /// Set the pitch angle directly (radians, clamped to the limit)
    #[inline]
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Apply a pointer delta in pixels.
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * self.sensitivity;
        self.set_pitch(self.pitch - dy * self.sensitivity);
    }

    /// Normalized view direction.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        direction_from_angles(self.yaw, self.pitch)
    }

    /// Horizontal right vector, independent of pitch.
    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Camera up vector, perpendicular to forward and right.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Orientation as a quaternion (yaw about +Y, then pitch about local +X).
    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Point the view from `eye` toward `target`.
    ///
    /// Leaves the angles unchanged when the two points coincide.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3) {
        let to_target = target - eye;
        let distance = to_target.length();

        if distance > 0.001 {
            self.yaw = (-to_target.x).atan2(-to_target.z);
            self.set_pitch((to_target.y / distance).asin());
        }
    }
}

/// View direction for the given yaw and pitch.
#[inline]
pub fn direction_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}
