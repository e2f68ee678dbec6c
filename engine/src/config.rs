//! Workshop Configuration
//!
//! Centralized tuning for the play session. `Default` returns the canonical
//! values; a JSON file may override any subset of fields, missing fields fall
//! back to the defaults.
//!
//! ```json
//! { "movement": { "walk_speed": 4.0 }, "interaction": { "grab_cooldown": 0.4 } }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, ensure};

/// Kinematic body tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Planar speed in units per second
    pub walk_speed: f32,
    /// Vertical velocity applied on jump
    pub jump_impulse: f32,
    /// Downward acceleration in units per second squared
    pub gravity: f32,
    /// Eye height of the body above the floor; also the floor clamp for position.y
    pub eye_height: f32,
    /// Longest tick the controller will integrate in one step
    pub max_frame_delta: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            jump_impulse: 10.0,
            gravity: 30.0,
            eye_height: 1.6,
            max_frame_delta: 0.25,
        }
    }
}

/// Look sensitivity and pitch limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians per pixel of pointer motion
    pub mouse_sensitivity: f32,
    /// Radians per pixel of touch motion
    pub touch_sensitivity: f32,
    /// Pitch clamp in degrees, symmetric around the horizon
    pub pitch_limit_degrees: f32,
    /// Distance from the inspect focus while orbiting
    pub orbit_distance: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            touch_sensitivity: 0.008,
            pitch_limit_degrees: 80.0,
            orbit_distance: 0.9,
        }
    }
}

impl LookConfig {
    /// Pitch limit in radians.
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit_degrees.to_radians()
    }

    /// Factor that converts touch pixels into pointer-equivalent pixels, so the
    /// controller only has to apply one sensitivity.
    pub fn touch_look_scale(&self) -> f32 {
        self.touch_sensitivity / self.mouse_sensitivity
    }
}

/// Head bob and idle hand sway.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobConfig {
    /// Phase advance in radians per second while walking
    pub frequency: f32,
    pub amplitude: f32,
    /// Amplitude of the harmonic at twice the base frequency
    pub secondary_amplitude: f32,
    /// Rate at which the camera offset settles back to zero when standing
    pub settle_rate: f32,
    /// Exponential decay rate of the bob phase when standing
    pub phase_decay_rate: f32,
    /// Idle hand sway phase advance in radians per second
    pub sway_frequency: f32,
    /// Idle hand sway roll amplitude in radians
    pub sway_amplitude: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            frequency: 12.0,
            amplitude: 0.06,
            secondary_amplitude: 0.02,
            settle_rate: 10.0,
            // 0.9 per frame at 60 Hz
            phase_decay_rate: 6.32,
            sway_frequency: 3.0,
            sway_amplitude: 0.03,
        }
    }
}

/// Hover, grab and drop tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum ray distance for a grab
    pub grab_distance: f32,
    /// Seconds after a grab during which further grabs are rejected
    pub grab_cooldown: f32,
    /// Maximum ray distance for hover highlighting
    pub hover_distance: f32,
    /// Seconds a highlight survives after the ray loses its target
    pub hover_linger: f32,
    /// Grab anchor position relative to the camera
    pub grab_anchor_offset: Vec3,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            grab_distance: 2.5,
            grab_cooldown: 0.3,
            hover_distance: 10.0,
            hover_linger: 0.1,
            grab_anchor_offset: Vec3::new(0.25, -0.6, -0.5),
        }
    }
}

/// Carving brush tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarvingConfig {
    /// Falloff radius around the contact point
    pub radius: f32,
    /// Blend fraction per tick at the contact point, in (0, 1)
    pub strength: f32,
    /// Maximum tool ray distance
    pub reach: f32,
    /// Mean displacement at which a surface counts as fully carved
    pub target_depth: f32,
    /// Width of the target-shape reveal band
    pub hint_thickness: f32,
}

impl Default for CarvingConfig {
    fn default() -> Self {
        Self {
            radius: 0.12,
            strength: 0.25,
            reach: 3.0,
            target_depth: 0.05,
            hint_thickness: 0.05,
        }
    }
}

/// Raw input interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Two taps or clicks closer than this (seconds) form a double-tap
    pub double_tap_window: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_tap_window: 0.3,
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    pub movement: MovementConfig,
    pub look: LookConfig,
    pub head_bob: HeadBobConfig,
    pub interaction: InteractionConfig,
    pub carving: CarvingConfig,
    pub input: InputConfig,
}

impl WorkshopConfig {
    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if let Err(err) = config.validate() {
            warn!(%err, "rejected workshop configuration");
            return Err(err);
        }
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every tunable against its legal range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        ensure(m.walk_speed > 0.0, "movement.walk_speed must be positive")?;
        ensure(m.jump_impulse >= 0.0, "movement.jump_impulse must not be negative")?;
        ensure(m.gravity > 0.0, "movement.gravity must be positive")?;
        ensure(m.max_frame_delta > 0.0, "movement.max_frame_delta must be positive")?;

        let l = &self.look;
        ensure(l.mouse_sensitivity > 0.0, "look.mouse_sensitivity must be positive")?;
        ensure(l.touch_sensitivity > 0.0, "look.touch_sensitivity must be positive")?;
        ensure(
            l.pitch_limit_degrees > 0.0 && l.pitch_limit_degrees < 90.0,
            "look.pitch_limit_degrees must be in (0, 90)",
        )?;
        ensure(l.orbit_distance > 0.0, "look.orbit_distance must be positive")?;

        let b = &self.head_bob;
        ensure(b.settle_rate >= 0.0, "head_bob.settle_rate must not be negative")?;
        ensure(b.phase_decay_rate >= 0.0, "head_bob.phase_decay_rate must not be negative")?;

        let i = &self.interaction;
        ensure(i.grab_distance > 0.0, "interaction.grab_distance must be positive")?;
        ensure(i.grab_cooldown >= 0.0, "interaction.grab_cooldown must not be negative")?;
        ensure(i.hover_distance > 0.0, "interaction.hover_distance must be positive")?;
        ensure(i.hover_linger >= 0.0, "interaction.hover_linger must not be negative")?;

        let c = &self.carving;
        ensure(c.radius > 0.0, "carving.radius must be positive")?;
        ensure(
            c.strength > 0.0 && c.strength < 1.0,
            "carving.strength must be in (0, 1)",
        )?;
        ensure(c.reach > 0.0, "carving.reach must be positive")?;
        ensure(c.target_depth > 0.0, "carving.target_depth must be positive")?;
        ensure(c.hint_thickness > 0.0, "carving.hint_thickness must be positive")?;

        ensure(
            self.input.double_tap_window > 0.0,
            "input.double_tap_window must be positive",
        )
    }
}
