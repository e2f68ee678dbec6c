//! Head bob and idle hand sway.
//!
//! Both animate from phases accumulated out of `delta`, never from a wall
//! clock, so replaying the same tick sequence reproduces the same motion.

use std::f32::consts::TAU;

use crate::config::HeadBobConfig;

/// Vertical camera bob while walking.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadBob {
    phase: f32,
    offset: f32,
    frequency: f32,
    amplitude: f32,
    secondary_amplitude: f32,
    settle_rate: f32,
    phase_decay_rate: f32,
}

impl Default for HeadBob {
    fn default() -> Self {
        Self::from_config(&HeadBobConfig::default())
    }
}

impl HeadBob {
    pub fn from_config(config: &HeadBobConfig) -> Self {
        Self {
            phase: 0.0,
            offset: 0.0,
            frequency: config.frequency,
            amplitude: config.amplitude,
            secondary_amplitude: config.secondary_amplitude,
            settle_rate: config.settle_rate,
            phase_decay_rate: config.phase_decay_rate,
        }
    }

    /// Advance by `dt`.
    ///
    /// While walking the phase advances and the offset follows the bob curve.
    /// Otherwise both decay exponentially toward zero.
    pub fn update(&mut self, dt: f32, walking: bool) {
        if walking {
            self.phase = (self.phase + dt * self.frequency) % TAU;
            self.offset = self.amplitude * self.phase.sin()
                + self.secondary_amplitude * (2.0 * self.phase).sin();
        } else {
            self.offset *= (-self.settle_rate * dt).exp();
            self.phase *= (-self.phase_decay_rate * dt).exp();
        }
    }

    /// Current vertical camera offset.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }
}

/// Slow roll of the held tool while idle.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleSway {
    phase: f32,
    frequency: f32,
    amplitude: f32,
}

impl Default for IdleSway {
    fn default() -> Self {
        Self::from_config(&HeadBobConfig::default())
    }
}

impl IdleSway {
    pub fn from_config(config: &HeadBobConfig) -> Self {
        Self {
            phase: 0.0,
            frequency: config.sway_frequency,
            amplitude: config.sway_amplitude,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.phase = (self.phase + dt * self.frequency) % TAU;
    }

    /// Roll angle in radians.
    #[inline]
    pub fn roll(&self) -> f32 {
        self.amplitude * self.phase.sin()
    }
}
