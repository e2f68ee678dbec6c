//! Pointer State Tracker
//!
//! Accumulates raw pointer deltas between ticks, tracks pointer capture and
//! the carve button, and detects double clicks on the aggregator clock.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer buttons the workshop distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

/// Pointer state with delta accumulation.
///
/// Deltas keep accumulating while the pointer is not captured; deciding
/// whether they rotate anything is the controller's job.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Accumulated motion since last consume
    delta: Vec2,
    /// Whether the platform reports the pointer as captured
    captured: bool,
    /// Left button currently held
    left_held: bool,
    /// Left button went down since the last `take_left_pressed`
    left_pressed: bool,
    /// Clock time of the last left press that did not complete a double click
    last_left_press: Option<f64>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate raw pointer motion.
    #[inline]
    pub fn accumulate_delta(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() && dy.is_finite() {
            self.delta += Vec2::new(dx, dy);
        }
    }

    /// Return the accumulated delta and reset it to zero.
    #[inline]
    pub fn consume_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    #[inline]
    pub fn peek_delta(&self) -> Vec2 {
        self.delta
    }

    /// Update the capture flag.
    ///
    /// Returns `true` when a held capture was lost.
    pub fn set_captured(&mut self, captured: bool) -> bool {
        let lost = self.captured && !captured;
        self.captured = captured;
        if lost {
            // The button-up may never arrive once the platform takes the pointer back
            self.left_held = false;
            self.left_pressed = false;
        }
        lost
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    #[inline]
    pub fn is_left_held(&self) -> bool {
        self.left_held
    }

    /// Whether the left button was held now or pressed at any point since the
    /// last call. Clears the pressed flag.
    pub fn take_left_pressed(&mut self) -> bool {
        std::mem::take(&mut self.left_pressed) || self.left_held
    }

    /// Record a left-button transition at clock time `now`.
    ///
    /// Returns `true` when this press completes a double click: a second press
    /// less than `window` seconds after the previous one. The pair is consumed,
    /// so a third quick press starts a new pair.
    pub fn press_left(&mut self, pressed: bool, now: f64, window: f32) -> bool {
        self.left_held = pressed;
        if !pressed {
            return false;
        }
        self.left_pressed = true;
        match self.last_left_press {
            Some(previous) if now - previous < window as f64 => {
                self.last_left_press = None;
                true
            }
            _ => {
                self.last_left_press = Some(now);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
