//! Multi-touch tracking: active points, look deltas and double-tap detection.

use std::collections::HashMap;

use glam::Vec2;

/// Active touch points keyed by platform identifier.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    points: HashMap<u64, Vec2>,
    /// Clock time of the last single-finger start not yet paired into a double-tap
    last_tap: Option<f64>,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new touch at clock time `now`.
    ///
    /// Returns `true` when this start completes a double-tap: two starts with
    /// exactly one active touch, less than `window` seconds apart. A start for
    /// an identifier that is already active just moves it.
    pub fn start(&mut self, id: u64, position: Vec2, now: f64, window: f32) -> bool {
        if self.points.insert(id, position).is_some() {
            return false;
        }
        if self.points.len() != 1 {
            self.last_tap = None;
            return false;
        }
        match self.last_tap {
            Some(previous) if now - previous < window as f64 => {
                self.last_tap = None;
                true
            }
            _ => {
                self.last_tap = Some(now);
                false
            }
        }
    }

    /// Move a touch, returning its motion since the last report.
    ///
    /// Unknown identifiers are ignored.
    pub fn update(&mut self, id: u64, position: Vec2) -> Option<Vec2> {
        let previous = self.points.get_mut(&id)?;
        let delta = position - *previous;
        *previous = position;
        delta.is_finite().then_some(delta)
    }

    /// Release a touch (end or cancel). Unknown identifiers are ignored.
    pub fn end(&mut self, id: u64) -> bool {
        self.points.remove(&id).is_some()
    }

    /// Number of active touches.
    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_reports_delta() {
        let mut touches = TouchTracker::new();
        touches.start(7, Vec2::new(10.0, 10.0), 0.0, 0.3);
        assert_eq!(touches.update(7, Vec2::new(14.0, 8.0)), Some(Vec2::new(4.0, -2.0)));
        assert_eq!(touches.update(7, Vec2::new(15.0, 8.0)), Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_unknown_touch_ignored() {
        let mut touches = TouchTracker::new();
        assert_eq!(touches.update(3, Vec2::ONE), None);
        assert!(!touches.end(3));
        assert_eq!(touches.count(), 0);
    }

    #[test]
    fn test_double_tap() {
        let mut touches = TouchTracker::new();
        assert!(!touches.start(1, Vec2::ZERO, 0.0, 0.3));
        touches.end(1);
        assert!(touches.start(2, Vec2::ZERO, 0.2, 0.3));
        touches.end(2);
        // Too slow after the pair
        assert!(!touches.start(3, Vec2::ZERO, 1.0, 0.3));
        touches.end(3);
        assert!(!touches.start(4, Vec2::ZERO, 1.5, 0.3));
    }

    #[test]
    fn test_second_finger_breaks_double_tap() {
        let mut touches = TouchTracker::new();
        touches.start(1, Vec2::ZERO, 0.0, 0.3);
        assert!(!touches.start(2, Vec2::ONE, 0.1, 0.3));
        assert_eq!(touches.count(), 2);
        touches.end(1);
        touches.end(2);
        assert!(!touches.start(3, Vec2::ZERO, 0.2, 0.3));
    }
}
