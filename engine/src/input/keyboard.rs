//! Keyboard Input Module
//!
//! Engine-level key codes and held-key tracking. Decoupled from winit; the
//! `winit_adapter` module converts physical winit keys into these codes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Key codes the workshop reacts to, independent of the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    // Movement
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,

    // Interaction
    G,
    Q,
    E,
    Tab,
    Escape,

    // Tool slots
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Zero-based tool slot for the digit keys, `None` for every other key.
    pub fn digit_slot(self) -> Option<usize> {
        let slot = match self {
            KeyCode::Digit1 => 0,
            KeyCode::Digit2 => 1,
            KeyCode::Digit3 => 2,
            KeyCode::Digit4 => 3,
            KeyCode::Digit5 => 4,
            KeyCode::Digit6 => 5,
            KeyCode::Digit7 => 6,
            KeyCode::Digit8 => 7,
            KeyCode::Digit9 => 8,
            _ => return None,
        };
        Some(slot)
    }
}

/// Set of currently held keys.
///
/// Platforms repeat key-down events while a key is held; `handle_key`
/// reports only real transitions so edge-triggered actions fire once.
/// Keys pressed since the last `take_pressed` are kept even after release,
/// so a tap shorter than one tick still reaches the snapshot.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release.
    ///
    /// Returns `true` only when a released key became pressed.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::Unknown {
            return false;
        }
        if pressed {
            let edge = self.held.insert(key);
            if edge {
                self.pressed.insert(key);
            }
            edge
        } else {
            self.held.remove(&key);
            false
        }
    }

    #[inline]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// All held keys, for binding lookups.
    #[inline]
    pub fn held(&self) -> &HashSet<KeyCode> {
        &self.held
    }

    /// Keys that went down since the last `take_pressed`, released or not.
    #[inline]
    pub fn pressed(&self) -> &HashSet<KeyCode> {
        &self.pressed
    }

    /// Clear the pressed-since set, returning it.
    pub fn take_pressed(&mut self) -> HashSet<KeyCode> {
        std::mem::take(&mut self.pressed)
    }

    /// Release every key.
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_edge_once() {
        let mut keys = KeyboardState::new();
        assert!(keys.handle_key(KeyCode::G, true));
        // OS key repeat
        assert!(!keys.handle_key(KeyCode::G, true));
        assert!(keys.is_held(KeyCode::G));

        assert!(!keys.handle_key(KeyCode::G, false));
        assert!(!keys.is_held(KeyCode::G));
        assert!(keys.handle_key(KeyCode::G, true));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut keys = KeyboardState::new();
        assert!(!keys.handle_key(KeyCode::Unknown, true));
        assert!(keys.held().is_empty());
    }

    #[test]
    fn test_digit_slots() {
        assert_eq!(KeyCode::Digit1.digit_slot(), Some(0));
        assert_eq!(KeyCode::Digit9.digit_slot(), Some(8));
        assert_eq!(KeyCode::W.digit_slot(), None);
    }

    #[test]
    fn test_tap_survives_release() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::W, false);
        assert!(!keys.is_held(KeyCode::W));
        assert!(keys.pressed().contains(&KeyCode::W));

        let taken = keys.take_pressed();
        assert!(taken.contains(&KeyCode::W));
        assert!(keys.pressed().is_empty());

        // Repeats of a held key are not new presses
        keys.handle_key(KeyCode::A, true);
        keys.take_pressed();
        keys.handle_key(KeyCode::A, true);
        assert!(keys.pressed().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut keys = KeyboardState::new();
        keys.handle_key(KeyCode::W, true);
        keys.handle_key(KeyCode::ArrowUp, true);
        keys.reset();
        assert!(!keys.is_held(KeyCode::W));
        assert!(!keys.is_held(KeyCode::ArrowUp));
    }
}
