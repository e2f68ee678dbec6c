//! Input Module
//!
//! Platform-agnostic input handling. Raw device events (`InputEvent`) go into
//! the `InputAggregator`, which hands out one canonical `InputState` per tick.
//! The `winit_adapter` module converts winit events into `InputEvent`s.
//!
//! # Example
//!
//! ```rust,ignore
//! use workshop_engine::input::{InputAggregator, InputEvent, KeyCode};
//!
//! let mut input = InputAggregator::default();
//! input.handle_event(InputEvent::Key { key: KeyCode::W, pressed: true });
//! let state = input.snapshot(1.0 / 60.0);
//! assert_eq!(state.move_axis.y, 1.0);
//! ```

pub mod aggregator;
pub mod bindings;
pub mod events;
pub mod keyboard;
pub mod mouse_state;
pub mod touch;
pub mod winit_adapter;

pub use aggregator::InputAggregator;
pub use bindings::{InputAction, KeyBindings};
pub use events::InputEvent;
pub use keyboard::{KeyCode, KeyboardState};
pub use mouse_state::{MouseButton, PointerState};
pub use touch::TouchTracker;

use glam::Vec2;

/// Everything the simulation needs from the devices for one tick.
///
/// Built by `InputAggregator::snapshot` and consumed once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    /// x = strafe (+right), y = forward (+forward); each component in {-1, 0, 1}
    pub move_axis: Vec2,
    /// Pointer-equivalent pixels of look motion accumulated this tick
    pub look_delta: Vec2,
    pub jump_requested: bool,
    pub grab_requested: bool,
    pub drop_requested: bool,
    pub mode_toggle_requested: bool,
    /// Leave every look mode and release the pointer
    pub cancel_requested: bool,
    /// Ask for pointer capture and locked look
    pub lock_requested: bool,
    /// Carve gesture currently held
    pub carve_held: bool,
    /// Catalog slot to equip this tick
    pub equip_slot: Option<usize>,
    pub touch_count: usize,
    pub pointer_captured: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any movement direction is held.
    pub fn is_moving(&self) -> bool {
        self.move_axis != Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default() {
        let input = InputState::new();
        assert!(!input.is_moving());
        assert_eq!(input.equip_slot, None);
    }

    #[test]
    fn test_input_state_moving() {
        let input = InputState {
            move_axis: Vec2::new(0.0, -1.0),
            ..Default::default()
        };
        assert!(input.is_moving());
    }
}
