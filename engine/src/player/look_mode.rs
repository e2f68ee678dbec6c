//! Look Mode State Machine
//!
//! Exactly one mode is active at a time:
//!
//! - `Unlocked`: pointer free, look input ignored
//! - `LockedLook`: pointer captured, pointer motion rotates the view
//! - `FreeLook`: single-finger touch drag rotates the view
//! - `InspectOrbit`: the view orbits a fixed focus point
//!
//! ```text
//!            lock                 toggle
//! Unlocked ---------> LockedLook <------> InspectOrbit
//!    ^  |  one touch, uncaptured
//!    |  +-------------> FreeLook
//!    +---- no touches ----+
//!
//! cancel: any mode -> Unlocked
//! ```

use serde::{Deserialize, Serialize};

use crate::input::InputState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LookMode {
    #[default]
    Unlocked,
    LockedLook,
    FreeLook,
    InspectOrbit,
}

impl LookMode {
    /// Next mode for this tick's input. At most one transition per tick.
    pub fn transition(self, input: &InputState) -> LookMode {
        if input.cancel_requested {
            return LookMode::Unlocked;
        }
        match self {
            LookMode::Unlocked => {
                if input.touch_count == 1 && !input.pointer_captured {
                    LookMode::FreeLook
                } else if input.lock_requested && input.touch_count == 0 {
                    LookMode::LockedLook
                } else {
                    LookMode::Unlocked
                }
            }
            LookMode::FreeLook => {
                if input.touch_count == 0 {
                    LookMode::Unlocked
                } else {
                    LookMode::FreeLook
                }
            }
            LookMode::LockedLook if input.mode_toggle_requested => LookMode::InspectOrbit,
            LookMode::InspectOrbit if input.mode_toggle_requested => LookMode::LockedLook,
            mode => mode,
        }
    }

    /// Whether the host should hold pointer capture in this mode.
    pub fn wants_pointer_capture(self) -> bool {
        matches!(self, LookMode::LockedLook | LookMode::InspectOrbit)
    }

    /// Modes in which look input rotates the first-person view.
    pub fn rotates_view(self) -> bool {
        matches!(self, LookMode::LockedLook | LookMode::FreeLook)
    }

    /// Modes in which the carve gesture is honoured.
    pub fn allows_carving(self) -> bool {
        self.rotates_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> InputState {
        InputState::default()
    }

    #[test]
    fn test_default_is_unlocked() {
        assert_eq!(LookMode::default(), LookMode::Unlocked);
    }

    #[test]
    fn test_lock_and_toggle() {
        let locked = LookMode::Unlocked.transition(&InputState {
            lock_requested: true,
            ..input()
        });
        assert_eq!(locked, LookMode::LockedLook);

        let toggle = InputState {
            mode_toggle_requested: true,
            ..input()
        };
        let orbit = locked.transition(&toggle);
        assert_eq!(orbit, LookMode::InspectOrbit);
        assert_eq!(orbit.transition(&toggle), LookMode::LockedLook);
    }

    #[test]
    fn test_lock_and_toggle_same_tick_moves_once() {
        let both = InputState {
            lock_requested: true,
            mode_toggle_requested: true,
            ..input()
        };
        assert_eq!(LookMode::Unlocked.transition(&both), LookMode::LockedLook);
    }

    #[test]
    fn test_toggle_ignored_when_unlocked() {
        let toggle = InputState {
            mode_toggle_requested: true,
            ..input()
        };
        assert_eq!(LookMode::Unlocked.transition(&toggle), LookMode::Unlocked);
    }

    #[test]
    fn test_free_look_follows_touch_count() {
        let one = InputState {
            touch_count: 1,
            ..input()
        };
        let free = LookMode::Unlocked.transition(&one);
        assert_eq!(free, LookMode::FreeLook);
        assert_eq!(free.transition(&one), LookMode::FreeLook);
        assert_eq!(free.transition(&input()), LookMode::Unlocked);

        let captured = InputState {
            touch_count: 1,
            pointer_captured: true,
            ..input()
        };
        assert_eq!(LookMode::Unlocked.transition(&captured), LookMode::Unlocked);
    }

    #[test]
    fn test_cancel_from_every_mode() {
        let cancel = InputState {
            cancel_requested: true,
            mode_toggle_requested: true,
            lock_requested: true,
            touch_count: 1,
            ..input()
        };
        for mode in [
            LookMode::Unlocked,
            LookMode::LockedLook,
            LookMode::FreeLook,
            LookMode::InspectOrbit,
        ] {
            assert_eq!(mode.transition(&cancel), LookMode::Unlocked);
        }
    }

    #[test]
    fn test_capture_wishes() {
        assert!(LookMode::LockedLook.wants_pointer_capture());
        assert!(LookMode::InspectOrbit.wants_pointer_capture());
        assert!(!LookMode::FreeLook.wants_pointer_capture());
        assert!(!LookMode::Unlocked.wants_pointer_capture());
    }
}
