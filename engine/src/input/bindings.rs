//! Input Bindings Module
//!
//! Maps physical keys to logical workshop actions. Several keys may drive the
//! same action (W and ArrowUp both move forward); a key drives at most one.

use std::collections::{HashMap, HashSet};

use super::KeyCode;

/// Logical actions that keys can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W, ArrowUp)
    MoveForward,
    /// Move backward (default: S, ArrowDown)
    MoveBack,
    /// Strafe left (default: A, ArrowLeft)
    MoveLeft,
    /// Strafe right (default: D, ArrowRight)
    MoveRight,
    /// Jump (default: Space)
    Jump,
    /// Pick up the targeted object (default: G)
    Grab,
    /// Put down the held object (default: Q)
    Drop,
    /// Switch between locked look and inspect orbit (default: Tab)
    ToggleMode,
    /// Release the pointer and leave every look mode (default: Escape)
    Cancel,
    /// Carve while held (default: E)
    Carve,
    /// Equip the tool in a catalog slot (default: Digit1..Digit9)
    EquipSlot(u8),
}

impl InputAction {
    /// Held actions are sampled every tick; the rest fire on the press edge.
    pub fn is_held_action(self) -> bool {
        matches!(
            self,
            InputAction::MoveForward
                | InputAction::MoveBack
                | InputAction::MoveLeft
                | InputAction::MoveRight
                | InputAction::Carve
        )
    }
}

/// Key-to-action table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create the default workshop layout.
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::G, InputAction::Grab);
        bindings.bind(KeyCode::Q, InputAction::Drop);
        bindings.bind(KeyCode::Tab, InputAction::ToggleMode);
        bindings.bind(KeyCode::Escape, InputAction::Cancel);
        bindings.bind(KeyCode::E, InputAction::Carve);

        for key in [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
            KeyCode::Digit9,
        ] {
            if let Some(slot) = key.digit_slot() {
                bindings.bind(key, InputAction::EquipSlot(slot as u8));
            }
        }

        bindings
    }

    /// A table with nothing bound.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
        }
    }

    /// Bind a key to an action, replacing whatever the key did before.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.key_to_action.insert(key, action);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_to_action.remove(&key);
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Every key currently bound to `action`.
    pub fn keys_for(&self, action: InputAction) -> Vec<KeyCode> {
        self.key_to_action
            .iter()
            .filter(|&(_, &a)| a == action)
            .map(|(&k, _)| k)
            .collect()
    }

    /// Whether any key bound to `action` is in `pressed_keys`.
    pub fn is_action_pressed(&self, action: InputAction, pressed_keys: &HashSet<KeyCode>) -> bool {
        pressed_keys
            .iter()
            .any(|key| self.get_action(*key) == Some(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(InputAction::Jump));
        assert_eq!(bindings.get_action(KeyCode::G), Some(InputAction::Grab));
        assert_eq!(bindings.get_action(KeyCode::Q), Some(InputAction::Drop));
        assert_eq!(bindings.get_action(KeyCode::Tab), Some(InputAction::ToggleMode));
        assert_eq!(bindings.get_action(KeyCode::Escape), Some(InputAction::Cancel));
        assert_eq!(bindings.get_action(KeyCode::Digit3), Some(InputAction::EquipSlot(2)));
    }

    #[test]
    fn test_many_keys_one_action() {
        let bindings = KeyBindings::new();
        let mut keys = bindings.keys_for(InputAction::MoveLeft);
        keys.sort_by_key(|k| format!("{k:?}"));
        assert_eq!(keys, vec![KeyCode::A, KeyCode::ArrowLeft]);
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyCode::E, InputAction::Grab);

        assert_eq!(bindings.get_action(KeyCode::E), Some(InputAction::Grab));
        // G still grabs too
        assert_eq!(bindings.get_action(KeyCode::G), Some(InputAction::Grab));
        assert!(bindings.keys_for(InputAction::Carve).is_empty());
    }

    #[test]
    fn test_is_action_pressed() {
        let bindings = KeyBindings::new();

        let mut pressed = HashSet::new();
        pressed.insert(KeyCode::ArrowUp);

        assert!(bindings.is_action_pressed(InputAction::MoveForward, &pressed));
        assert!(!bindings.is_action_pressed(InputAction::MoveBack, &pressed));
    }

    #[test]
    fn test_unbound_key_not_pressed() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_key(KeyCode::W);

        let mut pressed = HashSet::new();
        pressed.insert(KeyCode::W);

        assert!(!bindings.is_action_pressed(InputAction::MoveForward, &pressed));
    }

    #[test]
    fn test_held_actions() {
        assert!(InputAction::Carve.is_held_action());
        assert!(InputAction::MoveLeft.is_held_action());
        assert!(!InputAction::Grab.is_held_action());
        assert!(!InputAction::EquipSlot(0).is_held_action());
    }
}
