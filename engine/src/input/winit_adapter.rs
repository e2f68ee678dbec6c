//! winit Adapter
//!
//! Converts winit window and device events into engine `InputEvent`s. This is
//! the only module in the input layer that knows about winit.

use winit::event::{DeviceEvent, ElementState, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::{InputEvent, KeyCode, MouseButton};

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyW => KeyCode::W,
            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyD => KeyCode::D,
            WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
            WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
            WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
            WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyQ => KeyCode::Q,
            WinitKeyCode::KeyE => KeyCode::E,
            WinitKeyCode::Tab => KeyCode::Tab,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Digit1 => KeyCode::Digit1,
            WinitKeyCode::Digit2 => KeyCode::Digit2,
            WinitKeyCode::Digit3 => KeyCode::Digit3,
            WinitKeyCode::Digit4 => KeyCode::Digit4,
            WinitKeyCode::Digit5 => KeyCode::Digit5,
            WinitKeyCode::Digit6 => KeyCode::Digit6,
            WinitKeyCode::Digit7 => KeyCode::Digit7,
            WinitKeyCode::Digit8 => KeyCode::Digit8,
            WinitKeyCode::Digit9 => KeyCode::Digit9,
            _ => KeyCode::Unknown,
        }
    }
}

impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => MouseButton::Left,
            winit::event::MouseButton::Right => MouseButton::Right,
            winit::event::MouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

/// Translate a window event. Returns `None` for events the workshop ignores.
///
/// Losing window focus is reported as a pointer-capture loss, since the
/// platform releases the pointer with it.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            let key = KeyCode::from(code);
            (key != KeyCode::Unknown).then_some(InputEvent::Key {
                key,
                pressed: event.state == ElementState::Pressed,
            })
        }
        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: (*button).into(),
            pressed: *state == ElementState::Pressed,
        }),
        WindowEvent::Touch(touch) => {
            let id = touch.id;
            let (x, y) = (touch.location.x as f32, touch.location.y as f32);
            Some(match touch.phase {
                TouchPhase::Started => InputEvent::TouchStart { id, x, y },
                TouchPhase::Moved => InputEvent::TouchMove { id, x, y },
                TouchPhase::Ended => InputEvent::TouchEnd { id },
                TouchPhase::Cancelled => InputEvent::TouchCancel { id },
            })
        }
        WindowEvent::Focused(false) => Some(InputEvent::PointerCapture { captured: false }),
        _ => None,
    }
}

/// Translate a raw device event. Only relative mouse motion is used.
pub fn translate_device_event(event: &DeviceEvent) -> Option<InputEvent> {
    match event {
        DeviceEvent::MouseMotion { delta } => Some(InputEvent::PointerMotion {
            dx: delta.0 as f32,
            dy: delta.1 as f32,
        }),
        _ => None,
    }
}
