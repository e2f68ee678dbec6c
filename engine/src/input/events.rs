//! Raw device events accepted by the `InputAggregator`.
//!
//! Serializable so scripted sessions can be replayed from JSON:
//!
//! ```json
//! [{ "type": "Key", "key": "G", "pressed": true },
//!  { "type": "PointerMotion", "dx": 12.0, "dy": -3.0 }]
//! ```

use serde::{Deserialize, Serialize};

use super::{KeyCode, MouseButton};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    /// Relative pointer motion in pixels
    PointerMotion { dx: f32, dy: f32 },
    PointerButton { button: MouseButton, pressed: bool },
    /// Platform-detected double click
    DoubleClick,
    /// Pointer capture granted or released by the platform
    PointerCapture { captured: bool },
    Key { key: KeyCode, pressed: bool },
    TouchStart { id: u64, x: f32, y: f32 },
    TouchMove { id: u64, x: f32, y: f32 },
    TouchEnd { id: u64 },
    TouchCancel { id: u64 },
}
