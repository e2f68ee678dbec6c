//! Input Aggregator
//!
//! Single funnel for every device event. Events arrive asynchronously between
//! ticks; `snapshot` folds them into exactly one `InputState` and clears the
//! edge-triggered requests so each fires on one tick only.

use glam::Vec2;
use tracing::trace;

use super::{
    InputAction, InputEvent, InputState, KeyBindings, KeyboardState, MouseButton, PointerState,
    TouchTracker,
};
use crate::config::WorkshopConfig;

/// Requests raised by press edges since the last snapshot.
#[derive(Debug, Clone, Copy, Default)]
struct EdgeRequests {
    jump: bool,
    grab: bool,
    drop: bool,
    mode_toggle: bool,
    cancel: bool,
    lock: bool,
    equip_slot: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct InputAggregator {
    bindings: KeyBindings,
    keyboard: KeyboardState,
    pointer: PointerState,
    touches: TouchTracker,
    edges: EdgeRequests,
    /// Scaled touch motion since the last snapshot
    touch_delta: Vec2,
    /// Converts touch pixels into pointer-equivalent pixels
    touch_look_scale: f32,
    double_tap_window: f32,
    /// Seconds of simulated time, advanced only by `snapshot`
    clock: f64,
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::from_config(&WorkshopConfig::default())
    }
}

impl InputAggregator {
    pub fn new(touch_look_scale: f32, double_tap_window: f32) -> Self {
        Self {
            bindings: KeyBindings::new(),
            keyboard: KeyboardState::new(),
            pointer: PointerState::new(),
            touches: TouchTracker::new(),
            edges: EdgeRequests::default(),
            touch_delta: Vec2::ZERO,
            touch_look_scale,
            double_tap_window,
            clock: 0.0,
        }
    }

    pub fn from_config(config: &WorkshopConfig) -> Self {
        Self::new(
            config.look.touch_look_scale(),
            config.input.double_tap_window,
        )
    }

    /// Replace the key table.
    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Simulated time seen by the aggregator, in seconds.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Fold one raw event into the pending state.
    pub fn handle_event(&mut self, event: InputEvent) {
        trace!(?event, "input event");
        match event {
            InputEvent::PointerMotion { dx, dy } => self.pointer.accumulate_delta(dx, dy),
            InputEvent::PointerButton { button, pressed } => {
                if button == MouseButton::Left {
                    let double = self
                        .pointer
                        .press_left(pressed, self.clock, self.double_tap_window);
                    if pressed {
                        self.edges.lock = true;
                    }
                    if double {
                        self.edges.mode_toggle = true;
                    }
                }
            }
            InputEvent::DoubleClick => self.edges.mode_toggle = true,
            InputEvent::PointerCapture { captured } => {
                if self.pointer.set_captured(captured) {
                    self.edges.cancel = true;
                }
            }
            InputEvent::Key { key, pressed } => {
                if self.keyboard.handle_key(key, pressed) {
                    if let Some(action) = self.bindings.get_action(key) {
                        self.raise(action);
                    }
                }
            }
            InputEvent::TouchStart { id, x, y } => {
                let position = Vec2::new(x, y);
                if self
                    .touches
                    .start(id, position, self.clock, self.double_tap_window)
                {
                    self.edges.mode_toggle = true;
                }
            }
            InputEvent::TouchMove { id, x, y } => {
                if let Some(delta) = self.touches.update(id, Vec2::new(x, y)) {
                    self.touch_delta += delta * self.touch_look_scale;
                }
            }
            InputEvent::TouchEnd { id } | InputEvent::TouchCancel { id } => {
                self.touches.end(id);
            }
        }
    }

    fn raise(&mut self, action: InputAction) {
        match action {
            InputAction::Jump => self.edges.jump = true,
            InputAction::Grab => self.edges.grab = true,
            InputAction::Drop => self.edges.drop = true,
            InputAction::ToggleMode => self.edges.mode_toggle = true,
            InputAction::Cancel => self.edges.cancel = true,
            InputAction::EquipSlot(slot) => self.edges.equip_slot = Some(slot as usize),
            // Sampled at snapshot time from held and tapped keys
            InputAction::MoveForward
            | InputAction::MoveBack
            | InputAction::MoveLeft
            | InputAction::MoveRight
            | InputAction::Carve => {}
        }
    }

    /// Held now, or pressed at some point since the last snapshot.
    fn active(&self, action: InputAction) -> bool {
        self.bindings.is_action_pressed(action, self.keyboard.held())
            || self.bindings.is_action_pressed(action, self.keyboard.pressed())
    }

    /// Produce this tick's input and reset the edge requests.
    ///
    /// `delta` advances the aggregator clock used for double-tap timing.
    /// Non-finite or negative values do not move the clock.
    pub fn snapshot(&mut self, delta: f32) -> InputState {
        let axis = |positive: bool, negative: bool| (positive as i32 - negative as i32) as f32;
        let move_axis = Vec2::new(
            axis(
                self.active(InputAction::MoveRight),
                self.active(InputAction::MoveLeft),
            ),
            axis(
                self.active(InputAction::MoveForward),
                self.active(InputAction::MoveBack),
            ),
        );
        let carve_held =
            self.pointer.take_left_pressed() || self.active(InputAction::Carve);
        self.keyboard.take_pressed();

        let edges = std::mem::take(&mut self.edges);
        let look_delta = self.pointer.consume_delta() + std::mem::take(&mut self.touch_delta);

        if delta.is_finite() && delta > 0.0 {
            self.clock += delta as f64;
        }

        InputState {
            move_axis,
            look_delta,
            jump_requested: edges.jump,
            grab_requested: edges.grab,
            drop_requested: edges.drop,
            mode_toggle_requested: edges.mode_toggle,
            cancel_requested: edges.cancel,
            lock_requested: edges.lock,
            carve_held,
            equip_slot: edges.equip_slot,
            touch_count: self.touches.count(),
            pointer_captured: self.pointer.is_captured(),
        }
    }

    /// Drop all held keys, touches and pending requests.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.pointer.reset();
        self.touches.reset();
        self.edges = EdgeRequests::default();
        self.touch_delta = Vec2::ZERO;
    }
}
