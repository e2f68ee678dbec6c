//! Grab bookkeeping: the single held object and the re-grab cooldown.

use crate::world::{NodeId, Transform};

/// The object currently attached to the player's grab anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldObject {
    pub node: NodeId,
    /// Parent before the grab. Only used to restore placement on drop; it
    /// may be gone by then.
    pub former_owner: Option<NodeId>,
    /// Local transform under `former_owner` before the grab
    pub pre_grab_local: Transform,
}

/// At most one held object, plus the cooldown that follows every grab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrabState {
    held: Option<HeldObject>,
    cooldown_remaining: f32,
}

impl GrabState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn held(&self) -> Option<&HeldObject> {
        self.held.as_ref()
    }

    #[inline]
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    #[inline]
    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Whether a new grab may start now.
    #[inline]
    pub fn can_grab(&self) -> bool {
        self.held.is_none() && self.cooldown_remaining <= 0.0
    }

    /// Store the held object and start the cooldown.
    ///
    /// Refuses (returns `false`) if something is already held.
    pub fn hold(&mut self, held: HeldObject, cooldown: f32) -> bool {
        if self.held.is_some() {
            return false;
        }
        self.held = Some(held);
        self.cooldown_remaining = cooldown.max(0.0);
        true
    }

    /// Forget the held object, returning it.
    pub fn release(&mut self) -> Option<HeldObject> {
        self.held.take()
    }

    /// Count the cooldown down toward zero; it never goes negative.
    pub fn tick(&mut self, dt: f32) {
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
    }
}
