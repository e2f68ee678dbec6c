//! Hover highlight with a short linger after the ray loses its target.

use crate::world::{NodeId, WorldScene};

/// Tracks the one highlighted object.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverState {
    current: Option<NodeId>,
    /// Seconds left before a lost target is un-highlighted
    linger_remaining: f32,
    linger: f32,
    /// The ray stopped reporting `current`
    lost: bool,
}

impl HoverState {
    pub fn new(linger: f32) -> Self {
        Self {
            current: None,
            linger_remaining: 0.0,
            linger: linger.max(0.0),
            lost: false,
        }
    }

    /// Highlighted object, including one that is still lingering.
    #[inline]
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Feed this tick's hover result.
    ///
    /// A new target un-highlights the previous one before highlighting itself.
    /// Losing the target starts the linger countdown.
    pub fn observe<W: WorldScene>(&mut self, target: Option<NodeId>, world: &mut W) {
        match target {
            Some(node) if self.current == Some(node) => {
                self.linger_remaining = self.linger;
                self.lost = false;
            }
            Some(node) => {
                self.clear(world);
                world.set_highlight(node, true);
                self.current = Some(node);
                self.linger_remaining = self.linger;
                self.lost = false;
            }
            None => {
                if self.current.is_some() && !self.lost {
                    self.lost = true;
                    if self.linger_remaining <= 0.0 {
                        self.clear(world);
                    }
                }
            }
        }
    }

    /// Count down a lost target's linger and drop highlights on vanished nodes.
    pub fn tick<W: WorldScene>(&mut self, dt: f32, world: &mut W) {
        let Some(node) = self.current else {
            return;
        };
        if !world.contains(node) {
            self.current = None;
            self.lost = false;
            return;
        }
        if self.lost {
            self.linger_remaining -= dt;
            if self.linger_remaining <= 0.0 {
                self.clear(world);
            }
        }
    }

    /// Un-highlight `node` immediately if it is the current target.
    pub fn forget<W: WorldScene>(&mut self, node: NodeId, world: &mut W) {
        if self.current == Some(node) {
            self.clear(world);
        }
    }

    /// Remove the highlight right away.
    pub fn clear<W: WorldScene>(&mut self, world: &mut W) {
        if let Some(node) = self.current.take() {
            world.set_highlight(node, false);
        }
        self.linger_remaining = 0.0;
        self.lost = false;
    }
}
