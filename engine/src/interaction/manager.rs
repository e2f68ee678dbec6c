//! Interaction Manager
//!
//! Ray-based hover highlighting and exclusive grab/drop of interactables.
//! Every rejection (cooldown, empty ray, stale owner, vanished object) is a
//! silent no-op reported as `false`/`None`; nothing here returns an error.

use tracing::debug;

use super::grab::{GrabState, HeldObject};
use super::hover::HoverState;
use crate::camera::Ray;
use crate::config::InteractionConfig;
use crate::world::{NodeId, Owner, Transform, WorldScene};

#[derive(Debug, Clone)]
pub struct InteractionManager {
    grab: GrabState,
    hover: HoverState,
    grab_distance: f32,
    grab_cooldown: f32,
    hover_distance: f32,
}

impl Default for InteractionManager {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}

impl InteractionManager {
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self {
            grab: GrabState::new(),
            hover: HoverState::new(config.hover_linger),
            grab_distance: config.grab_distance,
            grab_cooldown: config.grab_cooldown,
            hover_distance: config.hover_distance,
        }
    }

    /// Per-tick housekeeping: cooldown, held re-check and highlight linger.
    ///
    /// If the world destroyed the held object, the held reference is cleared
    /// without touching the world.
    pub fn update<W: WorldScene>(&mut self, delta: f32, world: &mut W) {
        let dt = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.grab.tick(dt);

        if let Some(held) = self.grab.held() {
            if !world.contains(held.node) {
                debug!(node = ?held.node, "held object vanished");
                self.grab.release();
            }
        }

        self.hover.tick(dt, world);
    }

    /// Highlight the nearest interactable under `ray` and return it.
    ///
    /// Only the nearest hit counts; an occluding non-interactable blocks
    /// anything behind it.
    pub fn hover_test<W: WorldScene>(&mut self, world: &mut W, ray: &Ray) -> Option<NodeId> {
        let target = self.pick(world, ray, self.hover_distance);
        self.hover.observe(target, world);
        target
    }

    fn pick<W: WorldScene>(&self, world: &W, ray: &Ray, max_distance: f32) -> Option<NodeId> {
        let nearest = world.raycast(ray, max_distance).into_iter().next()?;
        let target = world.interactable_ancestor(nearest.node)?;
        let held = self.grab.held().map(|h| h.node);
        (Some(target) != held).then_some(target)
    }

    /// Grab the interactable under `ray`, attaching it to the player at `grip`.
    ///
    /// Returns `true` only when ownership moved to the player.
    pub fn try_grab<W: WorldScene>(&mut self, world: &mut W, ray: &Ray, grip: Transform) -> bool {
        if !self.grab.can_grab() {
            return false;
        }
        let Some(node) = self.pick(world, ray, self.grab_distance) else {
            return false;
        };
        let Some(pre_grab_local) = world.local_transform(node) else {
            return false;
        };
        let former_owner = match world.owner(node) {
            Some(Owner::Node(parent)) => Some(parent),
            _ => None,
        };

        if !world.reparent(node, Owner::Player) {
            return false;
        }
        world.set_local_transform(node, grip);

        self.hover.forget(node, world);
        world.set_highlight(node, false);

        let held = HeldObject {
            node,
            former_owner,
            pre_grab_local,
        };
        self.grab.hold(held, self.grab_cooldown);
        debug!(?node, ?former_owner, "grabbed");
        true
    }

    /// Put the held object back.
    ///
    /// With a live former owner the object returns to its pre-grab placement
    /// under that owner. Otherwise it stays where it is, reparented to the
    /// world root. Returns `false` when nothing was held or the held object
    /// no longer exists.
    pub fn drop<W: WorldScene>(&mut self, world: &mut W) -> bool {
        let Some(held) = self.grab.release() else {
            return false;
        };
        if !world.contains(held.node) {
            return false;
        }

        let restored = held
            .former_owner
            .filter(|&owner| world.contains(owner))
            .is_some_and(|owner| {
                world.reparent(held.node, Owner::Node(owner))
                    && world.set_local_transform(held.node, held.pre_grab_local)
            });

        if !restored {
            let root = world.root();
            world.reparent(held.node, Owner::Node(root));
        }

        debug!(node = ?held.node, restored, "dropped");
        true
    }

    /// Move the held object to a new grip pose (tool change or hand sway).
    pub fn reapply_grip<W: WorldScene>(&self, world: &mut W, grip: Transform) -> bool {
        match self.grab.held() {
            Some(held) => world.set_local_transform(held.node, grip),
            None => false,
        }
    }

    #[inline]
    pub fn held(&self) -> Option<&HeldObject> {
        self.grab.held()
    }

    #[inline]
    pub fn held_node(&self) -> Option<NodeId> {
        self.grab.held().map(|h| h.node)
    }

    #[inline]
    pub fn cooldown_remaining(&self) -> f32 {
        self.grab.cooldown_remaining()
    }

    /// Currently highlighted object, including a lingering one.
    #[inline]
    pub fn hovered(&self) -> Option<NodeId> {
        self.hover.current()
    }
}
