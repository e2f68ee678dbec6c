//! World Module
//!
//! The scene collaborator seen from the workshop core. The core never builds
//! geometry itself; it only asks the world for ray hits, walks the ownership
//! chain, and reparents nodes between the world and the player's grab anchor.
//!
//! `SceneRegistry` is the in-crate implementation used by the replay driver
//! and the tests. A host engine implements `WorldScene` for its own graph.

pub mod registry;
pub mod transform;

pub use registry::SceneRegistry;
pub use transform::{Aabb, Transform};

use serde::{Deserialize, Serialize};

use crate::camera::raycast::Ray;
use glam::Vec3;

/// Handle of a node in the world graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Who a node is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Child of another world node.
    Node(NodeId),
    /// Held at the player's grab anchor.
    Player,
}

/// Tags that make a node grabbable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interactable {
    /// Material tag checked against tool compatibility
    pub material: Option<String>,
    /// Catalog id of the tool this object is, if it is one
    pub tool_kind: Option<String>,
}

impl Interactable {
    pub fn with_material(material: impl Into<String>) -> Self {
        Self {
            material: Some(material.into()),
            tool_kind: None,
        }
    }

    pub fn tool(tool_kind: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            material: Some(material.into()),
            tool_kind: Some(tool_kind.into()),
        }
    }
}

/// One intersection reported by `WorldScene::raycast`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

/// Scene graph operations the core depends on.
///
/// Every method tolerates stale handles: lookups return `None`/`false`
/// and mutations become no-ops.
pub trait WorldScene {
    /// Fallback attachment point for objects whose former owner is gone.
    fn root(&self) -> NodeId;

    /// Whether `node` still exists.
    fn contains(&self, node: NodeId) -> bool;

    /// Current owner of `node`. `None` for the root and for missing nodes.
    fn owner(&self, node: NodeId) -> Option<Owner>;

    /// Interactable data of `node`, if it is flagged interactable.
    fn interactable(&self, node: NodeId) -> Option<&Interactable>;

    /// Every live interactable node.
    fn interactables(&self) -> Vec<NodeId>;

    /// Hits within `max_distance`, nearest first. Nodes held by the player are
    /// never reported.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Vec<RayHit>;

    fn world_transform(&self, node: NodeId) -> Option<Transform>;

    fn local_transform(&self, node: NodeId) -> Option<Transform>;

    /// Overwrite the transform of `node` relative to its owner.
    fn set_local_transform(&mut self, node: NodeId, local: Transform) -> bool;

    /// Move `node` under `owner`, keeping its world transform continuous.
    ///
    /// Returns `false` if either side is missing or the move would create a
    /// cycle.
    fn reparent(&mut self, node: NodeId, owner: Owner) -> bool;

    /// Publish where the player's grab anchor is this tick.
    fn set_player_anchor(&mut self, anchor: Transform);

    fn set_highlight(&mut self, node: NodeId, highlighted: bool);

    /// Nearest interactable at or above `node` in the ownership chain.
    ///
    /// Walking stops at the root and at the player anchor.
    fn interactable_ancestor(&self, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        loop {
            if !self.contains(current) {
                return None;
            }
            if self.interactable(current).is_some() {
                return Some(current);
            }
            match self.owner(current) {
                Some(Owner::Node(parent)) => current = parent,
                _ => return None,
            }
        }
    }
}
