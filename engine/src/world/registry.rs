//! Scene Registry
//!
//! Arena-backed scene graph. Nodes are addressed by `NodeId` (their index in
//! the arena) and are never reused: removing a node only marks it dead, so a
//! stale handle can always be detected.

use glam::Vec3;
use tracing::debug;

use super::{Aabb, Interactable, NodeId, Owner, RayHit, Transform, WorldScene};
use crate::camera::raycast::Ray;

#[derive(Debug, Clone)]
struct SceneNode {
    name: String,
    owner: Option<Owner>,
    local: Transform,
    bounds: Option<Aabb>,
    interactable: Option<Interactable>,
    highlighted: bool,
    alive: bool,
}

/// In-memory world graph with a single root.
#[derive(Debug, Clone)]
pub struct SceneRegistry {
    nodes: Vec<SceneNode>,
    player_anchor: Transform,
}

impl Default for SceneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneRegistry {
    /// Create a registry containing only the root node.
    pub fn new() -> Self {
        let root = SceneNode {
            name: "root".to_string(),
            owner: None,
            local: Transform::IDENTITY,
            bounds: None,
            interactable: None,
            highlighted: false,
            alive: true,
        };
        Self {
            nodes: vec![root],
            player_anchor: Transform::IDENTITY,
        }
    }

    /// Add a plain node under `parent`.
    ///
    /// A missing or dead parent falls back to the root.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
        local: Transform,
        bounds: Option<Aabb>,
    ) -> NodeId {
        let parent = if self.contains(parent) {
            parent
        } else {
            self.root()
        };
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode {
            name: name.into(),
            owner: Some(Owner::Node(parent)),
            local,
            bounds,
            interactable: None,
            highlighted: false,
            alive: true,
        });
        id
    }

    /// Add a grabbable node with box bounds of the given half extents.
    pub fn add_interactable(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
        local: Transform,
        half_extents: Vec3,
        interactable: Interactable,
    ) -> NodeId {
        let id = self.add_node(
            name,
            parent,
            local,
            Some(Aabb::from_half_extents(half_extents)),
        );
        if let Some(node) = self.node_mut(id) {
            node.interactable = Some(interactable);
        }
        id
    }

    /// Destroy `node` and everything attached below it.
    ///
    /// The root cannot be removed. Returns `false` for the root or a node
    /// that is already gone.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root() || !self.contains(node) {
            return false;
        }
        let doomed: Vec<NodeId> = (0..self.nodes.len() as u32)
            .map(NodeId)
            .filter(|&candidate| self.contains(candidate) && self.is_descendant_or_self(candidate, node))
            .collect();
        for id in doomed {
            if let Some(entry) = self.node_mut(id) {
                entry.alive = false;
                entry.highlighted = false;
            }
        }
        debug!(?node, "scene node removed");
        true
    }

    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.name.as_str())
    }

    pub fn is_highlighted(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.highlighted)
    }

    /// Whether `node` is attached, directly or through ancestors, to the player.
    pub fn is_player_held(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            match self.owner(current) {
                Some(Owner::Player) => return true,
                Some(Owner::Node(parent)) => current = parent,
                None => return false,
            }
        }
    }

    pub fn player_anchor(&self) -> Transform {
        self.player_anchor
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize).filter(|n| n.alive)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize).filter(|n| n.alive)
    }

    fn is_descendant_or_self(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == ancestor {
                return true;
            }
            match self.nodes.get(current.0 as usize).and_then(|n| n.owner) {
                Some(Owner::Node(parent)) => current = parent,
                _ => return false,
            }
        }
    }

    fn owner_world(&self, owner: Owner) -> Option<Transform> {
        match owner {
            Owner::Node(parent) => self.world_transform(parent),
            Owner::Player => Some(self.player_anchor),
        }
    }
}

impl WorldScene for SceneRegistry {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn owner(&self, node: NodeId) -> Option<Owner> {
        self.node(node).and_then(|n| n.owner)
    }

    fn interactable(&self, node: NodeId) -> Option<&Interactable> {
        self.node(node).and_then(|n| n.interactable.as_ref())
    }

    fn interactables(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.alive && n.interactable.is_some())
            .map(|(i, _)| NodeId(i as u32))
            .collect()
    }

    fn raycast(&self, ray: &Ray, max_distance: f32) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.alive)
            .filter_map(|(i, n)| {
                let id = NodeId(i as u32);
                let bounds = n.bounds?;
                if self.is_player_held(id) {
                    return None;
                }
                let world = self.world_transform(id)?;
                // Rigid transforms keep distances, so the local hit distance is the world one
                let distance = bounds.intersect(&world.ray_to_local(ray))?;
                (distance <= max_distance).then(|| RayHit {
                    node: id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn world_transform(&self, node: NodeId) -> Option<Transform> {
        let entry = self.node(node)?;
        match entry.owner {
            None => Some(entry.local),
            Some(owner) => Some(self.owner_world(owner)? * entry.local),
        }
    }

    fn local_transform(&self, node: NodeId) -> Option<Transform> {
        self.node(node).map(|n| n.local)
    }

    fn set_local_transform(&mut self, node: NodeId, local: Transform) -> bool {
        match self.node_mut(node) {
            Some(entry) => {
                entry.local = local;
                true
            }
            None => false,
        }
    }

    fn reparent(&mut self, node: NodeId, owner: Owner) -> bool {
        if node == self.root() || !self.contains(node) {
            return false;
        }
        if let Owner::Node(parent) = owner {
            if !self.contains(parent) || self.is_descendant_or_self(parent, node) {
                return false;
            }
        }
        let (Some(world), Some(owner_world)) = (self.world_transform(node), self.owner_world(owner))
        else {
            return false;
        };
        let local = owner_world.inverse() * world;
        match self.node_mut(node) {
            Some(entry) => {
                entry.owner = Some(owner);
                entry.local = local;
                true
            }
            None => false,
        }
    }

    fn set_player_anchor(&mut self, anchor: Transform) {
        self.player_anchor = anchor;
    }

    fn set_highlight(&mut self, node: NodeId, highlighted: bool) {
        if let Some(entry) = self.node_mut(node) {
            entry.highlighted = highlighted;
        }
    }
}
