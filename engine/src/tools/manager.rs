//! Tool Manager
//!
//! Holds the equipped tool. Equipping an unknown id fails and leaves the
//! current tool in place.

use tracing::debug;

use super::catalog::{GripPose, ToolCatalog, ToolDefinition};
use crate::carving::DeformableSurface;
use crate::error::ToolError;
use crate::world::Transform;

#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    catalog: ToolCatalog,
    /// Index into the catalog
    equipped: Option<usize>,
}

impl ToolManager {
    pub fn new(catalog: ToolCatalog) -> Self {
        Self {
            catalog,
            equipped: None,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Equip the tool with id `id`.
    pub fn equip(&mut self, id: &str) -> Result<&ToolDefinition, ToolError> {
        let index = self
            .catalog
            .index_of(id)
            .ok_or_else(|| ToolError::UnknownTool(id.to_string()))?;
        self.equip_index(index)
    }

    /// Equip the tool in zero-based catalog slot `slot`.
    pub fn equip_slot(&mut self, slot: usize) -> Result<&ToolDefinition, ToolError> {
        if self.catalog.slot(slot).is_none() {
            return Err(ToolError::EmptySlot(slot));
        }
        self.equip_index(slot)
    }

    fn equip_index(&mut self, index: usize) -> Result<&ToolDefinition, ToolError> {
        let tool = self
            .catalog
            .slot(index)
            .ok_or(ToolError::EmptySlot(index))?;
        self.equipped = Some(index);
        debug!(tool = %tool.id, "tool equipped");
        Ok(tool)
    }

    /// Put the tool away, returning its id.
    pub fn unequip(&mut self) -> Option<String> {
        let id = self.equipped().map(|t| t.id.clone());
        self.equipped = None;
        if let Some(id) = &id {
            debug!(tool = %id, "tool unequipped");
        }
        id
    }

    pub fn equipped(&self) -> Option<&ToolDefinition> {
        self.equipped.and_then(|i| self.catalog.slot(i))
    }

    pub fn equipped_id(&self) -> Option<&str> {
        self.equipped().map(|t| t.id.as_str())
    }

    /// Whether the equipped tool works on `material`. False with no tool.
    pub fn is_compatible_material(&self, material: &str) -> bool {
        self.equipped().is_some_and(|t| t.works_on(material))
    }

    /// Whether the equipped tool works on the surface's material.
    pub fn is_compatible(&self, surface: &DeformableSurface) -> bool {
        self.is_compatible_material(surface.material())
    }

    /// Primary action verb of the equipped tool.
    pub fn current_action(&self) -> Option<&str> {
        self.equipped().and_then(ToolDefinition::primary_action)
    }

    /// Grip of the equipped tool, or the empty-handed default.
    pub fn grip_pose(&self) -> GripPose {
        self.equipped().map(|t| t.grip).unwrap_or_default()
    }

    pub fn grip_transform(&self) -> Transform {
        self.grip_pose().to_transform()
    }
}
