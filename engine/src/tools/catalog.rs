//! Tool Catalog
//!
//! Static tool definitions looked up by id or by slot. The built-in catalog
//! ships three tools; a JSON file with the same shape can replace it:
//!
//! ```json
//! { "tools": [{
//!     "id": "chisel", "name": "Wood Chisel", "discipline": "carving",
//!     "compatible_materials": ["wood", "stone"],
//!     "grip": { "position": [0.25, -0.12, -0.35], "rotation": [0.0, 0.0, 1.5708] },
//!     "actions": ["carve", "etch"]
//! }] }
//! ```

use std::collections::{BTreeSet, HashSet};
use std::f32::consts::{FRAC_PI_2, PI};
use std::path::Path;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ensure};
use crate::world::Transform;

/// Where a tool sits relative to the grab anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GripPose {
    pub position: Vec3,
    /// XYZ Euler angles in radians
    pub rotation: Vec3,
}

impl Default for GripPose {
    /// Empty-handed grip: at the anchor, turned to face the camera.
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, PI, 0.0),
        }
    }
}

impl GripPose {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// The grip as a local transform under the grab anchor.
    pub fn to_transform(&self) -> Transform {
        Transform::new(self.position, self.quat())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub id: String,
    pub name: String,
    pub discipline: String,
    pub compatible_materials: BTreeSet<String>,
    #[serde(default)]
    pub grip: GripPose,
    /// Verbs in priority order; the first is the tool's primary action
    pub actions: Vec<String>,
}

impl ToolDefinition {
    pub fn works_on(&self, material: &str) -> bool {
        self.compatible_materials.contains(material)
    }

    pub fn primary_action(&self) -> Option<&str> {
        self.actions.first().map(String::as_str)
    }
}

fn tool(
    id: &str,
    name: &str,
    discipline: &str,
    materials: &[&str],
    grip: GripPose,
    actions: &[&str],
) -> ToolDefinition {
    ToolDefinition {
        id: id.to_string(),
        name: name.to_string(),
        discipline: discipline.to_string(),
        compatible_materials: materials.iter().map(|m| m.to_string()).collect(),
        grip,
        actions: actions.iter().map(|a| a.to_string()).collect(),
    }
}

/// Ordered set of tools. Order defines the number-key slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCatalog {
    tools: Vec<ToolDefinition>,
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ToolCatalog {
    /// Chisel, brush and hammer.
    pub fn builtin() -> Self {
        Self {
            tools: vec![
                tool(
                    "chisel",
                    "Wood Chisel",
                    "carving",
                    &["wood", "stone"],
                    GripPose::new(Vec3::new(0.25, -0.12, -0.35), Vec3::new(0.0, 0.0, FRAC_PI_2)),
                    &["carve", "etch"],
                ),
                tool(
                    "brush",
                    "Paint Brush",
                    "painting",
                    &["canvas", "furniture", "wood"],
                    GripPose::new(Vec3::new(0.18, -0.15, -0.28), Vec3::ZERO),
                    &["paint", "blend"],
                ),
                tool(
                    "hammer",
                    "Claw Hammer",
                    "building",
                    &["wood_plank", "nail", "metal"],
                    GripPose::new(Vec3::new(0.1, -0.25, -0.4), Vec3::new(FRAC_PI_2, 0.0, 0.0)),
                    &["assemble", "nail"],
                ),
            ],
        }
    }

    /// Build a catalog from definitions, validating it.
    pub fn new(tools: Vec<ToolDefinition>) -> Result<Self, ConfigError> {
        let catalog = Self { tools };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ensure(!self.tools.is_empty(), "tool catalog is empty")?;
        let mut seen = HashSet::new();
        for tool in &self.tools {
            ensure(!tool.id.is_empty(), "tool id must not be empty")?;
            ensure(
                seen.insert(tool.id.as_str()),
                format!("duplicate tool id `{}`", tool.id),
            )?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Position of `id` in slot order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tools.iter().position(|t| t.id == id)
    }

    /// Tool in zero-based slot `slot`.
    pub fn slot(&self, slot: usize) -> Option<&ToolDefinition> {
        self.tools.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
