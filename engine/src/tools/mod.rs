//! Tools Module
//!
//! The static tool catalog and the currently equipped tool.

pub mod catalog;
pub mod manager;

pub use catalog::{GripPose, ToolCatalog, ToolDefinition};
pub use manager::ToolManager;
