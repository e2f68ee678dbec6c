//! Carving Module
//!
//! Deformable surfaces and the engine that carves them.

pub mod engine;
pub mod surface;
pub mod target;

pub use engine::{CarveOutcome, CarvingEngine, MAX_STRENGTH};
pub use surface::{DeformableSurface, SurfaceId, SurfaceVertex};
pub use target::{TargetShape, smoothstep};
