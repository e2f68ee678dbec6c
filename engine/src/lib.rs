//! Workshop Engine Library
//!
//! The simulation core of a first-person workshop: walk around, look, pick
//! up tools and carve deformable surfaces. Rendering and windowing stay with
//! the host; this crate consumes input events and hands back a camera pose
//! plus changed geometry each frame.
//!
//! # Modules
//!
//! - [`input`] - Event aggregation into one `InputState` per tick, winit adapter
//! - [`player`] - Look-mode state machine, walking, jumping, head bob
//! - [`camera`] - Yaw/pitch look math, camera pose, ray tests
//! - [`world`] - Scene collaborator trait and an arena-backed scene registry
//! - [`interaction`] - Hover highlighting and exclusive grab/drop
//! - [`tools`] - Tool catalog, equipped tool, grip poses
//! - [`carving`] - Deformable surfaces and the falloff carving brush
//! - [`session`] - Per-frame orchestration of all of the above
//!
//! # Example
//!
//! ```ignore
//! use workshop_engine::{InputEvent, KeyCode, SceneRegistry, ToolCatalog, WorkshopConfig, WorkshopSession};
//!
//! let mut session = WorkshopSession::new(
//!     WorkshopConfig::default(),
//!     ToolCatalog::builtin(),
//!     SceneRegistry::new(),
//! )?;
//!
//! session.handle_event(InputEvent::Key { key: KeyCode::W, pressed: true });
//! let frame = session.tick(1.0 / 60.0);
//! renderer.set_camera(frame.camera.position, frame.view_direction);
//! for upload in &frame.uploads {
//!     renderer.write_vertices(upload.surface, upload.vertex_bytes());
//! }
//! ```

pub mod camera;
pub mod carving;
pub mod config;
pub mod error;
pub mod input;
pub mod interaction;
pub mod player;
pub mod session;
pub mod tools;
pub mod world;

pub use camera::{CameraPose, Ray};
pub use carving::{CarveOutcome, CarvingEngine, DeformableSurface, SurfaceId, SurfaceVertex, TargetShape};
pub use config::WorkshopConfig;
pub use error::{ConfigError, ToolError};
pub use input::{InputAggregator, InputEvent, InputState, KeyCode, MouseButton};
pub use interaction::InteractionManager;
pub use player::{LookMode, PlayerController};
pub use session::{FrameOutput, SurfaceUpload, WorkshopSession};
pub use tools::{ToolCatalog, ToolManager};
pub use world::{Interactable, NodeId, SceneRegistry, Transform, WorldScene};
