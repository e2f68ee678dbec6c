//! Interaction Module
//!
//! Hover highlighting and exclusive grab/drop ownership transfer between the
//! world and the player's grab anchor.

pub mod grab;
pub mod hover;
pub mod manager;

pub use grab::{GrabState, HeldObject};
pub use hover::HoverState;
pub use manager::InteractionManager;
