//! Player Module
//!
//! The first-person body and how it is driven.
//!
//! # Components
//!
//! - [`PlayerController`] - Per-tick update of mode, movement, gravity, bob and look
//! - [`MovementController`] - Constant-speed planar walking plus jump and gravity
//! - [`LookMode`] - Strict one-of look state machine
//! - [`HeadBob`] / [`IdleSway`] - Phase-accumulated camera bob and hand sway

pub mod controller;
pub mod head_bob;
pub mod look_mode;
pub mod movement_controller;

pub use controller::PlayerController;
pub use head_bob::{HeadBob, IdleSway};
pub use look_mode::LookMode;
pub use movement_controller::{
    KinematicBody, MovementController,
    WALK_SPEED, JUMP_IMPULSE, GRAVITY, EYE_HEIGHT,
};
