//! Flocking and pursuit steering for course hazards.
//!
//! Agents move on the horizontal plane only; whoever owns them is
//! responsible for their height.

pub mod config;
pub mod flock_world;

pub use config::*;
pub use flock_world::*;
