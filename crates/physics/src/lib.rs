//! Collision queries using Rapier3D.
//!
//! Only the query side of Rapier is used: static, name-tagged surfaces and
//! downward ground probes against them. Nothing here is simulated.

pub mod collision;
pub mod physics_world;
pub mod raycast;

pub use collision::*;
pub use physics_world::*;
pub use raycast::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

pub use rapier3d::prelude::ColliderHandle;
