//! Core engine types and utilities for the obstacle course.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial components
//! - Frame clock
//! - Cooperative per-frame task scheduling
//! - Common component types for the agent registry

pub mod components;
pub mod schedule;
pub mod time;
pub mod transform;

pub use components::*;
pub use schedule::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
