//! Tunables for flocks and the agents in them.

use serde::{Deserialize, Serialize};

/// Weights and perception limits shared by every agent of one flock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlockConfig {
    /// Field of view in degrees, centred on the agent's heading.
    #[serde(default = "default_view_angle")]
    pub view_angle_deg: f32,
    /// Neighbours further away than this are ignored.
    #[serde(default = "default_view_distance")]
    pub view_distance: f32,
    #[serde(default = "default_separation")]
    pub separation_weight: f32,
    #[serde(default = "default_cohesion")]
    pub cohesion_weight: f32,
    #[serde(default = "default_alignment")]
    pub alignment_weight: f32,
    /// Weight of the combined flocking direction against pursuit.
    #[serde(default = "default_flock_weight")]
    pub flock_weight: f32,
}

fn default_view_angle() -> f32 {
    270.0
}
fn default_view_distance() -> f32 {
    10.0
}
fn default_separation() -> f32 {
    2.0
}
fn default_cohesion() -> f32 {
    4.0
}
fn default_alignment() -> f32 {
    0.8
}
fn default_flock_weight() -> f32 {
    1.0
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            view_angle_deg: default_view_angle(),
            view_distance: default_view_distance(),
            separation_weight: default_separation(),
            cohesion_weight: default_cohesion(),
            alignment_weight: default_alignment(),
            flock_weight: default_flock_weight(),
        }
    }
}

/// Per-agent movement limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentParams {
    /// Divides the steering force; heavier agents turn slower.
    #[serde(default = "default_mass")]
    pub mass: f32,
    /// Top speed in units per second.
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// Largest steering force applied in one step.
    #[serde(default = "default_max_force")]
    pub max_force: f32,
}

fn default_mass() -> f32 {
    1.0
}
fn default_max_speed() -> f32 {
    5.0
}
fn default_max_force() -> f32 {
    10.0
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            mass: default_mass(),
            max_speed: default_max_speed(),
            max_force: default_max_force(),
        }
    }
}
