//! Spawn helpers for everything that lives in the agent registry during a run.

use crate::pickups::Pickup;
use engine_core::{AgentKind, AnimationMode, GroundProbe, Transform};
use glam::Vec3;
use hecs::{Entity, World};
use steering::AgentId;

/// Start and goal markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Goal,
}

/// Handle of a flocker inside the steering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlockMember(pub AgentId);

/// Distance of the start marker to the -X side of the spawn point.
pub const START_MARKER_SIDE_OFFSET: f32 = 0.7;

pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world.spawn((
        Transform::from_position(position),
        AgentKind::Player,
        AnimationMode::Idle,
        GroundProbe::new(position),
    ))
}

pub fn spawn_obstacle(world: &mut World, position: Vec3) -> Entity {
    world.spawn((
        Transform::from_position(position),
        AgentKind::Obstacle,
        GroundProbe::new(position),
    ))
}

pub fn spawn_flocker(world: &mut World, position: Vec3, agent: AgentId) -> Entity {
    world.spawn((
        Transform::from_position(position),
        AgentKind::Flocker,
        AnimationMode::Walk,
        GroundProbe::new(position),
        FlockMember(agent),
    ))
}

pub fn spawn_marker(world: &mut World, kind: MarkerKind, position: Vec3) -> Entity {
    world.spawn((Transform::from_position(position), kind))
}

pub fn spawn_pickup(world: &mut World, pickup: Pickup, position: Vec3) -> Entity {
    world.spawn((Transform::from_position(position), pickup))
}

/// Position of an entity, if it still exists.
pub fn position_of(world: &World, entity: Entity) -> Option<Vec3> {
    world.get::<&Transform>(entity).ok().map(|t| t.position)
}
