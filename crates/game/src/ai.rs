//! Glue between the registry's flockers and the flocking/pursuit engine.

use crate::entities::{spawn_flocker, FlockMember};
use crate::ground::{snap_to_ground, SnapOutcome};
use crate::scene::{SceneCommand, SceneCommands};
use engine_core::{GroundProbe, Transform};
use glam::{Quat, Vec3};
use hecs::{Entity, World};
use physics::SurfaceProbe;
use rand::Rng;
use steering::{AgentId, AgentParams, FlockConfig, FlockId, FlockWorld};

/// The steering engine as seen by the game. Agents only move when `step`
/// is called.
pub trait FlockingBackend {
    fn add_flock(&mut self, config: FlockConfig) -> FlockId;
    fn add_agent(&mut self, flock: FlockId, position: Vec3, params: AgentParams)
        -> Option<AgentId>;
    fn set_pursue_target(&mut self, agent: AgentId, target: Vec3, weight: f32);
    fn step(&mut self, dt: f32);
    fn position(&self, agent: AgentId) -> Option<Vec3>;
    /// Horizontal direction the agent is facing.
    fn heading(&self, agent: AgentId) -> Option<Vec3>;
    /// Overwrite the engine's idea of where an agent is.
    fn place(&mut self, agent: AgentId, position: Vec3);
    /// Drop every flock and agent.
    fn clear(&mut self);
}

impl FlockingBackend for FlockWorld {
    fn add_flock(&mut self, config: FlockConfig) -> FlockId {
        FlockWorld::add_flock(self, config)
    }

    fn add_agent(
        &mut self,
        flock: FlockId,
        position: Vec3,
        params: AgentParams,
    ) -> Option<AgentId> {
        FlockWorld::add_agent(self, flock, position, params)
    }

    fn set_pursue_target(&mut self, agent: AgentId, target: Vec3, weight: f32) {
        FlockWorld::set_pursue_target(self, agent, target, weight)
    }

    fn step(&mut self, dt: f32) {
        FlockWorld::step(self, dt)
    }

    fn position(&self, agent: AgentId) -> Option<Vec3> {
        FlockWorld::position(self, agent)
    }

    fn heading(&self, agent: AgentId) -> Option<Vec3> {
        FlockWorld::heading(self, agent)
    }

    fn place(&mut self, agent: AgentId, position: Vec3) {
        FlockWorld::place(self, agent, position)
    }

    fn clear(&mut self) {
        FlockWorld::clear(self)
    }
}

/// Everything needed to put a flock on the course.
pub struct FlockSpawn<'a> {
    pub config: FlockConfig,
    pub params: AgentParams,
    pub center: Vec3,
    pub count: usize,
    /// Each agent starts up to this far from `center` on each horizontal axis.
    pub spread: f32,
    pub probe: &'a dyn SurfaceProbe,
}

/// Register a flock with the backend and spawn one registry entity per
/// agent, standing on the terrain and already walking.
pub fn spawn_flock(
    backend: &mut dyn FlockingBackend,
    world: &mut World,
    spawn: &FlockSpawn<'_>,
    rng: &mut impl Rng,
    scene: &mut SceneCommands,
) -> Vec<Entity> {
    let flock = backend.add_flock(spawn.config);
    let mut spawned = Vec::with_capacity(spawn.count);

    for _ in 0..spawn.count {
        let mut position = spawn.center;
        if spawn.spread > 0.0 {
            position.x += rng.gen_range(-spawn.spread..=spawn.spread);
            position.z += rng.gen_range(-spawn.spread..=spawn.spread);
        }
        if let SnapOutcome::Reverted = snap_to_ground(spawn.probe, &mut position, spawn.center) {
            log::debug!("Flocker spawn off terrain, using flock center");
        }

        let Some(agent) = backend.add_agent(flock, position, spawn.params) else {
            continue;
        };
        let entity = spawn_flocker(world, position, agent);
        scene.push(SceneCommand::Loop {
            entity,
            animation: "walk",
        });
        spawned.push(entity);
    }

    log::debug!("Spawned flock of {}", spawned.len());
    spawned
}

/// Point every flocker at `target` and advance the engine by one step.
pub fn step_flock(
    backend: &mut dyn FlockingBackend,
    world: &World,
    target: Vec3,
    weight: f32,
    dt: f32,
) {
    for (_, member) in world.query::<&FlockMember>().iter() {
        backend.set_pursue_target(member.0, target, weight);
    }
    backend.step(dt);
}

/// Copy engine positions into the registry and keep every flocker on the
/// terrain. A flocker that wandered off the terrain goes back to its last
/// good position, in the engine too. Returns how many were put back.
pub fn snap_flockers(
    backend: &mut dyn FlockingBackend,
    world: &mut World,
    probe: &dyn SurfaceProbe,
) -> usize {
    let mut reverted = 0;

    for (_, (transform, ground, member)) in
        world.query_mut::<(&mut Transform, &mut GroundProbe, &FlockMember)>()
    {
        let Some(mut position) = backend.position(member.0) else {
            continue;
        };

        match snap_to_ground(probe, &mut position, ground.last_valid) {
            SnapOutcome::Grounded(_) => ground.last_valid = position,
            SnapOutcome::Reverted => {
                backend.place(member.0, position);
                reverted += 1;
            }
        }

        if let Some(facing) = backend.heading(member.0) {
            if facing.x * facing.x + facing.z * facing.z > 1e-8 {
                transform.rotation = Quat::from_rotation_y((-facing.x).atan2(-facing.z));
            }
        }
        transform.position = position;
    }

    reverted
}
