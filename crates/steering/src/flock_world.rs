//! Flock registry and the per-step steering update.

use glam::Vec3;

use crate::config::{AgentParams, FlockConfig};

/// Below this distance two agents count as co-located.
const COINCIDENT_EPSILON: f32 = 1e-4;
/// Golden angle, used to fan out co-located agents deterministically.
const GOLDEN_ANGLE: f32 = 2.399_963;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlockId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(usize);

#[derive(Debug, Clone, Copy)]
struct Pursuit {
    target: Vec3,
    weight: f32,
}

#[derive(Debug, Clone)]
struct SteeringAgent {
    flock: FlockId,
    params: AgentParams,
    position: Vec3,
    velocity: Vec3,
    /// Unit heading on the horizontal plane.
    heading: Vec3,
    pursuit: Option<Pursuit>,
}

/// All flocks and their agents, advanced together by `step`.
#[derive(Debug, Default)]
pub struct FlockWorld {
    flocks: Vec<FlockConfig>,
    agents: Vec<SteeringAgent>,
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

impl FlockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_flock(&mut self, config: FlockConfig) -> FlockId {
        self.flocks.push(config);
        FlockId(self.flocks.len() - 1)
    }

    /// Add an agent to a flock. Returns `None` for an unknown flock.
    pub fn add_agent(
        &mut self,
        flock: FlockId,
        position: Vec3,
        params: AgentParams,
    ) -> Option<AgentId> {
        if flock.0 >= self.flocks.len() {
            log::warn!("Agent added to unknown flock {:?}", flock);
            return None;
        }
        self.agents.push(SteeringAgent {
            flock,
            params,
            position,
            velocity: Vec3::ZERO,
            heading: -Vec3::Z,
            pursuit: None,
        });
        Some(AgentId(self.agents.len() - 1))
    }

    /// Make an agent chase a point. Called again whenever the target moves.
    pub fn set_pursue_target(&mut self, agent: AgentId, target: Vec3, weight: f32) {
        if let Some(a) = self.agents.get_mut(agent.0) {
            a.pursuit = Some(Pursuit { target, weight });
        }
    }

    pub fn position(&self, agent: AgentId) -> Option<Vec3> {
        self.agents.get(agent.0).map(|a| a.position)
    }

    /// Unit direction of travel on the horizontal plane.
    pub fn heading(&self, agent: AgentId) -> Option<Vec3> {
        self.agents.get(agent.0).map(|a| a.heading)
    }

    /// Overwrite an agent's position (e.g. after its owner corrected it).
    pub fn place(&mut self, agent: AgentId, position: Vec3) {
        if let Some(a) = self.agents.get_mut(agent.0) {
            a.position = position;
        }
    }

    /// Remove every flock and agent.
    pub fn clear(&mut self) {
        self.flocks.clear();
        self.agents.clear();
    }

    /// Advance every agent by one step of `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 || self.agents.is_empty() {
            return;
        }

        let desired: Vec<Vec3> = (0..self.agents.len())
            .map(|i| self.desired_velocity(i))
            .collect();

        for (agent, desired) in self.agents.iter_mut().zip(desired) {
            let params = agent.params;
            let steering = (desired - agent.velocity).clamp_length_max(params.max_force);
            let mass = params.mass.max(f32::EPSILON);
            agent.velocity =
                flatten(agent.velocity + steering / mass * dt).clamp_length_max(params.max_speed);
            agent.position += agent.velocity * dt;

            if agent.velocity.length_squared() > 1e-4 {
                agent.heading = agent.velocity.normalize();
            }
        }
    }

    fn flock_direction(&self, index: usize) -> Vec3 {
        let me = &self.agents[index];
        let config = &self.flocks[me.flock.0];
        let cos_half_fov = (config.view_angle_deg.to_radians() * 0.5).cos();

        let mut separation = Vec3::ZERO;
        let mut centroid = Vec3::ZERO;
        let mut alignment = Vec3::ZERO;
        let mut neighbours = 0usize;

        for (j, other) in self.agents.iter().enumerate() {
            if j == index || other.flock != me.flock {
                continue;
            }
            let offset = flatten(other.position - me.position);
            let distance = offset.length();
            if distance > config.view_distance {
                continue;
            }
            if distance > COINCIDENT_EPSILON {
                if me.heading.dot(offset / distance) < cos_half_fov {
                    continue;
                }
                separation -= offset / (distance * distance);
            } else {
                let angle = index as f32 * GOLDEN_ANGLE;
                separation += Vec3::new(angle.cos(), 0.0, angle.sin());
            }
            centroid += other.position;
            alignment += other.heading;
            neighbours += 1;
        }

        if neighbours == 0 {
            return Vec3::ZERO;
        }

        let cohesion = flatten(centroid / neighbours as f32 - me.position).normalize_or_zero();
        (separation.normalize_or_zero() * config.separation_weight
            + cohesion * config.cohesion_weight
            + flatten(alignment).normalize_or_zero() * config.alignment_weight)
            .normalize_or_zero()
    }

    fn desired_velocity(&self, index: usize) -> Vec3 {
        let me = &self.agents[index];
        let flock_weight = self.flocks[me.flock.0].flock_weight;

        let mut direction = self.flock_direction(index) * flock_weight;
        if let Some(pursuit) = me.pursuit {
            direction += flatten(pursuit.target - me.position).normalize_or_zero() * pursuit.weight;
        }
        direction.normalize_or_zero() * me.params.max_speed
    }
}
