//! Common components stored in the agent registry.

use glam::Vec3;

/// Health pool clamped to `[0, max]` by every mutator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).clamp(0.0, self.max);
    }

    /// Refill to the maximum.
    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

/// What role an agent plays on the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Player,
    /// Stationary hazard.
    Obstacle,
    /// Hazard driven by the flocking/pursuit engine.
    Flocker,
}

impl AgentKind {
    pub fn is_hazard(self) -> bool {
        matches!(self, AgentKind::Obstacle | AgentKind::Flocker)
    }
}

/// Animation mode of an agent's model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationMode {
    #[default]
    Idle,
    Walk,
    Run,
}

/// Per-agent ground-probe state: the last position that was validated
/// against terrain. Used as the fallback when a probe is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub last_valid: Vec3,
}

impl GroundProbe {
    pub fn new(position: Vec3) -> Self {
        Self { last_valid: position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_clamps_at_both_ends() {
        let mut h = Health::new(100.0);
        h.take_damage(250.0);
        assert_eq!(h.current, 0.0);
        assert!(h.is_dead());
        h.restore();
        h.take_damage(-20.0);
        assert_eq!(h.current, 100.0);
    }

    #[test]
    fn restore_refills_to_max() {
        let mut h = Health::new(80.0);
        h.take_damage(79.0);
        h.restore();
        assert_eq!(h.current, 80.0);
    }

    #[test]
    fn only_obstacles_and_flockers_are_hazards() {
        assert!(!AgentKind::Player.is_hazard());
        assert!(AgentKind::Obstacle.is_hazard());
        assert!(AgentKind::Flocker.is_hazard());
    }
}
