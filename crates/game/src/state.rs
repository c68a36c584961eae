//! Game phase and per-run counters.

use engine_core::Health;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Intro,
    Playing,
    Won,
    Lost,
}

impl GamePhase {
    /// Won or Lost.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }

    /// Text of the end-of-run panel.
    pub fn end_message(self) -> Option<&'static str> {
        match self {
            GamePhase::Won => Some("You WIN!"),
            GamePhase::Lost => Some("Game Over"),
            GamePhase::Intro | GamePhase::Playing => None,
        }
    }
}

/// Clock, health and speed of the current run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    total_time: f32,
    elapsed: f32,
    time_left: f32,
    health: Health,
    speed_multiplier: f32,
}

impl RunStats {
    pub fn new(total_time: f32, max_health: f32) -> Self {
        Self {
            total_time,
            elapsed: 0.0,
            time_left: total_time,
            health: Health::new(max_health),
            speed_multiplier: 1.0,
        }
    }

    /// Advance the run clock by `dt` seconds.
    pub fn advance_clock(&mut self, dt: f32) {
        self.elapsed += dt;
        self.recompute_time_left();
    }

    pub fn apply_damage(&mut self, amount: f32) {
        self.health.take_damage(amount);
    }

    pub fn restore_health(&mut self) {
        self.health.restore();
    }

    pub fn extend_time(&mut self, seconds: f32) {
        self.total_time += seconds;
        self.recompute_time_left();
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier;
    }

    fn recompute_time_left(&mut self) {
        self.time_left = self.total_time - self.elapsed;
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn health(&self) -> f32 {
        self.health.current
    }

    pub fn max_health(&self) -> f32 {
        self.health.max
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn is_out_of_time(&self) -> bool {
        self.time_left <= 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }
}

/// Decide whether a playing run has ended. Reaching the goal is checked
/// first, so a player who arrives on the last tick still wins.
pub fn evaluate(distance_to_goal: f32, goal_radius: f32, stats: &RunStats) -> Option<GamePhase> {
    if distance_to_goal < goal_radius {
        Some(GamePhase::Won)
    } else if stats.is_out_of_time() || stats.is_dead() {
        Some(GamePhase::Lost)
    } else {
        None
    }
}
