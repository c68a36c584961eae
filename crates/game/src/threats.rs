//! Contact damage from hazards near the player.

use crate::state::RunStats;
use engine_core::{AgentKind, Transform};
use glam::Vec3;
use hecs::World;

/// Number of hazards strictly closer than `range` to `player`.
pub fn hazards_in_range(world: &World, player: Vec3, range: f32) -> usize {
    world
        .query::<(&Transform, &AgentKind)>()
        .iter()
        .filter(|(_, (transform, kind))| {
            kind.is_hazard() && transform.position.distance(player) < range
        })
        .count()
}

/// Take `damage` per hazard in range off the player's health. Runs every
/// tick with no cooldown, so overlapping hazards stack. Returns how many
/// hazards hit.
pub fn apply_threats(
    world: &World,
    player: Vec3,
    range: f32,
    damage: f32,
    stats: &mut RunStats,
) -> usize {
    let hits = hazards_in_range(world, player, range);
    for _ in 0..hits {
        stats.apply_damage(damage);
    }
    if hits > 0 {
        log::trace!("{} hazard(s) in range, health {:.1}", hits, stats.health());
    }
    hits
}
