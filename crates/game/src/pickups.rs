//! One-shot proximity pickups.

use crate::config::TuningConfig;
use crate::state::RunStats;
use engine_core::Transform;
use glam::Vec3;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

/// What a pickup does to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupEffect {
    /// Raise the speed multiplier to the boosted value.
    GrantSpeed,
    /// Refill health.
    RestoreHealth,
    /// Add bonus seconds to the clock.
    ExtendTime,
}

impl PickupEffect {
    pub fn apply(self, stats: &mut RunStats, tuning: &TuningConfig) {
        match self {
            PickupEffect::GrantSpeed => stats.set_speed_multiplier(tuning.speed_boost),
            PickupEffect::RestoreHealth => stats.restore_health(),
            PickupEffect::ExtendTime => stats.extend_time(tuning.time_bonus),
        }
    }
}

/// Pickup component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub effect: PickupEffect,
    pub radius: f32,
    pub consumed: bool,
}

impl Pickup {
    pub fn new(effect: PickupEffect, radius: f32) -> Self {
        Self {
            effect,
            radius,
            consumed: false,
        }
    }

    /// Consume the pickup if `distance` is inside its radius. Fires at most
    /// once.
    pub fn try_collect(&mut self, distance: f32) -> Option<PickupEffect> {
        if self.consumed || distance >= self.radius {
            return None;
        }
        self.consumed = true;
        Some(self.effect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupCheck {
    /// Player not close enough yet.
    Pending,
    /// Effect applied and pickup despawned.
    Collected(PickupEffect),
    /// Pickup no longer exists.
    Gone,
}

/// Per-frame check of one pickup against the player position.
pub fn check_pickup(
    world: &mut World,
    pickup: Entity,
    player: Vec3,
    stats: &mut RunStats,
    tuning: &TuningConfig,
) -> PickupCheck {
    let collected = match world.query_one_mut::<(&Transform, &mut Pickup)>(pickup) {
        Ok((transform, state)) if !state.consumed => {
            state.try_collect(transform.position.distance(player))
        }
        _ => return PickupCheck::Gone,
    };

    match collected {
        Some(effect) => {
            effect.apply(stats, tuning);
            if let Err(e) = world.despawn(pickup) {
                log::warn!("Collected pickup {:?} already gone: {}", pickup, e);
            }
            log::info!("Picked up {:?}", effect);
            PickupCheck::Collected(effect)
        }
        None => PickupCheck::Pending,
    }
}
