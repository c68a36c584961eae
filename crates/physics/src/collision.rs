//! Collision groups and surface tagging.

use rapier3d::prelude::*;

/// Surface name that ground probes accept as walkable terrain.
pub const TERRAIN_TAG: &str = "terrain";

/// Collision groups for the static course geometry.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Walkable ground.
    Terrain = 1 << 0,
    /// Everything else that a ground probe can land on (rocks, roofs, water).
    Prop = 1 << 1,
    /// Downward ground probes.
    Probe = 1 << 2,
}

impl CollisionGroup {
    /// Group for a surface carrying the given name tag.
    pub fn for_surface(tag: &str) -> InteractionGroups {
        let membership = if is_terrain(tag) {
            Self::Terrain
        } else {
            Self::Prop
        };
        InteractionGroups::new(
            Group::from_bits_retain(membership as u32),
            Group::from_bits_retain(Self::Probe as u32),
        )
    }

    /// Query filter for ground probes: every static surface is visible, so a
    /// prop sitting on top of terrain shadows it.
    pub fn probe_filter() -> QueryFilter<'static> {
        QueryFilter::default().groups(InteractionGroups::new(
            Group::from_bits_retain(Self::Probe as u32),
            Group::from_bits_retain(Self::Terrain as u32 | Self::Prop as u32),
        ))
    }
}

/// Whether a surface name identifies walkable terrain.
pub fn is_terrain(tag: &str) -> bool {
    tag == TERRAIN_TAG
}
