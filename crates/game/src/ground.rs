//! Ground selection and the terrain snap shared by player, camera and hazards.

use glam::Vec3;
use physics::{is_terrain, SurfaceHit, SurfaceProbe};

/// Height the downward probe starts from.
pub const PROBE_HEIGHT: f32 = 1000.0;

/// Result of one terrain snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapOutcome {
    /// Height was set to the terrain surface at this Y.
    Grounded(f32),
    /// No terrain under the candidate; position was restored.
    Reverted,
}

/// Pick the ground height from a probe's hits: the highest hit wins, and it
/// only counts if it is terrain.
pub fn select_ground(hits: &[SurfaceHit]) -> Option<f32> {
    let top = hits.iter().max_by(|a, b| a.point.y.total_cmp(&b.point.y))?;
    is_terrain(&top.surface).then_some(top.point.y)
}

/// Terrain height straight below `position`, if any.
pub fn probe_ground(probe: &dyn SurfaceProbe, position: Vec3) -> Option<f32> {
    let origin = Vec3::new(position.x, PROBE_HEIGHT, position.z);
    select_ground(&probe.cast_down(origin))
}

/// Snap `position` onto the terrain below it, or put it back at `fallback`
/// when there is none.
pub fn snap_to_ground(
    probe: &dyn SurfaceProbe,
    position: &mut Vec3,
    fallback: Vec3,
) -> SnapOutcome {
    match probe_ground(probe, *position) {
        Some(height) => {
            position.y = height;
            SnapOutcome::Grounded(height)
        }
        None => {
            log::trace!("No terrain under {:?}, reverting to {:?}", position, fallback);
            *position = fallback;
            SnapOutcome::Reverted
        }
    }
}
