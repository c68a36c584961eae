//! Third-person camera that trails the player, stays above the terrain and
//! keeps a bounded distance.

use crate::config::TuningConfig;
use crate::ground::probe_ground;
use engine_core::Transform;
use glam::Vec3;
use input::{Action, InputState};
use physics::SurfaceProbe;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams {
    /// Sideways drift speed from the camera keys.
    pub drift_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Height kept above the terrain under the camera.
    pub terrain_clearance: f32,
    /// Minimum height of the camera above the player.
    pub min_height_above_player: f32,
    /// Height of the look-at point above the player.
    pub floater_height: f32,
    /// Multiplier on the pointer nudge.
    pub sensitivity: f32,
}

impl CameraParams {
    pub fn from_tuning(tuning: &TuningConfig, sensitivity: f32) -> Self {
        Self {
            drift_speed: tuning.camera_drift_speed,
            min_distance: tuning.camera_min_distance,
            max_distance: tuning.camera_max_distance,
            terrain_clearance: tuning.camera_terrain_clearance,
            min_height_above_player: tuning.camera_min_height_above_player,
            floater_height: tuning.floater_height,
            sensitivity,
        }
    }
}

/// Relative pointer input. Each call re-centers the pointer and reports how
/// far it was from the center horizontally, or `None` when re-centering is
/// not possible this frame.
pub trait PointerSource {
    fn take_horizontal_offset(&mut self) -> Option<f32>;
}

/// Pointer source for hosts without a pointer.
pub struct NoPointer;

impl PointerSource for NoPointer {
    fn take_horizontal_offset(&mut self) -> Option<f32> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub transform: Transform,
    floater: Vec3,
}

impl CameraRig {
    /// Camera placed the far clamp distance behind the player, looking at
    /// the floater.
    pub fn behind(player: &Transform, params: &CameraParams) -> Self {
        let position = player.position - player.forward() * params.max_distance
            + Vec3::Y * params.min_height_above_player;
        let floater = player.position + Vec3::Y * params.floater_height;
        let mut transform = Transform::from_position(position);
        transform.look_at(floater, Vec3::Y);
        Self { transform, floater }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Point the camera is looking at.
    pub fn floater(&self) -> Vec3 {
        self.floater
    }

    /// Follow the player for one frame.
    pub fn update(
        &mut self,
        player: Vec3,
        input: &InputState,
        pointer: &mut dyn PointerSource,
        probe: &dyn SurfaceProbe,
        params: &CameraParams,
        dt: f32,
    ) {
        self.transform.look_at(player, Vec3::Y);

        let right = self.transform.right();
        if input.is_active(Action::CamLeft) {
            self.transform.translate(-right * params.drift_speed * dt);
        }
        if input.is_active(Action::CamRight) {
            self.transform.translate(right * params.drift_speed * dt);
        }
        if let Some(offset) = pointer.take_horizontal_offset() {
            self.transform
                .translate(right * offset * params.sensitivity * dt);
        }

        self.clamp_distance(player, params);

        if let Some(ground) = probe_ground(probe, self.transform.position) {
            self.transform.position.y = ground + params.terrain_clearance;
        }
        let floor = player.y + params.min_height_above_player;
        if self.transform.position.y < floor {
            self.transform.position.y = floor;
        }

        self.floater = player + Vec3::Y * params.floater_height;
        self.transform.look_at(self.floater, Vec3::Y);
    }

    /// Pull in or push out along the horizontal camera-to-player line.
    fn clamp_distance(&mut self, player: Vec3, params: &CameraParams) {
        let to_player = Vec3::new(
            player.x - self.transform.position.x,
            0.0,
            player.z - self.transform.position.z,
        );
        let distance = to_player.length();
        let direction = to_player.try_normalize().unwrap_or_else(|| {
            let f = self.transform.forward();
            Vec3::new(f.x, 0.0, f.z).try_normalize().unwrap_or(Vec3::NEG_Z)
        });

        if distance > params.max_distance {
            self.transform.position += direction * (distance - params.max_distance);
        } else if distance < params.min_distance {
            self.transform.position -= direction * (params.min_distance - distance);
        }
    }
}
