//! Player movement: keyboard turning and running, kept on the terrain.

use crate::config::TuningConfig;
use crate::ground::{snap_to_ground, SnapOutcome};
use crate::scene::{SceneCommand, SceneCommands};
use engine_core::{AnimationMode, GroundProbe, Transform};
use glam::Vec3;
use hecs::{Entity, World};
use input::{Action, InputState};
use physics::SurfaceProbe;

/// Frame of the walk cycle held while standing still.
pub const IDLE_POSE_FRAME: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionParams {
    /// Degrees per second.
    pub turn_rate_deg: f32,
    /// Units per second before the speed multiplier.
    pub run_speed: f32,
}

impl From<&TuningConfig> for LocomotionParams {
    fn from(tuning: &TuningConfig) -> Self {
        Self {
            turn_rate_deg: tuning.turn_rate_deg,
            run_speed: tuning.run_speed,
        }
    }
}

/// Switch between idle and running, queueing the model commands when the
/// mode changes.
pub fn transition_animation(
    entity: Entity,
    mode: &mut AnimationMode,
    moving: bool,
    scene: &mut SceneCommands,
) {
    match (moving, *mode) {
        (true, AnimationMode::Run) | (false, AnimationMode::Idle) => {}
        (true, _) => {
            *mode = AnimationMode::Run;
            scene.push(SceneCommand::Loop {
                entity,
                animation: "run",
            });
        }
        (false, _) => {
            *mode = AnimationMode::Idle;
            scene.push(SceneCommand::Stop { entity });
            scene.push(SceneCommand::Pose {
                entity,
                animation: "walk",
                frame: IDLE_POSE_FRAME,
            });
        }
    }
}

/// Move the player for one frame. A candidate position with no terrain
/// under it is thrown away and the player stays where the frame started;
/// the new heading is kept either way.
///
/// Returns the player position after the frame, or `None` if `player` has
/// no movable body.
#[allow(clippy::too_many_arguments)]
pub fn update_player(
    world: &mut World,
    player: Entity,
    input: &InputState,
    speed_multiplier: f32,
    params: &LocomotionParams,
    probe: &dyn SurfaceProbe,
    dt: f32,
    scene: &mut SceneCommands,
) -> Option<Vec3> {
    let (transform, mode, ground) = world
        .query_one_mut::<(&mut Transform, &mut AnimationMode, &mut GroundProbe)>(player)
        .ok()?;

    let startpos = transform.position;

    let turn = params.turn_rate_deg.to_radians() * dt;
    if input.is_active(Action::Left) {
        transform.rotate_y(turn);
    }
    if input.is_active(Action::Right) {
        transform.rotate_y(-turn);
    }

    let step = transform.forward() * params.run_speed * speed_multiplier * dt;
    if input.is_active(Action::Forward) {
        transform.translate(step);
    }
    if input.is_active(Action::Backward) {
        transform.translate(-step);
    }

    transition_animation(player, mode, input.any_movement(), scene);

    if let SnapOutcome::Grounded(_) = snap_to_ground(probe, &mut transform.position, startpos) {
        ground.last_valid = transform.position;
    }

    Some(transform.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::spawn_player;
    use physics::SurfaceHit;

    /// Flat terrain at a fixed height inside `|x|, |z| < half`.
    struct Island {
        height: f32,
        half: f32,
    }

    impl SurfaceProbe for Island {
        fn cast_down(&self, origin: Vec3) -> Vec<SurfaceHit> {
            if origin.x.abs() < self.half && origin.z.abs() < self.half {
                vec![SurfaceHit::new("terrain", Vec3::new(origin.x, self.height, origin.z))]
            } else {
                Vec::new()
            }
        }
    }

    fn params() -> LocomotionParams {
        LocomotionParams::from(&TuningConfig::default())
    }

    #[test]
    fn forward_moves_along_heading_and_snaps() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::ZERO);
        let mut input = InputState::new();
        input.set_action(Action::Forward, true);
        let mut scene = SceneCommands::new();
        let island = Island { height: 1.5, half: 100.0 };

        let pos = update_player(
            &mut world,
            player,
            &input,
            1.0,
            &params(),
            &island,
            0.1,
            &mut scene,
        )
        .unwrap();
        assert!((pos.z - -2.5).abs() < 1e-4);
        assert_eq!(pos.y, 1.5);
        assert_eq!(world.get::<&GroundProbe>(player).unwrap().last_valid, pos);
    }

    #[test]
    fn speed_multiplier_scales_step() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::ZERO);
        let mut input = InputState::new();
        input.set_action(Action::Backward, true);
        let mut scene = SceneCommands::new();
        let island = Island { height: 0.0, half: 100.0 };

        let pos = update_player(
            &mut world,
            player,
            &input,
            2.0,
            &params(),
            &island,
            0.1,
            &mut scene,
        )
        .unwrap();
        assert!((pos.z - 5.0).abs() < 1e-4);
    }

    #[test]
    fn off_terrain_reverts_position_but_keeps_heading() {
        let mut world = World::new();
        let start = Vec3::new(0.0, 0.0, -0.5);
        let player = spawn_player(&mut world, start);
        let mut input = InputState::new();
        input.set_action(Action::Forward, true);
        input.set_action(Action::Left, true);
        let mut scene = SceneCommands::new();
        let island = Island { height: 0.0, half: 1.0 };

        let pos = update_player(
            &mut world,
            player,
            &input,
            1.0,
            &params(),
            &island,
            0.1,
            &mut scene,
        )
        .unwrap();
        assert_eq!(pos, start);
        let heading = world.get::<&Transform>(player).unwrap().heading();
        assert!((heading - 30f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn run_and_idle_animation_commands() {
        let mut world = World::new();
        let player = spawn_player(&mut world, Vec3::ZERO);
        let mut input = InputState::new();
        let mut scene = SceneCommands::new();
        let island = Island { height: 0.0, half: 100.0 };

        input.set_action(Action::Right, true);
        update_player(&mut world, player, &input, 1.0, &params(), &island, 0.016, &mut scene);
        update_player(&mut world, player, &input, 1.0, &params(), &island, 0.016, &mut scene);
        input.set_action(Action::Right, false);
        update_player(&mut world, player, &input, 1.0, &params(), &island, 0.016, &mut scene);

        let commands: Vec<_> = scene.drain().collect();
        assert_eq!(
            commands,
            vec![
                SceneCommand::Loop { entity: player, animation: "run" },
                SceneCommand::Stop { entity: player },
                SceneCommand::Pose { entity: player, animation: "walk", frame: 5 },
            ]
        );
        assert_eq!(*world.get::<&AnimationMode>(player).unwrap(), AnimationMode::Idle);
    }
}
