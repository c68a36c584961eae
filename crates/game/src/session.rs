//! The game session: phase machine, per-run world and the frame tasks that
//! drive a run.

use crate::ai::{snap_flockers, spawn_flock, step_flock, FlockSpawn, FlockingBackend};
use crate::camera_rig::{CameraParams, CameraRig, PointerSource};
use crate::config::TuningConfig;
use crate::course::{CourseDef, CourseError, CourseSource, GOAL_NODE, START_NODE};
use crate::entities::{
    position_of, spawn_marker, spawn_obstacle, spawn_pickup, spawn_player, MarkerKind,
    START_MARKER_SIDE_OFFSET,
};
use crate::ground::snap_to_ground;
use crate::locomotion::{update_player, LocomotionParams};
use crate::pickups::{check_pickup, Pickup, PickupCheck};
use crate::presentation::{HudStatus, MusicCue, Presentation};
use crate::scene::{SceneCommand, SceneCommands};
use crate::state::{evaluate, GamePhase, RunStats};
use crate::threats::apply_threats;
use engine_core::{Scheduler, TaskStatus, Transform};
use glam::Vec3;
use hecs::{Entity, World};
use input::InputState;
use physics::PhysicsWorld;
use rand::rngs::StdRng;
use rand::SeedableRng;
use steering::FlockWorld;

/// One unit of per-frame work while a run is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTask {
    Locomotion,
    Camera,
    /// Watches one pickup until it is collected.
    Pickup(Entity),
    FlockStep,
    FlockSnap,
    /// Run clock, hazard damage and HUD.
    Clock,
    /// Win/lose check. Ends the Playing group.
    Evaluate,
}

impl FrameTask {
    /// Run order within a frame.
    pub fn order(self) -> i32 {
        match self {
            FrameTask::Locomotion => 0,
            FrameTask::Camera => 10,
            FrameTask::Pickup(_) => 20,
            FrameTask::FlockStep => 30,
            FrameTask::FlockSnap => 40,
            FrameTask::Clock => 50,
            FrameTask::Evaluate => 60,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("Cannot start a run during {0:?}")]
    WrongPhase(GamePhase),

    #[error(transparent)]
    Course(#[from] CourseError),
}

/// Constants a session runs with, derived once from the config.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub tuning: TuningConfig,
    pub camera: CameraParams,
    pub locomotion: LocomotionParams,
}

impl SessionSettings {
    pub fn new(tuning: TuningConfig, sensitivity: f32) -> Self {
        Self {
            camera: CameraParams::from_tuning(&tuning, sensitivity),
            locomotion: LocomotionParams::from(&tuning),
            tuning,
        }
    }
}

/// Everything that only exists for the length of one run.
struct RunState {
    world: World,
    physics: PhysicsWorld,
    backend: Box<dyn FlockingBackend>,
    player: Option<Entity>,
    goal: Vec3,
    camera: Option<CameraRig>,
    stats: RunStats,
    scene: SceneCommands,
}

impl RunState {
    fn new(backend: Box<dyn FlockingBackend>, tuning: &TuningConfig) -> Self {
        Self {
            world: World::new(),
            physics: PhysicsWorld::new(),
            backend,
            player: None,
            goal: Vec3::ZERO,
            camera: None,
            stats: RunStats::new(tuning.total_time, tuning.max_health),
            scene: SceneCommands::new(),
        }
    }

    fn player_position(&self) -> Option<Vec3> {
        self.player.and_then(|p| position_of(&self.world, p))
    }

    fn hud_status(&self) -> HudStatus {
        HudStatus {
            time_left: self.stats.time_left(),
            health: self.stats.health(),
        }
    }

    /// Destroy every per-run entity and surface.
    fn teardown(&mut self) {
        self.world.clear();
        self.physics.clear();
        self.backend.clear();
        self.player = None;
        self.camera = None;
        self.scene = SceneCommands::new();
    }
}

/// Borrowed view handed to each frame task.
struct FrameContext<'a> {
    run: &'a mut RunState,
    settings: &'a SessionSettings,
    input: &'a InputState,
    pointer: &'a mut dyn PointerSource,
    ui: &'a mut dyn Presentation,
    dt: f32,
    outcome: Option<GamePhase>,
}

impl FrameContext<'_> {
    fn run_task(&mut self, task: FrameTask) -> TaskStatus {
        let Some(player) = self.run.player else {
            return TaskStatus::Continue;
        };
        let run = &mut *self.run;
        let tuning = &self.settings.tuning;

        match task {
            FrameTask::Locomotion => {
                update_player(
                    &mut run.world,
                    player,
                    self.input,
                    run.stats.speed_multiplier(),
                    &self.settings.locomotion,
                    &run.physics,
                    self.dt,
                    &mut run.scene,
                );
                TaskStatus::Continue
            }
            FrameTask::Camera => {
                if let (Some(camera), Some(target)) =
                    (run.camera.as_mut(), position_of(&run.world, player))
                {
                    camera.update(
                        target,
                        self.input,
                        &mut *self.pointer,
                        &run.physics,
                        &self.settings.camera,
                        self.dt,
                    );
                }
                TaskStatus::Continue
            }
            FrameTask::Pickup(item) => {
                let Some(target) = position_of(&run.world, player) else {
                    return TaskStatus::Continue;
                };
                match check_pickup(&mut run.world, item, target, &mut run.stats, tuning) {
                    PickupCheck::Pending => TaskStatus::Continue,
                    PickupCheck::Collected(_) | PickupCheck::Gone => TaskStatus::Done,
                }
            }
            FrameTask::FlockStep => {
                if let Some(target) = position_of(&run.world, player) {
                    step_flock(
                        &mut *run.backend,
                        &run.world,
                        target,
                        tuning.pursuit_weight,
                        self.dt,
                    );
                }
                TaskStatus::Continue
            }
            FrameTask::FlockSnap => {
                snap_flockers(&mut *run.backend, &mut run.world, &run.physics);
                TaskStatus::Continue
            }
            FrameTask::Clock => {
                run.stats.advance_clock(self.dt);
                if let Some(target) = position_of(&run.world, player) {
                    apply_threats(
                        &run.world,
                        target,
                        tuning.damage_range,
                        tuning.damage_per_tick,
                        &mut run.stats,
                    );
                }
                self.ui.update_hud(&run.hud_status());
                TaskStatus::Continue
            }
            FrameTask::Evaluate => {
                let Some(target) = position_of(&run.world, player) else {
                    return TaskStatus::Continue;
                };
                match evaluate(target.distance(run.goal), tuning.goal_radius, &run.stats) {
                    Some(phase) => {
                        self.finish(phase);
                        TaskStatus::EndGroup
                    }
                    None => TaskStatus::Continue,
                }
            }
        }
    }

    fn finish(&mut self, phase: GamePhase) {
        let (message, cue) = match phase {
            GamePhase::Won => ("You WIN!", MusicCue::Win),
            _ => ("Game Over", MusicCue::GameOver),
        };
        self.ui.hide_hud();
        self.ui.show_end_panel(message);
        self.ui.stop_cue(MusicCue::Playing);
        self.ui.play_cue(cue);
        self.outcome = Some(phase);
    }
}

/// A course loaded and turned into collision geometry, ready to be
/// populated.
struct PreparedCourse {
    course: CourseDef,
    physics: PhysicsWorld,
    start: Vec3,
    goal: Vec3,
}

/// The game from intro page to end panel and back.
pub struct GameSession {
    phase: GamePhase,
    scheduler: Scheduler<GamePhase, FrameTask>,
    run: RunState,
    settings: SessionSettings,
    course: CourseSource,
    runs_started: u32,
}

impl GameSession {
    pub fn new(course: CourseSource, settings: SessionSettings) -> Self {
        Self::with_backend(course, settings, Box::new(FlockWorld::new()))
    }

    /// Session driving its hazards through a different steering engine.
    pub fn with_backend(
        course: CourseSource,
        settings: SessionSettings,
        backend: Box<dyn FlockingBackend>,
    ) -> Self {
        Self {
            phase: GamePhase::Intro,
            scheduler: Scheduler::new(),
            run: RunState::new(backend, &settings.tuning),
            settings,
            course,
            runs_started: 0,
        }
    }

    /// Put up the intro page and its music.
    pub fn show_intro(&self, ui: &mut dyn Presentation) {
        if self.phase == GamePhase::Intro {
            ui.show_intro();
            ui.play_cue(MusicCue::Intro);
        }
    }

    /// Intro -> Playing. On a course error nothing changes apart from the
    /// error message.
    pub fn start_game(&mut self, ui: &mut dyn Presentation) -> Result<(), StartError> {
        if self.phase != GamePhase::Intro {
            return Err(StartError::WrongPhase(self.phase));
        }
        let prepared = self.prepare(ui)?;
        ui.hide_intro();
        ui.stop_cue(MusicCue::Intro);
        self.launch(prepared, ui);
        Ok(())
    }

    /// Won/Lost -> Playing with a fresh run. On a course error the old run
    /// is torn down and the session goes back to the intro page.
    pub fn restart_game(&mut self, ui: &mut dyn Presentation) -> Result<(), StartError> {
        if !self.phase.is_terminal() {
            return Err(StartError::WrongPhase(self.phase));
        }
        ui.hide_end_panel();
        ui.stop_cue(MusicCue::Win);
        ui.stop_cue(MusicCue::GameOver);
        match self.prepare(ui) {
            Ok(prepared) => {
                self.launch(prepared, ui);
                Ok(())
            }
            Err(e) => {
                self.return_to_intro(ui);
                Err(e)
            }
        }
    }

    fn return_to_intro(&mut self, ui: &mut dyn Presentation) {
        self.scheduler.cancel_group(GamePhase::Playing);
        self.run.teardown();
        self.phase = GamePhase::Intro;
        self.show_intro(ui);
    }

    fn prepare(&self, ui: &mut dyn Presentation) -> Result<PreparedCourse, StartError> {
        self.load_course().map_err(|e| {
            log::error!("Could not load course: {}", e);
            ui.show_error(&e.to_string());
            StartError::from(e)
        })
    }

    fn load_course(&self) -> Result<PreparedCourse, CourseError> {
        let course = self.course.load()?;
        let mut physics = PhysicsWorld::new();
        course.build_world(&mut physics)?;
        let start = course
            .marker(START_NODE)
            .ok_or(CourseError::MissingNode(START_NODE))?;
        let goal = course
            .marker(GOAL_NODE)
            .ok_or(CourseError::MissingNode(GOAL_NODE))?;
        Ok(PreparedCourse {
            course,
            physics,
            start,
            goal,
        })
    }

    /// Replace the previous run (if any) with a fresh one and start playing.
    fn launch(&mut self, prepared: PreparedCourse, ui: &mut dyn Presentation) {
        let PreparedCourse {
            course,
            physics,
            start,
            goal,
        } = prepared;
        let tuning = &self.settings.tuning;

        self.scheduler.cancel_group(GamePhase::Playing);
        self.run.teardown();
        self.run.physics = physics;
        let run = &mut self.run;

        let mut spawn_at = start;
        snap_to_ground(&run.physics, &mut spawn_at, start);
        let player = spawn_player(&mut run.world, spawn_at);
        run.player = Some(player);

        let marker = start - Vec3::X * START_MARKER_SIDE_OFFSET;
        spawn_marker(&mut run.world, MarkerKind::Start, marker);

        let mut goal_at = goal;
        snap_to_ground(&run.physics, &mut goal_at, goal);
        spawn_marker(&mut run.world, MarkerKind::Goal, goal_at);
        run.goal = goal_at;

        let hazards = &course.hazards;
        if let Some(offset) = hazards.obstacle_offset {
            let planned = marker + Vec3::from(offset);
            let mut at = planned;
            snap_to_ground(&run.physics, &mut at, planned);
            spawn_obstacle(&mut run.world, at);
        }

        let mut rng = StdRng::seed_from_u64(course.seed);
        let flock = FlockSpawn {
            config: tuning.flock,
            params: tuning.flocker,
            center: marker + Vec3::from(hazards.flock_offset),
            count: hazards.flock_size,
            spread: hazards.flock_spread,
            probe: &run.physics,
        };
        spawn_flock(
            &mut *run.backend,
            &mut run.world,
            &flock,
            &mut rng,
            &mut run.scene,
        );

        let mut tasks = vec![
            (FrameTask::Locomotion.order(), FrameTask::Locomotion),
            (FrameTask::Camera.order(), FrameTask::Camera),
        ];
        for def in &course.pickups {
            let planned = Vec3::from(def.position);
            let mut at = planned;
            snap_to_ground(&run.physics, &mut at, planned);
            let item = spawn_pickup(&mut run.world, Pickup::new(def.effect, def.radius), at);
            let task = FrameTask::Pickup(item);
            tasks.push((task.order(), task));
        }
        for task in [
            FrameTask::FlockStep,
            FrameTask::FlockSnap,
            FrameTask::Clock,
            FrameTask::Evaluate,
        ] {
            tasks.push((task.order(), task));
        }

        run.camera = Some(CameraRig::behind(
            &Transform::from_position(spawn_at),
            &self.settings.camera,
        ));
        run.stats = RunStats::new(tuning.total_time, tuning.max_health);
        run.scene.push(SceneCommand::Pose {
            entity: player,
            animation: "walk",
            frame: crate::locomotion::IDLE_POSE_FRAME,
        });

        self.scheduler.add_all(GamePhase::Playing, tasks);
        self.phase = GamePhase::Playing;
        self.runs_started += 1;

        ui.show_hud(&self.run.hud_status());
        ui.play_cue(MusicCue::Playing);
        log::info!(
            "Run {} started on '{}' ({} task(s))",
            self.runs_started,
            course.name,
            self.scheduler.group_len(GamePhase::Playing)
        );
    }

    /// Advance a playing run by one frame. Does nothing in other phases.
    /// Returns the phase after the frame.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &InputState,
        pointer: &mut dyn PointerSource,
        ui: &mut dyn Presentation,
    ) -> GamePhase {
        if self.phase != GamePhase::Playing {
            return self.phase;
        }

        let mut ctx = FrameContext {
            run: &mut self.run,
            settings: &self.settings,
            input,
            pointer,
            ui,
            dt,
            outcome: None,
        };
        self.scheduler
            .run_frame(&mut ctx, |ctx, task| ctx.run_task(*task));

        if let Some(phase) = ctx.outcome {
            log::info!(
                "Run {} ended: {:?} ({:.1}s left, health {:.0})",
                self.runs_started,
                phase,
                self.run.stats.time_left(),
                self.run.stats.health()
            );
            self.phase = phase;
        }
        self.phase
    }

    /// Animation commands produced since the last call.
    pub fn drain_scene_commands(&mut self) -> Vec<SceneCommand> {
        self.run.scene.drain().collect()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn stats(&self) -> &RunStats {
        &self.run.stats
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Number of runs started since the session was created.
    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    pub fn player(&self) -> Option<Entity> {
        self.run.player
    }

    pub fn player_position(&self) -> Option<Vec3> {
        self.run.player_position()
    }

    pub fn player_heading(&self) -> Option<f32> {
        let player = self.run.player?;
        self.run
            .world
            .get::<&Transform>(player)
            .ok()
            .map(|t| t.heading())
    }

    pub fn goal_position(&self) -> Vec3 {
        self.run.goal
    }

    pub fn camera(&self) -> Option<&CameraRig> {
        self.run.camera.as_ref()
    }

    /// Agent registry of the current run.
    pub fn world(&self) -> &World {
        &self.run.world
    }

    /// Pickups still waiting to be collected.
    pub fn pickups_remaining(&self) -> usize {
        self.run.world.query::<&Pickup>().iter().count()
    }

    /// Live tasks of the Playing group.
    pub fn playing_tasks(&self) -> usize {
        self.scheduler.group_len(GamePhase::Playing)
    }
}
