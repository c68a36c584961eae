mod common;

use common::*;
use engine_core::{AgentKind, Transform};
use game::course::{SurfaceDef, SurfaceShape};
use game::{
    CourseSource, GamePhase, GameSession, MusicCue, NoPointer, PickupEffect, SessionSettings,
    StartError, TuningConfig,
};
use glam::Vec3;
use input::{Action, InputState};

#[test]
fn start_switches_from_intro_to_hud() {
    let mut ui = Recorder::default();
    let session = started(flat_course(30.0), TuningConfig::default(), &mut ui);

    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.runs_started(), 1);
    assert_eq!(session.player_position(), Some(Vec3::ZERO));
    assert_eq!(
        ui.events,
        vec![
            UiEvent::ShowIntro,
            UiEvent::Play(MusicCue::Intro),
            UiEvent::HideIntro,
            UiEvent::Stop(MusicCue::Intro),
            UiEvent::ShowHud,
            UiEvent::Play(MusicCue::Playing),
        ]
    );
    let hud = ui.hud.unwrap();
    assert_eq!(hud.time_text(), "Time Left: 120");
    assert_eq!(hud.health_text(), "Health : 100");
}

#[test]
fn running_to_the_goal_wins() {
    let mut ui = Recorder::default();
    let mut session = started(flat_course(30.0), TuningConfig::default(), &mut ui);
    let input = holding(&[Action::Forward]);

    let ended = run_until_end(&mut session, &input, &mut ui, DT, 120).expect("run should end");

    assert_eq!(session.phase(), GamePhase::Won);
    let elapsed = session.stats().elapsed();
    assert!((1.04..=1.2).contains(&elapsed), "won after {}s", elapsed);
    assert_eq!(ended, 63);
    assert_eq!(session.playing_tasks(), 0);
    assert!(ui.saw(&UiEvent::HideHud));
    assert!(ui.saw(&UiEvent::EndPanel("You WIN!".into())));
    assert!(ui.saw(&UiEvent::Stop(MusicCue::Playing)));
    assert!(ui.saw(&UiEvent::Play(MusicCue::Win)));

    let parked = session.player_position();
    assert_eq!(session.tick(DT, &input, &mut NoPointer, &mut ui), GamePhase::Won);
    assert_eq!(session.player_position(), parked);
}

#[test]
fn clock_running_out_loses() {
    let tuning = TuningConfig {
        total_time: 1.0,
        ..TuningConfig::default()
    };
    let mut ui = Recorder::default();
    let mut session = started(flat_course(30.0), tuning, &mut ui);

    let ended = run_until_end(&mut session, &InputState::new(), &mut ui, 0.25, 10);

    assert_eq!(ended, Some(4));
    assert_eq!(session.phase(), GamePhase::Lost);
    assert!(ui.saw(&UiEvent::EndPanel("Game Over".into())));
    assert!(ui.saw(&UiEvent::Play(MusicCue::GameOver)));
    assert_eq!(ui.hud.unwrap().time_text(), "Time Left: 0");
}

#[test]
fn standing_in_a_hazard_drains_health_to_a_loss() {
    let mut course = flat_course(30.0);
    // Start marker sits 0.7 to the -X side of spawn, so this puts the
    // obstacle right on the player.
    course.hazards.obstacle_offset = Some([0.7, 0.0, 0.0]);
    let mut ui = Recorder::default();
    let mut session = started(course, TuningConfig::default(), &mut ui);

    for _ in 0..99 {
        session.tick(DT, &InputState::new(), &mut NoPointer, &mut ui);
    }
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.stats().health(), 1.0);

    assert_eq!(
        session.tick(DT, &InputState::new(), &mut NoPointer, &mut ui),
        GamePhase::Lost
    );
    assert_eq!(session.stats().health(), 0.0);
    assert!(ui.saw(&UiEvent::EndPanel("Game Over".into())));
}

#[test]
fn reaching_the_goal_on_the_last_second_still_wins() {
    let tuning = TuningConfig {
        total_time: 1.25,
        ..TuningConfig::default()
    };
    let mut ui = Recorder::default();
    let mut session = started(flat_course(30.0), tuning, &mut ui);
    let input = holding(&[Action::Forward]);

    let ended = run_until_end(&mut session, &input, &mut ui, 0.25, 10);

    assert_eq!(ended, Some(5));
    assert!(session.stats().is_out_of_time());
    assert_eq!(session.phase(), GamePhase::Won);
}

#[test]
fn restart_gives_a_fresh_run() {
    let mut course = flat_course(30.0);
    course.pickups.push(pickup(PickupEffect::GrantSpeed, [0.0, 0.0, -5.0]));
    let mut ui = Recorder::default();
    let mut session = started(course, TuningConfig::default(), &mut ui);
    let tasks_at_start = session.playing_tasks();

    run_until_end(&mut session, &holding(&[Action::Forward]), &mut ui, DT, 120);
    assert_eq!(session.phase(), GamePhase::Won);
    assert_eq!(session.pickups_remaining(), 0);
    assert_eq!(session.stats().speed_multiplier(), 2.0);

    session.restart_game(&mut ui).unwrap();

    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.runs_started(), 2);
    assert_eq!(session.player_position(), Some(Vec3::ZERO));
    assert_eq!(session.pickups_remaining(), 1);
    assert_eq!(session.playing_tasks(), tasks_at_start);
    let stats = session.stats();
    assert_eq!(stats.speed_multiplier(), 1.0);
    assert_eq!(stats.health(), 100.0);
    assert_eq!(stats.elapsed(), 0.0);
    assert_eq!(stats.time_left(), 120.0);
    assert!(ui.saw(&UiEvent::HideEndPanel));
    assert!(ui.saw(&UiEvent::Stop(MusicCue::Win)));
    assert!(ui.saw(&UiEvent::Stop(MusicCue::GameOver)));
}

#[test]
fn restart_after_a_loss_gives_a_fresh_run() {
    let mut course = flat_course(30.0);
    course.hazards.obstacle_offset = Some([0.7, 0.0, 0.0]);
    course.pickups.push(pickup(PickupEffect::GrantSpeed, [0.0, 0.0, -1.5]));
    let mut ui = Recorder::default();
    let mut session = started(course, TuningConfig::default(), &mut ui);

    let ended = run_until_end(&mut session, &InputState::new(), &mut ui, DT, 200);
    assert_eq!(ended, Some(100));
    assert_eq!(session.phase(), GamePhase::Lost);
    assert_eq!(session.pickups_remaining(), 0);
    assert_eq!(session.stats().speed_multiplier(), 2.0);

    session.restart_game(&mut ui).unwrap();

    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.player_position(), Some(Vec3::ZERO));
    assert_eq!(session.pickups_remaining(), 1);
    let stats = session.stats();
    assert_eq!(stats.health(), 100.0);
    assert_eq!(stats.time_left(), stats.total_time());
    assert_eq!(stats.total_time(), 120.0);
    assert_eq!(stats.speed_multiplier(), 1.0);
    assert!(ui.saw(&UiEvent::Stop(MusicCue::GameOver)));
}

#[test]
fn failed_restart_falls_back_to_the_intro() {
    let path = std::env::temp_dir().join(format!("course-restart-{}.ron", std::process::id()));
    std::fs::write(&path, ron::to_string(&flat_course(30.0)).unwrap()).unwrap();
    let tuning = TuningConfig {
        total_time: 0.5,
        ..TuningConfig::default()
    };
    let mut session = GameSession::new(
        CourseSource::File(path.clone()),
        SessionSettings::new(tuning, 1.0),
    );
    let mut ui = Recorder::default();
    session.show_intro(&mut ui);
    session.start_game(&mut ui).unwrap();
    run_until_end(&mut session, &InputState::new(), &mut ui, 0.25, 10);
    assert_eq!(session.phase(), GamePhase::Lost);

    std::fs::remove_file(&path).unwrap();
    ui.events.clear();
    let err = session.restart_game(&mut ui).unwrap_err();

    assert!(matches!(err, StartError::Course(_)));
    assert_eq!(session.phase(), GamePhase::Intro);
    assert_eq!(session.player(), None);
    assert_eq!(session.player_position(), None);
    assert!(session.world().is_empty());
    assert_eq!(session.playing_tasks(), 0);
    assert!(matches!(ui.events.get(3), Some(UiEvent::Error(_))));
    assert_eq!(
        ui.events[..3],
        [
            UiEvent::HideEndPanel,
            UiEvent::Stop(MusicCue::Win),
            UiEvent::Stop(MusicCue::GameOver),
        ]
    );
    assert_eq!(
        ui.events[4..],
        [UiEvent::ShowIntro, UiEvent::Play(MusicCue::Intro)]
    );
    assert_eq!(
        session.tick(DT, &InputState::new(), &mut NoPointer, &mut ui),
        GamePhase::Intro
    );

    std::fs::write(&path, ron::to_string(&flat_course(30.0)).unwrap()).unwrap();
    session.start_game(&mut ui).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.runs_started(), 2);
    assert_eq!(session.player_position(), Some(Vec3::ZERO));
}

#[test]
fn start_and_restart_are_phase_gated() {
    let mut ui = Recorder::default();
    let mut session = session(flat_course(30.0), TuningConfig::default());

    assert!(matches!(
        session.restart_game(&mut ui),
        Err(StartError::WrongPhase(GamePhase::Intro))
    ));
    session.start_game(&mut ui).unwrap();
    assert!(matches!(
        session.start_game(&mut ui),
        Err(StartError::WrongPhase(GamePhase::Playing))
    ));
    assert!(matches!(
        session.restart_game(&mut ui),
        Err(StartError::WrongPhase(GamePhase::Playing))
    ));
    assert_eq!(session.runs_started(), 1);
}

#[test]
fn broken_course_keeps_the_intro_up() {
    let mut course = flat_course(30.0);
    course.markers.retain(|m| m.name != "goal");
    let mut ui = Recorder::default();
    let mut session = session(course, TuningConfig::default());
    session.show_intro(&mut ui);

    let err = session.start_game(&mut ui).unwrap_err();

    assert!(matches!(err, StartError::Course(_)));
    assert_eq!(session.phase(), GamePhase::Intro);
    assert!(ui
        .events
        .iter()
        .any(|e| matches!(e, UiEvent::Error(msg) if msg.contains("goal"))));
    assert!(!ui.saw(&UiEvent::HideIntro));
    assert!(!ui.saw(&UiEvent::ShowHud));
    assert_eq!(
        session.tick(DT, &InputState::new(), &mut NoPointer, &mut ui),
        GamePhase::Intro
    );
}

#[test]
fn player_cannot_climb_onto_props() {
    let mut course = flat_course(30.0);
    course.surfaces.push(SurfaceDef {
        tag: "rock".into(),
        shape: SurfaceShape::Slab {
            center: [0.0, 1.0, -3.0],
            half_extents: [2.0, 1.0, 0.5],
            yaw_deg: 0.0,
        },
    });
    let mut ui = Recorder::default();
    let mut session = started(course, TuningConfig::default(), &mut ui);
    let input = holding(&[Action::Forward]);

    for _ in 0..30 {
        session.tick(DT, &input, &mut NoPointer, &mut ui);
    }
    let blocked = session.player_position().unwrap();
    assert!(blocked.z > -3.5, "walked through the rock: {:?}", blocked);
    assert_eq!(blocked.y, 0.0);

    session.tick(DT, &input, &mut NoPointer, &mut ui);
    assert_eq!(session.player_position(), Some(blocked));
}

#[test]
fn turning_survives_a_rejected_step() {
    let mut course = flat_course(30.0);
    course.surfaces.push(SurfaceDef {
        tag: "rock".into(),
        shape: SurfaceShape::Slab {
            center: [0.0, 1.0, -1.0],
            half_extents: [5.0, 1.0, 0.6],
            yaw_deg: 0.0,
        },
    });
    let mut ui = Recorder::default();
    let mut session = started(course, TuningConfig::default(), &mut ui);

    session.tick(DT, &holding(&[Action::Forward, Action::Left]), &mut NoPointer, &mut ui);

    assert_eq!(session.player_position(), Some(Vec3::ZERO));
    let heading = session.player_heading().unwrap();
    assert!((heading - 5f32.to_radians()).abs() < 1e-4);
}

#[test]
fn camera_stays_in_its_box() {
    let mut ui = Recorder::default();
    let mut session = started(flat_course(80.0), TuningConfig::default(), &mut ui);

    let inputs = [
        holding(&[Action::Forward]),
        holding(&[Action::Forward, Action::Left, Action::CamRight]),
        holding(&[Action::Backward, Action::CamLeft]),
        InputState::new(),
    ];
    for input in &inputs {
        for _ in 0..30 {
            session.tick(DT, input, &mut NoPointer, &mut ui);
            let player = session.player_position().unwrap();
            let camera = session.camera().unwrap().position();
            let flat = Vec3::new(camera.x - player.x, 0.0, camera.z - player.z).length();
            assert!((5.0 - 1e-3..=10.0 + 1e-3).contains(&flat), "distance {}", flat);
            assert!(camera.y >= player.y + 2.0 - 1e-4);
        }
    }
}

#[test]
fn pickups_fire_once() {
    let mut course = flat_course(80.0);
    course.pickups.push(pickup(PickupEffect::ExtendTime, [0.0, 0.0, -3.0]));
    let mut ui = Recorder::default();
    let mut session = started(course, TuningConfig::default(), &mut ui);
    let input = holding(&[Action::Forward]);

    for _ in 0..30 {
        session.tick(DT, &input, &mut NoPointer, &mut ui);
    }

    assert_eq!(session.stats().total_time(), 140.0);
    assert_eq!(session.pickups_remaining(), 0);
}

#[test]
fn flockers_stay_on_the_terrain() {
    let mut course = flat_course(80.0);
    course.hazards.flock_size = 5;
    let mut ui = Recorder::default();
    let mut session = started(course, TuningConfig::default(), &mut ui);

    for _ in 0..60 {
        session.tick(DT, &InputState::new(), &mut NoPointer, &mut ui);
    }

    let world = session.world();
    let mut query = world.query::<(&Transform, &AgentKind)>();
    let flockers: Vec<_> = query
        .iter()
        .filter(|(_, (_, kind))| **kind == AgentKind::Flocker)
        .map(|(_, (t, _))| t.position)
        .collect();
    assert_eq!(flockers.len(), 5);
    assert!(flockers.iter().all(|p| p.y == 0.0));
}

#[test]
fn bundled_course_is_playable() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/course.ron");
    let course = game::CourseSource::File(path).load().unwrap();
    let mut physics = physics::PhysicsWorld::new();
    course.build_world(&mut physics).unwrap();

    let mut spots = vec![
        course.marker("start_point").unwrap(),
        course.marker("goal").unwrap(),
    ];
    spots.extend(course.pickups.iter().map(|p| Vec3::from(p.position)));
    for spot in spots {
        assert!(
            game::ground::probe_ground(&physics, spot).is_some(),
            "no terrain under {:?}",
            spot
        );
    }
}
