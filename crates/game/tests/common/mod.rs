#![allow(dead_code)]

use game::course::{CourseDef, HazardLayout, MarkerDef, PickupDef, SurfaceDef, SurfaceShape};
use game::{
    GamePhase, GameSession, HudStatus, MusicCue, NoPointer, PickupEffect, Presentation,
    SessionSettings, TuningConfig,
};
use game::CourseSource;
use input::{Action, InputState};
use std::collections::BTreeMap;

pub const DT: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ShowIntro,
    HideIntro,
    ShowHud,
    HideHud,
    EndPanel(String),
    HideEndPanel,
    Error(String),
    Play(MusicCue),
    Stop(MusicCue),
}

/// Presentation that records every call.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<UiEvent>,
    pub hud: Option<HudStatus>,
}

impl Recorder {
    pub fn saw(&self, event: &UiEvent) -> bool {
        self.events.contains(event)
    }
}

impl Presentation for Recorder {
    fn show_intro(&mut self) {
        self.events.push(UiEvent::ShowIntro);
    }
    fn hide_intro(&mut self) {
        self.events.push(UiEvent::HideIntro);
    }
    fn show_hud(&mut self, status: &HudStatus) {
        self.hud = Some(*status);
        self.events.push(UiEvent::ShowHud);
    }
    fn update_hud(&mut self, status: &HudStatus) {
        self.hud = Some(*status);
    }
    fn hide_hud(&mut self) {
        self.events.push(UiEvent::HideHud);
    }
    fn show_end_panel(&mut self, message: &str) {
        self.events.push(UiEvent::EndPanel(message.to_string()));
    }
    fn hide_end_panel(&mut self) {
        self.events.push(UiEvent::HideEndPanel);
    }
    fn show_error(&mut self, message: &str) {
        self.events.push(UiEvent::Error(message.to_string()));
    }
    fn play_cue(&mut self, cue: MusicCue) {
        self.events.push(UiEvent::Play(cue));
    }
    fn stop_cue(&mut self, cue: MusicCue) {
        self.events.push(UiEvent::Stop(cue));
    }
}

/// Flat terrain at height 0, spawn at the origin, goal `goal_ahead` units
/// down -Z, no hazards and no pickups.
pub fn flat_course(goal_ahead: f32) -> CourseDef {
    CourseDef {
        name: "flat".into(),
        seed: 1,
        surfaces: vec![SurfaceDef {
            tag: "terrain".into(),
            shape: SurfaceShape::Plane { height: 0.0 },
        }],
        markers: vec![
            MarkerDef {
                name: "start_point".into(),
                position: [0.0, 0.0, 0.0],
            },
            MarkerDef {
                name: "goal".into(),
                position: [0.0, 0.0, -goal_ahead],
            },
        ],
        pickups: Vec::new(),
        models: BTreeMap::new(),
        hazards: HazardLayout {
            obstacle_offset: None,
            flock_size: 0,
            ..HazardLayout::default()
        },
    }
}

pub fn pickup(effect: PickupEffect, position: [f32; 3]) -> PickupDef {
    PickupDef {
        effect,
        position,
        radius: 2.0,
    }
}

pub fn session(course: CourseDef, tuning: TuningConfig) -> GameSession {
    GameSession::new(
        CourseSource::Inline(Box::new(course)),
        SessionSettings::new(tuning, 1.0),
    )
}

/// Session already past the intro page.
pub fn started(course: CourseDef, tuning: TuningConfig, ui: &mut Recorder) -> GameSession {
    let mut session = session(course, tuning);
    session.show_intro(ui);
    session.start_game(ui).expect("course should load");
    session
}

pub fn holding(actions: &[Action]) -> InputState {
    let mut input = InputState::new();
    for action in actions {
        input.set_action(*action, true);
    }
    input
}

/// Tick until the run ends or `max_ticks` pass. Returns the tick the run
/// ended on.
pub fn run_until_end(
    session: &mut GameSession,
    input: &InputState,
    ui: &mut Recorder,
    dt: f32,
    max_ticks: u32,
) -> Option<u32> {
    for tick in 1..=max_ticks {
        if session.tick(dt, input, &mut NoPointer, ui) != GamePhase::Playing {
            return Some(tick);
        }
    }
    None
}
