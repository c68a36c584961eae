//! What the player sees and hears outside the 3D scene: intro page, HUD,
//! end panel, error message and music.

/// Background music, one track per phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicCue {
    Intro,
    Playing,
    Win,
    GameOver,
}

impl MusicCue {
    pub const ALL: [MusicCue; 4] = [
        MusicCue::Intro,
        MusicCue::Playing,
        MusicCue::Win,
        MusicCue::GameOver,
    ];

    /// Key the cue's sound is registered under.
    pub fn name(self) -> &'static str {
        match self {
            MusicCue::Intro => "intro",
            MusicCue::Playing => "playing",
            MusicCue::Win => "win",
            MusicCue::GameOver => "gameover",
        }
    }
}

pub const GAME_TITLE: &str = "Timed-obstacle Course";

/// Lines of the intro page under the title.
pub const INTRO_LINES: &[&str] = &[
    "Controls",
    "~~~~~~~~~~~~~~~~~~",
    "[ESC] : Quit",
    "[Left/Right Arrow] : Rotate Camera",
    "[Mouse] : Rotate Camera",
    "[W,S] : Run Forward & Backward",
    "[A,D] : Rotate Player",
    "[F1] : PLAY",
];

/// Values shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudStatus {
    pub time_left: f32,
    pub health: f32,
}

impl HudStatus {
    /// Whole seconds left, never below zero.
    pub fn time_text(&self) -> String {
        format!("Time Left: {}", self.time_left.max(0.0).ceil() as u32)
    }

    pub fn health_text(&self) -> String {
        format!("Health : {}", self.health.round() as u32)
    }
}

/// Host-side UI and audio. Every call is fire-and-forget.
pub trait Presentation {
    fn show_intro(&mut self);
    fn hide_intro(&mut self);
    fn show_hud(&mut self, status: &HudStatus);
    fn update_hud(&mut self, status: &HudStatus);
    fn hide_hud(&mut self);
    /// End-of-run panel with the result and a restart action.
    fn show_end_panel(&mut self, message: &str);
    fn hide_end_panel(&mut self);
    /// A run could not start.
    fn show_error(&mut self, message: &str);
    fn play_cue(&mut self, cue: MusicCue);
    fn stop_cue(&mut self, cue: MusicCue);
}
