//! Presentation for the desktop build: pages and HUD go to the window title
//! and the log, music goes through Kira.

use audio::AudioSystem;
use game::config::MusicConfig;
use game::presentation::{HudStatus, MusicCue, Presentation, GAME_TITLE, INTRO_LINES};
use std::sync::Arc;
use winit::window::Window;

#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Blank,
    Intro,
    Hud(HudStatus),
    EndPanel(String),
}

pub struct WindowHud {
    window: Arc<Window>,
    audio: Option<AudioSystem>,
    screen: Screen,
    error: Option<String>,
    title: String,
}

impl WindowHud {
    pub fn new(window: Arc<Window>, music: &MusicConfig) -> Self {
        let audio = match AudioSystem::new() {
            Ok(mut audio) => {
                for cue in MusicCue::ALL {
                    let path = match cue {
                        MusicCue::Intro => &music.intro,
                        MusicCue::Playing => &music.playing,
                        MusicCue::Win => &music.win,
                        MusicCue::GameOver => &music.game_over,
                    };
                    if let Err(e) = audio.load_sound(cue.name(), path) {
                        log::warn!("Music '{}' unavailable ({:?}): {}", cue.name(), path, e);
                    }
                }
                Some(audio)
            }
            Err(e) => {
                log::warn!("Audio disabled: {}", e);
                None
            }
        };

        Self {
            window,
            audio,
            screen: Screen::Blank,
            error: None,
            title: String::new(),
        }
    }

    /// Drop handles of sounds that finished playing.
    pub fn cleanup(&mut self) {
        if let Some(audio) = &mut self.audio {
            audio.cleanup();
        }
    }

    fn refresh(&mut self) {
        let mut title = match &self.screen {
            Screen::Blank => GAME_TITLE.to_string(),
            Screen::Intro => format!("{} - press F1 to play", GAME_TITLE),
            Screen::Hud(status) => format!(
                "{} | {} | {}",
                GAME_TITLE,
                status.time_text(),
                status.health_text()
            ),
            Screen::EndPanel(message) => {
                format!("{} - {} - press F1 to restart", GAME_TITLE, message)
            }
        };
        if let Some(error) = &self.error {
            title.push_str(" | ERROR: ");
            title.push_str(error);
        }
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }
}

impl Presentation for WindowHud {
    fn show_intro(&mut self) {
        for line in INTRO_LINES {
            log::info!("{}", line);
        }
        self.screen = Screen::Intro;
        self.refresh();
    }

    fn hide_intro(&mut self) {
        if self.screen == Screen::Intro {
            self.screen = Screen::Blank;
        }
        self.error = None;
        self.refresh();
    }

    fn show_hud(&mut self, status: &HudStatus) {
        self.screen = Screen::Hud(*status);
        self.refresh();
    }

    fn update_hud(&mut self, status: &HudStatus) {
        if matches!(self.screen, Screen::Hud(_)) {
            self.screen = Screen::Hud(*status);
            self.refresh();
        }
    }

    fn hide_hud(&mut self) {
        if matches!(self.screen, Screen::Hud(_)) {
            self.screen = Screen::Blank;
            self.refresh();
        }
    }

    fn show_end_panel(&mut self, message: &str) {
        log::info!("{}", message);
        self.screen = Screen::EndPanel(message.to_string());
        self.refresh();
    }

    fn hide_end_panel(&mut self) {
        if matches!(self.screen, Screen::EndPanel(_)) {
            self.screen = Screen::Blank;
        }
        self.error = None;
        self.refresh();
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.refresh();
    }

    fn play_cue(&mut self, cue: MusicCue) {
        let Some(audio) = &mut self.audio else {
            return;
        };
        let result = match cue {
            MusicCue::Intro | MusicCue::Playing => audio.play_looping(cue.name()),
            MusicCue::Win | MusicCue::GameOver => audio.play(cue.name()),
        };
        if let Err(e) = result {
            log::warn!("Failed to play '{}': {}", cue.name(), e);
        }
    }

    fn stop_cue(&mut self, cue: MusicCue) {
        if let Some(audio) = &mut self.audio {
            audio.stop(cue.name());
        }
    }
}
