//! Desktop host for the timed obstacle course.

mod events;
mod window_hud;

use anyhow::Result;
use engine_core::Time;
use game::{CourseSource, GameConfig, GameSession, SessionSettings};
use input::InputState;
use std::sync::Arc;
use std::time::Duration;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use events::WindowPointer;
use window_hud::WindowHud;

/// Everything the desktop app owns once the window exists.
pub(crate) struct CourseApp {
    window: Arc<Window>,
    session: GameSession,
    input: InputState,
    hud: WindowHud,
    time: Time,
    running: bool,
}

impl CourseApp {
    fn new(window: Arc<Window>, config: GameConfig) -> Self {
        let time = Time::new()
            .with_max_delta(Duration::from_millis(config.tuning.max_frame_delta_ms));
        let hud = WindowHud::new(window.clone(), &config.music);
        let settings = SessionSettings::new(config.tuning, config.sensitivity);
        let session = GameSession::new(CourseSource::File(config.course_path), settings);

        Self {
            window,
            session,
            input: InputState::new(),
            hud,
            time,
            running: true,
        }
    }

    fn frame(&mut self) {
        self.time.update();
        let dt = self.time.delta_seconds();

        self.handle_key_presses();
        if !self.running {
            return;
        }

        let mut pointer = WindowPointer {
            window: &self.window,
            cursor: self.input.take_cursor(),
        };
        self.session.tick(dt, &self.input, &mut pointer, &mut self.hud);

        for command in self.session.drain_scene_commands() {
            log::debug!("Scene: {:?}", command);
        }

        self.input.begin_frame();
        self.hud.cleanup();
    }
}

/// Application handler for winit.
struct App {
    state: Option<CourseApp>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = GameConfig::load();
            let window_attrs = Window::default_attributes()
                .with_title(game::presentation::GAME_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let mut app = CourseApp::new(window.clone(), config);
            app.session.show_intro(&mut app.hud);
            self.state = Some(app);
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                log::info!("Runs played: {}", state.session.runs_started());
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                Timed-obstacle Course                 ║");
    println!("╠══════════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                           ║");
    println!("║    W / S      - Run forward / backward               ║");
    println!("║    A / D      - Turn left / right                    ║");
    println!("║    Arrows     - Swing camera  │  Mouse - Swing camera ║");
    println!("║    F1         - Play / restart │  Escape - Quit       ║");
    println!("╠══════════════════════════════════════════════════════╣");
    println!("║  Reach the goal before the clock runs out. Hazards   ║");
    println!("║  drain health; pickups give speed, health or time.   ║");
    println!("╚══════════════════════════════════════════════════════╝");

    log::info!("Starting timed obstacle course");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
