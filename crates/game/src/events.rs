//! Window event handling for the desktop app.

use game::{GamePhase, PointerSource};
use glam::Vec2;
use std::sync::Arc;
use winit::dpi::PhysicalPosition;
use winit::event::WindowEvent;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::CourseApp;

/// Relative pointer input: reads the cursor's distance from the window
/// center, then warps it back to the center.
pub(crate) struct WindowPointer<'a> {
    pub window: &'a Arc<Window>,
    pub cursor: Option<Vec2>,
}

impl PointerSource for WindowPointer<'_> {
    fn take_horizontal_offset(&mut self) -> Option<f32> {
        let cursor = self.cursor.take()?;
        let size = self.window.inner_size();
        let center = PhysicalPosition::new(size.width as f64 / 2.0, size.height as f64 / 2.0);
        match self.window.set_cursor_position(center) {
            Ok(()) => Some(cursor.x - center.x as f32),
            Err(e) => {
                log::trace!("Cursor re-centering unavailable: {}", e);
                None
            }
        }
    }
}

impl CourseApp {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                }
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
                false
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.cursor_left();
                false
            }
            WindowEvent::Focused(false) => {
                self.input.clear();
                false
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                self.window.request_redraw();
                !self.running
            }
            _ => false,
        }
    }

    /// Menu keys pressed since the last frame.
    pub(crate) fn handle_key_presses(&mut self) {
        if self.input.is_key_pressed(KeyCode::Escape) {
            self.running = false;
            return;
        }

        let play = self.input.is_key_pressed(KeyCode::F1);
        let again = play || self.input.is_key_pressed(KeyCode::Enter);
        match self.session.phase() {
            GamePhase::Intro if play => {
                if let Err(e) = self.session.start_game(&mut self.hud) {
                    log::warn!("Start failed: {}", e);
                }
            }
            GamePhase::Won | GamePhase::Lost if again => {
                if let Err(e) = self.session.restart_game(&mut self.hud) {
                    log::warn!("Restart failed: {}", e);
                }
            }
            _ => {}
        }
    }
}
