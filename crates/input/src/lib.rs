//! Keyboard and pointer input mapped onto the course's logical actions.

use glam::Vec2;
use std::collections::{HashMap, HashSet};

/// Logical actions the simulation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    CamLeft,
    CamRight,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::CamLeft,
        Action::CamRight,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Actions that move or turn the player.
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            Action::Forward | Action::Backward | Action::Left | Action::Right
        )
    }
}

/// Key → action table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<KeyCode, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(KeyCode::KeyW, Action::Forward);
        map.insert(KeyCode::KeyS, Action::Backward);
        map.insert(KeyCode::KeyA, Action::Left);
        map.insert(KeyCode::KeyD, Action::Right);
        map.insert(KeyCode::ArrowLeft, Action::CamLeft);
        map.insert(KeyCode::ArrowRight, Action::CamRight);
        Self { map }
    }
}

impl KeyBindings {
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.map.insert(key, action);
    }

    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.map.get(&key).copied()
    }
}

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,
    /// Logical action flags, indexed by `Action`.
    actions: [bool; 6],
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,

    /// Latest cursor position in window coordinates, until consumed.
    cursor: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
    }

    /// Process a keyboard event. Bound keys update their action flag.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        let down = state == ElementState::Pressed;
        if down {
            if !self.keys_held.contains(&key) {
                self.keys_pressed.insert(key);
            }
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }

        if let Some(action) = self.bindings.action_for(key) {
            log::trace!("{:?} -> {}", action, down);
            self.set_action(action, down);
        }
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.cursor = Some(Vec2::new(position.0 as f32, position.1 as f32));
    }

    /// The cursor left the window.
    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }

    /// Force an action flag (scripted input, tests).
    pub fn set_action(&mut self, action: Action, active: bool) {
        self.actions[action.index()] = active;
    }

    /// Release every action and key.
    pub fn clear(&mut self) {
        self.actions = [false; 6];
        self.keys_held.clear();
        self.keys_pressed.clear();
        self.cursor = None;
    }

    /// Whether a logical action is active.
    pub fn is_active(&self, action: Action) -> bool {
        self.actions[action.index()]
    }

    /// Whether any movement or turning action is active.
    pub fn any_movement(&self) -> bool {
        Action::ALL
            .iter()
            .any(|a| a.is_movement() && self.is_active(*a))
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Take the cursor position reported since the last call.
    pub fn take_cursor(&mut self) -> Option<Vec2> {
        self.cursor.take()
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;
