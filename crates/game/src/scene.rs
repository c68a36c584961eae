//! Commands for the scene collaborator (model animation playback).

use hecs::Entity;

/// One request for the host's scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    /// Play a named animation on a loop.
    Loop { entity: Entity, animation: &'static str },
    /// Stop whatever is playing.
    Stop { entity: Entity },
    /// Hold one frame of a named animation.
    Pose {
        entity: Entity,
        animation: &'static str,
        frame: u32,
    },
}

/// Queue of scene commands produced during a frame, drained by the host.
#[derive(Debug, Default)]
pub struct SceneCommands {
    queue: Vec<SceneCommand>,
}

impl SceneCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: SceneCommand) {
        self.queue.push(command);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = SceneCommand> + '_ {
        self.queue.drain(..)
    }
}
