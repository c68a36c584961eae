//! Music and sound cues using Kira.

use anyhow::Result;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    sound::PlaybackState,
    tween::Tween,
};
use std::collections::HashMap;
use std::path::Path;

/// Loaded sounds plus the handles of the ones currently playing, by name.
pub struct AudioSystem {
    manager: AudioManager,
    sounds: HashMap<String, StaticSoundData>,
    playing: HashMap<String, StaticSoundHandle>,
}

impl AudioSystem {
    /// Open the default audio device.
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;

        Ok(Self {
            manager,
            sounds: HashMap::new(),
            playing: HashMap::new(),
        })
    }

    /// Load a sound from a file.
    pub fn load_sound(&mut self, name: &str, path: &Path) -> Result<()> {
        let sound_data = StaticSoundData::from_file(path)?;
        self.sounds.insert(name.to_string(), sound_data);
        Ok(())
    }

    /// Play a sound once. Unknown names are ignored.
    pub fn play(&mut self, name: &str) -> Result<()> {
        self.start(name, StaticSoundSettings::new())
    }

    /// Play a sound on an endless loop, unless it is already playing.
    pub fn play_looping(&mut self, name: &str) -> Result<()> {
        if self.is_playing(name) {
            return Ok(());
        }
        self.start(name, StaticSoundSettings::new().loop_region(..))
    }

    fn start(&mut self, name: &str, settings: StaticSoundSettings) -> Result<()> {
        if let Some(sound_data) = self.sounds.get(name) {
            let handle = self.manager.play(sound_data.clone().with_settings(settings))?;
            if let Some(mut previous) = self.playing.insert(name.to_string(), handle) {
                let _ = previous.stop(Tween::default());
            }
        } else {
            log::debug!("Sound '{}' not loaded, skipping", name);
        }
        Ok(())
    }

    /// Whether a sound started by name is still playing.
    pub fn is_playing(&self, name: &str) -> bool {
        self.playing
            .get(name)
            .is_some_and(|handle| handle.state() != PlaybackState::Stopped)
    }

    /// Stop a sound by name, if it is playing.
    pub fn stop(&mut self, name: &str) {
        if let Some(mut handle) = self.playing.remove(name) {
            let _ = handle.stop(Tween::default());
        }
    }

    /// Clean up finished sounds.
    pub fn cleanup(&mut self) {
        self.playing
            .retain(|_, handle| handle.state() != PlaybackState::Stopped);
    }
}

// Re-export for convenience
pub use kira;
