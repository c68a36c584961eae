//! Game configuration (window, course, music, gameplay tuning). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use steering::{AgentParams, FlockConfig};

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Pointer sensitivity multiplier for the camera nudge (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Course description to load when a run starts.
    #[serde(default = "default_course_path")]
    pub course_path: PathBuf,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub tuning: TuningConfig,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_course_path() -> PathBuf {
    PathBuf::from("assets/course.ron")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            sensitivity: default_sensitivity(),
            course_path: default_course_path(),
            music: MusicConfig::default(),
            tuning: TuningConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

/// Music files for each cue. Missing files only silence that cue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    pub intro: PathBuf,
    pub playing: PathBuf,
    pub win: PathBuf,
    pub game_over: PathBuf,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            intro: PathBuf::from("assets/music/start.ogg"),
            playing: PathBuf::from("assets/music/playing.ogg"),
            win: PathBuf::from("assets/music/win.ogg"),
            game_over: PathBuf::from("assets/music/gameover.ogg"),
        }
    }
}

/// Every gameplay constant of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Player yaw rate in degrees per second.
    pub turn_rate_deg: f32,
    /// Player run speed in units per second at multiplier 1.0.
    pub run_speed: f32,
    /// Camera sideways drift from the camera keys, units per second.
    pub camera_drift_speed: f32,
    pub camera_min_distance: f32,
    pub camera_max_distance: f32,
    /// Camera height above the terrain under it.
    pub camera_terrain_clearance: f32,
    /// Camera never drops below the player by less than this.
    pub camera_min_height_above_player: f32,
    /// Height of the camera's look-at point above the player.
    pub floater_height: f32,
    /// Player within this distance of the goal marker wins.
    pub goal_radius: f32,
    /// Seconds on the clock at the start of a run.
    pub total_time: f32,
    pub max_health: f32,
    /// Health lost per hazard in range, per tick.
    pub damage_per_tick: f32,
    pub damage_range: f32,
    /// Speed multiplier granted by the speed pickup.
    pub speed_boost: f32,
    /// Seconds added by the time pickup.
    pub time_bonus: f32,
    /// How strongly flockers chase the player, against their flocking urge.
    pub pursuit_weight: f32,
    /// Longest frame delta fed into the simulation, in milliseconds.
    pub max_frame_delta_ms: u64,
    pub flock: FlockConfig,
    pub flocker: AgentParams,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            turn_rate_deg: 300.0,
            run_speed: 25.0,
            camera_drift_speed: 20.0,
            camera_min_distance: 5.0,
            camera_max_distance: 10.0,
            camera_terrain_clearance: 1.0,
            camera_min_height_above_player: 2.0,
            floater_height: 2.0,
            goal_radius: 4.0,
            total_time: 120.0,
            max_health: 100.0,
            damage_per_tick: 1.0,
            damage_range: 2.0,
            speed_boost: 2.0,
            time_bonus: 20.0,
            pursuit_weight: 0.4,
            max_frame_delta_ms: 100,
            flock: FlockConfig::default(),
            flocker: AgentParams::default(),
        }
    }
}
