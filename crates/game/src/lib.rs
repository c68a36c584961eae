//! Timed obstacle course: a player runs across terrain to a goal under a
//! clock and a health budget, chased by a flock and helped by pickups.
//!
//! The library holds the whole simulation and talks to the host only
//! through traits (`SurfaceProbe`, `FlockingBackend`, `PointerSource`,
//! `Presentation`), so it runs headless in tests.

pub mod ai;
pub mod camera_rig;
pub mod config;
pub mod course;
pub mod entities;
pub mod ground;
pub mod locomotion;
pub mod pickups;
pub mod presentation;
pub mod scene;
pub mod session;
pub mod state;
pub mod threats;

pub use ai::FlockingBackend;
pub use camera_rig::{CameraRig, NoPointer, PointerSource};
pub use config::{GameConfig, TuningConfig};
pub use course::{CourseDef, CourseError, CourseSource};
pub use pickups::PickupEffect;
pub use presentation::{HudStatus, MusicCue, Presentation};
pub use scene::SceneCommand;
pub use session::{GameSession, SessionSettings, StartError};
pub use state::{GamePhase, RunStats};
