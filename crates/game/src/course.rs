//! Course descriptions: surfaces, named markers, pickups, hazard layout and
//! the model files a course depends on. Stored as RON.

use crate::pickups::PickupEffect;
use glam::Vec3;
use physics::{is_terrain, PhysicsWorld};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Marker the player spawns on.
pub const START_NODE: &str = "start_point";
/// Marker the player has to reach.
pub const GOAL_NODE: &str = "goal";

/// Errors raised while loading a course. Any of these aborts a run start.
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    #[error("Failed to read course {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse course: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Course is missing required node '{0}'")]
    MissingNode(&'static str),

    #[error("Course has no terrain surface")]
    NoTerrain,

    #[error("Model for '{role}' not found at {path:?}")]
    MissingModel { role: String, path: PathBuf },

    #[error("Surface '{0}' has an invalid shape")]
    InvalidSurface(String),
}

/// Geometry of one tagged surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceShape {
    /// Infinite horizontal plane.
    Plane { height: f32 },
    /// Box rotated about the vertical axis.
    Slab {
        center: [f32; 3],
        half_extents: [f32; 3],
        #[serde(default)]
        yaw_deg: f32,
    },
    /// Row-major height grid (rows along Z, columns along X) spanning
    /// `size` world units around `offset`.
    Heightfield {
        heights: Vec<f32>,
        rows: usize,
        cols: usize,
        size: [f32; 2],
        #[serde(default)]
        offset: [f32; 2],
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDef {
    /// Name tag reported by ground probes. Only `"terrain"` is walkable.
    pub tag: String,
    pub shape: SurfaceShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDef {
    pub name: String,
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupDef {
    pub effect: PickupEffect,
    pub position: [f32; 3],
    #[serde(default = "default_pickup_radius")]
    pub radius: f32,
}

fn default_pickup_radius() -> f32 {
    2.0
}

/// Where the hazards go, relative to the start marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardLayout {
    /// Static obstacle offset; `None` leaves it out.
    pub obstacle_offset: Option<[f32; 3]>,
    /// Where the flock spawns.
    pub flock_offset: [f32; 3],
    pub flock_size: usize,
    /// Spread of the random jitter applied to each flocker's spawn point.
    pub flock_spread: f32,
}

impl Default for HazardLayout {
    fn default() -> Self {
        Self {
            obstacle_offset: Some([0.0, 0.0, -5.0]),
            flock_offset: [0.0, 0.0, -10.0],
            flock_size: 10,
            flock_spread: 1.0,
        }
    }
}

/// A complete course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDef {
    pub name: String,
    /// Seed for spawn jitter.
    #[serde(default)]
    pub seed: u64,
    pub surfaces: Vec<SurfaceDef>,
    pub markers: Vec<MarkerDef>,
    #[serde(default)]
    pub pickups: Vec<PickupDef>,
    /// Model file per role (player, obstacle, flocker, ...). Relative paths
    /// resolve against the course file's directory.
    #[serde(default)]
    pub models: BTreeMap<String, PathBuf>,
    #[serde(default)]
    pub hazards: HazardLayout,
}

impl CourseDef {
    /// Parse a course from RON text.
    pub fn from_ron(text: &str) -> Result<Self, CourseError> {
        Ok(ron::from_str(text)?)
    }

    /// Read and parse a course file.
    pub fn from_file(path: &Path) -> Result<Self, CourseError> {
        let text = std::fs::read_to_string(path).map_err(|source| CourseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Position of a named marker.
    pub fn marker(&self, name: &str) -> Option<Vec3> {
        self.markers
            .iter()
            .find(|m| m.name == name)
            .map(|m| Vec3::from(m.position))
    }

    /// Check required markers, terrain and model files.
    pub fn validate(&self, base_dir: Option<&Path>) -> Result<(), CourseError> {
        for node in [START_NODE, GOAL_NODE] {
            if self.marker(node).is_none() {
                return Err(CourseError::MissingNode(node));
            }
        }

        if !self.surfaces.iter().any(|s| is_terrain(&s.tag)) {
            return Err(CourseError::NoTerrain);
        }

        for (role, path) in &self.models {
            let resolved = match base_dir {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            };
            if !resolved.is_file() {
                return Err(CourseError::MissingModel {
                    role: role.clone(),
                    path: resolved,
                });
            }
        }
        Ok(())
    }

    /// Insert every surface into the collision world.
    pub fn build_world(&self, physics: &mut PhysicsWorld) -> Result<(), CourseError> {
        for surface in &self.surfaces {
            match &surface.shape {
                SurfaceShape::Plane { height } => {
                    physics.add_ground_plane(&surface.tag, *height);
                }
                SurfaceShape::Slab {
                    center,
                    half_extents,
                    yaw_deg,
                } => {
                    physics.add_static_cuboid(
                        &surface.tag,
                        Vec3::from(*center),
                        yaw_deg.to_radians(),
                        Vec3::from(*half_extents),
                    );
                }
                SurfaceShape::Heightfield {
                    heights,
                    rows,
                    cols,
                    size,
                    offset,
                } => {
                    physics
                        .add_heightfield(
                            &surface.tag,
                            heights,
                            *rows,
                            *cols,
                            size[0],
                            size[1],
                            offset[0],
                            offset[1],
                        )
                        .ok_or_else(|| CourseError::InvalidSurface(surface.tag.clone()))?;
                }
            }
        }
        log::debug!(
            "Built course '{}' with {} surface(s)",
            self.name,
            physics.surface_count()
        );
        Ok(())
    }
}

/// Where a run gets its course from.
#[derive(Debug, Clone)]
pub enum CourseSource {
    File(PathBuf),
    Inline(Box<CourseDef>),
}

impl CourseSource {
    /// Load and validate the course. Called on every run start, so edits to
    /// the file show up on restart.
    pub fn load(&self) -> Result<CourseDef, CourseError> {
        match self {
            CourseSource::File(path) => {
                let course = CourseDef::from_file(path)?;
                course.validate(path.parent())?;
                Ok(course)
            }
            CourseSource::Inline(course) => {
                course.validate(None)?;
                Ok(course.as_ref().clone())
            }
        }
    }
}
