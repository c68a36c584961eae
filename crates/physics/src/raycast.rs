//! Downward ground probes.

use crate::collision::CollisionGroup;
use crate::PhysicsWorld;
use glam::Vec3;
use rapier3d::prelude::*;

/// How far a downward probe travels from its origin.
pub const PROBE_RANGE: f32 = 2000.0;

/// One surface crossed by a ground probe.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceHit {
    /// Name tag of the surface that was hit.
    pub surface: String,
    /// World position of the hit.
    pub point: Vec3,
}

impl SurfaceHit {
    pub fn new(surface: impl Into<String>, point: Vec3) -> Self {
        Self {
            surface: surface.into(),
            point,
        }
    }
}

/// Anything that can answer "what lies straight below this point".
///
/// Implementations only do the geometric intersection; choosing which hit
/// counts as ground is up to the caller. Results are not cached between
/// calls.
pub trait SurfaceProbe {
    /// Every surface hit by a ray from `origin` straight down, in no
    /// particular order.
    fn cast_down(&self, origin: Vec3) -> Vec<SurfaceHit>;
}

impl SurfaceProbe for PhysicsWorld {
    fn cast_down(&self, origin: Vec3) -> Vec<SurfaceHit> {
        let ray = Ray::new(point![origin.x, origin.y, origin.z], vector![0.0, -1.0, 0.0]);
        let mut hits = Vec::new();

        self.query_pipeline.intersections_with_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            PROBE_RANGE,
            true,
            CollisionGroup::probe_filter(),
            |collider, intersection: RayIntersection| {
                let point = ray.point_at(intersection.time_of_impact);
                let surface = self.surface_tag(collider).unwrap_or_default();
                hits.push(SurfaceHit::new(surface, Vec3::new(point.x, point.y, point.z)));
                true // Continue searching
            },
        );

        hits
    }
}
