//! Static course geometry held in Rapier collider sets.

use crate::collision::CollisionGroup;
use glam::Vec3;
use rapier3d::na::{Isometry3, Vector3};
use rapier3d::prelude::*;
use std::collections::HashMap;

/// Collision world containing the course surfaces and their name tags.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub island_manager: IslandManager,
    pub query_pipeline: QueryPipeline,
    surface_tags: HashMap<ColliderHandle, String>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            surface_tags: HashMap::new(),
        }
    }

    /// Update query pipeline for raycasting.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    fn insert_surface(&mut self, tag: &str, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.surface_tags.insert(handle, tag.to_string());
        self.update_query_pipeline();
        handle
    }

    /// Add an infinite horizontal plane at the given height.
    pub fn add_ground_plane(&mut self, tag: &str, height: f32) -> ColliderHandle {
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .translation(vector![0.0, height, 0.0])
            .collision_groups(CollisionGroup::for_surface(tag))
            .build();
        self.insert_surface(tag, collider)
    }

    /// Add a static cuboid surface (slabs, ramps, rocks).
    /// `translation`: world position of center. `rotation_y_rad`: rotation around
    /// the Y axis in radians.
    /// `half_extents`: half sizes in local X, Y, Z (after rotation).
    pub fn add_static_cuboid(
        &mut self,
        tag: &str,
        translation: Vec3,
        rotation_y_rad: f32,
        half_extents: Vec3,
    ) -> ColliderHandle {
        let tra = vector![translation.x, translation.y, translation.z];
        let axisangle = Vector3::y_axis().into_inner() * (rotation_y_rad as Real);
        let position = Isometry3::new(tra, axisangle);
        let collider = ColliderBuilder::cuboid(
            half_extents.x as Real,
            half_extents.y as Real,
            half_extents.z as Real,
        )
        .position(position)
        .collision_groups(CollisionGroup::for_surface(tag))
        .build();
        self.insert_surface(tag, collider)
    }

    /// Add a heightfield surface centred on `offset` (x, z).
    /// - `heights`: flat slice of height values in world Y, row-major
    ///   (index = z * ncols + x).
    /// - `nrows`, `ncols`: grid dimensions.
    /// - `size_x`, `size_z`: total extent in world units, spanning -size/2 to
    ///   +size/2 around the offset.
    ///
    /// Returns `None` when the grid is smaller than 2x2 or the slice is too short.
    #[allow(clippy::too_many_arguments)]
    pub fn add_heightfield(
        &mut self,
        tag: &str,
        heights: &[f32],
        nrows: usize,
        ncols: usize,
        size_x: f32,
        size_z: f32,
        offset_x: f32,
        offset_z: f32,
    ) -> Option<ColliderHandle> {
        if nrows < 2 || ncols < 2 || heights.len() < nrows * ncols {
            log::warn!(
                "Rejected heightfield '{}': {}x{} grid with {} heights",
                tag,
                nrows,
                ncols,
                heights.len()
            );
            return None;
        }

        let heights_matrix = DMatrix::from_fn(nrows, ncols, |i, j| heights[i * ncols + j] as Real);
        let scale = vector![size_x, 1.0, size_z];

        let collider = ColliderBuilder::heightfield(heights_matrix, scale)
            .translation(vector![offset_x, 0.0, offset_z])
            .collision_groups(CollisionGroup::for_surface(tag))
            .build();
        Some(self.insert_surface(tag, collider))
    }

    /// Name tag of a surface.
    pub fn surface_tag(&self, handle: ColliderHandle) -> Option<&str> {
        self.surface_tags.get(&handle).map(String::as_str)
    }

    /// Number of surfaces in the world.
    pub fn surface_count(&self) -> usize {
        self.surface_tags.len()
    }

    /// Remove a collider by its handle.
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true,
        );
        self.surface_tags.remove(&handle);
        self.update_query_pipeline();
    }

    /// Drop every surface (course teardown).
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
