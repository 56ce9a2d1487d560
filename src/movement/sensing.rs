//! Movement domain: spatial queries the controller issues against the physics world.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, GroundSensor};

/// Ray and box queries against a single physics layer.
pub trait SpatialSensing {
    /// Whether a ray from `origin` hits anything on `layer` within `max_distance`.
    fn ray_hits(&self, origin: Vec2, direction: Dir2, max_distance: f32, layer: GameLayer) -> bool;

    /// Colliders on `layer` overlapping an axis-aligned box.
    fn overlap_box(&self, center: Vec2, size: Vec2, layer: GameLayer) -> Vec<Entity>;
}

impl SpatialSensing for SpatialQuery<'_, '_> {
    fn ray_hits(&self, origin: Vec2, direction: Dir2, max_distance: f32, layer: GameLayer) -> bool {
        let filter = SpatialQueryFilter::from_mask(layer);
        self.cast_ray(origin, direction, max_distance, true, &filter)
            .is_some()
    }

    fn overlap_box(&self, center: Vec2, size: Vec2, layer: GameLayer) -> Vec<Entity> {
        let filter = SpatialQueryFilter::from_mask(layer);
        let shape = Collider::rectangle(size.x, size.y);
        self.shape_intersections(&shape, center, 0.0, &filter)
    }
}

impl GroundSensor {
    /// Centre, right and left ray origins for a body at `position`.
    pub fn ray_origins(&self, position: Vec2) -> [Vec2; 3] {
        let centre = position + self.origin;
        [
            centre,
            centre + Vec2::new(self.spread_x, 0.0),
            centre - Vec2::new(self.spread_x, 0.0),
        ]
    }

    /// Fresh ground check: true if any of the three rays hits ground.
    pub fn is_grounded(&self, position: Vec2, sensing: &impl SpatialSensing) -> bool {
        self.ray_origins(position)
            .into_iter()
            .any(|origin| sensing.ray_hits(origin, Dir2::NEG_Y, self.ray_length, GameLayer::Ground))
    }
}
