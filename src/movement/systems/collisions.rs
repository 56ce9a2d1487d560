//! Movement domain: ground detection.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GroundSensor, Grounded, Player};

/// Refresh the ground check for every player. Runs at the start of each frame
/// and again before each fixed step so recoil sees the latest contact.
pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &GroundSensor, &mut Grounded), With<Player>>,
) {
    for (transform, sensor, mut grounded) in &mut query {
        let on_ground = sensor.is_grounded(transform.translation.truncate(), &spatial_query);

        if on_ground != grounded.0 {
            debug!(
                "{}: position=({:.1}, {:.1})",
                if on_ground { "Landed" } else { "Left ground" },
                transform.translation.x,
                transform.translation.y
            );
        }

        grounded.set_if_neq(Grounded(on_ground));
    }
}
