//! Movement domain: per-frame input snapshot.

use bevy::prelude::*;

/// Input sampled once per frame. Axes are raw: -1, 0 or 1 from the keyboard.
#[derive(Resource, Debug, Default, Clone)]
pub struct MovementInput {
    pub axis: Vec2,
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub dash_just_pressed: bool,
    pub attack_just_pressed: bool,
    pub heal_held: bool,
}
