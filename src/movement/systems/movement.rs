//! Movement domain: facing and horizontal walking.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::AbilityConfig;
use crate::movement::{Grounded, MovementInput, Player, PlayerState};
use crate::presentation::{AnimFlag, Animator};

/// Face the direction of horizontal input; zero input keeps the current facing.
pub(crate) fn face_input(state: &mut PlayerState, x_axis: f32) {
    if x_axis < 0.0 {
        state.looking_right = false;
    } else if x_axis > 0.0 {
        state.looking_right = true;
    }
}

/// Horizontal velocity follows the axis directly; vertical velocity is untouched.
pub(crate) fn walk(velocity: &mut LinearVelocity, x_axis: f32, walk_speed: f32) {
    velocity.x = walk_speed * x_axis;
}

pub(crate) fn update_facing(
    input: Res<MovementInput>,
    mut query: Query<(&mut PlayerState, &mut Sprite), With<Player>>,
) {
    for (mut state, mut sprite) in &mut query {
        if state.dashing {
            continue;
        }

        face_input(&mut state, input.axis.x);
        sprite.flip_x = !state.looking_right;
    }
}

pub(crate) fn apply_horizontal_movement(
    input: Res<MovementInput>,
    config: Res<AbilityConfig>,
    mut query: Query<(&PlayerState, &Grounded, &mut LinearVelocity, &mut Animator), With<Player>>,
) {
    for (state, grounded, mut velocity, mut animator) in &mut query {
        if state.dashing {
            continue;
        }

        walk(&mut velocity, input.axis.x, config.walk_speed);
        animator.set(AnimFlag::Walking, velocity.x != 0.0 && grounded.0);
    }
}
