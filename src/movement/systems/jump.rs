//! Movement domain: coyote time, jump buffering, ground and air jumps.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::AbilityConfig;
use crate::movement::{Grounded, MovementInput, Player, PlayerState, RuntimeCounters};
use crate::presentation::{AnimFlag, Animator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JumpKind {
    Ground,
    Air,
}

/// Start-of-frame bookkeeping. Runs even while dashing.
pub(crate) fn update_jump_bookkeeping(
    state: &mut PlayerState,
    counters: &mut RuntimeCounters,
    grounded: bool,
    jump_pressed: bool,
    dt: f32,
    config: &AbilityConfig,
) {
    if grounded {
        state.jumping = false;
        counters.coyote_time_counter = config.coyote_time;
        counters.air_jump_counter = 0;
    } else {
        counters.coyote_time_counter -= dt;
    }

    if jump_pressed {
        counters.jump_buffer_counter = config.jump_buffer_frames;
    } else {
        counters.jump_buffer_counter -= 1;
    }
}

/// Jump-cut on release, then at most one jump: a buffered ground jump while
/// coyote time remains, otherwise an air jump on a fresh press.
pub(crate) fn try_jump(
    state: &mut PlayerState,
    counters: &mut RuntimeCounters,
    velocity: &mut LinearVelocity,
    input: &MovementInput,
    grounded: bool,
    config: &AbilityConfig,
) -> Option<JumpKind> {
    if input.jump_just_released && velocity.y > 0.0 {
        velocity.y = 0.0;
        state.jumping = false;
    }

    if state.jumping {
        return None;
    }

    if counters.jump_buffer_counter > 0 && counters.coyote_time_counter > 0.0 {
        velocity.y = config.jump_force;
        state.jumping = true;
        Some(JumpKind::Ground)
    } else if !grounded
        && counters.air_jump_counter < config.max_air_jumps
        && input.jump_just_pressed
    {
        state.jumping = true;
        counters.air_jump_counter += 1;
        velocity.y = config.jump_force;
        Some(JumpKind::Air)
    } else {
        None
    }
}

pub(crate) fn update_jump_variables(
    time: Res<Time>,
    input: Res<MovementInput>,
    config: Res<AbilityConfig>,
    mut query: Query<(&mut PlayerState, &mut RuntimeCounters, &Grounded), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, mut counters, grounded) in &mut query {
        update_jump_bookkeeping(
            &mut state,
            &mut counters,
            grounded.0,
            input.jump_just_pressed,
            dt,
            &config,
        );
    }
}

pub(crate) fn apply_jump(
    input: Res<MovementInput>,
    config: Res<AbilityConfig>,
    mut query: Query<
        (
            &mut PlayerState,
            &mut RuntimeCounters,
            &Grounded,
            &mut LinearVelocity,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    for (mut state, mut counters, grounded, mut velocity, mut animator) in &mut query {
        if state.dashing {
            continue;
        }

        if let Some(kind) = try_jump(
            &mut state,
            &mut counters,
            &mut velocity,
            &input,
            grounded.0,
            &config,
        ) {
            debug!(
                "{:?} jump: buffer={}, coyote={:.3}, air_jumps={}",
                kind,
                counters.jump_buffer_counter,
                counters.coyote_time_counter,
                counters.air_jump_counter
            );
        }

        animator.set(AnimFlag::Jumping, !grounded.0);
    }
}
