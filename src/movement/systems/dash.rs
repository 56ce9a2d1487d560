//! Movement domain: dash start and the delayed transitions that end it.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::AbilityConfig;
use crate::movement::{
    DashState, Grounded, MovementInput, Player, PlayerState, PlayerTransition, PlayerTransitions,
};
use crate::presentation::{AnimTrigger, Animator};

/// Start a dash if allowed. Landing always clears `dashed`, whatever the cooldown.
#[allow(clippy::too_many_arguments)]
pub(crate) fn try_start_dash(
    state: &mut PlayerState,
    dash: &mut DashState,
    transitions: &mut PlayerTransitions,
    velocity: &mut LinearVelocity,
    gravity: &mut GravityScale,
    dash_pressed: bool,
    grounded: bool,
    config: &AbilityConfig,
) -> bool {
    let started = dash_pressed && dash.can_dash && !dash.dashed;
    if started {
        dash.can_dash = false;
        dash.dashed = true;
        state.dashing = true;
        gravity.0 = 0.0;
        velocity.0 = Vec2::new(state.facing_sign() * config.dash_speed, 0.0);
        transitions.0.schedule(PlayerTransition::DashEnd, config.dash_time);
    }

    if grounded {
        dash.dashed = false;
    }

    started
}

/// Apply a delayed transition that just completed.
pub(crate) fn apply_transition(
    transition: PlayerTransition,
    state: &mut PlayerState,
    dash: &mut DashState,
    transitions: &mut PlayerTransitions,
    gravity: &mut GravityScale,
    config: &AbilityConfig,
) {
    match transition {
        PlayerTransition::DashEnd => {
            gravity.0 = config.gravity_scale;
            state.dashing = false;
            transitions
                .0
                .schedule(PlayerTransition::DashCooldownEnd, config.dash_cooldown);
        }
        PlayerTransition::DashCooldownEnd => {
            dash.can_dash = true;
        }
        PlayerTransition::InvincibilityEnd => {
            state.invincible = false;
        }
    }
}

pub(crate) fn advance_player_transitions(
    time: Res<Time>,
    config: Res<AbilityConfig>,
    mut query: Query<
        (
            &mut PlayerState,
            &mut DashState,
            &mut PlayerTransitions,
            &mut GravityScale,
        ),
        With<Player>,
    >,
) {
    for (mut state, mut dash, mut transitions, mut gravity) in &mut query {
        if transitions.0.is_empty() {
            continue;
        }
        for transition in transitions.0.tick(time.delta()) {
            apply_transition(
                transition,
                &mut state,
                &mut dash,
                &mut transitions,
                &mut gravity,
                &config,
            );
            debug!(
                "Transition fired: {:?}, dash phase now {:?}",
                transition,
                dash.phase(&state)
            );
        }
    }
}

pub(crate) fn start_dash(
    input: Res<MovementInput>,
    config: Res<AbilityConfig>,
    mut query: Query<
        (
            &mut PlayerState,
            &mut DashState,
            &mut PlayerTransitions,
            &mut LinearVelocity,
            &mut GravityScale,
            &Grounded,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    for (mut state, mut dash, mut transitions, mut velocity, mut gravity, grounded, mut animator) in
        &mut query
    {
        if state.dashing {
            continue;
        }

        let started = try_start_dash(
            &mut state,
            &mut dash,
            &mut transitions,
            &mut velocity,
            &mut gravity,
            input.dash_just_pressed,
            grounded.0,
            &config,
        );

        if started {
            animator.trigger(AnimTrigger::Dashing);
            debug!(
                "Dash started: direction={}, grounded={}",
                state.facing_sign(),
                grounded.0
            );
        }
    }
}
