//! Combat domain: attack, recoil, damage and heal systems.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::attacks::perform_attack;
use crate::combat::components::{Attackable, Health};
use crate::combat::events::{DamageRequest, EnemyHitEvent, HealthChangedEvent};
use crate::content::AbilityConfig;
use crate::movement::{
    Grounded, MovementInput, Player, PlayerState, PlayerTransition, PlayerTransitions,
    RuntimeCounters,
};
use crate::presentation::{AnimFlag, AnimTrigger, Animator, EffectKind, EffectRequest};

// ============================================================================
// Controller steps
// ============================================================================

/// Advance the attack cooldown and consume a press once it has elapsed.
pub(crate) fn attack_ready(
    counters: &mut RuntimeCounters,
    attack_pressed: bool,
    dt: f32,
    config: &AbilityConfig,
) -> bool {
    counters.time_since_attack += dt;
    if attack_pressed && counters.time_since_attack >= config.time_between_attack {
        counters.time_since_attack = 0.0;
        true
    } else {
        false
    }
}

fn stop_recoil_x(state: &mut PlayerState, counters: &mut RuntimeCounters) {
    counters.steps_x_recoiled = 0;
    state.recoiling_x = false;
}

fn stop_recoil_y(state: &mut PlayerState, counters: &mut RuntimeCounters) {
    counters.steps_y_recoiled = 0;
    state.recoiling_y = false;
}

/// One fixed step of recoil. Each axis overrides velocity for exactly its
/// configured number of steps; landing ends vertical recoil at once.
pub(crate) fn recoil_step(
    state: &mut PlayerState,
    counters: &mut RuntimeCounters,
    velocity: &mut LinearVelocity,
    gravity: &mut GravityScale,
    y_axis: f32,
    grounded: bool,
    config: &AbilityConfig,
) {
    if state.recoiling_x {
        velocity.0 = Vec2::new(-state.facing_sign() * config.recoil_x_speed, 0.0);
    }

    if state.recoiling_y {
        gravity.0 = 0.0;
        velocity.y = if y_axis < 0.0 {
            config.recoil_y_speed
        } else {
            -config.recoil_y_speed
        };
        counters.air_jump_counter = 0;
    } else {
        gravity.0 = config.gravity_scale;
    }

    if state.recoiling_x {
        counters.steps_x_recoiled += 1;
        if counters.steps_x_recoiled >= config.recoil_x_steps {
            stop_recoil_x(state, counters);
        }
    } else {
        stop_recoil_x(state, counters);
    }

    if state.recoiling_y {
        counters.steps_y_recoiled += 1;
        if counters.steps_y_recoiled >= config.recoil_y_steps {
            stop_recoil_y(state, counters);
        }
    } else {
        stop_recoil_y(state, counters);
    }

    if grounded {
        stop_recoil_y(state, counters);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DamageResult {
    /// Ignored because the player was invincible and invincibility blocks damage
    Blocked,
    Applied { health_changed: bool },
}

/// Subtract the rounded amount and (re)start the invincibility window.
pub(crate) fn take_damage(
    health: &mut Health,
    state: &mut PlayerState,
    transitions: &mut PlayerTransitions,
    amount: f32,
    config: &AbilityConfig,
) -> DamageResult {
    if config.invincibility_blocks_damage && state.invincible {
        return DamageResult::Blocked;
    }

    let rounded = amount.round_ties_even() as i32;
    let health_changed = health.set(health.current().saturating_sub(rounded));

    state.invincible = true;
    transitions
        .0
        .schedule(PlayerTransition::InvincibilityEnd, config.invincibility_time);

    DamageResult::Applied { health_changed }
}

/// Hold-to-heal. Returns true when a point of health was restored.
pub(crate) fn heal_step(
    health: &mut Health,
    state: &mut PlayerState,
    counters: &mut RuntimeCounters,
    heal_held: bool,
    dt: f32,
    config: &AbilityConfig,
) -> bool {
    if heal_held && !health.is_full() && !state.jumping && !state.dashing {
        state.healing = true;
        counters.heal_timer += dt;
        if counters.heal_timer >= config.time_to_heal {
            counters.heal_timer = 0.0;
            return health.set(health.current() + 1);
        }
    } else {
        state.healing = false;
        counters.heal_timer = 0.0;
    }
    false
}

// ============================================================================
// Systems
// ============================================================================

pub(crate) fn player_attack(
    time: Res<Time>,
    input: Res<MovementInput>,
    config: Res<AbilityConfig>,
    spatial_query: SpatialQuery,
    colliders: Query<&ColliderOf>,
    targets: Query<&GlobalTransform, With<Attackable>>,
    mut hit_events: MessageWriter<EnemyHitEvent>,
    mut effects: MessageWriter<EffectRequest>,
    mut query: Query<
        (
            Entity,
            &Transform,
            &mut PlayerState,
            &mut RuntimeCounters,
            &Grounded,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, transform, mut state, mut counters, grounded, mut animator) in &mut query {
        if state.dashing {
            continue;
        }

        if !attack_ready(&mut counters, input.attack_just_pressed, dt, &config) {
            continue;
        }

        animator.trigger(AnimTrigger::Attacking);

        let outcome = perform_attack(
            entity,
            transform.translation.truncate(),
            &mut state,
            input.axis.y,
            grounded.0,
            &config,
            &spatial_query,
            |collider| {
                let owner = colliders.get(collider).map_or(collider, |c| c.body);
                targets
                    .get(owner)
                    .ok()
                    .map(|target| (owner, target.translation().truncate()))
            },
        );

        debug!(
            "Player attack: {:?} box {:?} at ({:.1}, {:.1}), hits={}",
            outcome.direction,
            outcome.size,
            outcome.center.x,
            outcome.center.y,
            outcome.hits.len()
        );

        effects.write(EffectRequest {
            kind: EffectKind::Slash,
            position: outcome.center,
            angle_degrees: outcome.direction.effect_angle_degrees(),
            flip_x: !state.looking_right,
            lifetime: config.slash_effect_lifetime,
        });

        hit_events.write_batch(outcome.hits);
    }
}

pub(crate) fn apply_recoil(
    input: Res<MovementInput>,
    config: Res<AbilityConfig>,
    mut query: Query<
        (
            &mut PlayerState,
            &mut RuntimeCounters,
            &mut LinearVelocity,
            &mut GravityScale,
            &Grounded,
        ),
        With<Player>,
    >,
) {
    for (mut state, mut counters, mut velocity, mut gravity, grounded) in &mut query {
        if state.dashing {
            continue;
        }

        let was_recoiling = (state.recoiling_x, state.recoiling_y);
        recoil_step(
            &mut state,
            &mut counters,
            &mut velocity,
            &mut gravity,
            input.axis.y,
            grounded.0,
            &config,
        );

        if was_recoiling.0 && !state.recoiling_x {
            debug!("Recoil X finished");
        }
        if was_recoiling.1 && !state.recoiling_y {
            debug!("Recoil Y finished, grounded={}", grounded.0);
        }
    }
}

/// Health notifications are coalesced: one `HealthChangedEvent` per changed
/// entity per frame, carrying the health left after every request.
pub(crate) fn apply_damage_requests(
    mut requests: MessageReader<DamageRequest>,
    config: Res<AbilityConfig>,
    mut health_events: MessageWriter<HealthChangedEvent>,
    mut effects: MessageWriter<EffectRequest>,
    mut query: Query<
        (
            &Transform,
            &mut Health,
            &mut PlayerState,
            &mut PlayerTransitions,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    let mut changed: Vec<Entity> = Vec::new();

    for request in requests.read() {
        let Ok((transform, mut health, mut state, mut transitions, mut animator)) =
            query.get_mut(request.target)
        else {
            warn!("Damage request for non-player entity {:?}", request.target);
            continue;
        };

        let result = take_damage(
            &mut health,
            &mut state,
            &mut transitions,
            request.amount,
            &config,
        );

        let DamageResult::Applied { health_changed } = result else {
            debug!("Damage {} blocked by invincibility", request.amount);
            continue;
        };

        if health_changed && !changed.contains(&request.target) {
            changed.push(request.target);
        }

        animator.trigger(AnimTrigger::TakeDamage);
        effects.write(EffectRequest {
            kind: EffectKind::DamageSpurt,
            position: transform.translation.truncate(),
            angle_degrees: 0.0,
            flip_x: false,
            lifetime: config.damage_effect_lifetime,
        });

        info!(
            "Player took {} damage: health={}/{} ({:.0}%)",
            request.amount,
            health.current(),
            health.max(),
            health.percent() * 100.0
        );
        if let Some(remaining) = transitions
            .0
            .remaining_secs(PlayerTransition::InvincibilityEnd)
        {
            debug!("Invincible for {:.2}s", remaining);
        }
        if health.is_dead() {
            info!("Player health depleted");
        }
    }

    for entity in changed {
        let Ok((_, health, ..)) = query.get(entity) else {
            continue;
        };
        health_events.write(HealthChangedEvent {
            entity,
            current: health.current(),
            max: health.max(),
        });
    }
}

pub(crate) fn heal(
    time: Res<Time>,
    input: Res<MovementInput>,
    config: Res<AbilityConfig>,
    mut health_events: MessageWriter<HealthChangedEvent>,
    mut query: Query<
        (
            Entity,
            &mut Health,
            &mut PlayerState,
            &mut RuntimeCounters,
            &mut Animator,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut health, mut state, mut counters, mut animator) in &mut query {
        if state.dashing {
            continue;
        }

        let healed = heal_step(
            &mut health,
            &mut state,
            &mut counters,
            input.heal_held,
            dt,
            &config,
        );
        animator.set(AnimFlag::Healing, state.healing);

        if healed {
            health_events.write(HealthChangedEvent {
                entity,
                current: health.current(),
                max: health.max(),
            });
            debug!("Healed: health={}/{}", health.current(), health.max());
        }
    }
}
