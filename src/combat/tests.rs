//! Combat domain: tests for attacks, recoil, damage and healing.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::time::{TimePlugin, TimeUpdateStrategy};

use super::systems::{
    DamageResult, apply_damage_requests, apply_recoil, attack_ready, heal, heal_step,
    player_attack, recoil_step, take_damage,
};
use super::{
    AttackDirection, DamageRequest, EnemyHitEvent, Health, HealthChangedEvent, hitbox_center,
    perform_attack, resolve_hits,
};
use crate::content::AbilityConfig;
use crate::movement::{
    GameLayer, Grounded, MovementInput, Player, PlayerState, PlayerTransition,
    PlayerTransitions, RuntimeCounters, SpatialSensing,
};
use crate::presentation::{AnimFlag, Animator, EffectRequest};

/// Colliders at fixed points; a box overlaps every point inside it.
struct Colliders {
    points: Vec<(Entity, Vec2)>,
}

impl SpatialSensing for Colliders {
    fn ray_hits(&self, _origin: Vec2, _direction: Dir2, _max_distance: f32, _layer: GameLayer) -> bool {
        false
    }

    fn overlap_box(&self, center: Vec2, size: Vec2, layer: GameLayer) -> Vec<Entity> {
        if !matches!(layer, GameLayer::Attackable) {
            return Vec::new();
        }
        let half = size / 2.0;
        self.points
            .iter()
            .filter(|(_, p)| (p.x - center.x).abs() <= half.x && (p.y - center.y).abs() <= half.y)
            .map(|(entity, _)| *entity)
            .collect()
    }
}

fn entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

// -----------------------------------------------------------------------------
// Health
// -----------------------------------------------------------------------------

#[test]
fn test_health_starts_full() {
    let health = Health::new(5);
    assert_eq!(health.current(), 5);
    assert_eq!(health.max(), 5);
    assert!(health.is_full());
    assert_eq!(health.percent(), 1.0);
}

#[test]
fn test_health_set_clamps_and_reports_change() {
    let mut health = Health::new(5);

    assert!(!health.set(5));
    assert!(!health.set(9));
    assert!(health.set(-3));
    assert_eq!(health.current(), 0);
    assert!(health.is_dead());
    assert!(!health.set(0));
}

// -----------------------------------------------------------------------------
// Damage
// -----------------------------------------------------------------------------

#[test]
fn test_damage_during_invincibility_still_applies() {
    let config = AbilityConfig::default();
    let mut health = Health::new(5);
    let mut state = PlayerState::default();
    let mut transitions = PlayerTransitions::default();

    let first = take_damage(&mut health, &mut state, &mut transitions, 2.0, &config);
    assert_eq!(first, DamageResult::Applied { health_changed: true });
    assert_eq!(health.current(), 3);
    assert!(state.invincible);
    assert!(transitions.0.is_pending(PlayerTransition::InvincibilityEnd));

    let second = take_damage(&mut health, &mut state, &mut transitions, 10.0, &config);
    assert_eq!(second, DamageResult::Applied { health_changed: true });
    assert_eq!(health.current(), 0);
}

#[test]
fn test_zero_damage_changes_nothing() {
    let config = AbilityConfig::default();
    let mut health = Health::new(5);
    let mut state = PlayerState::default();
    let mut transitions = PlayerTransitions::default();

    take_damage(&mut health, &mut state, &mut transitions, 2.0, &config);
    let result = take_damage(&mut health, &mut state, &mut transitions, 0.0, &config);

    assert_eq!(result, DamageResult::Applied { health_changed: false });
    assert_eq!(health.current(), 3);
}

#[test]
fn test_damage_rounds_half_to_even() {
    let config = AbilityConfig::default();
    let mut state = PlayerState::default();
    let mut transitions = PlayerTransitions::default();

    let mut health = Health::new(5);
    take_damage(&mut health, &mut state, &mut transitions, 2.5, &config);
    assert_eq!(health.current(), 3);

    let mut health = Health::new(5);
    take_damage(&mut health, &mut state, &mut transitions, 1.5, &config);
    assert_eq!(health.current(), 3);
}

#[test]
fn test_invincibility_can_block_damage() {
    let config = AbilityConfig {
        invincibility_blocks_damage: true,
        ..default()
    };
    let mut health = Health::new(5);
    let mut state = PlayerState::default();
    let mut transitions = PlayerTransitions::default();

    take_damage(&mut health, &mut state, &mut transitions, 1.0, &config);
    let result = take_damage(&mut health, &mut state, &mut transitions, 1.0, &config);

    assert_eq!(result, DamageResult::Blocked);
    assert_eq!(health.current(), 4);
}

// -----------------------------------------------------------------------------
// Attacks
// -----------------------------------------------------------------------------

#[test]
fn test_attack_direction_selection() {
    assert_eq!(AttackDirection::select(0.0, true), AttackDirection::Side);
    assert_eq!(AttackDirection::select(0.0, false), AttackDirection::Side);
    assert_eq!(AttackDirection::select(-1.0, true), AttackDirection::Side);
    assert_eq!(AttackDirection::select(1.0, true), AttackDirection::Up);
    assert_eq!(AttackDirection::select(1.0, false), AttackDirection::Up);
    assert_eq!(AttackDirection::select(-1.0, false), AttackDirection::Down);
}

#[test]
fn test_side_hitbox_mirrors_with_facing() {
    let config = AbilityConfig::default();
    let hitbox = AttackDirection::Side.hitbox(&config);

    assert_eq!(hitbox_center(Vec2::ZERO, hitbox, 1.0), Vec2::new(32.0, 0.0));
    assert_eq!(hitbox_center(Vec2::ZERO, hitbox, -1.0), Vec2::new(-32.0, 0.0));
}

#[test]
fn test_grounded_side_attack_hits_two_targets_once() {
    let config = AbilityConfig::default();
    let ids = entities(4);
    let (player, target_a, target_b, target_b_extra_collider) = (ids[0], ids[1], ids[2], ids[3]);

    let scene = Colliders {
        points: vec![
            (target_a, Vec2::new(20.0, 0.0)),
            (target_b, Vec2::new(40.0, 5.0)),
            (target_b_extra_collider, Vec2::new(44.0, -5.0)),
        ],
    };
    let owners = [
        (target_a, (target_a, Vec2::new(20.0, 0.0))),
        (target_b, (target_b, Vec2::new(40.0, 0.0))),
        (target_b_extra_collider, (target_b, Vec2::new(40.0, 0.0))),
    ];

    let mut state = PlayerState::default();
    let outcome = perform_attack(
        player,
        Vec2::ZERO,
        &mut state,
        0.0,
        true,
        &config,
        &scene,
        |collider| {
            owners
                .iter()
                .find(|(c, _)| *c == collider)
                .map(|(_, owner)| *owner)
        },
    );

    assert_eq!(outcome.direction, AttackDirection::Side);
    assert_eq!(outcome.hits.len(), 2);
    assert_eq!(outcome.hits[0].target, target_a);
    assert_eq!(outcome.hits[1].target, target_b);
    assert_eq!(outcome.hits[0].direction, Vec2::NEG_X);
    assert_eq!(outcome.hits[0].knockback_speed, config.recoil_x_speed);
    assert!(state.recoiling_x);
    assert!(!state.recoiling_y);
}

#[test]
fn test_whiffed_attack_does_not_recoil() {
    let config = AbilityConfig::default();
    let ids = entities(2);
    let scene = Colliders {
        // Behind the player
        points: vec![(ids[1], Vec2::new(-30.0, 0.0))],
    };

    let mut state = PlayerState::default();
    let outcome = perform_attack(
        ids[0],
        Vec2::ZERO,
        &mut state,
        0.0,
        true,
        &config,
        &scene,
        |collider| Some((collider, Vec2::new(-30.0, 0.0))),
    );

    assert!(outcome.hits.is_empty());
    assert!(!state.recoiling_x);
}

#[test]
fn test_down_attack_in_air_recoils_vertically() {
    let config = AbilityConfig::default();
    let ids = entities(2);
    let below = Vec2::new(0.0, -40.0);
    let scene = Colliders {
        points: vec![(ids[1], below)],
    };

    let mut state = PlayerState::default();
    let outcome = perform_attack(
        ids[0],
        Vec2::ZERO,
        &mut state,
        -1.0,
        false,
        &config,
        &scene,
        |collider| Some((collider, below)),
    );

    assert_eq!(outcome.direction, AttackDirection::Down);
    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(outcome.hits[0].direction, Vec2::Y);
    assert!(state.recoiling_y);
    assert!(!state.recoiling_x);
}

#[test]
fn test_resolve_hits_skips_attacker() {
    let ids = entities(2);
    let hits = resolve_hits(
        ids[0],
        Vec2::ZERO,
        [(ids[0], Vec2::ZERO), (ids[1], Vec2::new(10.0, 0.0))],
        1.0,
        300.0,
    );

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].target, ids[1]);
}

#[test]
fn test_attack_cooldown() {
    let config = AbilityConfig::default();
    let mut counters = RuntimeCounters::default();

    assert!(!attack_ready(&mut counters, true, 0.15, &config));
    assert!(!attack_ready(&mut counters, false, 0.15, &config));
    assert!(attack_ready(&mut counters, true, 0.0, &config));
    assert_eq!(counters.time_since_attack, 0.0);

    // Immediate second press is too soon
    assert!(!attack_ready(&mut counters, true, 0.1, &config));
}

// -----------------------------------------------------------------------------
// Recoil
// -----------------------------------------------------------------------------

struct Body {
    state: PlayerState,
    counters: RuntimeCounters,
    velocity: LinearVelocity,
    gravity: GravityScale,
}

impl Body {
    fn new() -> Self {
        Self {
            state: PlayerState::default(),
            counters: RuntimeCounters::default(),
            velocity: LinearVelocity::default(),
            gravity: GravityScale(1.0),
        }
    }

    fn step(&mut self, y_axis: f32, grounded: bool, config: &AbilityConfig) {
        recoil_step(
            &mut self.state,
            &mut self.counters,
            &mut self.velocity,
            &mut self.gravity,
            y_axis,
            grounded,
            config,
        );
    }
}

#[test]
fn test_horizontal_recoil_lasts_exact_steps() {
    let config = AbilityConfig::default();
    let mut body = Body::new();
    body.state.recoiling_x = true;

    for _ in 0..config.recoil_x_steps - 1 {
        body.step(0.0, true, &config);
        assert!(body.state.recoiling_x);
        assert_eq!(body.velocity.0, Vec2::new(-config.recoil_x_speed, 0.0));
    }

    body.step(0.0, true, &config);
    assert!(!body.state.recoiling_x);
    assert_eq!(body.counters.steps_x_recoiled, 0);
}

#[test]
fn test_horizontal_recoil_pushes_away_from_facing() {
    let config = AbilityConfig::default();
    let mut body = Body::new();
    body.state.looking_right = false;
    body.state.recoiling_x = true;

    body.step(0.0, true, &config);
    assert_eq!(body.velocity.x, config.recoil_x_speed);
}

#[test]
fn test_vertical_recoil_in_air() {
    let config = AbilityConfig::default();
    let mut body = Body::new();
    body.state.recoiling_y = true;
    body.counters.air_jump_counter = 1;

    // Down attack bounces the player up
    body.step(-1.0, false, &config);
    assert_eq!(body.gravity.0, 0.0);
    assert_eq!(body.velocity.y, config.recoil_y_speed);
    assert_eq!(body.counters.air_jump_counter, 0);

    for _ in 1..config.recoil_y_steps {
        body.step(-1.0, false, &config);
    }
    assert!(!body.state.recoiling_y);

    // Next step restores gravity
    body.step(-1.0, false, &config);
    assert_eq!(body.gravity.0, config.gravity_scale);
}

#[test]
fn test_landing_cancels_vertical_recoil() {
    let config = AbilityConfig::default();
    let mut body = Body::new();
    body.state.recoiling_y = true;

    body.step(1.0, true, &config);

    assert_eq!(body.velocity.y, -config.recoil_y_speed);
    assert!(!body.state.recoiling_y);
    assert_eq!(body.counters.steps_y_recoiled, 0);
}

// -----------------------------------------------------------------------------
// Healing
// -----------------------------------------------------------------------------

#[test]
fn test_heal_restores_one_point_per_interval() {
    let config = AbilityConfig::default();
    let mut health = Health::new(5);
    health.set(3);
    let mut state = PlayerState::default();
    let mut counters = RuntimeCounters::default();

    assert!(!heal_step(&mut health, &mut state, &mut counters, true, 0.25, &config));
    assert!(state.healing);
    assert!(heal_step(&mut health, &mut state, &mut counters, true, 0.25, &config));
    assert_eq!(health.current(), 4);
    assert_eq!(counters.heal_timer, 0.0);
}

#[test]
fn test_heal_interrupted_by_release_or_jump() {
    let config = AbilityConfig::default();
    let mut health = Health::new(5);
    health.set(3);
    let mut state = PlayerState::default();
    let mut counters = RuntimeCounters::default();

    heal_step(&mut health, &mut state, &mut counters, true, 0.25, &config);
    heal_step(&mut health, &mut state, &mut counters, false, 0.25, &config);
    assert!(!state.healing);
    assert_eq!(counters.heal_timer, 0.0);

    state.jumping = true;
    assert!(!heal_step(&mut health, &mut state, &mut counters, true, 1.0, &config));
    assert!(!state.healing);
    assert_eq!(health.current(), 3);
}

#[test]
fn test_no_heal_at_full_health() {
    let config = AbilityConfig::default();
    let mut health = Health::new(5);
    let mut state = PlayerState::default();
    let mut counters = RuntimeCounters::default();

    assert!(!heal_step(&mut health, &mut state, &mut counters, true, 1.0, &config));
    assert!(!state.healing);
    assert_eq!(health.current(), 5);
}

// -----------------------------------------------------------------------------
// Frame gating
// -----------------------------------------------------------------------------

/// App running attack, heal and recoil on 100ms frames with no colliders.
fn combat_app(input: MovementInput) -> App {
    let mut app = App::new();
    app.add_plugins(TimePlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(AbilityConfig::default())
        .insert_resource(input)
        .init_resource::<SpatialQueryPipeline>()
        .add_message::<EnemyHitEvent>()
        .add_message::<EffectRequest>()
        .add_message::<HealthChangedEvent>()
        .add_systems(Update, (player_attack, heal, apply_recoil).chain());
    app
}

fn spawn_fighter(app: &mut App, dashing: bool, recoiling_x: bool) -> Entity {
    let mut health = Health::new(5);
    health.set(3);
    let velocity = if dashing {
        Vec2::new(900.0, 0.0)
    } else {
        Vec2::ZERO
    };
    app.world_mut()
        .spawn((
            Player,
            PlayerState {
                dashing,
                recoiling_x,
                ..default()
            },
            RuntimeCounters::default(),
            Grounded(true),
            Animator::default(),
            Transform::default(),
            health,
            LinearVelocity(velocity),
            GravityScale(if dashing { 0.0 } else { 1.0 }),
        ))
        .id()
}

#[test]
fn test_dashing_player_cannot_attack() {
    let mut app = combat_app(MovementInput {
        attack_just_pressed: true,
        ..default()
    });
    let dasher = spawn_fighter(&mut app, true, false);
    let walker = spawn_fighter(&mut app, false, false);

    for _ in 0..3 {
        app.update();
    }

    let world = app.world();
    let cooldown = |entity: Entity| {
        world
            .get::<RuntimeCounters>(entity)
            .map(|c| c.time_since_attack)
    };
    // The cooldown clock does not run during a dash
    assert_eq!(cooldown(dasher), Some(0.0));
    assert!(cooldown(walker).is_some_and(|t| t > 0.0));
    assert!(world.resource::<Messages<EffectRequest>>().is_empty());
}

#[test]
fn test_dashing_player_cannot_heal() {
    let mut app = combat_app(MovementInput {
        heal_held: true,
        ..default()
    });
    let dasher = spawn_fighter(&mut app, true, false);
    let healer = spawn_fighter(&mut app, false, false);

    // 0.6s of held heal
    for _ in 0..7 {
        app.update();
    }

    let world = app.world();
    assert_eq!(world.get::<Health>(dasher).map(Health::current), Some(3));
    assert_eq!(
        world.get::<RuntimeCounters>(dasher).map(|c| c.heal_timer),
        Some(0.0)
    );
    assert_eq!(world.get::<PlayerState>(dasher).map(|s| s.healing), Some(false));
    assert_eq!(
        world.get::<Animator>(dasher).map(|a| a.get(AnimFlag::Healing)),
        Some(false)
    );
    assert_eq!(world.get::<Health>(healer).map(Health::current), Some(4));
}

#[test]
fn test_dashing_player_skips_recoil() {
    let config = AbilityConfig::default();
    let mut app = combat_app(MovementInput::default());
    let dasher = spawn_fighter(&mut app, true, true);
    let walker = spawn_fighter(&mut app, false, true);

    for _ in 0..config.recoil_x_steps {
        app.update();
    }

    let world = app.world();
    assert_eq!(
        world.get::<LinearVelocity>(dasher).map(|v| v.0),
        Some(Vec2::new(900.0, 0.0))
    );
    assert_eq!(world.get::<GravityScale>(dasher).map(|g| g.0), Some(0.0));
    assert_eq!(
        world.get::<PlayerState>(dasher).map(|s| s.recoiling_x),
        Some(true)
    );
    assert_eq!(
        world.get::<RuntimeCounters>(dasher).map(|c| c.steps_x_recoiled),
        Some(0)
    );
    assert_eq!(
        world.get::<PlayerState>(walker).map(|s| s.recoiling_x),
        Some(false)
    );
}

#[test]
fn test_same_frame_damage_notifies_once() {
    let mut app = App::new();
    app.insert_resource(AbilityConfig::default())
        .add_message::<DamageRequest>()
        .add_message::<HealthChangedEvent>()
        .add_message::<EffectRequest>()
        .add_systems(Update, apply_damage_requests);

    let player = app
        .world_mut()
        .spawn((
            Player,
            Transform::default(),
            Health::new(5),
            PlayerState::default(),
            PlayerTransitions::default(),
            Animator::default(),
        ))
        .id();

    for _ in 0..2 {
        app.world_mut().write_message(DamageRequest {
            target: player,
            amount: 1.0,
        });
    }
    app.update();

    let events: Vec<HealthChangedEvent> = app
        .world_mut()
        .resource_mut::<Messages<HealthChangedEvent>>()
        .drain()
        .collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].entity, player);
    assert_eq!(events[0].current, 3);
    assert_eq!(events[0].max, 5);

    // Both hits still show an effect
    assert_eq!(app.world().resource::<Messages<EffectRequest>>().len(), 2);
}
