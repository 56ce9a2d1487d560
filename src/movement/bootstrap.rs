//! Movement domain: player bootstrap from the loaded ability config.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{Health, HealthChangedEvent};
use crate::content::AbilityConfig;
use crate::movement::{
    DashState, GameLayer, GroundSensor, Grounded, Player, PlayerState, PlayerTransitions,
    RuntimeCounters,
};
use crate::presentation::Animator;

/// Player body size in world units
pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);

/// Spawn the single controlled player with every collaborator it needs.
/// A second player is never spawned; the existing one stays in charge.
pub(crate) fn bootstrap_player(
    mut commands: Commands,
    config: Res<AbilityConfig>,
    existing_player: Query<Entity, With<Player>>,
    mut health_events: MessageWriter<HealthChangedEvent>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let health = Health::new(config.max_health);

    let entity = commands
        .spawn((
            // Identity & controller state
            (
                Player,
                PlayerState::default(),
                RuntimeCounters::default(),
                DashState::default(),
                PlayerTransitions::default(),
                Grounded::default(),
                GroundSensor::from(&config.ground_check),
            ),
            // Combat
            health.clone(),
            // Presentation
            (
                Animator::default(),
                Sprite {
                    color: Color::WHITE,
                    custom_size: Some(PLAYER_SIZE),
                    ..default()
                },
                Transform::from_xyz(0.0, 100.0, 0.0),
            ),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(config.gravity_scale),
                Friction::new(0.0),
                CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
            ),
        ))
        .id();

    health_events.write(HealthChangedEvent {
        entity,
        current: health.current(),
        max: health.max(),
    });

    info!(
        "Spawned player {:?}: health={}/{}, walk={}, jump={}, air_jumps={}",
        entity,
        health.current(),
        health.max(),
        config.walk_speed,
        config.jump_force,
        config.max_air_jumps
    );
}
