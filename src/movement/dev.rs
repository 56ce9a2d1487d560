//! Movement domain: debug-only test room, training dummies, hotkeys and gizmos.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{AttackDirection, Attackable, DamageRequest, EnemyHitEvent, hitbox_center};
use crate::content::AbilityConfig;
use crate::core::{FrameSet, HitStopRequest};
use crate::movement::{GameLayer, GroundSensor, Grounded, MovementInput, Player, PlayerState};

/// Stand-in enemy that reacts to player hits with knockback.
#[derive(Component, Debug, Default)]
pub struct TrainingDummy {
    pub hits_taken: u32,
}

pub(crate) fn build(app: &mut App) {
    app.add_systems(Startup, spawn_test_room)
        .add_systems(Update, handle_dev_hotkeys.in_set(FrameSet::Input))
        .add_systems(
            Update,
            (knock_back_dummies, draw_debug_gizmos).in_set(FrameSet::Presentation),
        );
}

fn spawn_platform(commands: &mut Commands, position: Vec2, size: Vec2, color: Color) {
    commands.spawn((
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(position.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Attackable]),
    ));
}

fn spawn_test_room(mut commands: Commands, config: Res<AbilityConfig>, gravity: Res<Gravity>) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    // Floor
    spawn_platform(
        &mut commands,
        Vec2::new(0.0, -200.0),
        Vec2::new(900.0, 40.0),
        ground_color,
    );
    // Left platform
    spawn_platform(
        &mut commands,
        Vec2::new(-250.0, -50.0),
        Vec2::new(150.0, 20.0),
        platform_color,
    );
    // Right platform, higher
    spawn_platform(
        &mut commands,
        Vec2::new(250.0, 50.0),
        Vec2::new(150.0, 20.0),
        platform_color,
    );
    // Centre platform, reached from the left platform with the air jump
    spawn_platform(
        &mut commands,
        Vec2::new(0.0, 100.0),
        Vec2::new(120.0, 20.0),
        platform_color,
    );

    for x in [150.0, 200.0, -300.0] {
        commands.spawn((
            TrainingDummy::default(),
            Attackable,
            Sprite {
                color: Color::srgb(0.7, 0.3, 0.3),
                custom_size: Some(Vec2::new(28.0, 44.0)),
                ..default()
            },
            Transform::from_xyz(x, -150.0, 0.0),
            RigidBody::Dynamic,
            Collider::rectangle(28.0, 44.0),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.6),
            CollisionLayers::new(GameLayer::Attackable, [GameLayer::Ground]),
        ));
    }

    let g = gravity.0.y.abs();
    info!(
        "Spawned test room: jump height {:.0}, with air jumps {:.0}",
        config.single_jump_height(g),
        config.max_reachable_height(g)
    );
}

/// H: take one damage with a short freeze. T: hit-stop only.
fn handle_dev_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<AbilityConfig>,
    player: Query<Entity, With<Player>>,
    mut damage_requests: MessageWriter<DamageRequest>,
    mut hit_stops: MessageWriter<HitStopRequest>,
) {
    let Ok(player) = player.single() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::KeyH) {
        damage_requests.write(DamageRequest {
            target: player,
            amount: 1.0,
        });
        hit_stops.write(HitStopRequest {
            scale: 0.0,
            restore_speed: config.hit_stop_restore_speed,
            delay: 0.5,
        });
        info!("[DEV] Damage + hit-stop requested");
    }

    if keyboard.just_pressed(KeyCode::KeyT) {
        hit_stops.write(HitStopRequest {
            scale: 0.1,
            restore_speed: config.hit_stop_restore_speed,
            delay: 0.0,
        });
        info!("[DEV] Hit-stop requested");
    }
}

fn knock_back_dummies(
    mut hits: MessageReader<EnemyHitEvent>,
    mut dummies: Query<(&mut TrainingDummy, &mut LinearVelocity)>,
) {
    for hit in hits.read() {
        let Ok((mut dummy, mut velocity)) = dummies.get_mut(hit.target) else {
            continue;
        };

        dummy.hits_taken += 1;
        // Direction points at the attacker; push the other way
        velocity.0 = -hit.direction * hit.knockback_speed;

        info!(
            "Dummy {:?} hit for {} (total hits: {})",
            hit.target, hit.damage, dummy.hits_taken
        );
    }
}

fn draw_debug_gizmos(
    mut gizmos: Gizmos,
    input: Res<MovementInput>,
    config: Res<AbilityConfig>,
    query: Query<(&Transform, &PlayerState, &Grounded, &GroundSensor), With<Player>>,
) {
    for (transform, state, grounded, sensor) in &query {
        let position = transform.translation.truncate();

        let ray_color = if grounded.0 {
            Color::srgb(0.2, 0.9, 0.2)
        } else {
            Color::srgb(0.9, 0.2, 0.2)
        };
        for origin in sensor.ray_origins(position) {
            gizmos.line_2d(origin, origin - Vec2::Y * sensor.ray_length, ray_color);
        }

        let direction = AttackDirection::select(input.axis.y, grounded.0);
        let hitbox = direction.hitbox(&config);
        let center = hitbox_center(position, hitbox, state.facing_sign());
        gizmos.rect_2d(
            Isometry2d::from_translation(center),
            hitbox.size(),
            Color::srgb(0.9, 0.9, 0.2),
        );
    }
}
