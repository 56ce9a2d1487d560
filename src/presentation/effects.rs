//! Presentation domain: short-lived visual effects.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Attack swing, placed on the hit-box
    Slash,
    /// Burst at the player when damaged
    DamageSpurt,
}

impl EffectKind {
    fn color(self) -> Color {
        match self {
            EffectKind::Slash => Color::srgba(0.95, 0.95, 1.0, 0.8),
            EffectKind::DamageSpurt => Color::srgba(0.9, 0.15, 0.15, 0.9),
        }
    }

    fn size(self) -> Vec2 {
        match self {
            EffectKind::Slash => Vec2::new(48.0, 36.0),
            EffectKind::DamageSpurt => Vec2::new(40.0, 40.0),
        }
    }
}

/// Fire-and-forget request to show an effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub position: Vec2,
    pub angle_degrees: f32,
    /// Mirror horizontally (player facing left)
    pub flip_x: bool,
    /// Seconds of game time before the effect is removed
    pub lifetime: f32,
}

impl Message for EffectRequest {}

impl EffectRequest {
    /// Local transform of the effect: rotated by the angle, x-scale mirrored on flip.
    pub fn transform(&self) -> Transform {
        let scale_x = if self.flip_x { -1.0 } else { 1.0 };
        Transform::from_translation(self.position.extend(5.0))
            .with_rotation(Quat::from_rotation_z(self.angle_degrees.to_radians()))
            .with_scale(Vec3::new(scale_x, 1.0, 1.0))
    }
}

#[derive(Component, Debug)]
pub struct Effect(pub EffectKind);

/// Remaining seconds before an effect is despawned
#[derive(Component, Debug)]
pub struct EffectLifetime(pub f32);

pub(crate) fn spawn_effects(mut commands: Commands, mut requests: MessageReader<EffectRequest>) {
    for request in requests.read() {
        commands.spawn((
            Effect(request.kind),
            EffectLifetime(request.lifetime),
            Sprite {
                color: request.kind.color(),
                custom_size: Some(request.kind.size()),
                ..default()
            },
            request.transform(),
        ));
    }
}

pub(crate) fn despawn_expired_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &Effect, &mut EffectLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, effect, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            trace!("Effect {:?} expired", effect.0);
            commands.entity(entity).despawn();
        }
    }
}
