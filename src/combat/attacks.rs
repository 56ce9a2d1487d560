//! Combat domain: attack direction, hit-box placement and hit resolution.

use bevy::prelude::*;

use crate::combat::events::EnemyHitEvent;
use crate::content::{AbilityConfig, HitBoxDef};
use crate::movement::{GameLayer, PlayerState, SpatialSensing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackDirection {
    Side,
    Up,
    Down,
}

impl AttackDirection {
    /// Neutral or downward input on the ground swings sideways; upward input
    /// swings up; downward input in the air swings down.
    pub fn select(y_axis: f32, grounded: bool) -> Self {
        if y_axis == 0.0 || (y_axis < 0.0 && grounded) {
            AttackDirection::Side
        } else if y_axis > 0.0 {
            AttackDirection::Up
        } else {
            AttackDirection::Down
        }
    }

    pub fn hitbox(self, config: &AbilityConfig) -> &HitBoxDef {
        match self {
            AttackDirection::Side => &config.side_attack,
            AttackDirection::Up => &config.up_attack,
            AttackDirection::Down => &config.down_attack,
        }
    }

    /// Side swings recoil horizontally, up and down swings vertically.
    pub fn is_horizontal(self) -> bool {
        self == AttackDirection::Side
    }

    pub fn knockback_speed(self, config: &AbilityConfig) -> f32 {
        if self.is_horizontal() {
            config.recoil_x_speed
        } else {
            config.recoil_y_speed
        }
    }

    /// Rotation of the slash effect
    pub fn effect_angle_degrees(self) -> f32 {
        match self {
            AttackDirection::Side => 0.0,
            AttackDirection::Up => 90.0,
            AttackDirection::Down => -90.0,
        }
    }
}

/// World-space centre of a hit-box; offsets are mirrored when facing left.
pub fn hitbox_center(position: Vec2, hitbox: &HitBoxDef, facing_sign: f32) -> Vec2 {
    let offset = hitbox.offset();
    position + Vec2::new(offset.x * facing_sign, offset.y)
}

/// One hit event per distinct target, in first-seen order.
pub fn resolve_hits(
    attacker: Entity,
    attacker_position: Vec2,
    targets: impl IntoIterator<Item = (Entity, Vec2)>,
    damage: f32,
    knockback_speed: f32,
) -> Vec<EnemyHitEvent> {
    let mut hit_entities: Vec<Entity> = Vec::new();
    let mut hits = Vec::new();

    for (target, target_position) in targets {
        if target == attacker || hit_entities.contains(&target) {
            continue;
        }
        hit_entities.push(target);

        hits.push(EnemyHitEvent {
            attacker,
            target,
            damage,
            direction: (attacker_position - target_position).normalize_or_zero(),
            knockback_speed,
        });
    }

    hits
}

/// Result of a single swing.
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    pub direction: AttackDirection,
    pub center: Vec2,
    pub size: Vec2,
    pub hits: Vec<EnemyHitEvent>,
}

/// Swing in the direction picked by input, query the hit-box and resolve hits.
/// A swing that connects makes the attacker recoil on the swing's axis.
///
/// `resolve_target` maps an overlapped collider to its owning target and the
/// target's position, or `None` if the collider is not attackable.
#[allow(clippy::too_many_arguments)]
pub fn perform_attack(
    attacker: Entity,
    position: Vec2,
    state: &mut PlayerState,
    y_axis: f32,
    grounded: bool,
    config: &AbilityConfig,
    sensing: &impl SpatialSensing,
    resolve_target: impl Fn(Entity) -> Option<(Entity, Vec2)>,
) -> AttackOutcome {
    let direction = AttackDirection::select(y_axis, grounded);
    let hitbox = direction.hitbox(config);
    let center = hitbox_center(position, hitbox, state.facing_sign());
    let size = hitbox.size();

    let colliders = sensing.overlap_box(center, size, GameLayer::Attackable);
    let hits = resolve_hits(
        attacker,
        position,
        colliders.into_iter().filter_map(resolve_target),
        config.damage,
        direction.knockback_speed(config),
    );

    if !hits.is_empty() {
        if direction.is_horizontal() {
            state.recoiling_x = true;
        } else {
            state.recoiling_y = true;
        }
    }

    AttackOutcome {
        direction,
        center,
        size,
        hits,
    }
}
