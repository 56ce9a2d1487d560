//! Combat domain: messages exchanged with enemies and observers.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Emitted once per target struck by a player attack
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyHitEvent {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    /// Unit vector from the target toward the attacker
    pub direction: Vec2,
    pub knockback_speed: f32,
}

impl Message for EnemyHitEvent {}

/// Request from outside the controller to damage the player
#[derive(Debug, Clone, Copy)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageRequest {}

/// Fired when a health value actually changes. Damage writes at most one per
/// entity per frame, carrying the final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChangedEvent {
    pub entity: Entity,
    pub current: i32,
    pub max: i32,
}

impl Message for HealthChangedEvent {}
