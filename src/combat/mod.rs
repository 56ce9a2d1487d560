//! Combat domain: player attacks, recoil, damage, invincibility and healing.

mod attacks;
mod components;
mod events;
pub(crate) mod systems;
#[cfg(test)]
mod tests;

pub use attacks::{
    AttackDirection, AttackOutcome, hitbox_center, perform_attack, resolve_hits,
};
pub use components::{Attackable, Health};
pub use events::{DamageRequest, EnemyHitEvent, HealthChangedEvent};

use bevy::prelude::*;

use crate::core::{FixedSet, FrameSet};
use crate::movement::advance_player_transitions;

use systems::{apply_damage_requests, apply_recoil, heal, player_attack};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EnemyHitEvent>()
            .add_message::<DamageRequest>()
            .add_message::<HealthChangedEvent>()
            .add_systems(
                Update,
                apply_damage_requests
                    .in_set(FrameSet::Transitions)
                    .after(advance_player_transitions),
            )
            .add_systems(Update, player_attack.in_set(FrameSet::Attack))
            .add_systems(Update, heal.in_set(FrameSet::Heal))
            .add_systems(FixedUpdate, apply_recoil.in_set(FixedSet::Recoil));
    }
}
