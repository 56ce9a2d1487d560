//! Presentation domain: animation cues, transient effects and hit flashing.

mod cues;
mod effects;
mod flash;
#[cfg(test)]
mod tests;

pub use cues::{AnimFlag, AnimTrigger, Animator};
pub use effects::{Effect, EffectKind, EffectLifetime, EffectRequest};
pub use flash::{flash_tint, ping_pong};

use bevy::prelude::*;

use crate::core::FrameSet;
use cues::play_animation_cues;
use effects::{despawn_expired_effects, spawn_effects};
use flash::flash_while_invincible;

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EffectRequest>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, flash_while_invincible.in_set(FrameSet::Flash))
            .add_systems(
                Update,
                (play_animation_cues, spawn_effects, despawn_expired_effects)
                    .in_set(FrameSet::Presentation),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
