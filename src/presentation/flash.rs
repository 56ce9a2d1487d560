//! Presentation domain: sprite flashing during the invincibility window.

use bevy::prelude::*;

use crate::content::AbilityConfig;
use crate::movement::{Player, PlayerState};

/// Triangle wave bouncing between 0 and `length`.
pub fn ping_pong(t: f32, length: f32) -> f32 {
    if length <= 0.0 {
        return 0.0;
    }
    let period = length * 2.0;
    let wrapped = t - (t / period).floor() * period;
    length - (wrapped - length).abs()
}

/// Sprite tint for the given invincibility state. White when not invincible,
/// otherwise fading between white and black.
pub fn flash_tint(invincible: bool, elapsed_secs: f32, flash_speed: f32) -> Color {
    if !invincible {
        return Color::WHITE;
    }
    let value = 1.0 - ping_pong(elapsed_secs * flash_speed, 1.0);
    Color::srgb(value, value, value)
}

pub(crate) fn flash_while_invincible(
    time: Res<Time>,
    config: Res<AbilityConfig>,
    mut query: Query<(&PlayerState, &mut Sprite), With<Player>>,
) {
    let elapsed = time.elapsed_secs();

    for (state, mut sprite) in &mut query {
        if state.dashing {
            continue;
        }
        sprite.color = flash_tint(state.invincible, elapsed, config.hit_flash_speed);
    }
}
