//! Movement domain: components and physics layers for the controlled player.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::GroundCheckDef;
use crate::core::Scheduler;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Player character
    Player,
    /// Anything the player's attacks can hit
    Attackable,
}

#[derive(Component, Debug)]
pub struct Player;

/// Ability flags owned by the player controller.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub jumping: bool,
    pub dashing: bool,
    pub healing: bool,
    /// Set for the invincibility window after taking damage
    pub invincible: bool,
    pub looking_right: bool,
    pub recoiling_x: bool,
    pub recoiling_y: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            jumping: false,
            dashing: false,
            healing: false,
            invincible: false,
            looking_right: true,
            recoiling_x: false,
            recoiling_y: false,
        }
    }
}

impl PlayerState {
    /// +1 when facing right, -1 when facing left
    pub fn facing_sign(&self) -> f32 {
        if self.looking_right { 1.0 } else { -1.0 }
    }
}

/// Frame and time counters behind the player's abilities.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct RuntimeCounters {
    /// Frames left on a buffered jump press. Goes negative; only `> 0` matters.
    pub jump_buffer_counter: i32,
    pub coyote_time_counter: f32,
    pub air_jump_counter: u32,
    pub steps_x_recoiled: u32,
    pub steps_y_recoiled: u32,
    pub heal_timer: f32,
    pub time_since_attack: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashPhase {
    Ready,
    Dashing,
    Cooldown,
}

#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct DashState {
    /// Cleared for the dash plus its cooldown
    pub can_dash: bool,
    /// Set by a dash and only cleared by landing
    pub dashed: bool,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            can_dash: true,
            dashed: false,
        }
    }
}

impl DashState {
    pub fn phase(&self, state: &PlayerState) -> DashPhase {
        if state.dashing {
            DashPhase::Dashing
        } else if self.can_dash {
            DashPhase::Ready
        } else {
            DashPhase::Cooldown
        }
    }
}

/// Latest ground check result, refreshed at the start of every frame and
/// every fixed step.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Grounded(pub bool);

/// Three downward rays at the player's feet.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct GroundSensor {
    pub origin: Vec2,
    pub spread_x: f32,
    pub ray_length: f32,
}

impl From<&GroundCheckDef> for GroundSensor {
    fn from(def: &GroundCheckDef) -> Self {
        Self {
            origin: Vec2::new(def.origin.0, def.origin.1),
            spread_x: def.spread_x,
            ray_length: def.ray_length,
        }
    }
}

/// Delayed state changes that used to be coroutines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerTransition {
    /// Dash window over: restore gravity and release control
    DashEnd,
    /// Dash cooldown over: dashing allowed again
    DashCooldownEnd,
    /// Damage invincibility window over
    InvincibilityEnd,
}

#[derive(Component, Debug, Default)]
pub struct PlayerTransitions(pub Scheduler<PlayerTransition>);
