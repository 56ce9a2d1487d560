//! Data definitions for the player ability file.
//!
//! These structs mirror the structure in assets/data/player.ron and are
//! inserted as a read-only resource once loading succeeds.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry helpers
// ============================================================================

/// Axis-aligned attack box, positioned relative to the player while facing right.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HitBoxDef {
    pub offset: (f32, f32),
    pub size: (f32, f32),
}

impl HitBoxDef {
    pub const fn new(offset: (f32, f32), size: (f32, f32)) -> Self {
        Self { offset, size }
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset.0, self.offset.1)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.size.0, self.size.1)
    }
}

/// Placement of the three downward ground rays.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GroundCheckDef {
    /// Offset of the centre ray from the body origin (usually the feet)
    pub origin: (f32, f32),
    /// Horizontal distance of the two side rays from the centre ray
    pub spread_x: f32,
    /// Length of each ray
    pub ray_length: f32,
}

impl Default for GroundCheckDef {
    fn default() -> Self {
        Self {
            origin: (0.0, -24.0),
            spread_x: 10.0,
            ray_length: 6.0,
        }
    }
}

// ============================================================================
// Player abilities (player.ron)
// ============================================================================

/// Schema version written by this build; files with another version are rejected.
pub const ABILITY_SCHEMA_VERSION: u32 = 1;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AbilityConfig {
    pub schema_version: u32,

    // Horizontal movement
    pub walk_speed: f32,

    // Vertical movement
    pub jump_force: f32,
    /// Frames a jump press stays buffered
    pub jump_buffer_frames: i32,
    /// Seconds after leaving the ground during which a ground jump is allowed
    pub coyote_time: f32,
    pub max_air_jumps: u32,
    /// Gravity scale restored after dashes and vertical recoil
    pub gravity_scale: f32,
    pub ground_check: GroundCheckDef,

    // Dash
    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,

    // Attack
    pub time_between_attack: f32,
    pub side_attack: HitBoxDef,
    pub up_attack: HitBoxDef,
    pub down_attack: HitBoxDef,
    pub damage: f32,
    pub slash_effect_lifetime: f32,

    // Recoil
    pub recoil_x_steps: u32,
    pub recoil_y_steps: u32,
    pub recoil_x_speed: f32,
    pub recoil_y_speed: f32,

    // Health
    pub max_health: i32,
    pub time_to_heal: f32,
    pub hit_flash_speed: f32,
    pub invincibility_time: f32,
    /// When false, invincibility only drives the damage flash
    pub invincibility_blocks_damage: bool,
    pub damage_effect_lifetime: f32,

    // Hit-stop
    pub hit_stop_restore_speed: f32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            schema_version: ABILITY_SCHEMA_VERSION,
            walk_speed: 320.0,
            jump_force: 680.0,
            jump_buffer_frames: 8,
            coyote_time: 0.12,
            max_air_jumps: 1,
            gravity_scale: 1.0,
            ground_check: GroundCheckDef::default(),
            dash_speed: 900.0,
            dash_time: 0.16,
            dash_cooldown: 0.35,
            time_between_attack: 0.3,
            side_attack: HitBoxDef::new((32.0, 0.0), (48.0, 36.0)),
            up_attack: HitBoxDef::new((0.0, 40.0), (36.0, 48.0)),
            down_attack: HitBoxDef::new((0.0, -40.0), (36.0, 48.0)),
            damage: 1.0,
            slash_effect_lifetime: 0.15,
            recoil_x_steps: 5,
            recoil_y_steps: 5,
            recoil_x_speed: 300.0,
            recoil_y_speed: 300.0,
            max_health: 5,
            time_to_heal: 0.5,
            hit_flash_speed: 10.0,
            invincibility_time: 1.0,
            invincibility_blocks_damage: false,
            damage_effect_lifetime: 1.5,
            hit_stop_restore_speed: 5.0,
        }
    }
}

impl AbilityConfig {
    /// Maximum height reachable from a single ground jump: h = v² / (2g).
    pub fn single_jump_height(&self, gravity: f32) -> f32 {
        self.jump_force * self.jump_force / (2.0 * gravity * self.gravity_scale)
    }

    /// Height reachable with every air jump spent at the apex.
    pub fn max_reachable_height(&self, gravity: f32) -> f32 {
        self.single_jump_height(gravity) * (1.0 + self.max_air_jumps as f32)
    }
}
