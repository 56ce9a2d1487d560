//! Validation for ability values that would break the controller.

use super::data::{ABILITY_SCHEMA_VERSION, AbilityConfig, HitBoxDef};

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message)
    }
}

/// Helper macro for rejecting negative or non-finite values
macro_rules! check_non_negative {
    ($errors:expr, $config:expr, $($field:ident),+ $(,)?) => {
        $(
            let value = $config.$field;
            if !value.is_finite() || value < 0.0 {
                $errors.push(ValidationError {
                    field: stringify!($field),
                    message: format!("must be a non-negative number, got {}", value),
                });
            }
        )+
    };
}

fn check_hitbox(errors: &mut Vec<ValidationError>, field: &'static str, hitbox: &HitBoxDef) {
    let size = hitbox.size();
    if !(size.x > 0.0 && size.y > 0.0) {
        errors.push(ValidationError {
            field,
            message: format!("hit-box size must be positive, got {:?}", hitbox.size),
        });
    }
}

/// Validate an ability config.
/// Returns a list of validation errors, empty if the config is usable.
pub fn validate_ability_config(config: &AbilityConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.schema_version != ABILITY_SCHEMA_VERSION {
        errors.push(ValidationError {
            field: "schema_version",
            message: format!(
                "unsupported version {}, expected {}",
                config.schema_version, ABILITY_SCHEMA_VERSION
            ),
        });
    }

    check_non_negative!(
        errors,
        config,
        walk_speed,
        jump_force,
        coyote_time,
        gravity_scale,
        dash_speed,
        dash_time,
        dash_cooldown,
        time_between_attack,
        damage,
        slash_effect_lifetime,
        recoil_x_speed,
        recoil_y_speed,
        time_to_heal,
        hit_flash_speed,
        invincibility_time,
        damage_effect_lifetime,
        hit_stop_restore_speed,
    );

    if config.jump_buffer_frames < 0 {
        errors.push(ValidationError {
            field: "jump_buffer_frames",
            message: format!("must not be negative, got {}", config.jump_buffer_frames),
        });
    }

    if config.max_health <= 0 {
        errors.push(ValidationError {
            field: "max_health",
            message: format!("must be at least 1, got {}", config.max_health),
        });
    }

    let ground = &config.ground_check;
    if !(ground.ray_length > 0.0) || ground.spread_x < 0.0 {
        errors.push(ValidationError {
            field: "ground_check",
            message: format!(
                "ray_length must be positive and spread_x non-negative, got {} / {}",
                ground.ray_length, ground.spread_x
            ),
        });
    }

    check_hitbox(&mut errors, "side_attack", &config.side_attack);
    check_hitbox(&mut errors, "up_attack", &config.up_attack);
    check_hitbox(&mut errors, "down_attack", &config.down_attack);

    errors
}
