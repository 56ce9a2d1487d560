//! Content domain: data-driven player abilities loaded from RON.

mod data;
mod loader;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{ABILITY_SCHEMA_VERSION, AbilityConfig, GroundCheckDef, HitBoxDef};
pub use loader::{ContentLoadError, load_ability_config, parse_ability_config};
pub use validation::{ValidationError, validate_ability_config};

use bevy::prelude::*;
use std::path::Path;

/// Location of the ability file, relative to the working directory.
pub const ABILITY_CONFIG_PATH: &str = "assets/data/player.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AbilityConfig>()
            .add_systems(PreStartup, load_content);
    }
}

/// Load and validate the ability file, keeping defaults when either step fails.
fn load_content(mut config: ResMut<AbilityConfig>) {
    let path = Path::new(ABILITY_CONFIG_PATH);
    let loaded = match load_ability_config(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!("{}; using default abilities", e);
            return;
        }
    };

    let errors = validate_ability_config(&loaded);
    if !errors.is_empty() {
        for error in &errors {
            warn!("Invalid ability config: {}", error);
        }
        warn!(
            "{} validation error(s) in {}; using default abilities",
            errors.len(),
            ABILITY_CONFIG_PATH
        );
        return;
    }

    info!(
        "Loaded abilities from {}: walk={}, jump={}, air_jumps={}, max_health={}",
        ABILITY_CONFIG_PATH,
        loaded.walk_speed,
        loaded.jump_force,
        loaded.max_air_jumps,
        loaded.max_health
    );
    *config = loaded;
}
