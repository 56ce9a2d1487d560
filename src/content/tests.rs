//! Content domain: tests for ability parsing and validation.

use super::{ABILITY_SCHEMA_VERSION, AbilityConfig, parse_ability_config, validate_ability_config};

#[test]
fn test_default_config_is_valid() {
    let errors = validate_ability_config(&AbilityConfig::default());
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn test_partial_ron_falls_back_to_defaults() {
    let config = parse_ability_config(
        "inline",
        "(walk_speed: 150.0, max_air_jumps: 2, side_attack: (offset: (20.0, 0.0), size: (30.0, 30.0)))",
    )
    .expect("partial config should parse");

    assert_eq!(config.walk_speed, 150.0);
    assert_eq!(config.max_air_jumps, 2);
    assert_eq!(config.side_attack.size, (30.0, 30.0));
    // Untouched fields keep their defaults
    assert_eq!(config.jump_force, AbilityConfig::default().jump_force);
    assert_eq!(config.invincibility_time, 1.0);
    assert!(!config.invincibility_blocks_damage);
}

#[test]
fn test_parse_error_names_source() {
    let err = parse_ability_config("broken.ron", "(walk_speed: \"fast\")").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.to_string().starts_with("Failed to load broken.ron"));
}

#[test]
fn test_validation_rejects_bad_values() {
    let config = AbilityConfig {
        walk_speed: -1.0,
        max_health: 0,
        jump_buffer_frames: -3,
        dash_time: f32::NAN,
        ..AbilityConfig::default()
    };

    let fields: Vec<&str> = validate_ability_config(&config)
        .iter()
        .map(|e| e.field)
        .collect();

    assert!(fields.contains(&"walk_speed"));
    assert!(fields.contains(&"max_health"));
    assert!(fields.contains(&"jump_buffer_frames"));
    assert!(fields.contains(&"dash_time"));
    assert_eq!(fields.len(), 4);
}

#[test]
fn test_validation_rejects_empty_hitbox() {
    let mut config = AbilityConfig::default();
    config.down_attack.size = (0.0, 48.0);

    let errors = validate_ability_config(&config);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "down_attack");
}

#[test]
fn test_jump_height_grows_with_air_jumps() {
    let config = AbilityConfig {
        jump_force: 600.0,
        gravity_scale: 1.0,
        max_air_jumps: 1,
        ..AbilityConfig::default()
    };

    let single = config.single_jump_height(1800.0);
    assert!((single - 100.0).abs() < 1e-3);
    assert!((config.max_reachable_height(1800.0) - 200.0).abs() < 1e-3);
}

#[test]
fn test_bundled_player_file_parses_and_validates() {
    let contents = include_str!("../../assets/data/player.ron");
    let config = parse_ability_config("player.ron", contents).expect("bundled file parses");
    assert!(validate_ability_config(&config).is_empty());
}

#[test]
fn test_validation_rejects_unknown_schema_version() {
    let config = parse_ability_config("inline", "(schema_version: 2)").unwrap();
    let errors = validate_ability_config(&config);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "schema_version");

    let current = AbilityConfig {
        schema_version: ABILITY_SCHEMA_VERSION,
        ..AbilityConfig::default()
    };
    assert!(validate_ability_config(&current).is_empty());
}
