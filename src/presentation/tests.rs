//! Presentation domain: tests for cues, effect placement and flashing.

use bevy::prelude::*;

use super::{AnimFlag, AnimTrigger, Animator, EffectKind, EffectRequest, flash_tint, ping_pong};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_animator_flags_hold_until_changed() {
    let mut animator = Animator::default();
    assert!(!animator.get(AnimFlag::Walking));

    animator.set(AnimFlag::Walking, true);
    animator.set(AnimFlag::Healing, true);
    assert!(animator.get(AnimFlag::Walking));
    assert!(animator.get(AnimFlag::Healing));
    assert!(!animator.get(AnimFlag::Jumping));

    animator.set(AnimFlag::Walking, false);
    assert!(!animator.get(AnimFlag::Walking));
}

#[test]
fn test_animator_triggers_drain_in_order() {
    let mut animator = Animator::default();
    animator.trigger(AnimTrigger::Dashing);
    animator.trigger(AnimTrigger::Attacking);

    assert_eq!(
        animator.take_triggers(),
        vec![AnimTrigger::Dashing, AnimTrigger::Attacking]
    );
    assert!(animator.take_triggers().is_empty());
}

#[test]
fn test_ping_pong_bounces() {
    assert!(approx(ping_pong(0.0, 1.0), 0.0));
    assert!(approx(ping_pong(0.25, 1.0), 0.25));
    assert!(approx(ping_pong(1.0, 1.0), 1.0));
    assert!(approx(ping_pong(1.5, 1.0), 0.5));
    assert!(approx(ping_pong(2.0, 1.0), 0.0));
    assert!(approx(ping_pong(2.75, 1.0), 0.75));
}

#[test]
fn test_flash_tint_white_when_not_invincible() {
    assert_eq!(flash_tint(false, 0.37, 10.0), Color::WHITE);
}

#[test]
fn test_flash_tint_fades_while_invincible() {
    // t * speed = 0.5 -> halfway between white and black
    let tint = flash_tint(true, 0.05, 10.0).to_srgba();
    assert!(approx(tint.red, 0.5));
    assert!(approx(tint.green, 0.5));
    assert!(approx(tint.blue, 0.5));

    // t * speed = 1.0 -> black
    let tint = flash_tint(true, 0.1, 10.0).to_srgba();
    assert!(approx(tint.red, 0.0));
}

#[test]
fn test_slash_effect_mirrors_when_facing_left() {
    let request = EffectRequest {
        kind: EffectKind::Slash,
        position: Vec2::new(10.0, 20.0),
        angle_degrees: 0.0,
        flip_x: true,
        lifetime: 0.15,
    };
    let transform = request.transform();

    assert_eq!(transform.scale.x, -1.0);
    assert_eq!(transform.translation.truncate(), Vec2::new(10.0, 20.0));
}

#[test]
fn test_up_slash_rotated_quarter_turn() {
    let request = EffectRequest {
        kind: EffectKind::Slash,
        position: Vec2::ZERO,
        angle_degrees: 90.0,
        flip_x: false,
        lifetime: 0.15,
    };
    let rotated = request.transform().rotation * Vec3::X;

    assert!(approx(rotated.x, 0.0));
    assert!(approx(rotated.y, 1.0));
}
