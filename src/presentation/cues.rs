//! Presentation domain: animation cues raised by the controller.

use bevy::prelude::*;

use crate::movement::Player;

/// Boolean animation parameters, held until changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimFlag {
    Walking,
    Jumping,
    Healing,
}

/// One-shot animation triggers, consumed by the animation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimTrigger {
    Dashing,
    Attacking,
    TakeDamage,
}

/// Cue state for an animated character. Gameplay writes, presentation reads.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct Animator {
    walking: bool,
    jumping: bool,
    healing: bool,
    triggers: Vec<AnimTrigger>,
}

impl Animator {
    pub fn set(&mut self, flag: AnimFlag, value: bool) {
        match flag {
            AnimFlag::Walking => self.walking = value,
            AnimFlag::Jumping => self.jumping = value,
            AnimFlag::Healing => self.healing = value,
        }
    }

    pub fn get(&self, flag: AnimFlag) -> bool {
        match flag {
            AnimFlag::Walking => self.walking,
            AnimFlag::Jumping => self.jumping,
            AnimFlag::Healing => self.healing,
        }
    }

    pub fn trigger(&mut self, trigger: AnimTrigger) {
        self.triggers.push(trigger);
    }

    /// Triggers raised since the last call, oldest first.
    pub fn take_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.triggers)
    }
}

/// Drain this frame's triggers. No clips are played here; a sprite animation
/// layer would hook in at this point.
pub(crate) fn play_animation_cues(mut query: Query<(Entity, &mut Animator), With<Player>>) {
    for (entity, mut animator) in &mut query {
        for trigger in animator.take_triggers() {
            debug!(
                "Animation cue {:?} on {:?}: walking={}, jumping={}, healing={}",
                trigger,
                entity,
                animator.get(AnimFlag::Walking),
                animator.get(AnimFlag::Jumping),
                animator.get(AnimFlag::Healing)
            );
        }
    }
}
