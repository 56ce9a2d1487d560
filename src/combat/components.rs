//! Combat domain: health and attack-target components.

use bevy::prelude::*;

/// Whole-number health, always within `[0, max]`.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Clamped write. Returns true only if the stored value actually changed.
    pub fn set(&mut self, value: i32) -> bool {
        let clamped = value.clamp(0, self.max);
        if clamped == self.current {
            return false;
        }
        self.current = clamped;
        true
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percent(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// Marks an entity the player's attacks can hit. Its colliders belong on
/// `GameLayer::Attackable`.
#[derive(Component, Debug)]
pub struct Attackable;
