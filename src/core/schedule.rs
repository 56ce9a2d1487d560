//! Core domain: one-shot delayed transitions with cancel-and-replace semantics.

use bevy::prelude::*;
use std::time::Duration;

/// A set of pending one-shot transitions, at most one per kind.
///
/// Scheduling a kind that is already pending replaces it, so restarting a
/// delay never stacks two completions. Owners poll [`Scheduler::tick`] once per
/// frame and apply whatever it returns.
#[derive(Debug, Clone)]
pub struct Scheduler<K> {
    pending: Vec<(K, Timer)>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> Scheduler<K> {
    /// Schedule `kind` to fire after `delay_secs`, replacing any pending one.
    pub fn schedule(&mut self, kind: K, delay_secs: f32) {
        self.cancel(kind);
        self.pending.push((
            kind,
            Timer::from_seconds(delay_secs.max(0.0), TimerMode::Once),
        ));
    }

    /// Cancel a pending transition. Returns true if one was pending.
    pub fn cancel(&mut self, kind: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(pending, _)| *pending != kind);
        self.pending.len() != before
    }

    pub fn is_pending(&self, kind: K) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == kind)
    }

    pub fn remaining_secs(&self, kind: K) -> Option<f32> {
        self.pending
            .iter()
            .find(|(pending, _)| *pending == kind)
            .map(|(_, timer)| timer.remaining_secs())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Advance every pending timer and return the kinds that completed,
    /// in the order they were scheduled.
    pub fn tick(&mut self, delta: Duration) -> Vec<K> {
        let mut fired = Vec::new();
        self.pending.retain_mut(|(kind, timer)| {
            timer.tick(delta);
            if timer.just_finished() {
                fired.push(*kind);
                false
            } else {
                true
            }
        });
        fired
    }
}
