//! Core domain: global hit-stop time scaling.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use std::time::Duration;

use crate::core::events::HitStopRequest;
use crate::core::schedule::Scheduler;
use crate::movement::{Player, PlayerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitStopPhase {
    RestoreStart,
}

/// Global time multiplier driven by hit-stop requests.
///
/// The multiplier is applied to virtual time, so everything reading `Time`
/// in `Update` slows down with it. Delays and ramps are measured in real time;
/// a zero scale would otherwise never recover.
#[derive(Resource, Debug, Clone)]
pub struct TimeScale {
    scale: f32,
    restoring: bool,
    restore_speed: f32,
    schedule: Scheduler<HitStopPhase>,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self {
            scale: 1.0,
            restoring: false,
            restore_speed: 0.0,
            schedule: Scheduler::default(),
        }
    }
}

impl TimeScale {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    pub fn has_pending_restore(&self) -> bool {
        self.schedule.is_pending(HitStopPhase::RestoreStart)
    }

    /// Drop the multiplier to `new_scale` now. Restoration starts immediately
    /// when `delay` is not positive, otherwise after `delay` seconds, replacing
    /// any restoration still waiting to start.
    ///
    /// Non-finite values and non-positive restore speeds are rejected and leave
    /// the current hit-stop untouched. The scale is clamped to `[0, 1]`.
    pub fn apply_hit_stop(&mut self, new_scale: f32, restore_speed: f32, delay: f32) -> bool {
        if !new_scale.is_finite()
            || !delay.is_finite()
            || !restore_speed.is_finite()
            || restore_speed <= 0.0
        {
            return false;
        }

        self.restore_speed = restore_speed;
        self.scale = new_scale.clamp(0.0, 1.0);

        if delay > 0.0 {
            self.restoring = false;
            self.schedule.schedule(HitStopPhase::RestoreStart, delay);
        } else {
            self.schedule.cancel(HitStopPhase::RestoreStart);
            self.restoring = true;
        }
        true
    }

    /// Count down a delayed restoration.
    pub fn tick_delay(&mut self, delta: Duration) {
        for phase in self.schedule.tick(delta) {
            match phase {
                HitStopPhase::RestoreStart => self.restoring = true,
            }
        }
    }

    /// Ramp the multiplier back toward 1, snapping to exactly 1 when it gets there.
    pub fn ramp(&mut self, dt: f32) {
        if !self.restoring {
            return;
        }
        if self.scale < 1.0 {
            self.scale = (self.scale + dt * self.restore_speed).clamp(0.0, 1.0);
        }
        if self.scale >= 1.0 {
            self.scale = 1.0;
            self.restoring = false;
        }
    }
}

pub(crate) fn handle_hit_stop_requests(
    mut requests: MessageReader<HitStopRequest>,
    mut time_scale: ResMut<TimeScale>,
) {
    for request in requests.read() {
        if !time_scale.apply_hit_stop(request.scale, request.restore_speed, request.delay) {
            warn!("Ignoring out-of-range hit-stop request: {:?}", request);
            continue;
        }
        debug!(
            "Hit-stop: scale={}, restore_speed={}, delay={}",
            request.scale, request.restore_speed, request.delay
        );
    }
}

pub(crate) fn tick_hit_stop_delay(real_time: Res<Time<Real>>, mut time_scale: ResMut<TimeScale>) {
    time_scale.tick_delay(real_time.delta());
}

/// Restoration pauses on frames where the player is dashing while time still
/// moves. A fully stopped clock always ramps: dash transitions run on game
/// time and cannot end a dash at scale 0.
pub(crate) fn restore_time_scale(
    real_time: Res<Time<Real>>,
    mut time_scale: ResMut<TimeScale>,
    players: Query<&PlayerState, With<Player>>,
) {
    if time_scale.scale() > 0.0 && players.iter().any(|state| state.dashing) {
        return;
    }
    time_scale.ramp(real_time.delta_secs());
}

pub(crate) fn apply_time_scale(time_scale: Res<TimeScale>, mut virtual_time: ResMut<Time<Virtual>>) {
    if virtual_time.relative_speed() != time_scale.scale() {
        virtual_time.set_relative_speed(time_scale.scale());
    }
}
