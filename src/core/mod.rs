//! Core domain: frame ordering, delayed transitions, and global time scaling.

mod events;
mod schedule;
mod time_scale;

pub use events::HitStopRequest;
pub use schedule::Scheduler;
pub use time_scale::TimeScale;

use bevy::prelude::*;

use crate::core::time_scale::{
    apply_time_scale, handle_hit_stop_requests, restore_time_scale, tick_hit_stop_delay,
};

/// Per-frame stages of the player controller, run strictly in this order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Delayed transitions firing and external requests (damage, hit-stop)
    Transitions,
    Input,
    /// Ground rays plus jump and coyote bookkeeping
    Bookkeeping,
    Flip,
    Move,
    Jump,
    Dash,
    Attack,
    TimeScale,
    Flash,
    Heal,
    /// Presentation reacting to the cues raised this frame
    Presentation,
}

/// Fixed-step stages: fresh ground contact before recoil uses it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedSet {
    Sense,
    Recoil,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TimeScale>()
            .add_message::<HitStopRequest>()
            .configure_sets(
                Update,
                (
                    FrameSet::Transitions,
                    FrameSet::Input,
                    FrameSet::Bookkeeping,
                    FrameSet::Flip,
                    FrameSet::Move,
                    FrameSet::Jump,
                    FrameSet::Dash,
                    FrameSet::Attack,
                    FrameSet::TimeScale,
                    FrameSet::Flash,
                    FrameSet::Heal,
                    FrameSet::Presentation,
                )
                    .chain(),
            )
            .configure_sets(FixedUpdate, (FixedSet::Sense, FixedSet::Recoil).chain())
            .add_systems(
                Update,
                (handle_hit_stop_requests, tick_hit_stop_delay)
                    .chain()
                    .in_set(FrameSet::Transitions),
            )
            .add_systems(
                Update,
                (restore_time_scale, apply_time_scale)
                    .chain()
                    .in_set(FrameSet::TimeScale),
            );
    }
}
