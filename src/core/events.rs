//! Core domain: global requests from other gameplay systems.

use bevy::ecs::message::Message;

/// Request a global hit-stop (see `TimeScale::apply_hit_stop`)
#[derive(Debug, Clone, Copy)]
pub struct HitStopRequest {
    pub scale: f32,
    pub restore_speed: f32,
    pub delay: f32,
}

impl Message for HitStopRequest {}
