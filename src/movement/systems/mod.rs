//! Movement domain: system modules for the per-frame player update.

pub(crate) mod collisions;
pub(crate) mod dash;
pub(crate) mod input;
pub(crate) mod jump;
pub(crate) mod movement;

pub(crate) use collisions::detect_ground;
pub(crate) use dash::{advance_player_transitions, start_dash};
pub(crate) use input::read_input;
pub(crate) use jump::{apply_jump, update_jump_variables};
pub(crate) use movement::{apply_horizontal_movement, update_facing};
