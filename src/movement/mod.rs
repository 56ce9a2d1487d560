//! Movement domain: input snapshot, ground sensing, facing, walking, jumps and dash.

mod bootstrap;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod sensing;
mod resources;
mod systems;

pub use bootstrap::PLAYER_SIZE;
pub use components::*;
pub use sensing::SpatialSensing;
pub use resources::MovementInput;

pub(crate) use systems::advance_player_transitions;

use bevy::prelude::*;

use crate::core::{FixedSet, FrameSet};
use bootstrap::bootstrap_player;
use systems::{
    apply_horizontal_movement, apply_jump, detect_ground, read_input, start_dash,
    update_facing, update_jump_variables,
};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_systems(Startup, bootstrap_player)
            .add_systems(
                Update,
                advance_player_transitions.in_set(FrameSet::Transitions),
            )
            .add_systems(Update, read_input.in_set(FrameSet::Input))
            .add_systems(
                Update,
                (detect_ground, update_jump_variables)
                    .chain()
                    .in_set(FrameSet::Bookkeeping),
            )
            .add_systems(Update, update_facing.in_set(FrameSet::Flip))
            .add_systems(Update, apply_horizontal_movement.in_set(FrameSet::Move))
            .add_systems(Update, apply_jump.in_set(FrameSet::Jump))
            .add_systems(Update, start_dash.in_set(FrameSet::Dash))
            .add_systems(FixedUpdate, detect_ground.in_set(FixedSet::Sense));

        #[cfg(feature = "dev-tools")]
        dev::build(app);
    }
}
