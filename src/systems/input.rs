//! Input systems.
//!
//! [`update_input_state`] diffs the frontend-written
//! [`KeyboardSnapshot`](crate::resources::input::KeyboardSnapshot) against the
//! previous frame's [`InputState`](crate::resources::input::InputState) to
//! derive `active`/`just_pressed`/`just_released` per action, and triggers an
//! [`InputEvent`](crate::events::input::InputEvent) on every edge.

use bevy_ecs::prelude::*;

use crate::events::input::{InputAction, InputEvent};
use crate::resources::input::{BoolState, InputState, KeyboardSnapshot};

/// Fold the current keyboard snapshot into the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    snapshot: Res<KeyboardSnapshot>,
    mut commands: Commands,
) {
    let mut update = |state: &mut BoolState, action: InputAction| {
        let down = snapshot.is_down(state.key_binding);
        state.just_pressed = down && !state.active;
        state.just_released = !down && state.active;
        state.active = down;
        if state.just_pressed {
            commands.trigger(InputEvent {
                action,
                pressed: true,
            });
        }
        if state.just_released {
            commands.trigger(InputEvent {
                action,
                pressed: false,
            });
        }
    };

    // WASD keys
    update(&mut input.maindirection_up, InputAction::MainDirectionUp);
    update(&mut input.maindirection_left, InputAction::MainDirectionLeft);
    update(&mut input.maindirection_down, InputAction::MainDirectionDown);
    update(
        &mut input.maindirection_right,
        InputAction::MainDirectionRight,
    );
    // Arrow keys
    update(
        &mut input.secondarydirection_up,
        InputAction::SecondaryDirectionUp,
    );
    update(
        &mut input.secondarydirection_down,
        InputAction::SecondaryDirectionDown,
    );
    update(
        &mut input.secondarydirection_left,
        InputAction::SecondaryDirectionLeft,
    );
    update(
        &mut input.secondarydirection_right,
        InputAction::SecondaryDirectionRight,
    );
    // Action keys
    update(&mut input.action_back, InputAction::Back);
    update(&mut input.action_1, InputAction::Action1);
    update(&mut input.action_2, InputAction::Action2);
}
