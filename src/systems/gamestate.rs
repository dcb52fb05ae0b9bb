use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::InputState;
use bevy_ecs::prelude::*;

/// Emit a [`GameStateChangedEvent`] whenever a transition is pending.
pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

/// Request a quit on the back action's press edge (Escape by default).
///
/// Ordered after input diffing and before [`check_pending_state`] so the quit
/// applies within the same tick.
pub fn request_quit_on_back(input: Res<InputState>, mut next_state: ResMut<NextGameState>) {
    if input.action_back.just_pressed {
        next_state.set(GameStates::Quitting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(request_quit_on_back);
        schedule.run(world);
    }

    #[test]
    fn test_back_press_edge_requests_quitting() {
        let mut world = World::new();
        world.insert_resource(InputState::default());
        world.insert_resource(NextGameState::new());

        // Held without a press edge requests nothing.
        world.resource_mut::<InputState>().action_back.active = true;
        run(&mut world);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            &NextGameStates::Unchanged
        );

        world.resource_mut::<InputState>().action_back.just_pressed = true;
        run(&mut world);
        assert_eq!(
            world.resource::<NextGameState>().get(),
            &NextGameStates::Pending(GameStates::Quitting)
        );
    }
}

/// Run condition: the game is in the `Playing` state.
pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}
