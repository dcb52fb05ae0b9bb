//! Input-controlled movement component.
//!
//! [`InputControlled`] marks a grid actor as keyboard-driven and selects
//! which direction-key group moves it. The
//! [`grid_movement`](crate::systems::gridmove::grid_movement) system reads
//! this component together with
//! [`InputState`](crate::resources::input::InputState).

use bevy_ecs::prelude::Component;

/// Which group of direction keys steers an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlScheme {
    /// WASD.
    Main,
    /// Arrow keys.
    Secondary,
}

/// Movement intent source for a keyboard-driven grid actor.
#[derive(Component, Clone, Copy, Debug)]
pub struct InputControlled {
    /// Direction-key group that steers this actor.
    pub scheme: ControlScheme,
}

impl InputControlled {
    /// Control with the main (WASD) keys.
    pub fn main() -> Self {
        Self {
            scheme: ControlScheme::Main,
        }
    }

    /// Control with the secondary (arrow) keys.
    pub fn secondary() -> Self {
        Self {
            scheme: ControlScheme::Secondary,
        }
    }
}
