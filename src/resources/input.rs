//! Per-frame keyboard input resources.
//!
//! The frontend (window/terminal, or a test driver) writes the set of keys
//! currently held into [`KeyboardSnapshot`] once per frame. The
//! [`update_input_state`](crate::systems::input::update_input_state) system
//! diffs consecutive snapshots into [`InputState`], which is what gameplay
//! systems read. Defaults use WASD for primary movement and arrow keys for
//! secondary directions.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

/// Physical keys the game recognizes.
///
/// This is the seam to the windowing collaborator: whatever backend drives
/// the game translates its own key codes into these before writing the
/// per-frame [`KeyboardSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Null,
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Escape,
    Space,
    Enter,
}

/// Set of keys held down this frame, written by the frontend.
#[derive(Resource, Debug, Default, Clone)]
pub struct KeyboardSnapshot {
    held: FxHashSet<KeyCode>,
}

impl KeyboardSnapshot {
    /// Mark a key as held.
    pub fn press(&mut self, key: KeyCode) {
        self.held.insert(key);
    }

    /// Mark a key as released.
    pub fn release(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Release every key. Called when starting a new game so stale held keys
    /// do not leak into the first frame.
    pub fn reset(&mut self) {
        self.held.clear();
    }

    /// Whether a key is currently held.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }
}

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyCode,
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyCode::Null,
        }
    }
}

impl BoolState {
    fn bound_to(key: KeyCode) -> Self {
        Self {
            key_binding: key,
            ..Self::default()
        }
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
///
/// Fields are grouped by purpose: main movement (WASD), secondary movement
/// (arrow keys), and actions (escape/space/enter).
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    // Action special keys
    pub action_back: BoolState,
    pub action_1: BoolState,
    pub action_2: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound_to(KeyCode::W),
            maindirection_left: BoolState::bound_to(KeyCode::A),
            maindirection_down: BoolState::bound_to(KeyCode::S),
            maindirection_right: BoolState::bound_to(KeyCode::D),
            secondarydirection_up: BoolState::bound_to(KeyCode::Up),
            secondarydirection_down: BoolState::bound_to(KeyCode::Down),
            secondarydirection_left: BoolState::bound_to(KeyCode::Left),
            secondarydirection_right: BoolState::bound_to(KeyCode::Right),
            action_back: BoolState::bound_to(KeyCode::Escape),
            action_1: BoolState::bound_to(KeyCode::Space),
            action_2: BoolState::bound_to(KeyCode::Enter),
        }
    }
}
