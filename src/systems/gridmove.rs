//! Grid-aligned movement with sub-tile interpolation.
//!
//! [`grid_movement`] advances every [`GridActor`] with an [`InputControlled`]
//! component one micro-step per held direction key per tick. Each axis is
//! handled independently and picks at most one direction (two mutually
//! exclusive key checks). A step that wraps the micro counter carries into
//! the cell index; the cell index is then clamped to the map and the
//! destination probed for blocking tiles before the move is committed.
//!
//! All numeric edge cases (micro-step wraparound, boundary clamping) resolve
//! deterministically; nothing in this module returns an error.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::gridactor::GridActor;
use crate::components::inputcontrolled::{ControlScheme, InputControlled};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::tilegrid::{TileGrid, is_blocking};

/// The four movement directions of a grid actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Advance each controlled actor from the current input state.
///
/// Per axis and tick: step the micro counter, wrap/carry into the cell index,
/// clamp at the map boundary, and roll the step back if the destination cell
/// is blocking. Afterwards the actor's `standing_on` tile and UV coordinate
/// are refreshed.
pub fn grid_movement(
    mut query: Query<(&mut GridActor, &InputControlled)>,
    input: Res<InputState>,
    grid: Res<TileGrid>,
    config: Res<GameConfig>,
) {
    for (mut actor, controlled) in query.iter_mut() {
        let keys = DirectionKeys::read(&input, controlled.scheme);

        // Horizontal axis: left wins over right when both are held.
        if keys.left {
            try_step(&mut actor, Direction::Left, &grid, &config);
        } else if keys.right {
            try_step(&mut actor, Direction::Right, &grid, &config);
        }

        // Vertical axis, independent of horizontal.
        if keys.up {
            try_step(&mut actor, Direction::Up, &grid, &config);
        } else if keys.down {
            try_step(&mut actor, Direction::Down, &grid, &config);
        }

        actor.standing_on = grid
            .get(actor.cell.y as u32, actor.cell.x as u32, true)
            .unwrap_or(0);
        actor.uv = Vec2::new(
            config.uv_x(actor.cell.x, actor.micro.x),
            config.uv_y(actor.cell.y, actor.micro.y),
        );
    }
}

struct DirectionKeys {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl DirectionKeys {
    fn read(input: &InputState, scheme: ControlScheme) -> Self {
        match scheme {
            ControlScheme::Main => DirectionKeys {
                left: input.maindirection_left.active,
                right: input.maindirection_right.active,
                up: input.maindirection_up.active,
                down: input.maindirection_down.active,
            },
            ControlScheme::Secondary => DirectionKeys {
                left: input.secondarydirection_left.active,
                right: input.secondarydirection_right.active,
                up: input.secondarydirection_up.active,
                down: input.secondarydirection_down.active,
            },
        }
    }
}

/// One attempted step in `direction`: step, clamp, then roll back when the
/// destination is blocking.
fn try_step(actor: &mut GridActor, direction: Direction, grid: &TileGrid, config: &GameConfig) {
    let old_cell = actor.cell;

    step_axis(actor, direction, config);
    constrain(actor, direction, config);

    if !check_position(actor, direction, grid, config) {
        trace!("move {:?} from {:?} blocked", direction, old_cell);
        actor.cell = old_cell;
        match direction {
            Direction::Left | Direction::Right => actor.micro.x = 0,
            Direction::Up | Direction::Down => actor.micro.y = 0,
        }
    }
}

/// Advance the micro-step counter one tick in `direction`, carrying
/// wraparound into the cell index.
///
/// Moving toward negative coordinates underflows the counter from 0 to
/// `steps_per_tile - 1` and decrements the cell; moving toward positive
/// coordinates wraps at `steps_per_tile` back to 0 and increments the cell.
fn step_axis(actor: &mut GridActor, direction: Direction, config: &GameConfig) {
    match direction {
        Direction::Left => {
            actor.micro.x -= 1;
            if actor.micro.x < 0 {
                actor.micro.x = config.steps_per_tile_x as i32 - 1;
                actor.cell.x -= 1;
            }
        }
        Direction::Right => {
            actor.micro.x += 1;
            if actor.micro.x >= config.steps_per_tile_x as i32 {
                actor.micro.x = 0;
                actor.cell.x += 1;
            }
        }
        Direction::Up => {
            actor.micro.y += 1;
            if actor.micro.y >= config.steps_per_tile_y as i32 {
                actor.micro.y = 0;
                actor.cell.y += 1;
            }
        }
        Direction::Down => {
            actor.micro.y -= 1;
            if actor.micro.y < 0 {
                actor.micro.y = config.steps_per_tile_y as i32 - 1;
                actor.cell.y -= 1;
            }
        }
    }
}

/// Clamp the cell index to `[0, num_tiles - 1]` on the stepped axis, zeroing
/// the micro counter when the clamp engages. An actor on the last row/column
/// always sits flush on it, so the collision probes below never index past
/// the map on the orthogonal axis.
fn constrain(actor: &mut GridActor, direction: Direction, config: &GameConfig) {
    match direction {
        Direction::Left => {
            if actor.cell.x < 0 {
                actor.cell.x = 0;
                actor.micro.x = 0;
            }
        }
        Direction::Right => {
            if actor.cell.x >= config.num_tiles_x as i32 - 1 {
                actor.cell.x = config.num_tiles_x as i32 - 1;
                actor.micro.x = 0;
            }
        }
        Direction::Up => {
            if actor.cell.y >= config.num_tiles_y as i32 - 1 {
                actor.cell.y = config.num_tiles_y as i32 - 1;
                actor.micro.y = 0;
            }
        }
        Direction::Down => {
            if actor.cell.y < 0 {
                actor.cell.y = 0;
                actor.micro.y = 0;
            }
        }
    }
}

/// Whether the cell the actor just stepped into may be entered.
///
/// Probes the cell the actor is entering: while a positive micro offset on
/// the moved axis leaves the actor straddling two cells the leading cell is
/// probed, and on the tick the actor centers into a cell that cell itself is
/// probed. The adjacent cell on the orthogonal axis joins the probe when a
/// non-zero orthogonal micro offset straddles the actor across two rows (or
/// columns). An actor flush against the far boundary short-circuits to
/// allowed: the clamp already pinned it to the map. A probe outside the map
/// counts as blocked.
fn check_position(
    actor: &GridActor,
    direction: Direction,
    grid: &TileGrid,
    config: &GameConfig,
) -> bool {
    let x = actor.cell.x;
    let y = actor.cell.y;
    let probe = |row: i32, col: i32| -> bool {
        grid.get(row as u32, col as u32, true).map_or(true, is_blocking)
    };

    match direction {
        Direction::Left => {
            if probe(y, x) {
                return false;
            }
            if actor.micro.y != 0 && probe(y + 1, x) {
                return false;
            }
            true
        }
        Direction::Right => {
            if x >= config.num_tiles_x as i32 - 1 {
                return true;
            }
            let col = if actor.micro.x > 0 { x + 1 } else { x };
            if probe(y, col) {
                return false;
            }
            if actor.micro.y != 0 && probe(y + 1, col) {
                return false;
            }
            true
        }
        Direction::Up => {
            if y >= config.num_tiles_y as i32 - 1 {
                return true;
            }
            let row = if actor.micro.y > 0 { y + 1 } else { y };
            if probe(row, x) {
                return false;
            }
            if actor.micro.x != 0 && probe(row, x + 1) {
                return false;
            }
            true
        }
        Direction::Down => {
            if probe(y, x) {
                return false;
            }
            if actor.micro.x != 0 && probe(y, x + 1) {
                return false;
            }
            true
        }
    }
}
