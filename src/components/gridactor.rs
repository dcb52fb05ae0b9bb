//! Grid-aligned actor component.
//!
//! A [`GridActor`] occupies exactly one grid cell plus a per-axis micro-step
//! offset describing how far it has progressed toward the next cell. The
//! [`grid_movement`](crate::systems::gridmove::grid_movement) system advances
//! both from keyboard input and recomputes the derived UV coordinate each
//! tick.

use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};

/// Position of an actor on the tile grid.
///
/// `cell.x` is the column, `cell.y` the row, both with a bottom-left origin
/// (the same convention the inverted [`TileGrid`] accessors use). `micro`
/// counts sub-tile progress per axis in `[0, steps_per_tile)`. `uv` is a pure
/// function of `(cell, micro)` under the current config and is only cached
/// here for the rendering collaborator.
///
/// [`TileGrid`]: crate::resources::tilegrid::TileGrid
#[derive(Component, Clone, Copy, Debug)]
pub struct GridActor {
    /// Grid cell index, x = column, y = row (bottom-left origin).
    pub cell: IVec2,
    /// Sub-tile progress per axis, `[0, steps_per_tile)`.
    pub micro: IVec2,
    /// Derived UV-space coordinate for drawing.
    pub uv: Vec2,
    /// Tile code under the actor's cell, refreshed every tick so gameplay
    /// code can react to decorations the actor walks over.
    pub standing_on: i32,
}

impl GridActor {
    /// Place an actor at a cell with zeroed micro-steps.
    pub fn at_cell(col: i32, row: i32) -> Self {
        Self {
            cell: IVec2::new(col, row),
            micro: IVec2::ZERO,
            uv: Vec2::ZERO,
            standing_on: 0,
        }
    }
}
