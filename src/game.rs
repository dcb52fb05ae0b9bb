//! Scene setup and game flow hooks.
//!
//! These systems are registered in the
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) under
//! well-known keys and run by the game state observer:
//!
//! - `"setup"` – build the [`TileGrid`] from the configured level CSV; a load
//!   failure aborts straight to `Quitting` instead of entering the level.
//! - `"enter_play"` – spawn the player actor on the spawn marker, consuming
//!   the marker tile.
//! - `"quit_game"` – tear down all non-persistent entities.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{error, info, warn};

use crate::components::gridactor::GridActor;
use crate::components::inputcontrolled::InputControlled;
use crate::components::persistent::Persistent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::KeyboardSnapshot;
use crate::resources::legend::TileLegend;
use crate::resources::tilegrid::{EMPTY, SPAWN_MARKER, TileGrid};

/// Build the level grid from the configured CSV and load the tile legend.
///
/// On success requests `Playing`; on a map load failure requests `Quitting`
/// so the frame loop never enters a level with no map.
pub fn setup(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
) {
    let mut grid = TileGrid::new(config.num_levels, config.num_tiles_y, config.num_tiles_x);
    if let Err(e) = grid.load_csv(&config.map_path, 0) {
        error!(
            "Failed to load map {}: {}",
            config.map_path.display(),
            e
        );
        next_state.set(GameStates::Quitting);
        return;
    }

    let legend = match TileLegend::load_from_file(&config.legend_path.to_string_lossy()) {
        Ok(legend) => legend,
        Err(e) => {
            warn!(
                "Failed to load legend {}: {}; using defaults",
                config.legend_path.display(),
                e
            );
            TileLegend::default()
        }
    };

    commands.insert_resource(grid);
    commands.insert_resource(legend);
    next_state.set(GameStates::Playing);
}

/// Spawn the player actor at the spawn marker, consuming the marker.
///
/// A missing marker is fatal for the level: the game transitions to
/// `Quitting`.
pub fn enter_play(
    mut commands: Commands,
    mut grid: ResMut<TileGrid>,
    config: Res<GameConfig>,
    mut snapshot: ResMut<KeyboardSnapshot>,
    mut next_state: ResMut<NextGameState>,
) {
    // Starting fresh: no stale held keys from before the level began.
    snapshot.reset();

    let Some((row, col)) = grid.find_value(SPAWN_MARKER, true) else {
        error!("No spawn marker ({}) in map, aborting level", SPAWN_MARKER);
        next_state.set(GameStates::Quitting);
        return;
    };
    if let Err(e) = grid.set(row, col, EMPTY, true) {
        // find_value returned the cell, so this cannot be out of range.
        error!("Failed to consume spawn marker: {}", e);
        next_state.set(GameStates::Quitting);
        return;
    }

    let mut actor = GridActor::at_cell(col as i32, row as i32);
    actor.uv = Vec2::new(config.uv_x(actor.cell.x, 0), config.uv_y(actor.cell.y, 0));
    info!("Player spawned at cell ({}, {})", col, row);
    commands.spawn((actor, InputControlled::main()));
}

/// Despawn everything that is not marked [`Persistent`].
pub fn quit_game(mut commands: Commands, query: Query<Entity, Without<Persistent>>) {
    info!("Quitting: tearing down scene entities");
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
