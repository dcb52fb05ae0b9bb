//! Tilescene main entry point.
//!
//! A teaching framework core for 2D tile-based games using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **csv** for the tilemap file format
//! - **configparser** for INI settings
//!
//! This executable is a headless demo driver: it loads the configured level
//! CSV, spawns the player on the spawn marker, feeds a scripted key sequence
//! through the input system for a fixed number of ticks, and prints the final
//! actor state plus an ASCII dump of the map. A windowed frontend would do
//! exactly the same, except it would fill the keyboard snapshot from real key
//! events and draw sprites at the actors' UV coordinates.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --ticks 120 --script "dddd....wwww"
//! ```

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::components::gridactor::GridActor;
use crate::components::persistent::Persistent;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{InputState, KeyCode, KeyboardSnapshot};
use crate::resources::legend::TileLegend;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::tilegrid::TileGrid;
use crate::resources::worldtime::WorldTime;
use crate::systems::gamestate::{check_pending_state, request_quit_on_back, state_is_playing};
use crate::systems::gridmove::grid_movement;
use crate::systems::input::update_input_state;
use crate::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Fixed simulation step of the demo driver, in seconds.
const TICK_SECONDS: f32 = 1.0 / 60.0;

/// Tilescene 2D
#[derive(Parser)]
#[command(
    version,
    about = "Teaching framework core for 2D tile-based games: CSV tilemaps and grid movement"
)]
struct Cli {
    /// Path to the INI configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Level CSV to load, overriding the configured map path.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,

    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 60)]
    ticks: u32,

    /// Scripted input, one character per tick: w/a/s/d for the main
    /// direction keys, 'q' for Escape, '.' for no key. The last character
    /// repeats for any remaining ticks.
    #[arg(long, value_name = "KEYS")]
    script: Option<String>,

    /// Load the map, print it as ASCII, and exit.
    #[arg(long)]
    dump_map: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path.clone()),
        None => GameConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults
    if let Some(map) = &cli.map {
        config.map_path = map.clone();
    }

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(KeyboardSnapshot::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    // Scene hook systems store. Registered systems are stored as entities and
    // must be marked Persistent so they survive scene teardown.
    let mut systems_store = SystemsStore::new();

    let setup_system_id = world.register_system(game::setup);
    world
        .entity_mut(setup_system_id.entity())
        .insert(Persistent);
    systems_store.insert("setup", setup_system_id);

    let enter_play_system_id = world.register_system(game::enter_play);
    world
        .entity_mut(enter_play_system_id.entity())
        .insert(Persistent);
    systems_store.insert("enter_play", enter_play_system_id);

    let quit_game_system_id = world.register_system(game::quit_game);
    world
        .entity_mut(quit_game_system_id.entity())
        .insert(Persistent);
    systems_store.insert("quit_game", quit_game_system_id);

    world.insert_resource(systems_store);

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    // Ensure the observer is registered before we trigger any events.
    world.flush();

    // Enter Setup immediately: load the map before the first frame.
    {
        let mut next_state = world.resource_mut::<NextGameState>();
        next_state.set(GameStates::Setup);
    }
    world.trigger(GameStateChangedEvent {});
    world.flush();

    if cli.dump_map {
        match (
            world.get_resource::<TileGrid>(),
            world.get_resource::<TileLegend>(),
        ) {
            (Some(grid), Some(legend)) => print!("{}", legend.render_ascii(grid)),
            _ => log::error!("No map loaded, nothing to dump"),
        }
        return;
    }

    // --------------- Update schedule ---------------
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_input_state,
            request_quit_on_back,
            check_pending_state,
            grid_movement.run_if(state_is_playing),
        )
            .chain(),
    );

    let script: Vec<char> = cli.script.as_deref().unwrap_or("").chars().collect();

    // --------------- Main loop ---------------
    for tick in 0..cli.ticks {
        if matches!(world.resource::<GameState>().get(), GameStates::Quitting) {
            log::info!("Game quit at tick {}", tick);
            break;
        }

        apply_script(&mut world, &script, tick as usize);
        update_world_time(&mut world, TICK_SECONDS);
        update.run(&mut world);
    }

    report(&mut world);
}

/// Write the scripted key for this tick into the keyboard snapshot.
fn apply_script(world: &mut World, script: &[char], tick: usize) {
    let mut snapshot = world.resource_mut::<KeyboardSnapshot>();
    snapshot.reset();
    let key = match script.get(tick).or(script.last()) {
        Some('w') => Some(KeyCode::W),
        Some('a') => Some(KeyCode::A),
        Some('s') => Some(KeyCode::S),
        Some('d') => Some(KeyCode::D),
        Some('q') => Some(KeyCode::Escape),
        _ => None,
    };
    if let Some(key) = key {
        snapshot.press(key);
    }
}

/// Print the simulated time, final actor state, and the map.
fn report(world: &mut World) {
    let time = world.resource::<WorldTime>();
    println!(
        "simulated {} frames ({:.2}s)",
        time.frame_count, time.elapsed
    );
    let mut query = world.query::<&GridActor>();
    for actor in query.iter(world) {
        println!(
            "actor: cell ({}, {}), micro ({}, {}), uv ({:.4}, {:.4}), standing on {}",
            actor.cell.x,
            actor.cell.y,
            actor.micro.x,
            actor.micro.y,
            actor.uv.x,
            actor.uv.y,
            actor.standing_on
        );
    }
    if let (Some(grid), Some(legend)) = (
        world.get_resource::<TileGrid>(),
        world.get_resource::<TileLegend>(),
    ) {
        print!("{}", legend.render_ascii(grid));
    }
}
