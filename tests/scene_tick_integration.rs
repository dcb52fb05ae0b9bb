//! Scene tick integration tests for map loading, spawning, and grid movement.
//!
//! These tests build a full world the same way the demo driver does —
//! registered scene hooks, state observer, update schedule — write scripted
//! keys into the keyboard snapshot, and assert on actor and resource state
//! after a number of ticks.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use std::path::PathBuf;

use tilescene::components::gridactor::GridActor;
use tilescene::components::persistent::Persistent;
use tilescene::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use tilescene::game;
use tilescene::resources::gameconfig::GameConfig;
use tilescene::resources::gamestate::{GameState, GameStates, NextGameState};
use tilescene::resources::input::{InputState, KeyCode, KeyboardSnapshot};
use tilescene::resources::systemsstore::SystemsStore;
use tilescene::resources::tilegrid::TileGrid;
use tilescene::resources::worldtime::WorldTime;
use tilescene::systems::gamestate::{check_pending_state, request_quit_on_back, state_is_playing};
use tilescene::systems::gridmove::grid_movement;
use tilescene::systems::input::update_input_state;
use tilescene::systems::time::update_world_time;

const EPSILON: f32 = 1e-6;
const TICK: f32 = 1.0 / 60.0;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// 5x5 scenario map: spawn marker at world (2,2), blocker at world (0,0),
/// decoration 5 at world (2,3). Storage is top-row-first.
const SCENARIO_MAP: &str = "\
0,0,0,0,0
0,0,0,0,0
0,0,200,5,0
0,0,0,0,0
150,0,0,0,0
";

fn write_temp_map(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tilescene_scene_{}_{}.csv",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).expect("write temp map");
    path
}

fn scenario_config(map_path: PathBuf) -> GameConfig {
    GameConfig {
        num_tiles_x: 5,
        num_tiles_y: 5,
        steps_per_tile_x: 4,
        steps_per_tile_y: 4,
        num_levels: 1,
        map_path,
        legend_path: PathBuf::from("/nonexistent/legend.json"),
        ..GameConfig::new()
    }
}

/// Build the world and schedule the way `main` does, then enter Setup.
fn bootstrap(config: GameConfig) -> (World, Schedule) {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(KeyboardSnapshot::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    let mut systems_store = SystemsStore::new();
    let id = world.register_system(game::setup);
    world.entity_mut(id.entity()).insert(Persistent);
    systems_store.insert("setup", id);
    let id = world.register_system(game::enter_play);
    world.entity_mut(id.entity()).insert(Persistent);
    systems_store.insert("enter_play", id);
    let id = world.register_system(game::quit_game);
    world.entity_mut(id.entity()).insert(Persistent);
    systems_store.insert("quit_game", id);
    world.insert_resource(systems_store);

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {});
    world.flush();

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
    (world, update)
}

fn tick(world: &mut World, schedule: &mut Schedule, key: Option<KeyCode>) {
    {
        let mut snapshot = world.resource_mut::<KeyboardSnapshot>();
        snapshot.reset();
        if let Some(key) = key {
            snapshot.press(key);
        }
    }
    update_world_time(world, TICK);
    schedule.run(world);
}

fn player(world: &mut World) -> GridActor {
    let mut query = world.query::<&GridActor>();
    *query.single(world).expect("exactly one player actor")
}

#[test]
fn setup_loads_map_and_spawns_player_on_marker() {
    let map = write_temp_map("spawn", SCENARIO_MAP);
    let (mut world, mut update) = bootstrap(scenario_config(map));

    // One key-less tick lets the pending Playing transition apply.
    tick(&mut world, &mut update, None);

    assert_eq!(world.resource::<GameState>().get(), &GameStates::Playing);
    let actor = player(&mut world);
    assert_eq!((actor.cell.x, actor.cell.y), (2, 2));
    assert_eq!((actor.micro.x, actor.micro.y), (0, 0));

    // Spawn marker consumed.
    let grid = world.resource::<TileGrid>();
    assert_eq!(grid.get(2, 2, true).unwrap(), 0);
    // Blocker survives the load.
    assert_eq!(grid.get(0, 0, true).unwrap(), 150);
}

#[test]
fn missing_map_file_aborts_to_quitting() {
    let config = scenario_config(PathBuf::from("/nonexistent/level.csv"));
    let (mut world, mut update) = bootstrap(config);
    tick(&mut world, &mut update, None);

    assert_eq!(world.resource::<GameState>().get(), &GameStates::Quitting);
    assert!(world.get_resource::<TileGrid>().is_none());
}

#[test]
fn wrong_map_dimensions_abort_to_quitting() {
    let map = write_temp_map("dims", "0,0\n0,0\n");
    let (mut world, mut update) = bootstrap(scenario_config(map));
    tick(&mut world, &mut update, None);

    assert_eq!(world.resource::<GameState>().get(), &GameStates::Quitting);
}

#[test]
fn missing_spawn_marker_aborts_to_quitting() {
    let map = write_temp_map("nomarker", "0,0,0,0,0\n".repeat(5).as_str());
    let (mut world, mut update) = bootstrap(scenario_config(map));
    // First tick enters Playing and runs enter_play, which requests Quitting;
    // second tick applies it.
    tick(&mut world, &mut update, None);
    tick(&mut world, &mut update, None);

    assert_eq!(world.resource::<GameState>().get(), &GameStates::Quitting);
    let mut query = world.query::<&GridActor>();
    assert_eq!(query.iter(&world).count(), 0);
}

#[test]
fn held_key_crosses_one_tile_in_steps_per_tile_ticks() {
    let map = write_temp_map("cross", SCENARIO_MAP);
    let (mut world, mut update) = bootstrap(scenario_config(map));
    tick(&mut world, &mut update, None);

    for _ in 0..4 {
        tick(&mut world, &mut update, Some(KeyCode::D));
    }
    let actor = player(&mut world);
    assert_eq!((actor.cell.x, actor.cell.y), (3, 2));
    assert_eq!(actor.micro.x, 0);

    // The derived UV coordinate matches the pure conversion.
    let config = world.resource::<GameConfig>();
    assert!(approx_eq(actor.uv.x, config.uv_x(3, 0)));
    assert!(approx_eq(actor.uv.y, config.uv_y(2, 0)));
}

#[test]
fn first_left_step_wraps_micro_and_decrements_cell() {
    let map = write_temp_map("wrap", SCENARIO_MAP);
    let (mut world, mut update) = bootstrap(scenario_config(map));
    tick(&mut world, &mut update, None);

    tick(&mut world, &mut update, Some(KeyCode::A));
    let actor = player(&mut world);
    assert_eq!(actor.micro.x, 3);
    assert_eq!(actor.cell.x, 1);
}

#[test]
fn left_boundary_clamps_cell_and_micro() {
    let map = write_temp_map("clamp", SCENARIO_MAP);
    let (mut world, mut update) = bootstrap(scenario_config(map));
    tick(&mut world, &mut update, None);

    // Walk to the left edge and keep pushing. World row 2 has no blockers on
    // the way.
    for _ in 0..20 {
        tick(&mut world, &mut update, Some(KeyCode::A));
    }
    let actor = player(&mut world);
    assert_eq!(actor.cell.x, 0);
    assert_eq!(actor.micro.x, 0);
}

#[test]
fn blocking_tile_rejects_entry() {
    let map = write_temp_map("blocked", SCENARIO_MAP);
    let (mut world, mut update) = bootstrap(scenario_config(map));
    tick(&mut world, &mut update, None);

    // Down to the bottom row, then push into the (0,0) blocker from the
    // right.
    for _ in 0..8 {
        tick(&mut world, &mut update, Some(KeyCode::S));
    }
    let actor = player(&mut world);
    assert_eq!((actor.cell.x, actor.cell.y), (2, 0));

    for _ in 0..12 {
        tick(&mut world, &mut update, Some(KeyCode::A));
    }
    let actor = player(&mut world);
    // Stuck flush against the blocker, never inside it.
    assert_eq!((actor.cell.x, actor.cell.y), (1, 0));
    assert_eq!(actor.micro.x, 0);
}

#[test]
fn actor_reports_decoration_it_stands_on() {
    let map = write_temp_map("decoration", SCENARIO_MAP);
    let (mut world, mut update) = bootstrap(scenario_config(map));
    tick(&mut world, &mut update, None);

    // World (2,3) holds decoration 5, non-blocking.
    for _ in 0..4 {
        tick(&mut world, &mut update, Some(KeyCode::D));
    }
    let actor = player(&mut world);
    assert_eq!((actor.cell.x, actor.cell.y), (3, 2));
    assert_eq!(actor.standing_on, 5);
}

#[test]
fn back_action_quits_the_game() {
    let map = write_temp_map("escape", SCENARIO_MAP);
    let (mut world, mut update) = bootstrap(scenario_config(map));
    tick(&mut world, &mut update, None);
    assert_eq!(world.resource::<GameState>().get(), &GameStates::Playing);

    tick(&mut world, &mut update, Some(KeyCode::Escape));

    assert_eq!(world.resource::<GameState>().get(), &GameStates::Quitting);
    let mut query = world.query::<&GridActor>();
    assert_eq!(query.iter(&world).count(), 0);

    // The clock kept running through the whole session.
    let time = world.resource::<WorldTime>();
    assert_eq!(time.frame_count, 2);
    assert!((time.elapsed - 2.0 * TICK).abs() < EPSILON);
}

#[test]
fn quitting_despawns_scene_entities() {
    let map = write_temp_map("quit", SCENARIO_MAP);
    let (mut world, mut update) = bootstrap(scenario_config(map));
    tick(&mut world, &mut update, None);
    assert_eq!(world.resource::<GameState>().get(), &GameStates::Playing);

    world
        .resource_mut::<NextGameState>()
        .set(GameStates::Quitting);
    tick(&mut world, &mut update, None);

    assert_eq!(world.resource::<GameState>().get(), &GameStates::Quitting);
    let mut query = world.query::<&GridActor>();
    assert_eq!(query.iter(&world).count(), 0);
}
