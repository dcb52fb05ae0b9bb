//! Game configuration resource.
//!
//! Manages map and movement settings loaded from an INI configuration file.
//! Provides defaults for safe startup and the index-to-UV conversion used to
//! place grid actors in the renderer's normalized device space.
//!
//! # Configuration File Format
//!
//! ```ini
//! [map]
//! num_tiles_x = 32
//! num_tiles_y = 24
//! steps_per_tile_x = 4
//! steps_per_tile_y = 4
//! num_levels = 1
//! path = assets/maps/level01.csv
//! legend = assets/maps/legend.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_NUM_TILES_X: u32 = 32;
const DEFAULT_NUM_TILES_Y: u32 = 24;
const DEFAULT_STEPS_PER_TILE_X: u32 = 4;
const DEFAULT_STEPS_PER_TILE_Y: u32 = 4;
const DEFAULT_NUM_LEVELS: usize = 1;
const DEFAULT_MAP_PATH: &str = "assets/maps/level01.csv";
const DEFAULT_LEGEND_PATH: &str = "assets/maps/legend.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores the map dimensions, sub-tile stepping resolution, and asset paths.
/// Tile sizes are derived: the visible map spans `[-1, 1]` on each axis of
/// the renderer's UV space, so one tile is `2.0 / num_tiles` units wide.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Map width in tiles.
    pub num_tiles_x: u32,
    /// Map height in tiles.
    pub num_tiles_y: u32,
    /// Micro-steps an actor takes to cross one tile horizontally.
    pub steps_per_tile_x: u32,
    /// Micro-steps an actor takes to cross one tile vertically.
    pub steps_per_tile_y: u32,
    /// Number of levels the tile grid holds.
    pub num_levels: usize,
    /// Path to the level CSV map.
    pub map_path: PathBuf,
    /// Path to the tile legend JSON.
    pub legend_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            num_tiles_x: DEFAULT_NUM_TILES_X,
            num_tiles_y: DEFAULT_NUM_TILES_Y,
            steps_per_tile_x: DEFAULT_STEPS_PER_TILE_X,
            steps_per_tile_y: DEFAULT_STEPS_PER_TILE_Y,
            num_levels: DEFAULT_NUM_LEVELS,
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            legend_path: PathBuf::from(DEFAULT_LEGEND_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [map] section
        if let Some(v) = config.getuint("map", "num_tiles_x").ok().flatten() {
            self.num_tiles_x = v as u32;
        }
        if let Some(v) = config.getuint("map", "num_tiles_y").ok().flatten() {
            self.num_tiles_y = v as u32;
        }
        if let Some(v) = config.getuint("map", "steps_per_tile_x").ok().flatten() {
            self.steps_per_tile_x = v as u32;
        }
        if let Some(v) = config.getuint("map", "steps_per_tile_y").ok().flatten() {
            self.steps_per_tile_y = v as u32;
        }
        if let Some(v) = config.getuint("map", "num_levels").ok().flatten() {
            self.num_levels = v as usize;
        }
        if let Some(v) = config.get("map", "path") {
            self.map_path = PathBuf::from(v);
        }
        if let Some(v) = config.get("map", "legend") {
            self.legend_path = PathBuf::from(v);
        }

        info!(
            "Config loaded from {}: {}x{} tiles, {}x{} steps per tile",
            self.config_path.display(),
            self.num_tiles_x,
            self.num_tiles_y,
            self.steps_per_tile_x,
            self.steps_per_tile_y
        );
        Ok(())
    }

    /// Save the current configuration to the INI file.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        config.set("map", "num_tiles_x", Some(self.num_tiles_x.to_string()));
        config.set("map", "num_tiles_y", Some(self.num_tiles_y.to_string()));
        config.set(
            "map",
            "steps_per_tile_x",
            Some(self.steps_per_tile_x.to_string()),
        );
        config.set(
            "map",
            "steps_per_tile_y",
            Some(self.steps_per_tile_y.to_string()),
        );
        config.set("map", "num_levels", Some(self.num_levels.to_string()));
        config.set(
            "map",
            "path",
            Some(self.map_path.to_string_lossy().into_owned()),
        );
        config.set(
            "map",
            "legend",
            Some(self.legend_path.to_string_lossy().into_owned()),
        );
        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to write config file: {}", e))
    }

    /// Width of one tile in UV units.
    pub fn tile_width(&self) -> f32 {
        2.0 / self.num_tiles_x as f32
    }

    /// Height of one tile in UV units.
    pub fn tile_height(&self) -> f32 {
        2.0 / self.num_tiles_y as f32
    }

    /// Horizontal distance covered by a single micro-step, in UV units.
    pub fn micro_step_x(&self) -> f32 {
        self.tile_width() / self.steps_per_tile_x as f32
    }

    /// Vertical distance covered by a single micro-step, in UV units.
    pub fn micro_step_y(&self) -> f32 {
        self.tile_height() / self.steps_per_tile_y as f32
    }

    /// Convert a horizontal cell index plus micro-step offset to the UV-space
    /// center of the actor's tile.
    pub fn uv_x(&self, cell_x: i32, micro_x: i32) -> f32 {
        -1.0 + cell_x as f32 * self.tile_width()
            + self.tile_width() * 0.5
            + micro_x as f32 * self.micro_step_x()
    }

    /// Convert a vertical cell index (bottom-left origin) plus micro-step
    /// offset to the UV-space center of the actor's tile.
    pub fn uv_y(&self, cell_y: i32, micro_y: i32) -> f32 {
        -1.0 + cell_y as f32 * self.tile_height()
            + self.tile_height() * 0.5
            + micro_y as f32 * self.micro_step_y()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_defaults_are_sane() {
        let config = GameConfig::new();
        assert_eq!(config.num_tiles_x, 32);
        assert_eq!(config.num_tiles_y, 24);
        assert_eq!(config.steps_per_tile_x, 4);
        assert_eq!(config.num_levels, 1);
    }

    #[test]
    fn test_tile_sizes_span_uv_space() {
        let config = GameConfig::new();
        assert!(approx_eq(
            config.tile_width() * config.num_tiles_x as f32,
            2.0
        ));
        assert!(approx_eq(
            config.tile_height() * config.num_tiles_y as f32,
            2.0
        ));
    }

    #[test]
    fn test_uv_of_first_and_last_cell() {
        let config = GameConfig::new();
        // First cell centers half a tile in from the left edge.
        assert!(approx_eq(
            config.uv_x(0, 0),
            -1.0 + config.tile_width() * 0.5
        ));
        // Last cell centers half a tile in from the right edge.
        assert!(approx_eq(
            config.uv_x(config.num_tiles_x as i32 - 1, 0),
            1.0 - config.tile_width() * 0.5
        ));
    }

    #[test]
    fn test_full_micro_sweep_crosses_one_tile() {
        let config = GameConfig::new();
        let steps = config.steps_per_tile_x as i32;
        assert!(approx_eq(config.uv_x(3, steps), config.uv_x(4, 0)));
        let steps = config.steps_per_tile_y as i32;
        assert!(approx_eq(config.uv_y(5, steps), config.uv_y(6, 0)));
    }

    #[test]
    fn test_save_then_load_round_trips_fields() {
        let path = std::env::temp_dir().join(format!(
            "tilescene_config_{}.ini",
            std::process::id()
        ));
        let mut config = GameConfig::with_path(path.clone());
        config.num_tiles_x = 10;
        config.num_tiles_y = 8;
        config.steps_per_tile_x = 2;
        config.num_levels = 3;
        config.map_path = PathBuf::from("maps/custom.csv");
        config.save_to_file().expect("save config");

        let mut reloaded = GameConfig::with_path(path);
        reloaded.load_from_file().expect("reload config");
        assert_eq!(reloaded.num_tiles_x, 10);
        assert_eq!(reloaded.num_tiles_y, 8);
        assert_eq!(reloaded.steps_per_tile_x, 2);
        assert_eq!(reloaded.num_levels, 3);
        assert_eq!(reloaded.map_path, PathBuf::from("maps/custom.csv"));
        assert_eq!(reloaded.steps_per_tile_y, 4);
    }

    #[test]
    fn test_load_missing_file_keeps_defaults() {
        let mut config = GameConfig::with_path("/nonexistent/config.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.num_tiles_x, 32);
    }
}
