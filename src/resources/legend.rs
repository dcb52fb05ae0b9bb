//! Tile legend for debug/ASCII display.
//!
//! Maps tile codes to single-character glyphs so the headless demo (and log
//! output) can dump a level without a renderer. Loaded from a JSON file:
//!
//! ```json
//! {
//!   "default_empty": ".",
//!   "default_decoration": "o",
//!   "default_blocking": "#",
//!   "glyphs": { "200": "P", "150": "X" }
//! }
//! ```
//!
//! Codes missing from `glyphs` fall back to the defaults for their class
//! (empty / decoration / blocking).

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::resources::tilegrid::{EMPTY, TileGrid, is_blocking};

/// Glyph table keyed by tile code, with per-class fallbacks.
#[derive(Resource, Serialize, Deserialize, Debug, Clone)]
pub struct TileLegend {
    pub default_empty: char,
    pub default_decoration: char,
    pub default_blocking: char,
    #[serde(default)]
    pub glyphs: FxHashMap<i32, char>,
}

impl Default for TileLegend {
    fn default() -> Self {
        TileLegend {
            default_empty: '.',
            default_decoration: 'o',
            default_blocking: '#',
            glyphs: FxHashMap::default(),
        }
    }
}

impl TileLegend {
    /// Loads a legend from a JSON file at the specified path.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let legend: TileLegend = serde_json::from_str(&file_content)?;
        Ok(legend)
    }

    /// Glyph for a tile code, falling back by class.
    pub fn glyph_for(&self, value: i32) -> char {
        if let Some(&glyph) = self.glyphs.get(&value) {
            return glyph;
        }
        if value == EMPTY {
            self.default_empty
        } else if is_blocking(value) {
            self.default_blocking
        } else {
            self.default_decoration
        }
    }

    /// Render the active level as ASCII art, top row first (storage order).
    ///
    /// Cells outside the grid cannot occur here, so the accessor result is
    /// folded to the empty glyph rather than propagated.
    pub fn render_ascii(&self, grid: &TileGrid) -> String {
        let mut out = String::with_capacity(((grid.cols() + 1) * grid.rows()) as usize);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let value = grid.get(row, col, false).unwrap_or(EMPTY);
                out.push(self.glyph_for(value));
            }
            out.push('\n');
        }
        out
    }
}
