//! CSV-backed tile grid resource.
//!
//! [`TileGrid`] owns one [`LevelGrid`] per level. Each cell stores an integer
//! tile code plus reserved A* metadata (parent indices and f/g/h costs) that
//! gameplay systems may fill in later; no traversal algorithm lives here.
//!
//! Tile code semantics:
//! - `0` — empty
//! - `1..=99` — non-blocking decoration
//! - `>= 100` — blocking/solid
//! - `200` — player spawn marker, consumed at level init
//!
//! Row accessors take an `invert` flag: world coordinates grow upward from a
//! bottom-left origin while CSV storage is top-row-first, so `invert == true`
//! maps a world row to `rows - 1 - row` before lookup. Centralizing the flip
//! here keeps call sites from duplicating it.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use thiserror::Error;

/// Tile codes at or above this value block movement.
pub const BLOCKING_THRESHOLD: i32 = 100;
/// Tile code marking an actor's initial cell. Consumed (set to 0) at init.
pub const SPAWN_MARKER: i32 = 200;
/// Tile code of an empty cell.
pub const EMPTY: i32 = 0;

/// Whether a tile code prevents entry into its cell.
pub fn is_blocking(value: i32) -> bool {
    value >= BLOCKING_THRESHOLD
}

/// Errors produced by map loading, saving, and cell access.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("map csv malformed: {0}")]
    Csv(#[from] csv::Error),
    #[error("map is {found_rows}x{found_cols}, expected {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        expected_rows: u32,
        expected_cols: u32,
        found_rows: u32,
        found_cols: u32,
    },
    #[error("cell ({row},{col}) outside {rows}x{cols} grid")]
    OutOfRange {
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    },
    #[error("level {0} does not exist")]
    NoSuchLevel(usize),
}

/// One grid cell: the tile code plus reserved pathfinding metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cell {
    /// Tile code controlling passability/appearance.
    pub value: i32,
    /// Row index of this cell's parent in a search tree.
    pub parent_row: u32,
    /// Column index of this cell's parent in a search tree.
    pub parent_col: u32,
    /// Total cost estimate, `f = g + h`.
    pub f: f64,
    /// Cost from the start cell.
    pub g: f64,
    /// Heuristic cost to the goal cell.
    pub h: f64,
}

impl Cell {
    fn with_value(value: i32) -> Self {
        Cell {
            value,
            ..Cell::default()
        }
    }
}

/// A single level's cells in a flat row-major buffer.
///
/// Storage order matches the CSV: index 0 is the top-left cell, row-major.
#[derive(Debug, Clone)]
pub struct LevelGrid {
    rows: u32,
    cols: u32,
    cells: Vec<Cell>,
}

impl LevelGrid {
    fn new(rows: u32, cols: u32) -> Self {
        LevelGrid {
            rows,
            cols,
            cells: vec![Cell::default(); (rows * cols) as usize],
        }
    }

    fn index(&self, row: u32, col: u32) -> usize {
        (row * self.cols + col) as usize
    }
}

/// Resource holding every level's tile grid and the active level index.
#[derive(Resource, Debug, Clone)]
pub struct TileGrid {
    levels: Vec<LevelGrid>,
    current_level: usize,
}

impl TileGrid {
    /// Create `num_levels` empty grids of `rows` x `cols` cells.
    pub fn new(num_levels: usize, rows: u32, cols: u32) -> Self {
        TileGrid {
            levels: vec![LevelGrid::new(rows, cols); num_levels.max(1)],
            current_level: 0,
        }
    }

    /// Rows of the active level.
    pub fn rows(&self) -> u32 {
        self.levels[self.current_level].rows
    }

    /// Columns of the active level.
    pub fn cols(&self) -> u32 {
        self.levels[self.current_level].cols
    }

    /// Index of the active level.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Switch the active level.
    pub fn set_current_level(&mut self, level: usize) -> Result<(), MapError> {
        if level >= self.levels.len() {
            return Err(MapError::NoSuchLevel(level));
        }
        self.current_level = level;
        Ok(())
    }

    /// Number of levels.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Parse a CSV file into a level's cells.
    ///
    /// Fails with [`MapError::DimensionMismatch`] when the record/field counts
    /// differ from the level's configured size; the level is left untouched on
    /// any error. Loading resets the pathfinding metadata of every cell.
    pub fn load_csv(&mut self, path: impl AsRef<Path>, level: usize) -> Result<(), MapError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        self.load_from_reader(file, level)?;
        info!("loaded level {} map from {}", level, path.display());
        Ok(())
    }

    /// Parse CSV records from any reader into a level's cells.
    ///
    /// Same contract as [`TileGrid::load_csv`]; split out so tests can feed
    /// in-memory maps.
    pub fn load_from_reader<R: Read>(&mut self, rdr: R, level: usize) -> Result<(), MapError> {
        let grid = self
            .levels
            .get(level)
            .ok_or(MapError::NoSuchLevel(level))?;
        let (rows, cols) = (grid.rows, grid.cols);

        // `flexible` so ragged records surface as a dimension mismatch rather
        // than a csv parse error.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let mut records: Vec<Vec<i32>> = Vec::with_capacity(rows as usize);
        for record in reader.deserialize() {
            let record: Vec<i32> = record?;
            records.push(record);
        }

        let found_rows = records.len() as u32;
        let found_cols = records.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let ragged = records.iter().any(|r| r.len() as u32 != cols);
        if found_rows != rows || ragged {
            return Err(MapError::DimensionMismatch {
                expected_rows: rows,
                expected_cols: cols,
                found_rows,
                found_cols,
            });
        }

        let grid = &mut self.levels[level];
        for (r, record) in records.iter().enumerate() {
            for (c, &value) in record.iter().enumerate() {
                let idx = grid.index(r as u32, c as u32);
                grid.cells[idx] = Cell::with_value(value);
            }
        }
        debug!("level {} grid filled, {}x{}", level, rows, cols);
        Ok(())
    }

    /// Serialize a level's tile codes back to CSV, row-major.
    pub fn save_csv(&self, path: impl AsRef<Path>, level: usize) -> Result<(), MapError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.save_to_writer(file, level)?;
        info!("saved level {} map to {}", level, path.display());
        Ok(())
    }

    /// Serialize a level's tile codes to any writer. See [`TileGrid::save_csv`].
    pub fn save_to_writer<W: Write>(&self, wtr: W, level: usize) -> Result<(), MapError> {
        let grid = self
            .levels
            .get(level)
            .ok_or(MapError::NoSuchLevel(level))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(wtr);
        for row in 0..grid.rows {
            let record: Vec<String> = (0..grid.cols)
                .map(|col| grid.cells[grid.index(row, col)].value.to_string())
                .collect();
            writer.write_record(&record)?;
        }
        writer.flush().map_err(MapError::Io)?;
        Ok(())
    }

    /// Bounds-checked read of a tile code on the active level.
    ///
    /// With `invert == true`, `row` is a world row (bottom-left origin) and is
    /// flipped to the storage row before lookup.
    pub fn get(&self, row: u32, col: u32, invert: bool) -> Result<i32, MapError> {
        self.cell(row, col, invert).map(|cell| cell.value)
    }

    /// Bounds-checked write of a tile code on the active level.
    pub fn set(&mut self, row: u32, col: u32, value: i32, invert: bool) -> Result<(), MapError> {
        self.cell_mut(row, col, invert).map(|cell| cell.value = value)
    }

    /// Bounds-checked access to a full cell, pathfinding metadata included.
    pub fn cell(&self, row: u32, col: u32, invert: bool) -> Result<&Cell, MapError> {
        let grid = &self.levels[self.current_level];
        let row = Self::storage_row(grid, row, col, invert)?;
        Ok(&grid.cells[grid.index(row, col)])
    }

    /// Mutable counterpart of [`TileGrid::cell`].
    pub fn cell_mut(&mut self, row: u32, col: u32, invert: bool) -> Result<&mut Cell, MapError> {
        let grid = &mut self.levels[self.current_level];
        let row = Self::storage_row(grid, row, col, invert)?;
        let idx = grid.index(row, col);
        Ok(&mut grid.cells[idx])
    }

    /// Row-major linear scan of the active level for the first cell holding
    /// `target`. Returns `(row, col)` in the same row convention the `invert`
    /// flag selects, or `None` when the value is absent.
    pub fn find_value(&self, target: i32, invert: bool) -> Option<(u32, u32)> {
        let grid = &self.levels[self.current_level];
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                if grid.cells[grid.index(row, col)].value == target {
                    let row = if invert { grid.rows - 1 - row } else { row };
                    return Some((row, col));
                }
            }
        }
        None
    }

    // Bounds check happens before the flip so the subtraction cannot wrap.
    fn storage_row(grid: &LevelGrid, row: u32, col: u32, invert: bool) -> Result<u32, MapError> {
        if row >= grid.rows || col >= grid.cols {
            return Err(MapError::OutOfRange {
                row,
                col,
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        Ok(if invert { grid.rows - 1 - row } else { row })
    }
}
