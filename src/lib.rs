//! Tilescene library.
//!
//! A teaching framework core for 2D tile-based games: CSV tilemaps behind a
//! bounds-checked grid resource, and keyboard-driven grid-aligned actor
//! movement with sub-tile interpolation. This module exposes the ECS
//! components, resources, systems, and events for use in integration tests
//! and as a reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
