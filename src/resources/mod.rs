//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `gameconfig` – map dimensions, stepping resolution, and asset paths
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame keyboard snapshot and derived action state
//! - `legend` – tile code to glyph mapping for ASCII/debug display
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `tilegrid` – the CSV-backed level grid and its error taxonomy
//! - `worldtime` – simulation time and delta
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod legend;
pub mod systemsstore;
pub mod tilegrid;
pub mod worldtime;
