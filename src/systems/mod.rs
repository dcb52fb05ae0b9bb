//! Framework systems.
//!
//! This module groups the ECS systems that advance simulation and input.
//!
//! Submodules overview
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`gridmove`] – grid-aligned actor movement with micro-step interpolation
//! - [`input`] – diff keyboard snapshots into [`crate::resources::input::InputState`]
//! - [`time`] – update simulation time and delta

pub mod gamestate;
pub mod gridmove;
pub mod input;
pub mod time;
