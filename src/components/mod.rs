//! ECS components for entities.
//!
//! This module groups the component types that can be attached to entities in
//! the game world.
//!
//! Submodules overview:
//! - [`gridactor`] – cell index, micro-step offsets, and derived UV position
//! - [`inputcontrolled`] – which direction-key group steers an actor
//! - [`persistent`] – marker for entities that persist across scene changes

pub mod gridactor;
pub mod inputcontrolled;
pub mod persistent;
