//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component will not be despawned when the
//! scene is torn down. Used for observers and other global machinery that
//! must survive a level restart.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that should persist across scene changes.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
