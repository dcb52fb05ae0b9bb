//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The frame
/// driver calls this before running the update schedule.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_accumulates_scaled_deltas() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(2.0));

        update_world_time(&mut world, 0.5);
        update_world_time(&mut world, 0.5);

        let time = world.resource::<WorldTime>();
        assert_eq!(time.frame_count, 2);
        assert!((time.delta - 1.0).abs() < 1e-6);
        assert!((time.elapsed - 2.0).abs() < 1e-6);
    }
}
