//! Cleanup system — lifespan expiry and out-of-bounds despawn.

use hecs::World;

use crate::components::{Lifetime, Position};

/// Tick lifetimes and despawn expired or out-of-bounds entities.
pub fn run(world: &mut World, dt: f64, world_half_extent: f64, despawn_buffer: &mut Vec<hecs::Entity>) {
    despawn_buffer.clear();

    for (entity, (lifetime, position)) in world.query_mut::<(&mut Lifetime, &Position)>() {
        lifetime.remaining -= dt;

        let out_of_bounds = position.0.x.abs() > world_half_extent
            || position.0.y.abs() > world_half_extent;

        if lifetime.remaining <= 0.0 || out_of_bounds {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
