//! Motion system — advances every projectile's motion task.
//!
//! Cancellation is liveness-based: a despawned entity takes its task with
//! it, so a task never runs for a dead projectile.

use barrage_core::types::Vec2;
use hecs::World;

use crate::components::{Motion, Position, Projectile, Velocity};

/// Advance all projectile motion tasks one tick.
pub fn run(world: &mut World, dt: f64, target: Option<Vec2>) {
    for (_entity, (_projectile, motion, position, velocity)) in
        world.query_mut::<(&Projectile, &mut Motion, &mut Position, &mut Velocity)>()
    {
        let frame = motion.0.advance(dt, target);
        position.0 = frame.position;
        velocity.0 = frame.velocity;
    }
}
