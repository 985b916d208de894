//! Projectile factory system — turns spawn requests into entities.

use barrage_core::types::{vec_from_deg, Vec2};
use barrage_patterns::engine::ProjectileSpawnRequest;
use barrage_patterns::motion::MotionTask;
use hecs::World;

use crate::components::{Lifetime, Motion, Position, Projectile, Size, Velocity};

/// Spawn an entity per request, each owning its motion task.
pub fn run(world: &mut World, requests: Vec<ProjectileSpawnRequest>) {
    for request in requests {
        let task = MotionTask::new(
            request.position,
            request.angle_deg,
            request.speed,
            request.style,
        );
        let velocity: Vec2 = vec_from_deg(request.angle_deg) * request.speed;

        world.spawn((
            Projectile,
            Position(request.position),
            Velocity(velocity),
            Size(request.size),
            Lifetime {
                remaining: request.lifespan,
            },
            Motion(task),
        ));
    }
}
