//! ECS components for hecs entities.
//!
//! Components are plain data; behavior lives in systems.

use barrage_core::types::Vec2;
use barrage_patterns::motion::MotionTask;

/// World position.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Current velocity, informational (motion tasks own the integration).
#[derive(Debug, Clone, Copy)]
pub struct Velocity(pub Vec2);

/// Render size of a projectile.
#[derive(Debug, Clone, Copy)]
pub struct Size(pub Vec2);

/// Marks an entity as a projectile.
#[derive(Debug, Clone, Copy)]
pub struct Projectile;

/// Scheduled destruction after a lifespan.
#[derive(Debug, Clone, Copy)]
pub struct Lifetime {
    pub remaining: f64,
}

/// The projectile's motion task, advanced once per tick.
#[derive(Debug, Clone)]
pub struct Motion(pub MotionTask);
