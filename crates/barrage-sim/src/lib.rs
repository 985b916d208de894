//! Headless encounter harness for BARRAGE.
//!
//! Owns the hecs ECS world and wires the behavior director to the pattern
//! spawner: projectiles and their motion tasks are entities advanced by
//! per-tick systems, beams are advanced as volley groups, and the whole
//! engine is deterministic for a given seed. No rendering, no real
//! physics — collision queries run against a static AABB world.

pub mod collision;
pub mod components;
pub mod engine;
pub mod scenario;
pub mod systems;

pub use barrage_core as core;

#[cfg(test)]
mod tests;
