//! Collaborator contracts.
//!
//! The director never talks to the physics engine, the health system, or
//! the pattern spawner directly; hosts implement these traits and the
//! director stays a pure tick-driven state machine.

use barrage_core::config::PatternBinding;
use barrage_core::types::{clamp01, Vec2};

/// Current and maximum health of the boss body.
#[derive(Debug, Clone, Copy)]
pub struct HealthSample {
    pub current: f64,
    pub max: f64,
}

impl HealthSample {
    /// Health fraction clamped to [0,1]; a non-positive max reads as full.
    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            1.0
        } else {
            clamp01(self.current / self.max)
        }
    }
}

/// Health provider collaborator.
pub trait HealthSource {
    fn current(&self) -> f64;
    fn max(&self) -> f64;

    fn sample(&self) -> HealthSample {
        HealthSample {
            current: self.current(),
            max: self.max(),
        }
    }
}

/// A downward probe's first surface contact.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    pub point: Vec2,
    pub normal: Vec2,
}

/// Collision/physics query collaborator.
pub trait CollisionQuery {
    /// Sweep the boss body from `from` by `delta` against solid geometry.
    /// Returns the distance to the nearest blocking hit further than
    /// `min_distance` along the sweep, or None when the path is clear.
    /// `ignore_one_way` excludes the one-way platform layer.
    fn sweep(&self, from: Vec2, delta: Vec2, ignore_one_way: bool, min_distance: f64)
        -> Option<f64>;

    /// Cast a ray straight down from `origin`, returning the first
    /// surface hit within `max_distance`.
    fn probe_down(&self, origin: Vec2, max_distance: f64) -> Option<SurfaceHit>;
}

/// A world with no collidable geometry.
pub struct NoCollision;

impl CollisionQuery for NoCollision {
    fn sweep(&self, _: Vec2, _: Vec2, _: bool, _: f64) -> Option<f64> {
        None
    }

    fn probe_down(&self, _: Vec2, _: f64) -> Option<SurfaceHit> {
        None
    }
}

/// Attack lifecycle host — typically backed by a pattern spawner.
pub trait AttackHost {
    /// An attack beat began; play its bound pattern group.
    fn begin_attack(&mut self, binding: PatternBinding);
    /// The active attack beat is running. Most hosts tick their spawner
    /// globally and ignore this.
    fn tick_attack(&mut self, _binding: PatternBinding, _dt: f64) {}
    /// The attack beat ended. `reset` is set for force-stops (state
    /// transitions), cleared for natural completion.
    fn end_attack(&mut self, binding: PatternBinding, reset: bool);
}

/// Per-tick input to the director.
#[derive(Debug, Clone, Copy)]
pub struct DirectorInput {
    pub dt: f64,
    /// Live target position, if one exists at all.
    pub target: Option<Vec2>,
    /// Debounced detection signal: the target is inside the trigger zone.
    pub target_in_range: bool,
    /// Health reading for gates and the retreat trigger.
    pub health: Option<HealthSample>,
}
