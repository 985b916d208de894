//! Fundamental math and simulation types.
//!
//! All pattern math works in degrees with angle 0 pointing along +X and
//! angles increasing counter-clockwise. Normalized angles live in [0,360).

use serde::{Deserialize, Serialize};

/// 2D vector in world units. X = right, Y = up.
pub type Vec2 = glam::DVec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Wrap an angle in degrees into [0,360).
pub fn normalize_deg(angle: f64) -> f64 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Shortest signed difference `to - from` in degrees, in (-180, 180].
pub fn delta_deg(from: f64, to: f64) -> f64 {
    let mut delta = (to - from) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta <= -180.0 {
        delta += 360.0;
    }
    delta
}

/// Unit direction vector for an angle in degrees.
pub fn vec_from_deg(angle: f64) -> Vec2 {
    Vec2::from_angle(angle.to_radians())
}

/// Angle of a vector in degrees, normalized to [0,360).
/// Returns `fallback` for a near-zero vector.
pub fn deg_from_vec(v: Vec2, fallback: f64) -> f64 {
    if v.length_squared() <= crate::constants::AIM_EPSILON {
        return normalize_deg(fallback);
    }
    normalize_deg(v.y.atan2(v.x).to_degrees())
}

/// Rotate a vector by an angle in degrees (counter-clockwise).
pub fn rotate_deg(v: Vec2, angle: f64) -> Vec2 {
    Vec2::from_angle(angle.to_radians()).rotate(v)
}

/// Clamp a fraction to [0,1].
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Move `from` toward `to` by at most `max_delta`, without overshooting.
pub fn move_towards(from: Vec2, to: Vec2, max_delta: f64) -> Vec2 {
    let offset = to - from;
    let dist = offset.length();
    if dist <= max_delta || dist <= f64::EPSILON {
        to
    } else {
        from + offset / dist * max_delta
    }
}
