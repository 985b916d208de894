//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Angles & vectors ---

/// Squared-length threshold below which a vector has no usable direction.
pub const AIM_EPSILON: f64 = 1e-4;

// --- Emission timing ---

/// Smallest allowed inter-shot interval (seconds).
pub const MIN_FIRE_INTERVAL: f64 = 1e-4;

/// Slack added to computed active windows so the final shot lands inside.
pub const ACTIVE_WINDOW_EPSILON: f64 = 0.01;

/// Margin added to a burst pattern's minimum re-fire delay so in-flight
/// burst sequences never overlap.
pub const BURST_REFIRE_MARGIN: f64 = 0.01;

// --- Director pacing ---

/// Forced downtime when an exclusive scripted sequence has no runnable step.
pub const SCRIPT_STALL_DOWNTIME: f64 = 0.15;

/// Forced downtime when no attack is eligible even with repeats allowed.
pub const NO_ATTACK_DOWNTIME: f64 = 0.25;

/// Floor for attack beat durations (seconds).
pub const MIN_ATTACK_DURATION: f64 = 0.1;

/// Floor for movement/retreat beat durations (seconds).
pub const MIN_BEAT_DURATION: f64 = 0.05;

/// Floor for downtime beat durations (seconds).
pub const MIN_DOWNTIME: f64 = 0.01;

// --- Movement ---

/// Sweep hits closer than this count as pre-existing contact and are
/// ignored so floor contact does not freeze movement.
pub const CONTACT_EPSILON: f64 = 1e-4;

/// Arrival distance floor for move-to-point checks.
pub const ARRIVE_EPSILON: f64 = 1e-3;
