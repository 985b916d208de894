//! Boss behavior director for BARRAGE.
//!
//! Implements the encounter state machine, gated attack selection,
//! scripted sequencing, movement beats, and the damage-threshold retreat
//! trigger. External collaborators (health, collision, the pattern
//! spawner) are reached through the narrow traits in [`hooks`].

pub mod director;
pub mod hooks;
pub mod movement;
pub mod retreat;
pub mod selector;
pub mod sequencer;

pub use barrage_core as core;
