//! Events emitted by the director for host feedback (audio, UI, debugging).

use serde::{Deserialize, Serialize};

use crate::enums::{BeatSource, EncounterState, MovementMode};

/// Feedback events drained from the director once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DirectorEvent {
    /// The encounter state machine transitioned.
    StateChanged {
        from: EncounterState,
        to: EncounterState,
    },
    /// An attack beat started.
    AttackStarted { index: usize, source: BeatSource },
    /// The active attack ended (reset = force-stopped by a transition).
    AttackEnded { index: usize, reset: bool },
    /// A movement beat started.
    MovementStarted {
        mode: MovementMode,
        source: BeatSource,
    },
    /// A downtime beat started (thinking pauses included).
    DowntimeStarted { duration_secs: f64, thinking: bool },
    /// The retreat trigger fired.
    RetreatTriggered { accumulated_damage: f64 },
    /// No attack was eligible even with repeats allowed.
    NoEligibleAttack,
    /// An exclusive scripted sequence had no runnable step this cycle.
    ScriptedSequenceStalled,
}
