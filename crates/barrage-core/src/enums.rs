//! Enumeration types used throughout the encounter engine.

use serde::{Deserialize, Serialize};

/// Top-level behavior state of a boss encounter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    /// Waiting with no target in range.
    #[default]
    Idle,
    /// Walking a waypoint route while no target is in range.
    Patrol,
    /// Target detected; counting down the detection delay before engaging.
    Alert,
    /// Actively selecting and running attacks.
    Engaged,
    /// Non-attack movement beat.
    Movement,
    /// Vulnerability window with no attacks (also used for thinking pauses).
    Downtime,
    /// Target left range; attacks stop immediately, waits before returning
    /// to Idle/Patrol.
    Lost,
    /// Damage-threshold reposition.
    Retreat,
}

/// How the next attack is chosen when orchestration falls through to
/// direct selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackSelectMode {
    /// Advance a persistent cursor, scanning for the next eligible attack.
    Sequence,
    /// Draw from eligible attacks proportionally to their weights.
    #[default]
    WeightedRandom,
}

/// Beat orchestration policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrchestrationMode {
    /// Chance-rolled movement/downtime beats plus direct attack selection.
    #[default]
    ChanceOnly,
    /// Run only scripted steps; stall into a short downtime when none runs.
    ScriptedOnly,
    /// Try scripted steps first, fall back to chance + selection.
    ScriptedThenChance,
}

/// Movement beat style, all relative to an anchor captured at beat start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Intentional no-op (readable "breather" beat).
    Stationary,
    /// Sinusoidal left/right offset around the anchor.
    #[default]
    SideToSideAnchor,
    /// Bounded walk between anchor ± half-width with an edge pause.
    PlatformPatrol,
    /// Repeated parabolic hops.
    JumpArc,
    /// Hop that probes for a higher landing surface, with flat-arc fallback.
    JumpToHigherPlatform,
    /// Hovering sinusoidal drift with optional initial lift.
    HoverSine,
    /// Direct chase with a stop distance and dead zone.
    Chaser,
    /// Move to a randomly chosen point in an annulus around the target.
    RepositionAroundTarget,
}

/// Where a retreat beat goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetreatMode {
    /// Directly away from the target by a fixed distance.
    #[default]
    AwayFromTarget,
    /// Random point on a circle around the target.
    RandomAroundTarget,
    /// Nearest point from the patrol waypoint list.
    NearestWaypoint,
}

/// Action kind of a scripted sequence step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceAction {
    #[default]
    Attack,
    Movement,
    Downtime,
    Retreat,
    /// Identical to Downtime; reads better in authored sequences.
    Wait,
}

/// Health gate attached to a scripted step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthGate {
    #[default]
    None,
    /// hp fraction <= threshold_a
    AtOrBelow,
    /// hp fraction >= threshold_a
    AtOrAbove,
    /// min(a,b) <= hp fraction <= max(a,b)
    Between,
}

/// What to do when a step's health gate fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateFailPolicy {
    /// Keep scanning for the next runnable step.
    #[default]
    SkipStep,
    /// Abandon the whole scan for this cycle.
    StopSequence,
}

/// How a pattern's base angle evolves across steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinMode {
    /// Accumulating spin: angle += speed, speed += change rate, clamped,
    /// with optional reversal of the change rate at the bounds.
    #[default]
    Continuous,
    /// Bounded ping-pong: a fixed center angle plus an offset oscillating
    /// between -max and +max in fixed steps, reversing exactly at the
    /// bounds. Period-stable regardless of frame-rate jitter.
    PingPong,
}

/// Granularity at which spin advances during emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinStep {
    /// Once per engine invocation (volley/beam patterns).
    #[default]
    PerShot,
    /// Once per burst within a burst sequence.
    PerBurst,
    /// Once per array within a burst.
    PerArray,
    /// Once per direction (array x bullet slot) within a burst.
    PerDirection,
    /// Once per individual bullet instance.
    PerBullet,
}

/// Order in which staggered beam casts start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamFanOrder {
    /// A0B0, A0B1, A0B2, A1B0, ...
    #[default]
    ArrayMajor,
    /// A0B0, A1B0, A2B0, A0B1, ...
    BulletMajor,
}

/// When beams in a volley despawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamDespawnMode {
    /// All beams vanish together when the last would naturally end.
    #[default]
    VolleyEnd,
    /// All beams vanish at the first beam's natural end.
    FirstBeamEnd,
    /// Each beam ends on its own timer.
    PerBeam,
}

/// Which layer of orchestration chose the current beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeatSource {
    Scripted,
    Chance,
    Selection,
}
