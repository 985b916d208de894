//! Configuration records.
//!
//! Everything here is authored once and read at runtime; nothing in this
//! module is mutated while an encounter runs. Per-activation mutable state
//! (fire angle, spin speed) lives in `barrage-patterns::spin::SpinState`,
//! cloned from these records on slot activation.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Vec2;

// --- Director ---

/// Binding from an attack to a spawner pattern group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternBinding {
    /// Index into the spawner's pattern groups.
    pub group_index: usize,
    /// Reset the group's slots when the attack begins.
    pub reset_on_begin: bool,
    /// Skip the initial cooldown so the first shot is immediate.
    pub fire_immediately: bool,
    /// Reset the group when the attack is force-stopped.
    pub reset_on_end: bool,
}

impl Default for PatternBinding {
    fn default() -> Self {
        Self {
            group_index: 0,
            reset_on_begin: true,
            fire_immediately: true,
            reset_on_end: true,
        }
    }
}

/// One configured attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackDefinition {
    pub name: String,
    /// How long the attack beat runs (seconds).
    pub duration: f64,
    /// Selection weight; used only in WeightedRandom mode.
    pub weight: f64,
    /// Eligible only while hp fraction is within [min, max].
    pub min_hp_fraction: f64,
    pub max_hp_fraction: f64,
    /// Eligible only while distance to target is within [min, max].
    pub min_distance: f64,
    pub max_distance: f64,
    /// If false, this attack can't be chosen twice in a row.
    pub allow_repeat: bool,
    /// Bullet pattern binding; an attack without one is never eligible.
    pub pattern: Option<PatternBinding>,
}

impl Default for AttackDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            duration: 5.0,
            weight: 1.0,
            min_hp_fraction: 0.0,
            max_hp_fraction: 1.0,
            min_distance: 0.0,
            max_distance: 9999.0,
            allow_repeat: true,
            pattern: Some(PatternBinding::default()),
        }
    }
}

/// One step of a scripted sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceStep {
    pub action: SequenceAction,
    /// Index into the attack list when action = Attack.
    pub attack_index: usize,
    /// Movement mode when action = Movement.
    pub movement_mode: MovementMode,
    /// Negative = use the default duration for this action.
    pub duration_override: f64,
    pub health_gate: HealthGate,
    pub gate_a: f64,
    pub gate_b: f64,
    pub on_gate_fail: GateFailPolicy,
}

impl Default for SequenceStep {
    fn default() -> Self {
        Self {
            action: SequenceAction::Attack,
            attack_index: 0,
            movement_mode: MovementMode::SideToSideAnchor,
            duration_override: -1.0,
            health_gate: HealthGate::None,
            gate_a: 1.0,
            gate_b: 0.0,
            on_gate_fail: GateFailPolicy::SkipStep,
        }
    }
}

/// Waypoint patrol while no target is in range.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolSettings {
    pub enabled: bool,
    pub waypoints: Vec<Vec2>,
    pub move_speed: f64,
    pub arrive_distance: f64,
    pub wait_at_point: f64,
    pub loop_route: bool,
    pub ping_pong: bool,
}

impl Default for PatrolSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            waypoints: Vec::new(),
            move_speed: 2.5,
            arrive_distance: 0.15,
            wait_at_point: 0.25,
            loop_route: true,
            ping_pong: false,
        }
    }
}

/// Tuning shared by all movement beat modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub enabled: bool,
    /// Bernoulli probability of a movement beat after a finished attack.
    pub chance_after_attack: f64,
    pub duration: f64,
    pub cooldown: f64,
    /// Default mode for chance-rolled movement beats.
    pub mode: MovementMode,

    // SideToSideAnchor
    pub side_amplitude: f64,
    pub side_frequency: f64,
    pub side_move_speed: f64,

    // PlatformPatrol
    pub patrol_half_width: f64,
    pub patrol_speed: f64,
    pub patrol_start_right: bool,
    pub patrol_edge_pause: f64,

    // JumpArc
    pub jump_distance: f64,
    pub jump_height: f64,
    pub jump_duration: f64,
    pub jump_interval: f64,
    pub jump_towards_target: bool,
    pub jump_horizontal_only: bool,

    // JumpToHigherPlatform
    pub jump_higher_min_rise: f64,
    pub jump_higher_max_rise: f64,
    pub jump_higher_forward_min: f64,
    pub jump_higher_forward_max: f64,
    pub jump_higher_candidates: usize,
    pub jump_landing_clearance: f64,
    pub jump_fallback_to_arc: bool,

    // HoverSine
    pub hover_base_lift: f64,
    pub hover_side_amplitude: f64,
    pub hover_side_frequency: f64,
    pub hover_amplitude: f64,
    pub hover_frequency: f64,
    pub hover_lift_with_jump: bool,
    pub hover_lift_jump_duration: f64,
    pub hover_lift_jump_height: f64,
    pub hover_use_direct_position: bool,
    pub hover_move_speed: f64,
    pub hover_clamp_direct_speed: bool,
    pub hover_direct_max_speed: f64,
    pub disable_gravity_during_hover: bool,

    // Chaser
    pub chase_speed: f64,
    pub chase_stop_distance: f64,
    pub chase_dead_zone: f64,
    pub chase_horizontal_only: bool,

    // RepositionAroundTarget
    pub reposition_min_radius: f64,
    pub reposition_max_radius: f64,
    pub reposition_move_speed: f64,
    pub arrive_distance: f64,
    /// Pick one target on enter and stick to it.
    pub reposition_single_target: bool,
    /// Limit how far above/below the anchor a reposition target can be.
    pub reposition_max_y_offset: f64,

    // Collision-safe movement
    pub use_collision_safe_movement: bool,
    pub collision_skin: f64,
    /// Ignore sweep hits at distance ~0 so floor contact doesn't freeze
    /// movement.
    pub ignore_initial_overlap_hits: bool,
    /// Ignore the one-way platform layer during HoverSine.
    pub ignore_one_way_during_hover: bool,
    /// Ignore the one-way platform layer during jump modes.
    pub ignore_one_way_during_jumps: bool,
    /// Half-height of the boss body, for landing placement.
    pub body_half_height: f64,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            chance_after_attack: 0.35,
            duration: 1.2,
            cooldown: 0.75,
            mode: MovementMode::SideToSideAnchor,

            side_amplitude: 2.0,
            side_frequency: 1.25,
            side_move_speed: 8.0,

            patrol_half_width: 3.0,
            patrol_speed: 3.0,
            patrol_start_right: true,
            patrol_edge_pause: 0.1,

            jump_distance: 1.8,
            jump_height: 1.0,
            jump_duration: 0.38,
            jump_interval: 0.65,
            jump_towards_target: true,
            jump_horizontal_only: true,

            jump_higher_min_rise: 0.5,
            jump_higher_max_rise: 4.0,
            jump_higher_forward_min: 1.0,
            jump_higher_forward_max: 3.0,
            jump_higher_candidates: 6,
            jump_landing_clearance: 0.05,
            jump_fallback_to_arc: true,

            hover_base_lift: 0.8,
            hover_side_amplitude: 2.5,
            hover_side_frequency: 1.0,
            hover_amplitude: 0.6,
            hover_frequency: 1.2,
            hover_lift_with_jump: true,
            hover_lift_jump_duration: 0.22,
            hover_lift_jump_height: 0.45,
            hover_use_direct_position: true,
            hover_move_speed: 5.0,
            hover_clamp_direct_speed: true,
            hover_direct_max_speed: 6.0,
            disable_gravity_during_hover: true,

            chase_speed: 4.2,
            chase_stop_distance: 2.4,
            chase_dead_zone: 0.3,
            chase_horizontal_only: true,

            reposition_min_radius: 2.5,
            reposition_max_radius: 4.5,
            reposition_move_speed: 6.0,
            arrive_distance: 0.2,
            reposition_single_target: true,
            reposition_max_y_offset: 2.0,

            use_collision_safe_movement: true,
            collision_skin: 0.02,
            ignore_initial_overlap_hits: true,
            ignore_one_way_during_hover: true,
            ignore_one_way_during_jumps: true,
            body_half_height: 0.5,
        }
    }
}

/// Vulnerability-window tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DowntimeSettings {
    pub enabled: bool,
    /// Bernoulli probability of a downtime beat after a finished attack.
    pub chance_after_attack: f64,
    pub duration: f64,
}

impl Default for DowntimeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            chance_after_attack: 0.30,
            duration: 1.0,
        }
    }
}

/// Damage-threshold retreat tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RetreatSettings {
    pub enabled: bool,
    /// Trigger when this much damage has accumulated since the last reset.
    pub damage_threshold: f64,
    /// Minimum time between retreat triggers (seconds).
    pub cooldown: f64,
    /// Trigger only at or below this hp fraction.
    pub only_below_hp_fraction: f64,
    pub duration: f64,
    pub move_speed: f64,
    pub distance: f64,
    pub arrive_distance: f64,
    pub mode: RetreatMode,
    /// Downtime inserted after the retreat beat (0 = none).
    pub post_retreat_downtime: f64,
}

impl Default for RetreatSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            damage_threshold: 25.0,
            cooldown: 4.0,
            only_below_hp_fraction: 1.0,
            duration: 1.0,
            move_speed: 8.0,
            distance: 4.0,
            arrive_distance: 0.2,
            mode: RetreatMode::AwayFromTarget,
            post_retreat_downtime: 0.6,
        }
    }
}

/// Full behavior director configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Start in Patrol instead of Idle when patrol is configured.
    pub can_patrol: bool,
    /// Seconds between detection and engagement.
    pub detection_delay: f64,
    /// Seconds in Lost before returning to Idle/Patrol.
    pub lost_delay: f64,
    /// Ignore left/right facing deltas smaller than this.
    pub facing_deadzone: f64,
    /// Facing-cone width for `is_facing_target` queries (degrees).
    pub facing_fov_degrees: f64,
    /// Request the body rotation stay locked upright.
    pub keep_upright: bool,

    pub select_mode: AttackSelectMode,
    pub reset_selection_on_engage: bool,

    pub orchestration: OrchestrationMode,
    pub reset_scripted_on_engage: bool,
    pub loop_scripted: bool,
    pub scripted_steps: Vec<SequenceStep>,

    /// Pause inserted after each completed scripted step.
    pub thinking_pause_after_scripted: bool,
    /// Insert the same pause after chance-rolled beats.
    pub thinking_pause_after_chance: bool,
    /// Seconds to pause between beats so players can react.
    pub thinking_pause_duration: f64,

    pub attacks: Vec<AttackDefinition>,
    pub patrol: PatrolSettings,
    pub movement: MovementSettings,
    pub downtime: DowntimeSettings,
    pub retreat: RetreatSettings,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            can_patrol: false,
            detection_delay: 1.5,
            lost_delay: 2.0,
            facing_deadzone: 0.02,
            facing_fov_degrees: 50.0,
            keep_upright: true,
            select_mode: AttackSelectMode::WeightedRandom,
            reset_selection_on_engage: true,
            orchestration: OrchestrationMode::ChanceOnly,
            reset_scripted_on_engage: true,
            loop_scripted: true,
            scripted_steps: Vec::new(),
            thinking_pause_after_scripted: true,
            thinking_pause_after_chance: true,
            thinking_pause_duration: 0.75,
            attacks: Vec::new(),
            patrol: PatrolSettings::default(),
            movement: MovementSettings::default(),
            downtime: DowntimeSettings::default(),
            retreat: RetreatSettings::default(),
        }
    }
}

// --- Patterns ---

/// Spin tuning for a pattern's base fire angle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub enabled: bool,
    pub mode: SpinMode,
    /// Degrees advanced per step (Continuous) or per step magnitude
    /// (PingPong).
    pub speed: f64,
    /// Degrees per step added to the spin speed (Continuous only).
    pub change_rate: f64,
    /// Spin speed / ping-pong offset bound (degrees).
    pub max_speed: f64,
    /// Flip the change rate's sign at the bounds.
    pub reversal: bool,
    /// Granularity at which spin advances.
    pub step: SpinStep,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: SpinMode::Continuous,
            speed: 0.0,
            change_rate: 0.0,
            max_speed: 180.0,
            reversal: false,
            step: SpinStep::PerShot,
        }
    }
}

/// Lateral sine/cosine drift tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub enabled: bool,
    pub amplitude: f64,
    pub frequency: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            amplitude: 1.0,
            frequency: 1.0,
        }
    }
}

/// Outward spiral tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    pub enabled: bool,
    /// Angular turn rate in degrees per second.
    pub turn_rate: f64,
    pub clockwise: bool,
    /// false = simple variant (radius = speed x elapsed), true = combined
    /// variant (continuous position integration along the turning heading).
    pub combined: bool,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            turn_rate: 45.0,
            clockwise: true,
            combined: false,
        }
    }
}

/// Stop-and-redirect homing tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HomingConfig {
    pub enabled: bool,
    /// Number of stop-and-redirect cycles before flying out.
    pub max_stops: usize,
    /// Seconds stopped before redirecting.
    pub stop_duration: f64,
    /// Seconds of straight flight before each stop.
    pub initial_move_time: f64,
    /// Seconds spent lerping into the new direction.
    pub curve_duration: f64,
    /// Keep sine/cosine/spiral styling active through every homing phase
    /// instead of only the first.
    pub keep_styles_through_phases: bool,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_stops: 1,
            stop_duration: 1.0,
            initial_move_time: 1.0,
            curve_duration: 0.5,
            keep_styles_through_phases: false,
        }
    }
}

/// Timed multi-burst emission tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Copies spawned at each direction slot.
    pub bullets_per_location: usize,
    /// Bursts per fire invocation.
    pub burst_count: usize,
    /// Seconds between bullets inside a burst.
    pub intra_delay: f64,
    /// Seconds between bursts.
    pub inter_delay: f64,
    /// Spawn offsets cycled one per burst.
    pub fire_offsets: Vec<Vec2>,
    /// Flip spiral handedness on every other burst.
    pub alternate_spiral_handedness: bool,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            bullets_per_location: 2,
            burst_count: 6,
            intra_delay: 0.1,
            inter_delay: 0.5,
            fire_offsets: Vec::new(),
            alternate_spiral_handedness: true,
        }
    }
}

/// Telegraphed growing beam tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamConfig {
    /// Static indicator duration before the beam spawns.
    pub telegraph_duration: f64,
    /// Seconds the beam takes to grow to full range.
    pub growth_duration: f64,
    /// Active duration after growth.
    pub beam_duration: f64,
    pub range: f64,
    pub width: f64,
    /// Extra vertical offset of the beam origin.
    pub y_offset: f64,
    /// Re-aim the telegraph at the live target each tick.
    pub track_target_during_telegraph: bool,
    /// true = beam keeps the telegraph's final angle; false = re-samples
    /// the target at beam spawn.
    pub lock_to_telegraph_angle: bool,
    /// Stagger beam casts instead of starting them all at once.
    pub use_inter_beam_delay: bool,
    pub inter_beam_delay: f64,
    pub fan_order: BeamFanOrder,
    /// true = each staggered beam spins on its own clock; false = delayed
    /// beams share one clock started after the last beam spawns.
    pub independent_spin_clocks: bool,
    pub despawn: BeamDespawnMode,
    /// Restore the pre-volley fire angle once the volley ends.
    pub reset_angle_after_volley: bool,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            telegraph_duration: 1.0,
            growth_duration: 0.5,
            beam_duration: 2.0,
            range: 10.0,
            width: 1.0,
            y_offset: 0.5,
            track_target_during_telegraph: true,
            lock_to_telegraph_angle: true,
            use_inter_beam_delay: false,
            inter_beam_delay: 0.05,
            fan_order: BeamFanOrder::ArrayMajor,
            independent_spin_clocks: true,
            despawn: BeamDespawnMode::VolleyEnd,
            reset_angle_after_volley: true,
        }
    }
}

/// Emission shape of a pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PatternKind {
    /// Whole volley spawned at once per invocation.
    #[default]
    Volley,
    /// Bullets trickled out across timed bursts.
    Burst(BurstConfig),
    /// Telegraphed growing beams instead of bullets.
    Beam(BeamConfig),
}

impl PatternKind {
    pub fn is_burst(&self) -> bool {
        matches!(self, PatternKind::Burst(_))
    }
}

/// Immutable description of one bullet pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub name: String,
    /// Initial projectile speed (units/s).
    pub speed: f64,
    /// Speed gained per second.
    pub acceleration: f64,
    /// Seconds before a projectile is destroyed.
    pub lifespan: f64,
    /// Aim the base angle at the target; `fire_angle` is the fallback.
    pub aim_at_target: bool,
    /// Base fire angle in degrees when not aiming (or as aim fallback).
    pub fire_angle: f64,
    /// Offset of the spawn position from the fire point.
    pub spawn_offset: Vec2,
    /// Width/height of spawned projectiles.
    pub projectile_size: Vec2,
    /// Number of bullet arrays.
    pub total_arrays: usize,
    /// Bullets per array.
    pub bullets_per_array: usize,
    /// Degrees between adjacent arrays.
    pub array_spread_deg: f64,
    /// Total spread of one array's bullets.
    pub bullet_spread_deg: f64,
    pub spin: SpinConfig,
    pub sine: WaveConfig,
    pub cosine: WaveConfig,
    pub spiral: SpiralConfig,
    pub homing: HomingConfig,
    pub kind: PatternKind,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            speed: 5.0,
            acceleration: 0.0,
            lifespan: 6.0,
            aim_at_target: true,
            fire_angle: 0.0,
            spawn_offset: Vec2::ZERO,
            projectile_size: Vec2::new(0.1, 0.1),
            total_arrays: 3,
            bullets_per_array: 5,
            array_spread_deg: 90.0,
            bullet_spread_deg: 30.0,
            spin: SpinConfig::default(),
            sine: WaveConfig::default(),
            cosine: WaveConfig::default(),
            spiral: SpiralConfig::default(),
            homing: HomingConfig::default(),
            kind: PatternKind::Volley,
        }
    }
}

// --- Emission scheduling ---

/// Per-slot cadence: cooldown, active window, shot count, interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionSettings {
    /// Seconds between activations.
    pub cooldown: f64,
    /// Minimum active-window length (stretched to fit all shots).
    pub active_duration: f64,
    /// Shots fired per activation.
    pub shots: usize,
    /// Seconds between shots (stretched for burst patterns).
    pub interval: f64,
}

impl Default for EmissionSettings {
    fn default() -> Self {
        Self {
            cooldown: 2.0,
            active_duration: 1.0,
            shots: 1,
            interval: 0.5,
        }
    }
}

/// One pattern plus its cadence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSlotConfig {
    pub pattern: PatternConfig,
    pub emission: EmissionSettings,
}

/// Named set of slots that fire together while the group is active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternGroupConfig {
    pub name: String,
    pub slots: Vec<PatternSlotConfig>,
}

/// All pattern groups of one spawner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub groups: Vec<PatternGroupConfig>,
}

// --- Presets ---

/// A complete authored encounter: director + spawner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterPreset {
    pub director: DirectorConfig,
    pub spawner: SpawnerConfig,
}

impl EncounterPreset {
    /// Parse a preset from its JSON document form.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize the preset back to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
