//! Authored encounter presets.

use barrage_core::config::{
    AttackDefinition, BeamConfig, BurstConfig, DirectorConfig, EmissionSettings, EncounterPreset,
    PatternBinding, PatternConfig, PatternGroupConfig, PatternKind, PatternSlotConfig,
    SpawnerConfig, SpinConfig,
};
use barrage_core::enums::{MovementMode, SpinMode, SpinStep};

/// A two-phase boss: an aimed spinning fan above 60% health, a denser
/// burst below it, with side-steps between attacks.
pub fn default_encounter() -> EncounterPreset {
    let fan = PatternConfig {
        name: "aimed-fan".into(),
        speed: 6.0,
        lifespan: 4.0,
        total_arrays: 3,
        bullets_per_array: 5,
        array_spread_deg: 40.0,
        bullet_spread_deg: 24.0,
        spin: SpinConfig {
            enabled: true,
            mode: SpinMode::Continuous,
            speed: 6.0,
            change_rate: 0.5,
            max_speed: 24.0,
            reversal: true,
            step: SpinStep::PerShot,
        },
        ..PatternConfig::default()
    };

    let pressure_burst = PatternConfig {
        name: "pressure-burst".into(),
        speed: 7.5,
        acceleration: 1.5,
        lifespan: 3.5,
        total_arrays: 2,
        bullets_per_array: 3,
        array_spread_deg: 30.0,
        bullet_spread_deg: 18.0,
        kind: PatternKind::Burst(BurstConfig {
            bullets_per_location: 1,
            burst_count: 3,
            intra_delay: 0.06,
            inter_delay: 0.35,
            ..BurstConfig::default()
        }),
        ..PatternConfig::default()
    };

    let spawner = SpawnerConfig {
        groups: vec![
            PatternGroupConfig {
                name: "fan".into(),
                slots: vec![PatternSlotConfig {
                    pattern: fan,
                    emission: EmissionSettings {
                        cooldown: 1.5,
                        active_duration: 2.0,
                        shots: 4,
                        interval: 0.5,
                    },
                }],
            },
            PatternGroupConfig {
                name: "burst".into(),
                slots: vec![PatternSlotConfig {
                    pattern: pressure_burst,
                    emission: EmissionSettings {
                        cooldown: 2.0,
                        active_duration: 1.0,
                        shots: 1,
                        interval: 0.5,
                    },
                }],
            },
        ],
    };

    let mut director = DirectorConfig {
        detection_delay: 0.75,
        lost_delay: 1.5,
        ..DirectorConfig::default()
    };
    director.movement.mode = MovementMode::SideToSideAnchor;
    director.attacks = vec![
        AttackDefinition {
            name: "fan".into(),
            duration: 4.0,
            weight: 1.0,
            pattern: Some(PatternBinding {
                group_index: 0,
                ..PatternBinding::default()
            }),
            ..AttackDefinition::default()
        },
        AttackDefinition {
            name: "pressure-burst".into(),
            duration: 3.0,
            weight: 2.0,
            max_hp_fraction: 0.6,
            allow_repeat: false,
            pattern: Some(PatternBinding {
                group_index: 1,
                ..PatternBinding::default()
            }),
            ..AttackDefinition::default()
        },
    ];

    EncounterPreset { director, spawner }
}

/// Single-attack beam boss, for beam lifecycle tests and demos.
pub fn beam_encounter() -> EncounterPreset {
    let sweep_beams = PatternConfig {
        name: "sweep-beams".into(),
        total_arrays: 3,
        bullets_per_array: 1,
        array_spread_deg: 45.0,
        spin: SpinConfig {
            enabled: true,
            mode: SpinMode::Continuous,
            speed: 20.0,
            ..SpinConfig::default()
        },
        kind: PatternKind::Beam(BeamConfig {
            telegraph_duration: 0.4,
            growth_duration: 0.2,
            beam_duration: 1.0,
            range: 12.0,
            ..BeamConfig::default()
        }),
        ..PatternConfig::default()
    };

    let spawner = SpawnerConfig {
        groups: vec![PatternGroupConfig {
            name: "beams".into(),
            slots: vec![PatternSlotConfig {
                pattern: sweep_beams,
                emission: EmissionSettings {
                    cooldown: 3.0,
                    active_duration: 0.5,
                    shots: 1,
                    interval: 0.5,
                },
            }],
        }],
    };

    let mut director = DirectorConfig {
        detection_delay: 0.2,
        ..DirectorConfig::default()
    };
    director.movement.enabled = false;
    director.downtime.chance_after_attack = 0.0;
    director.thinking_pause_after_chance = false;
    director.attacks = vec![AttackDefinition {
        name: "sweep".into(),
        duration: 3.0,
        pattern: Some(PatternBinding::default()),
        ..AttackDefinition::default()
    }];

    EncounterPreset { director, spawner }
}
