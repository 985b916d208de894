#[cfg(test)]
mod tests {
    use barrage_core::config::{
        BurstConfig, EmissionSettings, PatternConfig, PatternGroupConfig, PatternKind,
        PatternSlotConfig, SpawnerConfig, SpinConfig,
    };
    use barrage_core::enums::{BeamDespawnMode, SpinStep};
    use barrage_core::types::Vec2;

    use crate::engine::{self, FireContext};
    use crate::scheduler::PatternSpawner;
    use crate::spin::SpinState;

    fn ctx_at(target: Vec2) -> FireContext {
        FireContext {
            origin: Vec2::ZERO,
            target: Some(target),
        }
    }

    fn volley_pattern() -> PatternConfig {
        PatternConfig {
            total_arrays: 3,
            bullets_per_array: 5,
            array_spread_deg: 90.0,
            bullet_spread_deg: 30.0,
            ..PatternConfig::default()
        }
    }

    fn burst_pattern() -> PatternConfig {
        PatternConfig {
            total_arrays: 2,
            bullets_per_array: 3,
            kind: PatternKind::Burst(BurstConfig {
                bullets_per_location: 2,
                burst_count: 4,
                intra_delay: 0.1,
                inter_delay: 0.5,
                ..BurstConfig::default()
            }),
            ..PatternConfig::default()
        }
    }

    // ---- Engine: volleys ----

    #[test]
    fn test_volley_bullet_count() {
        let config = volley_pattern();
        let mut spin = SpinState::from_config(&config);
        let volley = engine::fire(&config, &mut spin, &ctx_at(Vec2::new(10.0, 0.0)));
        assert_eq!(volley.spawns.len(), 15);
        assert!(volley.burst.is_none());
        assert!(volley.beam_volley.is_none());
    }

    #[test]
    fn test_volley_angles_normalized() {
        let mut config = volley_pattern();
        config.fire_angle = 350.0;
        config.aim_at_target = false;
        let mut spin = SpinState::from_config(&config);
        let volley = engine::fire(&config, &mut spin, &ctx_at(Vec2::ZERO));
        for spawn in &volley.spawns {
            assert!((0.0..360.0).contains(&spawn.angle_deg));
        }
    }

    #[test]
    fn test_aim_without_spin_reaims_every_shot() {
        let config = volley_pattern();
        let mut spin = SpinState::from_config(&config);

        let east = engine::fire(&config, &mut spin, &ctx_at(Vec2::new(10.0, 0.0)));
        let north = engine::fire(&config, &mut spin, &ctx_at(Vec2::new(0.0, 10.0)));

        // Array 0 / bullet 2 is dead-center on the base angle.
        assert!((east.spawns[2].angle_deg - 0.0).abs() < 1e-9);
        assert!((north.spawns[2].angle_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_aim_with_spin_seeds_once() {
        let mut config = volley_pattern();
        config.spin = SpinConfig {
            enabled: true,
            speed: 10.0,
            ..SpinConfig::default()
        };
        let mut spin = SpinState::from_config(&config);

        let first = engine::fire(&config, &mut spin, &ctx_at(Vec2::new(10.0, 0.0)));
        // Target teleports; a spinning aimed volley must not re-aim.
        let second = engine::fire(&config, &mut spin, &ctx_at(Vec2::new(0.0, 10.0)));

        assert!((first.spawns[2].angle_deg - 0.0).abs() < 1e-9);
        // Base advanced by exactly one spin step from the seeded angle.
        assert!((second.spawns[2].angle_deg - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_volley_per_bullet_spin_advances_within_volley() {
        let mut config = volley_pattern();
        config.aim_at_target = false;
        config.total_arrays = 1;
        config.bullets_per_array = 1;
        config.spin = SpinConfig {
            enabled: true,
            speed: 5.0,
            step: SpinStep::PerBullet,
            ..SpinConfig::default()
        };
        let mut spin = SpinState::from_config(&config);
        engine::fire(&config, &mut spin, &ctx_at(Vec2::ZERO));
        engine::fire(&config, &mut spin, &ctx_at(Vec2::ZERO));
        assert!((spin.fire_angle - 10.0).abs() < 1e-9);
    }

    // ---- Engine: bursts ----

    #[test]
    fn test_burst_min_refire_delay_scenario() {
        // 2 arrays x 3 bullets x 2 per location, 4 bursts, 0.1s fire rate,
        // 0.5s burst gap -> 4 x (12 x 0.1) + 3 x 0.5 = 6.3s
        let config = burst_pattern();
        let required = engine::required_min_refire_delay(&config).unwrap();
        assert!((required - 6.3).abs() < 1e-9, "required = {required}");
    }

    #[test]
    fn test_non_burst_has_no_min_refire_delay() {
        assert!(engine::required_min_refire_delay(&volley_pattern()).is_none());
    }

    #[test]
    fn test_burst_sequence_emits_all_instances() {
        let config = burst_pattern();
        let mut spin = SpinState::from_config(&config);
        let ctx = ctx_at(Vec2::new(10.0, 0.0));
        let mut burst = engine::fire(&config, &mut spin, &ctx).burst.unwrap();

        let mut emitted = 0;
        let dt = 0.02;
        for _ in 0..400 {
            emitted += burst.advance(dt, &mut spin, &ctx).len();
            if burst.is_done() {
                break;
            }
        }
        assert!(burst.is_done(), "sequence should finish inside 8 seconds");
        assert_eq!(emitted, 2 * 3 * 2 * 4);
    }

    #[test]
    fn test_burst_sequence_paced_not_instant() {
        let config = burst_pattern();
        let mut spin = SpinState::from_config(&config);
        let ctx = ctx_at(Vec2::new(10.0, 0.0));
        let mut burst = engine::fire(&config, &mut spin, &ctx).burst.unwrap();

        // One tick emits at most the instances that came due, not the lot.
        let first_tick = burst.advance(0.02, &mut spin, &ctx).len();
        assert!(first_tick >= 1);
        assert!(first_tick < 48, "burst must trickle out over time");
    }

    // ---- Engine: beams ----

    #[test]
    fn test_beam_volley_cast_count_and_restore() {
        let mut config = volley_pattern();
        config.total_arrays = 2;
        config.bullets_per_array = 2;
        config.kind = PatternKind::Beam(Default::default());
        let mut spin = SpinState::from_config(&config);

        let volley = engine::fire(&config, &mut spin, &ctx_at(Vec2::new(10.0, 0.0)));
        let beams = volley.beam_volley.unwrap();
        assert_eq!(beams.beams.len(), 4);
        assert!(beams.shared_clock.is_none());
        assert!(volley.angle_restore.is_some());
    }

    #[test]
    fn test_staggered_beams_share_clock_when_configured() {
        let mut config = volley_pattern();
        config.total_arrays = 3;
        config.bullets_per_array = 1;
        config.spin = SpinConfig {
            enabled: true,
            speed: 30.0,
            ..SpinConfig::default()
        };
        let mut beam_cfg = barrage_core::config::BeamConfig {
            use_inter_beam_delay: true,
            inter_beam_delay: 0.1,
            independent_spin_clocks: false,
            despawn: BeamDespawnMode::VolleyEnd,
            ..Default::default()
        };
        beam_cfg.telegraph_duration = 0.2;
        config.kind = PatternKind::Beam(beam_cfg);

        let mut spin = SpinState::from_config(&config);
        let volley = engine::fire(&config, &mut spin, &ctx_at(Vec2::new(10.0, 0.0)));
        assert!(volley.beam_volley.unwrap().shared_clock.is_some());
    }

    // ---- Scheduler ----

    fn spawner_with(pattern: PatternConfig, emission: EmissionSettings) -> PatternSpawner {
        PatternSpawner::new(SpawnerConfig {
            groups: vec![PatternGroupConfig {
                name: "main".into(),
                slots: vec![PatternSlotConfig { pattern, emission }],
            }],
        })
    }

    #[test]
    fn test_slot_fires_requested_shot_count_then_cools_down() {
        let mut spawner = spawner_with(
            volley_pattern(),
            EmissionSettings {
                cooldown: 5.0,
                active_duration: 0.5,
                shots: 3,
                interval: 0.5,
            },
        );
        spawner.play_group(0, None, true, true);

        let ctx = ctx_at(Vec2::new(10.0, 0.0));
        let mut volleys = 0;
        for _ in 0..40 {
            let out = spawner.tick(0.05, &ctx);
            volleys += out.spawns.len() / 15;
        }
        // 3 shots inside the (stretched) active window, then cooldown.
        assert_eq!(volleys, 3);
    }

    #[test]
    fn test_cooldown_delays_first_shot_without_fire_immediately() {
        let mut spawner = spawner_with(
            volley_pattern(),
            EmissionSettings {
                cooldown: 1.0,
                active_duration: 0.5,
                shots: 1,
                interval: 0.5,
            },
        );
        spawner.play_group(0, None, true, false);

        let ctx = ctx_at(Vec2::new(10.0, 0.0));
        let early = spawner.tick(0.5, &ctx);
        assert!(early.spawns.is_empty(), "still cooling down");
        let due = spawner.tick(0.6, &ctx);
        assert_eq!(due.spawns.len(), 15);
    }

    #[test]
    fn test_catch_up_fires_missed_shots_in_one_tick() {
        let mut spawner = spawner_with(
            volley_pattern(),
            EmissionSettings {
                cooldown: 10.0,
                active_duration: 1.0,
                shots: 5,
                interval: 0.3,
            },
        );
        spawner.play_group(0, None, true, true);

        let ctx = ctx_at(Vec2::new(10.0, 0.0));
        let first = spawner.tick(0.01, &ctx);
        assert_eq!(first.spawns.len(), 15, "one volley on activation");

        // A long hitch: the remaining 4 shots all come due at once.
        let hitch = spawner.tick(2.0, &ctx);
        assert_eq!(hitch.spawns.len(), 4 * 15);
    }

    #[test]
    fn test_burst_slot_fires_at_most_once_per_tick() {
        let mut spawner = spawner_with(
            burst_pattern(),
            EmissionSettings {
                cooldown: 1.0,
                active_duration: 1.0,
                shots: 3,
                interval: 0.1,
            },
        );
        spawner.play_group(0, None, true, true);

        let ctx = ctx_at(Vec2::new(10.0, 0.0));
        // Huge hitch: a non-burst slot would stack invocations; a burst
        // slot starts exactly one sequence (its first instances only).
        let out = spawner.tick(20.0, &ctx);
        assert!(
            out.spawns.len() <= 12,
            "one burst sequence at most, got {}",
            out.spawns.len()
        );
    }

    #[test]
    fn test_stop_with_reset_clears_slot_state() {
        let mut spawner = spawner_with(
            volley_pattern(),
            EmissionSettings {
                cooldown: 1.0,
                active_duration: 1.0,
                shots: 10,
                interval: 0.2,
            },
        );
        spawner.play_group(0, None, true, true);
        let ctx = ctx_at(Vec2::new(10.0, 0.0));
        spawner.tick(0.01, &ctx);
        spawner.stop(true);
        assert!(!spawner.is_firing());

        // Nothing fires while stopped.
        for _ in 0..20 {
            assert!(spawner.tick(0.1, &ctx).spawns.is_empty());
        }
    }

    #[test]
    fn test_invalid_group_index_is_ignored() {
        let mut spawner = spawner_with(volley_pattern(), EmissionSettings::default());
        spawner.play_group(7, None, true, true);
        assert!(!spawner.is_firing());
        assert_eq!(spawner.active_group(), None);
    }

    #[test]
    fn test_in_flight_burst_survives_stop_without_reset() {
        let mut spawner = spawner_with(
            burst_pattern(),
            EmissionSettings {
                cooldown: 1.0,
                active_duration: 1.0,
                shots: 1,
                interval: 0.1,
            },
        );
        spawner.play_group(0, None, true, true);
        let ctx = ctx_at(Vec2::new(10.0, 0.0));
        let started = spawner.tick(0.01, &ctx);
        assert!(!started.spawns.is_empty());

        spawner.stop(false);
        let mut trailing = 0;
        for _ in 0..400 {
            trailing += spawner.tick(0.02, &ctx).spawns.len();
        }
        assert!(trailing > 0, "in-flight burst keeps emitting after stop");
    }
}
