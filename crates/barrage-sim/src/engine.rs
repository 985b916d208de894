//! The encounter engine — owns the ECS world and all encounter state.
//!
//! Wires the behavior director to the pattern spawner, runs the per-tick
//! systems, and produces `EncounterFrame` snapshots. Completely headless;
//! the same seed and inputs replay the same encounter.

use hecs::World;
use serde::Serialize;

use barrage_core::config::{EncounterPreset, PatternBinding};
use barrage_core::enums::EncounterState;
use barrage_core::events::DirectorEvent;
use barrage_core::types::{SimTime, Vec2};
use barrage_director::director::BehaviorDirector;
use barrage_director::hooks::{AttackHost, DirectorInput, HealthSample};
use barrage_patterns::engine::FireContext;
use barrage_patterns::scheduler::PatternSpawner;

use crate::collision::StaticWorld;
use crate::components::Projectile;
use crate::scenario;
use crate::systems::{self, beams::ActiveBeamVolley};

/// Configuration for starting a new encounter.
pub struct EncounterConfig {
    /// RNG seed for determinism. Same seed = same encounter.
    pub seed: u64,
    pub preset: EncounterPreset,
    pub boss_position: Vec2,
    pub target_position: Vec2,
    pub boss_max_health: f64,
    pub geometry: StaticWorld,
    /// Projectiles past this |x| or |y| despawn.
    pub world_half_extent: f64,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            preset: scenario::default_encounter(),
            boss_position: Vec2::ZERO,
            target_position: Vec2::new(6.0, 0.0),
            boss_max_health: 100.0,
            geometry: StaticWorld::default(),
            world_half_extent: 100.0,
        }
    }
}

/// Zone-entry/exit detection signal, debounced by a reference count.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionSignal {
    count: u32,
}

impl DetectionSignal {
    pub fn entered(&mut self) {
        self.count += 1;
    }

    pub fn exited(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn in_range(&self) -> bool {
        self.count > 0
    }
}

/// Per-tick snapshot of the encounter.
#[derive(Debug, Clone, Serialize)]
pub struct EncounterFrame {
    pub tick: u64,
    pub state: EncounterState,
    pub boss_position: Vec2,
    pub facing_dx: f64,
    pub projectile_count: usize,
    pub beam_count: usize,
    pub events: Vec<DirectorEvent>,
}

/// Routes the director's attack lifecycle into the pattern spawner.
struct SpawnerHost<'a> {
    spawner: &'a mut PatternSpawner,
}

impl AttackHost for SpawnerHost<'_> {
    fn begin_attack(&mut self, binding: PatternBinding) {
        self.spawner.play_group(
            binding.group_index,
            None,
            binding.reset_on_begin,
            binding.fire_immediately,
        );
    }

    fn end_attack(&mut self, binding: PatternBinding, reset: bool) {
        self.spawner.stop(reset && binding.reset_on_end);
    }
}

/// The encounter engine.
pub struct EncounterEngine {
    world: World,
    time: SimTime,
    director: BehaviorDirector,
    spawner: PatternSpawner,
    geometry: StaticWorld,
    beam_volleys: Vec<ActiveBeamVolley>,
    detection: DetectionSignal,
    target_position: Vec2,
    boss_health: HealthSample,
    despawn_buffer: Vec<hecs::Entity>,
    world_half_extent: f64,
}

impl EncounterEngine {
    pub fn new(config: EncounterConfig) -> Self {
        let director =
            BehaviorDirector::new(config.preset.director, config.boss_position, config.seed);
        let spawner = PatternSpawner::new(config.preset.spawner);

        Self {
            world: World::new(),
            time: SimTime::default(),
            director,
            spawner,
            geometry: config.geometry,
            beam_volleys: Vec::new(),
            detection: DetectionSignal::default(),
            target_position: config.target_position,
            boss_health: HealthSample {
                current: config.boss_max_health,
                max: config.boss_max_health,
            },
            despawn_buffer: Vec::new(),
            world_half_extent: config.world_half_extent,
        }
    }

    /// The target stepped into the detection zone.
    pub fn target_entered(&mut self) {
        self.detection.entered();
    }

    /// The target stepped out of the detection zone.
    pub fn target_exited(&mut self) {
        self.detection.exited();
    }

    pub fn set_target_position(&mut self, position: Vec2) {
        self.target_position = position;
    }

    pub fn damage_boss(&mut self, amount: f64) {
        self.boss_health.current = (self.boss_health.current - amount).max(0.0);
    }

    pub fn boss_health(&self) -> HealthSample {
        self.boss_health
    }

    pub fn director(&self) -> &BehaviorDirector {
        &self.director
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    /// Advance the encounter by one tick and return the snapshot.
    pub fn tick(&mut self) -> EncounterFrame {
        let dt = self.time.dt();

        let input = DirectorInput {
            dt,
            target: Some(self.target_position),
            target_in_range: self.detection.in_range(),
            health: Some(self.boss_health),
        };
        let mut host = SpawnerHost {
            spawner: &mut self.spawner,
        };
        self.director.tick(&input, &self.geometry, &mut host);

        // Emission: the spawner fires from the boss's current position.
        let fire_ctx = FireContext {
            origin: self.director.position(),
            target: Some(self.target_position),
        };
        let output = self.spawner.tick(dt, &fire_ctx);
        systems::spawn::run(&mut self.world, output.spawns);
        for volley in output.beam_volleys {
            self.beam_volleys.push(ActiveBeamVolley {
                beams: volley.beams,
                clock: volley.shared_clock,
            });
        }

        systems::motion::run(&mut self.world, dt, Some(self.target_position));
        let beam_frames = systems::beams::run(
            &mut self.beam_volleys,
            dt,
            self.director.position(),
            Some(self.target_position),
        );
        systems::cleanup::run(
            &mut self.world,
            dt,
            self.world_half_extent,
            &mut self.despawn_buffer,
        );

        self.time.advance();

        EncounterFrame {
            tick: self.time.tick,
            state: self.director.state(),
            boss_position: self.director.position(),
            facing_dx: self.director.facing_dx(),
            projectile_count: self.projectile_count(),
            beam_count: beam_frames.len(),
            events: self.director.drain_events(),
        }
    }
}
