//! Pattern engine — computes one volley per invocation.
//!
//! Combines geometry, spin state, and motion styling into projectile
//! spawn requests. Burst patterns return a timed `BurstSequence` instead
//! of spawning everything at once; beam patterns return a set of beam
//! lifecycles plus an optional shared spin clock.

use barrage_core::config::{BeamConfig, BurstConfig, PatternConfig, PatternKind};
use barrage_core::enums::{BeamDespawnMode, BeamFanOrder, SpinStep};
use barrage_core::types::{deg_from_vec, normalize_deg, Vec2};

use crate::beam::{BeamState, SharedSpinClock};
use crate::geometry::{anchored_array_offset, bullet_offset_within_array, cast_angle};
use crate::motion::{MotionStyle, SpiralStyle, WaveStyle};
use crate::spin::SpinState;

/// Everything the projectile factory needs to create one projectile.
#[derive(Debug, Clone)]
pub struct ProjectileSpawnRequest {
    pub position: Vec2,
    pub angle_deg: f64,
    pub speed: f64,
    pub size: Vec2,
    pub lifespan: f64,
    pub style: MotionStyle,
}

/// Live inputs for a fire invocation.
#[derive(Debug, Clone, Copy)]
pub struct FireContext {
    /// Emitter position (spawn offsets are applied on top).
    pub origin: Vec2,
    /// Live target position, if any.
    pub target: Option<Vec2>,
}

/// Deferred restore of the slot's fire angle after a beam volley ends.
#[derive(Debug, Clone, Copy)]
pub struct AngleRestore {
    pub delay: f64,
    pub angle: f64,
}

/// Beams produced by one fire invocation, advanced together by the host.
#[derive(Debug)]
pub struct BeamVolley {
    pub beams: Vec<BeamState>,
    pub shared_clock: Option<SharedSpinClock>,
}

/// Output of one fire invocation.
#[derive(Debug, Default)]
pub struct Volley {
    pub spawns: Vec<ProjectileSpawnRequest>,
    pub beam_volley: Option<BeamVolley>,
    pub burst: Option<BurstSequence>,
    pub angle_restore: Option<AngleRestore>,
}

/// Fire the pattern once, producing a volley.
pub fn fire(config: &PatternConfig, spin: &mut SpinState, ctx: &FireContext) -> Volley {
    match &config.kind {
        PatternKind::Volley => fire_volley(config, spin, ctx),
        PatternKind::Burst(burst) => Volley {
            burst: Some(BurstSequence::new(config, burst)),
            ..Volley::default()
        },
        PatternKind::Beam(beam) => fire_beams(config, beam, spin, ctx),
    }
}

/// Minimum re-fire delay a burst pattern needs so that one invocation's
/// burst sequence finishes before the next begins. None for other kinds.
pub fn required_min_refire_delay(config: &PatternConfig) -> Option<f64> {
    let PatternKind::Burst(burst) = &config.kind else {
        return None;
    };

    let arrays = config.total_arrays.max(1);
    let bullets = config.bullets_per_array.max(1);
    let per_location = burst.bullets_per_location.max(1);
    let bursts = burst.burst_count.max(1);

    let instances_per_burst = (arrays * bullets * per_location) as f64;
    let intra = burst.intra_delay.max(0.0);
    let inter = burst.inter_delay.max(0.0);

    Some(bursts as f64 * (instances_per_burst * intra) + (bursts - 1) as f64 * inter)
}

/// Resolve the base angle for the next emission step.
///
/// Aiming with spin disabled re-aims live every call; aiming with spin
/// enabled seeds the base from the target once per activation and then
/// evolves purely from spin state.
fn resolve_base_angle(config: &PatternConfig, spin: &mut SpinState, ctx: &FireContext) -> f64 {
    let spawn_origin = ctx.origin + config.spawn_offset;

    if config.aim_at_target {
        if !config.spin.enabled {
            return match ctx.target {
                Some(target) => deg_from_vec(target - spawn_origin, config.fire_angle),
                None => normalize_deg(config.fire_angle),
            };
        }

        if !spin.seeded_from_target {
            if let Some(target) = ctx.target {
                spin.seed_from_target(deg_from_vec(target - spawn_origin, config.fire_angle));
            }
        }
        return spin.current_angle(&config.spin);
    }

    if config.spin.enabled {
        spin.current_angle(&config.spin)
    } else {
        normalize_deg(config.fire_angle)
    }
}

/// Build the motion style for one bullet. `ordinal` alternates sine and
/// cosine drift when both are enabled; `spiral_clockwise` overrides the
/// configured handedness (used by alternating bursts).
fn build_style(
    config: &PatternConfig,
    ordinal: usize,
    spiral_clockwise: Option<bool>,
) -> MotionStyle {
    let wave = match (config.sine.enabled, config.cosine.enabled) {
        (true, true) => Some(WaveStyle {
            amplitude: if ordinal % 2 == 0 {
                config.sine.amplitude
            } else {
                config.cosine.amplitude
            },
            frequency: if ordinal % 2 == 0 {
                config.sine.frequency
            } else {
                config.cosine.frequency
            },
            cosine: ordinal % 2 != 0,
        }),
        (true, false) => Some(WaveStyle {
            amplitude: config.sine.amplitude,
            frequency: config.sine.frequency,
            cosine: false,
        }),
        (false, true) => Some(WaveStyle {
            amplitude: config.cosine.amplitude,
            frequency: config.cosine.frequency,
            cosine: true,
        }),
        (false, false) => None,
    };

    let spiral = config.spiral.enabled.then(|| SpiralStyle {
        turn_rate_deg: config.spiral.turn_rate,
        clockwise: spiral_clockwise.unwrap_or(config.spiral.clockwise),
        combined: config.spiral.combined,
    });

    let homing = config.homing.enabled.then_some(config.homing);

    MotionStyle {
        acceleration: config.acceleration,
        wave,
        spiral,
        homing,
    }
}

fn spawn_request(
    config: &PatternConfig,
    position: Vec2,
    angle_deg: f64,
    ordinal: usize,
    spiral_clockwise: Option<bool>,
) -> ProjectileSpawnRequest {
    ProjectileSpawnRequest {
        position,
        angle_deg,
        speed: config.speed,
        size: config.projectile_size,
        lifespan: config.lifespan,
        style: build_style(config, ordinal, spiral_clockwise),
    }
}

fn fire_volley(config: &PatternConfig, spin: &mut SpinState, ctx: &FireContext) -> Volley {
    let arrays = config.total_arrays.max(1);
    let bullets = config.bullets_per_array.max(1);
    let spawn_pos = ctx.origin + config.spawn_offset;
    let step = config.spin.step;

    let mut spawns = Vec::with_capacity(arrays * bullets);
    let mut ordinal = 0;

    for array_index in 0..arrays {
        for bullet_index in 0..bullets {
            let base = resolve_base_angle(config, spin, ctx);
            let angle = cast_angle(
                base,
                array_index,
                arrays,
                config.array_spread_deg,
                bullet_index,
                bullets,
                config.bullet_spread_deg,
            );
            spawns.push(spawn_request(config, spawn_pos, angle, ordinal, None));
            ordinal += 1;

            if config.spin.enabled && step == SpinStep::PerBullet {
                spin.step(&config.spin);
            }
        }

        if config.spin.enabled && matches!(step, SpinStep::PerArray | SpinStep::PerDirection) {
            spin.step(&config.spin);
        }
    }

    if config.spin.enabled && matches!(step, SpinStep::PerShot | SpinStep::PerBurst) {
        spin.step(&config.spin);
    }

    Volley {
        spawns,
        ..Volley::default()
    }
}

fn fire_beams(
    config: &PatternConfig,
    beam: &BeamConfig,
    spin: &mut SpinState,
    ctx: &FireContext,
) -> Volley {
    let arrays = config.total_arrays.max(1);
    let bullets = config.bullets_per_array.max(1);

    let original_angle = spin.fire_angle;
    let base = resolve_base_angle(config, spin, ctx);

    // Build spread offsets in the configured fan order.
    let mut spreads = Vec::with_capacity(arrays * bullets);
    match beam.fan_order {
        BeamFanOrder::ArrayMajor => {
            for array_index in 0..arrays {
                let array_offset =
                    anchored_array_offset(array_index, arrays, config.array_spread_deg);
                for bullet_index in 0..bullets {
                    spreads.push(
                        array_offset
                            + bullet_offset_within_array(
                                bullet_index,
                                bullets,
                                config.bullet_spread_deg,
                            ),
                    );
                }
            }
        }
        BeamFanOrder::BulletMajor => {
            for bullet_index in 0..bullets {
                let bullet_offset =
                    bullet_offset_within_array(bullet_index, bullets, config.bullet_spread_deg);
                for array_index in 0..arrays {
                    spreads.push(
                        anchored_array_offset(array_index, arrays, config.array_spread_deg)
                            + bullet_offset,
                    );
                }
            }
        }
    }

    let count = spreads.len();
    let stagger = if beam.use_inter_beam_delay {
        beam.inter_beam_delay.max(0.0)
    } else {
        0.0
    };
    let batch_delay = stagger * count.saturating_sub(1) as f64;
    let first_beam_end = beam.telegraph_duration + beam.growth_duration + beam.beam_duration;
    let full_batch = first_beam_end + batch_delay;
    let global_end = match beam.despawn {
        BeamDespawnMode::FirstBeamEnd => first_beam_end,
        _ => full_batch,
    };

    let origin_offset = config.spawn_offset + Vec2::new(0.0, beam.y_offset);
    let use_shared_clock = stagger > 0.0 && config.spin.enabled && !beam.independent_spin_clocks;

    let beams = spreads
        .iter()
        .enumerate()
        .map(|(i, &spread)| {
            let start_delay = stagger * i as f64;
            let active_until = match beam.despawn {
                BeamDespawnMode::PerBeam => start_delay + first_beam_end,
                BeamDespawnMode::FirstBeamEnd => first_beam_end,
                BeamDespawnMode::VolleyEnd => full_batch,
            };
            BeamState::new(
                *beam,
                config.spin,
                config.aim_at_target,
                base,
                spread,
                spin.spin_speed,
                spin.change_rate,
                use_shared_clock,
                origin_offset,
                start_delay,
                active_until,
            )
        })
        .collect();

    let shared_clock = use_shared_clock.then(|| {
        // The shared clock starts only after the last beam finishes
        // spawning (its telegraph and growth included).
        let clock_start = batch_delay + beam.telegraph_duration + beam.growth_duration;
        let run_duration = (global_end - clock_start).max(0.0);
        SharedSpinClock::new(
            config.spin,
            spin.spin_speed,
            spin.change_rate,
            clock_start,
            run_duration,
        )
    });

    let angle_restore = beam.reset_angle_after_volley.then_some(AngleRestore {
        delay: global_end,
        angle: original_angle,
    });

    if config.spin.enabled {
        spin.step(&config.spin);
    }

    Volley {
        beam_volley: Some(BeamVolley {
            beams,
            shared_clock,
        }),
        angle_restore,
        ..Volley::default()
    }
}

/// Timed multi-burst emission, advanced once per tick by the owning slot.
///
/// Mutates the slot's `SpinState` at the configured granularity while it
/// runs; the scheduler guarantees at most one sequence per slot is in
/// flight at a time.
#[derive(Debug, Clone)]
pub struct BurstSequence {
    config: PatternConfig,
    burst: BurstConfig,
    arrays: usize,
    bullets: usize,
    per_location: usize,
    bursts: usize,
    burst_index: usize,
    array_index: usize,
    bullet_index: usize,
    location_index: usize,
    offset_index: usize,
    wait: f64,
    done: bool,
}

impl BurstSequence {
    fn new(config: &PatternConfig, burst: &BurstConfig) -> Self {
        Self {
            config: config.clone(),
            burst: burst.clone(),
            arrays: config.total_arrays.max(1),
            bullets: config.bullets_per_array.max(1),
            per_location: burst.bullets_per_location.max(1),
            bursts: burst.burst_count.max(1),
            burst_index: 0,
            array_index: 0,
            bullet_index: 0,
            location_index: 0,
            offset_index: 0,
            wait: 0.0,
            done: false,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance the sequence, emitting any bullets that come due this tick.
    pub fn advance(
        &mut self,
        dt: f64,
        spin: &mut SpinState,
        ctx: &FireContext,
    ) -> Vec<ProjectileSpawnRequest> {
        let mut out = Vec::new();
        if self.done {
            return out;
        }

        self.wait -= dt;

        while self.wait <= 0.0 && !self.done {
            self.emit_one(spin, ctx, &mut out);
            self.advance_cursor(spin);
        }

        out
    }

    fn emit_one(
        &mut self,
        spin: &mut SpinState,
        ctx: &FireContext,
        out: &mut Vec<ProjectileSpawnRequest>,
    ) {
        let offset = self
            .burst
            .fire_offsets
            .get(self.offset_index)
            .copied()
            .unwrap_or(Vec2::ZERO);

        let base = resolve_base_angle(&self.config, spin, ctx);
        let angle = cast_angle(
            base,
            self.array_index,
            self.arrays,
            self.config.array_spread_deg,
            self.bullet_index,
            self.bullets,
            self.config.bullet_spread_deg,
        );

        let spiral_clockwise = (self.config.spiral.enabled
            && self.burst.alternate_spiral_handedness)
            .then(|| {
                if self.burst_index % 2 == 0 {
                    self.config.spiral.clockwise
                } else {
                    !self.config.spiral.clockwise
                }
            });

        let position = ctx.origin + self.config.spawn_offset + offset;
        let ordinal = self.bullet_index * self.per_location + self.location_index;
        out.push(spawn_request(
            &self.config,
            position,
            angle,
            ordinal,
            spiral_clockwise,
        ));

        if self.config.spin.enabled && self.config.spin.step == SpinStep::PerBullet {
            spin.step(&self.config.spin);
        }
    }

    /// Move to the next instance, stepping spin and inserting waits at the
    /// location/direction/array/burst boundaries.
    fn advance_cursor(&mut self, spin: &mut SpinState) {
        let spin_enabled = self.config.spin.enabled;
        let step = self.config.spin.step;

        self.location_index += 1;
        if self.location_index < self.per_location {
            self.wait += self.burst.intra_delay.max(0.0);
            return;
        }
        self.location_index = 0;

        if spin_enabled && step == SpinStep::PerDirection {
            spin.step(&self.config.spin);
        }

        self.bullet_index += 1;
        if self.bullet_index < self.bullets {
            self.wait += self.burst.intra_delay.max(0.0);
            return;
        }
        self.bullet_index = 0;

        if spin_enabled && step == SpinStep::PerArray {
            spin.step(&self.config.spin);
        }

        self.array_index += 1;
        if self.array_index < self.arrays {
            self.wait += self.burst.intra_delay.max(0.0);
            return;
        }
        self.array_index = 0;

        // Burst boundary.
        if !self.burst.fire_offsets.is_empty() {
            self.offset_index = (self.offset_index + 1) % self.burst.fire_offsets.len();
        }
        if spin_enabled && matches!(step, SpinStep::PerBurst | SpinStep::PerShot) {
            spin.step(&self.config.spin);
        }

        self.burst_index += 1;
        if self.burst_index >= self.bursts {
            self.done = true;
        } else {
            // No trailing bullet wait inside the finished burst.
            self.wait += self.burst.inter_delay.max(0.0);
        }
    }
}
