//! Emission scheduler — per-slot cadence and group control.
//!
//! Each slot pairs one pattern config with one `SpinState` and its timers.
//! While a group is playing, its slots cycle cooldown -> active window ->
//! cooldown, invoking the pattern engine on their shot cadence. Non-burst
//! slots catch up on missed shots in a loop after a frame hitch; burst
//! slots fire at most once per tick so burst sequences never stack.

use barrage_core::config::{PatternSlotConfig, SpawnerConfig};
use barrage_core::constants::{
    ACTIVE_WINDOW_EPSILON, BURST_REFIRE_MARGIN, MIN_FIRE_INTERVAL,
};
use barrage_core::types::Vec2;
use log::warn;

use crate::engine::{self, BeamVolley, BurstSequence, FireContext, ProjectileSpawnRequest};
use crate::spin::SpinState;

/// Deferred fire-angle restore queued by a beam volley.
#[derive(Debug, Clone, Copy)]
struct PendingRestore {
    remaining: f64,
    angle: f64,
}

/// One (pattern config, runtime state, timers) triple.
#[derive(Debug)]
pub struct EmissionSlot {
    pub config: PatternSlotConfig,
    pub spin: SpinState,
    cooldown_timer: f64,
    active_timer: f64,
    shots_fired: usize,
    shot_timer: f64,
    active: bool,
    burst: Option<BurstSequence>,
    restores: Vec<PendingRestore>,
}

impl EmissionSlot {
    fn new(config: PatternSlotConfig) -> Self {
        let spin = SpinState::from_config(&config.pattern);
        let mut slot = Self {
            config,
            spin,
            cooldown_timer: 0.0,
            active_timer: 0.0,
            shots_fired: 0,
            shot_timer: 0.0,
            active: false,
            burst: None,
            restores: Vec::new(),
        };
        slot.reset(false);
        slot
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn shots_fired(&self) -> usize {
        self.shots_fired
    }

    fn reset(&mut self, fire_immediately: bool) {
        self.active = false;
        self.active_timer = 0.0;
        self.shots_fired = 0;
        self.shot_timer = self.config.emission.interval;
        self.cooldown_timer = if fire_immediately {
            0.0
        } else {
            self.config.emission.cooldown
        };
        self.spin.reset_from_config(&self.config.pattern);
        self.burst = None;
        self.restores.clear();
    }

    /// Inter-shot interval, stretched so a burst pattern's own sequence
    /// duration always fits between invocations.
    fn effective_interval(&self) -> f64 {
        let mut interval = self.config.emission.interval.max(0.0);
        if let Some(required) = engine::required_min_refire_delay(&self.config.pattern) {
            interval = interval.max(required + BURST_REFIRE_MARGIN);
        }
        interval.max(MIN_FIRE_INTERVAL)
    }

    /// Active-window length sufficient to deliver the requested shots.
    fn required_active_time(&self) -> f64 {
        let shots = self.config.emission.shots.max(1);
        if shots <= 1 {
            return ACTIVE_WINDOW_EPSILON;
        }
        (shots - 1) as f64 * self.effective_interval() + ACTIVE_WINDOW_EPSILON
    }

    /// Advance in-flight burst sequences and pending angle restores.
    /// Runs every tick for every slot, firing or not.
    fn tick_background(&mut self, dt: f64, ctx: &FireContext, out: &mut SpawnerOutput) {
        for restore in &mut self.restores {
            restore.remaining -= dt;
        }
        let spin = &mut self.spin;
        self.restores.retain(|restore| {
            if restore.remaining <= 0.0 {
                spin.fire_angle = restore.angle;
                false
            } else {
                true
            }
        });

        if let Some(burst) = &mut self.burst {
            out.spawns.extend(burst.advance(dt, &mut self.spin, ctx));
            if burst.is_done() {
                self.burst = None;
            }
        }
    }

    /// One scheduling tick for an actively playing slot.
    fn tick_firing(&mut self, dt: f64, ctx: &FireContext, out: &mut SpawnerOutput) {
        self.cooldown_timer -= dt;
        if self.cooldown_timer > 0.0 {
            return;
        }

        let shots_target = self.config.emission.shots.max(1);
        let interval = self.effective_interval();
        let is_burst = self.config.pattern.kind.is_burst();

        if !self.active {
            self.active = true;
            self.shots_fired = 0;
            // Immediate first shot.
            self.shot_timer = 0.0;
            self.active_timer = self
                .config
                .emission
                .active_duration
                .max(self.required_active_time());
            self.spin.reset_from_config(&self.config.pattern);
        }

        self.active_timer -= dt;
        self.shot_timer -= dt;

        if is_burst {
            // At most one invocation per tick, and never while the
            // previous burst sequence is still in flight.
            if self.shot_timer <= 0.0 && self.shots_fired < shots_target && self.burst.is_none() {
                self.fire(ctx, out);
                self.shots_fired += 1;
                self.shot_timer += interval;
            }
        } else {
            // Catch up on any missed shots after a hitch.
            while self.shot_timer <= 0.0 && self.shots_fired < shots_target {
                self.fire(ctx, out);
                self.shots_fired += 1;
                self.shot_timer += interval;
            }
        }

        let finished_by_count = self.shots_fired >= shots_target;
        let timed_out = self.active_timer <= 0.0;

        if finished_by_count || timed_out {
            self.active = false;
            self.cooldown_timer = self.config.emission.cooldown;
            self.spin.reset_from_config(&self.config.pattern);
        }
    }

    fn fire(&mut self, ctx: &FireContext, out: &mut SpawnerOutput) {
        let volley = engine::fire(&self.config.pattern, &mut self.spin, ctx);

        out.spawns.extend(volley.spawns);
        if let Some(beam_volley) = volley.beam_volley {
            out.beam_volleys.push(beam_volley);
        }
        if let Some(mut burst) = volley.burst {
            // The sequence's first bullets are due immediately.
            out.spawns.extend(burst.advance(0.0, &mut self.spin, ctx));
            self.burst = (!burst.is_done()).then_some(burst);
        }
        if let Some(restore) = volley.angle_restore {
            self.restores.push(PendingRestore {
                remaining: restore.delay,
                angle: restore.angle,
            });
        }
    }
}

/// Named set of slots fired together while the group is active.
#[derive(Debug)]
pub struct PatternGroup {
    pub name: String,
    pub slots: Vec<EmissionSlot>,
}

/// Everything one spawner tick produced.
#[derive(Debug, Default)]
pub struct SpawnerOutput {
    pub spawns: Vec<ProjectileSpawnRequest>,
    pub beam_volleys: Vec<BeamVolley>,
}

/// Group-based pattern spawner.
pub struct PatternSpawner {
    groups: Vec<PatternGroup>,
    active_group: Option<usize>,
    firing: bool,
    target_override: Option<Vec2>,
}

impl PatternSpawner {
    pub fn new(config: SpawnerConfig) -> Self {
        let groups = config
            .groups
            .into_iter()
            .map(|group| PatternGroup {
                name: group.name,
                slots: group.slots.into_iter().map(EmissionSlot::new).collect(),
            })
            .collect();

        Self {
            groups,
            active_group: None,
            firing: false,
            target_override: None,
        }
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn active_group(&self) -> Option<usize> {
        self.active_group
    }

    pub fn groups(&self) -> &[PatternGroup] {
        &self.groups
    }

    /// Aim at a fixed point instead of the host-supplied live target.
    /// None leaves the current override in place.
    pub fn set_target_override(&mut self, target: Option<Vec2>) {
        if target.is_some() {
            self.target_override = target;
        }
    }

    /// Start playing a group. Invalid indices log and no-op.
    pub fn play_group(
        &mut self,
        index: usize,
        target_override: Option<Vec2>,
        reset_group: bool,
        fire_immediately: bool,
    ) {
        if index >= self.groups.len() {
            warn!(
                "play_group: invalid group index {index} (have {})",
                self.groups.len()
            );
            return;
        }

        self.set_target_override(target_override);
        self.active_group = Some(index);
        self.firing = true;

        if reset_group {
            self.reset_group(index, fire_immediately);
        }
    }

    /// Stop firing; optionally reset the active group's slots.
    pub fn stop(&mut self, reset_active_group: bool) {
        self.firing = false;

        if reset_active_group {
            if let Some(index) = self.active_group {
                self.reset_group(index, false);
            }
        }
    }

    /// Stop firing and clear the active group.
    pub fn stop_all(&mut self, reset_all: bool) {
        self.firing = false;
        self.active_group = None;

        if reset_all {
            self.reset_all_groups(false);
        }
    }

    pub fn reset_group(&mut self, index: usize, fire_immediately: bool) {
        let Some(group) = self.groups.get_mut(index) else {
            warn!("reset_group: invalid group index {index}");
            return;
        };
        for slot in &mut group.slots {
            slot.reset(fire_immediately);
        }
    }

    pub fn reset_all_groups(&mut self, fire_immediately: bool) {
        for index in 0..self.groups.len() {
            self.reset_group(index, fire_immediately);
        }
    }

    /// Advance the spawner one tick.
    pub fn tick(&mut self, dt: f64, ctx: &FireContext) -> SpawnerOutput {
        let ctx = &FireContext {
            origin: ctx.origin,
            target: self.target_override.or(ctx.target),
        };
        let mut out = SpawnerOutput::default();

        // In-flight bursts and angle restores keep advancing even when
        // firing has stopped or another group took over.
        for group in &mut self.groups {
            for slot in &mut group.slots {
                slot.tick_background(dt, ctx, &mut out);
            }
        }

        if !self.firing {
            return out;
        }
        let Some(index) = self.active_group else {
            return out;
        };
        let Some(group) = self.groups.get_mut(index) else {
            return out;
        };

        for slot in &mut group.slots {
            slot.tick_firing(dt, ctx, &mut out);
        }

        out
    }
}
