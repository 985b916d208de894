//! The behavior director — top-level encounter state machine.
//!
//! Owns the selector, sequencer, movement controller, and retreat
//! tracker; decides the next beat on every beat completion. Random draws
//! go through a per-director seeded RNG so encounters replay identically
//! for a given seed.

use barrage_core::config::{DirectorConfig, PatternBinding};
use barrage_core::constants::{
    AIM_EPSILON, ARRIVE_EPSILON, MIN_ATTACK_DURATION, MIN_BEAT_DURATION, MIN_DOWNTIME,
    NO_ATTACK_DOWNTIME, SCRIPT_STALL_DOWNTIME,
};
use barrage_core::enums::{
    BeatSource, EncounterState, MovementMode, OrchestrationMode, SequenceAction,
};
use barrage_core::events::DirectorEvent;
use barrage_core::types::{clamp01, move_towards, Vec2};
use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::hooks::{AttackHost, CollisionQuery, DirectorInput};
use crate::movement::MovementController;
use crate::retreat::{compute_retreat_target, RetreatTracker};
use crate::selector::{pick_next, SelectionContext, SelectionState};
use crate::sequencer::ScriptedSequencer;

#[derive(Debug, Clone, Copy)]
struct ActiveAttack {
    index: usize,
    binding: PatternBinding,
    timer: f64,
}

struct TickCtx<'a> {
    input: &'a DirectorInput,
    collision: &'a dyn CollisionQuery,
}

/// Top-level boss behavior state machine.
pub struct BehaviorDirector {
    config: DirectorConfig,
    state: EncounterState,
    position: Vec2,
    facing_dx: f64,
    rng: ChaCha8Rng,
    events: Vec<DirectorEvent>,

    alert_timer: f64,
    lost_timer: f64,

    active_attack: Option<ActiveAttack>,
    last_attack_index: Option<usize>,
    selection: SelectionState,
    sequencer: ScriptedSequencer,

    patrol_index: usize,
    patrol_dir: i64,
    patrol_wait: f64,

    movement: MovementController,
    movement_cooldown_remaining: f64,

    downtime_timer: f64,
    downtime_is_thinking: bool,

    retreat_tracker: RetreatTracker,
    retreat_timer: f64,
    retreat_target: Vec2,

    beat_was_scripted: bool,
    beat_was_chance: bool,
    beat_depth: u32,
}

impl BehaviorDirector {
    pub fn new(config: DirectorConfig, position: Vec2, seed: u64) -> Self {
        let patrol_capable =
            config.can_patrol && config.patrol.enabled && !config.patrol.waypoints.is_empty();
        let state = if patrol_capable {
            EncounterState::Patrol
        } else {
            EncounterState::Idle
        };

        Self {
            config,
            state,
            position,
            facing_dx: 1.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: Vec::new(),
            alert_timer: 0.0,
            lost_timer: 0.0,
            active_attack: None,
            last_attack_index: None,
            selection: SelectionState::default(),
            sequencer: ScriptedSequencer::default(),
            patrol_index: 0,
            patrol_dir: 1,
            patrol_wait: 0.0,
            movement: MovementController::default(),
            movement_cooldown_remaining: 0.0,
            downtime_timer: 0.0,
            downtime_is_thinking: false,
            retreat_tracker: RetreatTracker::default(),
            retreat_timer: 0.0,
            retreat_target: Vec2::ZERO,
            beat_was_scripted: false,
            beat_was_chance: false,
            beat_depth: 0,
        }
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Signed horizontal facing, +1 right / -1 left.
    pub fn facing_dx(&self) -> f64 {
        self.facing_dx
    }

    pub fn active_attack_index(&self) -> Option<usize> {
        self.active_attack.map(|a| a.index)
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// The body rotation should stay locked upright.
    pub fn keep_upright(&self) -> bool {
        self.config.keep_upright
    }

    /// The host should zero the body's gravity this tick.
    pub fn wants_gravity_override(&self) -> bool {
        self.state == EncounterState::Movement
            && self.movement.wants_gravity_override(&self.config.movement)
    }

    /// The host should exempt the one-way platform layer this tick.
    pub fn ignores_one_way(&self) -> bool {
        self.state == EncounterState::Movement
            && self.movement.ignores_one_way(&self.config.movement)
    }

    /// Whether the target sits inside the configured facing cone.
    pub fn is_facing_target(&self, target: Vec2) -> bool {
        let to_target = target - self.position;
        if to_target.length_squared() <= AIM_EPSILON {
            return true;
        }

        let forward = Vec2::new(self.facing_dx, 0.0);
        let dot = forward.dot(to_target.normalize());
        let half_fov = (self.config.facing_fov_degrees.clamp(1.0, 180.0) * 0.5).to_radians();
        dot >= half_fov.cos()
    }

    /// Drain the feedback events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<DirectorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance the encounter by one tick.
    pub fn tick(
        &mut self,
        input: &DirectorInput,
        collision: &dyn CollisionQuery,
        attacks: &mut dyn AttackHost,
    ) {
        self.beat_depth = 0;
        let dt = input.dt;

        // Face the target only while it is in range; otherwise the last
        // movement-derived facing sticks.
        if input.target_in_range {
            if let Some(target) = input.target {
                self.set_facing(target.x - self.position.x);
            }
        }

        self.retreat_tracker.track(input.health.map(|h| h.current));
        self.retreat_tracker.tick(dt);
        if self.movement_cooldown_remaining > 0.0 {
            self.movement_cooldown_remaining -= dt;
        }

        let ctx = TickCtx { input, collision };
        match self.state {
            EncounterState::Idle => self.tick_idle(&ctx, attacks),
            EncounterState::Patrol => self.tick_patrol(&ctx, attacks),
            EncounterState::Alert => self.tick_alert(&ctx, attacks),
            EncounterState::Engaged => self.tick_engaged(&ctx, attacks),
            EncounterState::Movement => self.tick_movement(&ctx, attacks),
            EncounterState::Downtime => self.tick_downtime(&ctx, attacks),
            EncounterState::Lost => self.tick_lost(&ctx, attacks),
            EncounterState::Retreat => self.tick_retreat(&ctx, attacks),
        }
    }

    // --- State ticks ---

    fn tick_idle(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if ctx.input.target_in_range {
            self.enter_alert(attacks);
            return;
        }

        if self.patrol_capable() {
            self.enter_state(EncounterState::Patrol, attacks);
        }
    }

    fn tick_patrol(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if !self.patrol_capable() {
            self.enter_state(EncounterState::Idle, attacks);
            return;
        }

        let dt = ctx.input.dt;
        if self.patrol_wait > 0.0 {
            self.patrol_wait -= dt;
        } else {
            let patrol = &self.config.patrol;
            let waypoint = patrol.waypoints[self.patrol_index % patrol.waypoints.len()];
            let speed = patrol.move_speed.max(0.0);
            let arrive = patrol.arrive_distance.max(ARRIVE_EPSILON);
            let wait = patrol.wait_at_point.max(0.0);

            let next = move_towards(self.position, waypoint, speed * dt);
            let facing = next.x - self.position.x;
            self.position = next;
            self.set_facing(facing);

            if (next - waypoint).length() <= arrive {
                self.patrol_wait = wait;
                self.advance_patrol_index();
            }
        }

        if ctx.input.target_in_range {
            self.enter_alert(attacks);
        }
    }

    fn tick_alert(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if !ctx.input.target_in_range {
            let fallback = if self.patrol_capable() {
                EncounterState::Patrol
            } else {
                EncounterState::Idle
            };
            self.enter_state(fallback, attacks);
            return;
        }

        self.alert_timer -= ctx.input.dt;
        if self.alert_timer <= 0.0 {
            self.enter_engaged(ctx, attacks);
        }
    }

    fn tick_engaged(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if !ctx.input.target_in_range {
            self.enter_lost(attacks);
            return;
        }

        // Retreat pre-empts engagement at any time, cancelling the
        // active attack with an immediate stop + reset.
        let hp = ctx.input.health.map(|h| h.fraction());
        if self.retreat_tracker.should_trigger(&self.config.retreat, hp) {
            self.stop_active_attack(true, attacks);
            self.enter_retreat(-1.0, ctx, attacks);
            return;
        }

        self.tick_active_attack(ctx, attacks);
    }

    fn tick_active_attack(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        let Some(attack) = self.active_attack.as_mut() else {
            self.start_next_beat(false, ctx, attacks);
            return;
        };

        attack.timer -= ctx.input.dt;
        let binding = attack.binding;
        let finished = attack.timer <= 0.0;

        attacks.tick_attack(binding, ctx.input.dt);

        if finished {
            self.stop_active_attack(false, attacks);
            if self.try_enter_thinking_pause(attacks) {
                return;
            }
            self.start_next_beat(true, ctx, attacks);
        }
    }

    fn tick_movement(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if !ctx.input.target_in_range {
            self.enter_lost(attacks);
            return;
        }

        let result = self.movement.tick(
            ctx.input.dt,
            self.position,
            ctx.input.target,
            &self.config.movement,
            ctx.collision,
            &mut self.rng,
        );
        self.position = result.position;
        self.set_facing(result.facing_dx);

        if result.finished {
            self.continue_after_non_attack_beat(ctx, attacks);
        }
    }

    fn tick_downtime(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if !ctx.input.target_in_range {
            self.enter_lost(attacks);
            return;
        }

        self.downtime_timer -= ctx.input.dt;
        if self.downtime_timer > 0.0 {
            return;
        }

        if self.downtime_is_thinking {
            // A finished thinking pause proceeds without inserting another.
            self.downtime_is_thinking = false;
            self.start_next_beat(false, ctx, attacks);
            return;
        }

        self.continue_after_non_attack_beat(ctx, attacks);
    }

    fn tick_lost(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if ctx.input.target_in_range {
            self.enter_alert(attacks);
            return;
        }

        self.lost_timer -= ctx.input.dt;
        if self.lost_timer <= 0.0 {
            let fallback = if self.patrol_capable() {
                EncounterState::Patrol
            } else {
                EncounterState::Idle
            };
            self.enter_state(fallback, attacks);
        }
    }

    fn tick_retreat(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if !ctx.input.target_in_range {
            self.enter_lost(attacks);
            return;
        }

        self.retreat_timer -= ctx.input.dt;

        let speed = self.config.retreat.move_speed.max(0.0);
        let next = move_towards(self.position, self.retreat_target, speed * ctx.input.dt);
        let facing = self.retreat_target.x - self.position.x;
        self.position = next;
        self.set_facing(facing);

        let arrive = self.config.retreat.arrive_distance.max(ARRIVE_EPSILON);
        let arrived = (self.position - self.retreat_target).length() <= arrive;
        if arrived || self.retreat_timer <= 0.0 {
            let pause = self.config.retreat.post_retreat_downtime;
            if pause > 0.0 {
                self.enter_downtime(pause, ctx, attacks);
            } else {
                self.continue_after_non_attack_beat(ctx, attacks);
            }
        }
    }

    // --- Beat orchestration ---

    fn start_next_beat(
        &mut self,
        on_attack_finished: bool,
        ctx: &TickCtx,
        attacks: &mut dyn AttackHost,
    ) {
        self.beat_depth += 1;
        let depth_limit =
            (self.config.attacks.len() + self.config.scripted_steps.len() + 4) as u32;
        if self.beat_depth > depth_limit {
            warn!("beat orchestration looped without progress; forcing downtime");
            self.enter_downtime_forced(SCRIPT_STALL_DOWNTIME, attacks);
            return;
        }

        // Scripted steps get priority when enabled.
        if matches!(
            self.config.orchestration,
            OrchestrationMode::ScriptedOnly | OrchestrationMode::ScriptedThenChance
        ) {
            if self.try_run_next_scripted_step(ctx, attacks) {
                return;
            }

            if self.config.orchestration == OrchestrationMode::ScriptedOnly {
                // Idle briefly instead of spinning on an empty sequence.
                self.events.push(DirectorEvent::ScriptedSequenceStalled);
                self.enter_downtime_forced(SCRIPT_STALL_DOWNTIME, attacks);
                return;
            }
        }

        // Chance layer rolls only when an attack just finished.
        if on_attack_finished && self.try_chance_beat(ctx, attacks) {
            return;
        }

        self.start_next_attack_by_selection(ctx, attacks);
    }

    fn continue_after_non_attack_beat(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if self.try_enter_thinking_pause(attacks) {
            return;
        }
        self.start_next_beat(false, ctx, attacks);
    }

    fn try_run_next_scripted_step(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) -> bool {
        let hp = hp_fraction(ctx.input);

        for _ in 0..self.config.scripted_steps.len().max(1) {
            let Some(step) = self.sequencer.try_next(
                &self.config.scripted_steps,
                self.config.loop_scripted,
                hp,
            ) else {
                return false;
            };

            self.beat_was_chance = false;
            match step.action {
                SequenceAction::Attack => {
                    self.beat_was_scripted = true;
                    if self.start_attack_by_index(step.attack_index, BeatSource::Scripted, attacks)
                    {
                        return true;
                    }
                    // Unrunnable step; keep scanning.
                }
                SequenceAction::Movement => {
                    self.beat_was_scripted = true;
                    self.enter_movement_with_mode(
                        step.movement_mode,
                        step.duration_override,
                        BeatSource::Scripted,
                        ctx,
                        attacks,
                    );
                    return true;
                }
                SequenceAction::Downtime | SequenceAction::Wait => {
                    self.beat_was_scripted = true;
                    self.enter_downtime(step.duration_override, ctx, attacks);
                    return true;
                }
                SequenceAction::Retreat => {
                    self.beat_was_scripted = true;
                    self.enter_retreat(step.duration_override, ctx, attacks);
                    return true;
                }
            }
        }

        false
    }

    fn try_chance_beat(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) -> bool {
        let movement_chance = clamp01(self.config.movement.chance_after_attack);
        if self.config.movement.enabled
            && self.movement_cooldown_remaining <= 0.0
            && self.rng.gen::<f64>() <= movement_chance
        {
            self.beat_was_scripted = false;
            self.beat_was_chance = true;
            let mode = self.config.movement.mode;
            self.enter_movement_with_mode(mode, -1.0, BeatSource::Chance, ctx, attacks);
            return true;
        }

        let downtime_chance = clamp01(self.config.downtime.chance_after_attack);
        if self.config.downtime.enabled && self.rng.gen::<f64>() <= downtime_chance {
            self.beat_was_scripted = false;
            self.beat_was_chance = true;
            self.enter_downtime(-1.0, ctx, attacks);
            return true;
        }

        false
    }

    fn start_next_attack_by_selection(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        let selection_ctx = SelectionContext {
            attacks: &self.config.attacks,
            mode: self.config.select_mode,
            hp_fraction: hp_fraction(ctx.input),
            distance: ctx.input.target.map(|t| (t - self.position).length()),
            last_index: self.last_attack_index,
        };
        let picked = pick_next(&selection_ctx, &mut self.selection, &mut self.rng);

        match picked {
            Some(index) => {
                self.beat_was_scripted = false;
                self.beat_was_chance = self.config.orchestration == OrchestrationMode::ChanceOnly;
                self.start_attack_by_index(index, BeatSource::Selection, attacks);
            }
            None => {
                warn!("no eligible attack; idling briefly");
                self.events.push(DirectorEvent::NoEligibleAttack);
                self.beat_was_scripted = false;
                self.beat_was_chance = false;
                self.enter_downtime_forced(NO_ATTACK_DOWNTIME, attacks);
            }
        }
    }

    fn try_enter_thinking_pause(&mut self, attacks: &mut dyn AttackHost) -> bool {
        let scripted_pause = self.beat_was_scripted && self.config.thinking_pause_after_scripted;
        let chance_pause = self.beat_was_chance && self.config.thinking_pause_after_chance;

        // One pause opportunity per completed beat.
        self.beat_was_scripted = false;
        self.beat_was_chance = false;

        if !scripted_pause && !chance_pause {
            return false;
        }

        let duration = self.config.thinking_pause_duration.max(0.0);
        if duration <= 0.0 {
            return false;
        }

        self.downtime_is_thinking = true;
        self.downtime_timer = duration;
        self.enter_state(EncounterState::Downtime, attacks);
        self.events.push(DirectorEvent::DowntimeStarted {
            duration_secs: duration,
            thinking: true,
        });
        true
    }

    // --- Beat entry ---

    fn start_attack_by_index(
        &mut self,
        index: usize,
        source: BeatSource,
        attacks: &mut dyn AttackHost,
    ) -> bool {
        let Some(entry) = self.config.attacks.get(index) else {
            warn!("attack index {index} out of range");
            return false;
        };
        let Some(binding) = entry.pattern else {
            warn!("attack '{}' has no pattern binding; skipping", entry.name);
            return false;
        };
        let duration = entry.duration.max(MIN_ATTACK_DURATION);

        if self.state != EncounterState::Engaged {
            self.enter_state(EncounterState::Engaged, attacks);
        }

        self.active_attack = Some(ActiveAttack {
            index,
            binding,
            timer: duration,
        });
        self.last_attack_index = Some(index);
        attacks.begin_attack(binding);
        self.events.push(DirectorEvent::AttackStarted { index, source });
        debug!("attack {index} started for {duration:.2}s");
        true
    }

    fn stop_active_attack(&mut self, reset: bool, attacks: &mut dyn AttackHost) {
        if let Some(attack) = self.active_attack.take() {
            attacks.end_attack(attack.binding, reset);
            self.events.push(DirectorEvent::AttackEnded {
                index: attack.index,
                reset,
            });
        }
    }

    fn enter_movement_with_mode(
        &mut self,
        mode: MovementMode,
        duration_override: f64,
        source: BeatSource,
        ctx: &TickCtx,
        attacks: &mut dyn AttackHost,
    ) {
        if !self.config.movement.enabled {
            self.continue_after_non_attack_beat(ctx, attacks);
            return;
        }

        self.movement.enter(
            mode,
            duration_override,
            self.position,
            ctx.input.target,
            &self.config.movement,
            ctx.collision,
            &mut self.rng,
        );
        self.movement_cooldown_remaining = self.config.movement.cooldown.max(0.0);
        self.enter_state(EncounterState::Movement, attacks);
        self.events
            .push(DirectorEvent::MovementStarted { mode, source });
    }

    fn enter_downtime(&mut self, duration_override: f64, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if !self.config.downtime.enabled {
            self.continue_after_non_attack_beat(ctx, attacks);
            return;
        }

        let duration = if duration_override >= 0.0 {
            duration_override
        } else {
            self.config.downtime.duration
        };
        self.enter_downtime_forced(duration, attacks);
    }

    /// Downtime entry that bypasses the enabled flag — used for the
    /// forced fallbacks that keep the state machine from spinning.
    fn enter_downtime_forced(&mut self, duration: f64, attacks: &mut dyn AttackHost) {
        self.downtime_is_thinking = false;
        self.downtime_timer = duration.max(MIN_DOWNTIME);
        self.enter_state(EncounterState::Downtime, attacks);
        self.events.push(DirectorEvent::DowntimeStarted {
            duration_secs: self.downtime_timer,
            thinking: false,
        });
    }

    fn enter_retreat(&mut self, duration_override: f64, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if !self.config.retreat.enabled {
            self.continue_after_non_attack_beat(ctx, attacks);
            return;
        }

        // Retreats outside scripted sequencing still count as a beat in
        // chance orchestration.
        if !self.beat_was_scripted && self.config.orchestration == OrchestrationMode::ChanceOnly {
            self.beat_was_chance = true;
        }

        let Some(target) = ctx.input.target else {
            self.continue_after_non_attack_beat(ctx, attacks);
            return;
        };

        let duration = if duration_override >= 0.0 {
            duration_override
        } else {
            self.config.retreat.duration
        };
        self.retreat_timer = duration.max(MIN_BEAT_DURATION);
        self.retreat_target = compute_retreat_target(
            &self.config.retreat,
            &self.config.patrol,
            self.position,
            target,
            &mut self.rng,
        );
        self.events.push(DirectorEvent::RetreatTriggered {
            accumulated_damage: self.retreat_tracker.accumulated(),
        });
        self.retreat_tracker.consume(&self.config.retreat);

        self.enter_state(EncounterState::Retreat, attacks);
    }

    // --- State transitions ---

    fn enter_alert(&mut self, attacks: &mut dyn AttackHost) {
        self.stop_active_attack(true, attacks);
        self.last_attack_index = None;
        self.beat_was_scripted = false;
        self.beat_was_chance = false;
        self.enter_state(EncounterState::Alert, attacks);
    }

    fn enter_engaged(&mut self, ctx: &TickCtx, attacks: &mut dyn AttackHost) {
        if self.config.reset_selection_on_engage {
            self.selection.reset();
        }
        if self.config.reset_scripted_on_engage {
            self.sequencer.reset();
        }
        self.beat_was_scripted = false;
        self.beat_was_chance = false;
        self.downtime_is_thinking = false;

        self.enter_state(EncounterState::Engaged, attacks);
        self.start_next_beat(false, ctx, attacks);
    }

    fn enter_lost(&mut self, attacks: &mut dyn AttackHost) {
        self.stop_active_attack(true, attacks);
        self.beat_was_scripted = false;
        self.beat_was_chance = false;
        self.enter_state(EncounterState::Lost, attacks);
    }

    fn enter_state(&mut self, new_state: EncounterState, attacks: &mut dyn AttackHost) {
        if new_state == self.state {
            return;
        }

        let old_state = self.state;

        // Leaving the engagement path always force-stops the attack.
        if matches!(
            old_state,
            EncounterState::Engaged | EncounterState::Alert | EncounterState::Lost
        ) {
            self.stop_active_attack(true, attacks);
        }

        self.state = new_state;
        self.events.push(DirectorEvent::StateChanged {
            from: old_state,
            to: new_state,
        });

        match new_state {
            EncounterState::Alert => self.alert_timer = self.config.detection_delay.max(0.0),
            EncounterState::Lost => self.lost_timer = self.config.lost_delay.max(0.0),
            EncounterState::Patrol => self.patrol_wait = 0.0,
            _ => {}
        }
    }

    // --- Helpers ---

    fn patrol_capable(&self) -> bool {
        self.config.can_patrol
            && self.config.patrol.enabled
            && !self.config.patrol.waypoints.is_empty()
    }

    fn advance_patrol_index(&mut self) {
        let count = self.config.patrol.waypoints.len();
        if count == 0 {
            return;
        }

        if self.config.patrol.ping_pong && count > 1 {
            let next = self.patrol_index as i64 + self.patrol_dir;
            if next >= count as i64 {
                self.patrol_index = count - 2;
                self.patrol_dir = -1;
            } else if next < 0 {
                self.patrol_index = 1;
                self.patrol_dir = 1;
            } else {
                self.patrol_index = next as usize;
            }
        } else {
            self.patrol_index += 1;
            if self.patrol_index >= count {
                self.patrol_index = if self.config.patrol.loop_route {
                    0
                } else {
                    count - 1
                };
            }
        }
    }

    fn set_facing(&mut self, dx: f64) {
        if dx.abs() <= self.config.facing_deadzone.max(0.0) {
            return;
        }
        self.facing_dx = if dx >= 0.0 { 1.0 } else { -1.0 };
    }
}

fn hp_fraction(input: &DirectorInput) -> f64 {
    input.health.map(|h| h.fraction()).unwrap_or(1.0)
}
