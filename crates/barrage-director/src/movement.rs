//! Movement beat controller.
//!
//! Seven positional modes, all relative to an anchor captured when the
//! beat starts. Every positional write is swept against solid geometry
//! through the `CollisionQuery` collaborator; the allowed travel distance
//! is clamped to the nearest blocking hit minus a skin margin.

use std::f64::consts::TAU;

use barrage_core::config::MovementSettings;
use barrage_core::constants::{ARRIVE_EPSILON, CONTACT_EPSILON, MIN_BEAT_DURATION};
use barrage_core::enums::MovementMode;
use barrage_core::types::{clamp01, move_towards, vec_from_deg, Vec2};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::hooks::CollisionQuery;

/// Result of one movement tick.
#[derive(Debug, Clone, Copy)]
pub struct MovementTick {
    pub position: Vec2,
    /// Signed horizontal travel intent, for facing updates. Zero = keep.
    pub facing_dx: f64,
    /// The beat's duration has elapsed.
    pub finished: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct JumpState {
    active: bool,
    timer: f64,
    next_at: f64,
    start: Vec2,
    end: Vec2,
    dir_sign: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct HoverState {
    lift_active: bool,
    lift_timer: f64,
    wave_elapsed: f64,
    lift_start: Vec2,
    lift_end: Vec2,
}

/// Per-beat positional state machine for the boss body.
#[derive(Debug, Clone, Copy)]
pub struct MovementController {
    mode: MovementMode,
    anchor: Vec2,
    timer: f64,
    duration_total: f64,
    elapsed: f64,
    patrol_dir: f64,
    edge_pause_timer: f64,
    jump: JumpState,
    hover: HoverState,
    reposition_target: Option<Vec2>,
}

impl Default for MovementController {
    fn default() -> Self {
        Self {
            mode: MovementMode::Stationary,
            anchor: Vec2::ZERO,
            timer: 0.0,
            duration_total: 0.0,
            elapsed: 0.0,
            patrol_dir: 1.0,
            edge_pause_timer: 0.0,
            jump: JumpState::default(),
            hover: HoverState::default(),
            reposition_target: None,
        }
    }
}

impl MovementController {
    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    /// Whether the one-way platform layer is exempted for this mode.
    pub fn ignores_one_way(&self, settings: &MovementSettings) -> bool {
        match self.mode {
            MovementMode::HoverSine => settings.ignore_one_way_during_hover,
            MovementMode::JumpArc | MovementMode::JumpToHigherPlatform => {
                settings.ignore_one_way_during_jumps
            }
            _ => false,
        }
    }

    /// Whether the body's gravity should be zeroed for this mode.
    pub fn wants_gravity_override(&self, settings: &MovementSettings) -> bool {
        self.mode == MovementMode::HoverSine && settings.disable_gravity_during_hover
    }

    /// Start a movement beat. `duration_override` < 0 uses the default.
    pub fn enter(
        &mut self,
        mode: MovementMode,
        duration_override: f64,
        position: Vec2,
        target: Option<Vec2>,
        settings: &MovementSettings,
        collision: &dyn CollisionQuery,
        rng: &mut ChaCha8Rng,
    ) {
        let duration = if duration_override >= 0.0 {
            duration_override
        } else {
            settings.duration
        };

        self.mode = mode;
        self.timer = duration.max(MIN_BEAT_DURATION);
        self.duration_total = self.timer;
        self.elapsed = 0.0;
        self.anchor = position;
        self.patrol_dir = if settings.patrol_start_right { 1.0 } else { -1.0 };
        self.edge_pause_timer = 0.0;
        self.jump = JumpState::default();
        self.hover = HoverState::default();
        self.reposition_target = None;

        match mode {
            MovementMode::RepositionAroundTarget => {
                if let Some(target) = target {
                    self.reposition_target = Some(pick_reposition_target(
                        target,
                        self.anchor,
                        settings,
                        rng,
                    ));
                }
            }
            MovementMode::JumpArc | MovementMode::JumpToHigherPlatform => {
                self.begin_next_jump(position, target, settings, collision);
            }
            MovementMode::HoverSine => {
                self.begin_hover_lift(position, settings);
            }
            _ => {}
        }
    }

    /// Advance one tick, producing the collision-resolved new position.
    pub fn tick(
        &mut self,
        dt: f64,
        position: Vec2,
        target: Option<Vec2>,
        settings: &MovementSettings,
        collision: &dyn CollisionQuery,
        rng: &mut ChaCha8Rng,
    ) -> MovementTick {
        self.timer -= dt;
        self.elapsed += dt;

        let mut out = MovementTick {
            position,
            facing_dx: 0.0,
            finished: self.timer <= 0.0,
        };

        match self.mode {
            MovementMode::Stationary => {}

            MovementMode::SideToSideAnchor => {
                let progress = if self.duration_total <= 0.0 {
                    1.0
                } else {
                    1.0 - clamp01(self.timer / self.duration_total)
                };
                let x = (progress * TAU * settings.side_frequency.max(0.0)).sin()
                    * settings.side_amplitude;
                let desired = move_towards(
                    position,
                    self.anchor + Vec2::new(x, 0.0),
                    settings.side_move_speed.max(0.0) * dt,
                );
                out.position = self.apply(position, desired, settings, collision);
                out.facing_dx = self.anchor.x + x - position.x;
            }

            MovementMode::PlatformPatrol => {
                if self.edge_pause_timer > 0.0 {
                    self.edge_pause_timer -= dt;
                } else {
                    let half = settings.patrol_half_width.max(0.0);
                    let left = self.anchor.x - half;
                    let right = self.anchor.x + half;

                    let mut nx =
                        position.x + self.patrol_dir * settings.patrol_speed.max(0.0) * dt;
                    if nx >= right {
                        nx = right;
                        self.patrol_dir = -1.0;
                        self.edge_pause_timer = settings.patrol_edge_pause.max(0.0);
                    } else if nx <= left {
                        nx = left;
                        self.patrol_dir = 1.0;
                        self.edge_pause_timer = settings.patrol_edge_pause.max(0.0);
                    }

                    let desired = Vec2::new(nx, self.anchor.y);
                    out.position = self.apply(position, desired, settings, collision);
                    out.facing_dx = self.patrol_dir;
                }
            }

            MovementMode::JumpArc | MovementMode::JumpToHigherPlatform => {
                out = self.tick_jump(dt, position, target, settings, collision, out);
            }

            MovementMode::HoverSine => {
                out = self.tick_hover(dt, position, settings, collision, out);
            }

            MovementMode::Chaser => {
                if let Some(target) = target {
                    let mut to_target = target - position;
                    if settings.chase_horizontal_only {
                        to_target.y = 0.0;
                    }

                    let dist = to_target.length();
                    if dist > 1e-4 {
                        let dir = to_target / dist;
                        let speed = settings.chase_speed.max(0.0);
                        let desired_dist = settings.chase_stop_distance.max(0.0);
                        let dead_zone = settings.chase_dead_zone.max(0.0);

                        let mut desired = position;
                        if dist > desired_dist + dead_zone {
                            desired = position + dir * speed * dt;
                            out.facing_dx = dir.x;
                        } else if dist < (desired_dist - dead_zone).max(0.0) {
                            desired = position - dir * speed * dt;
                            out.facing_dx = -dir.x;
                        }

                        if settings.chase_horizontal_only {
                            desired.y = self.anchor.y;
                        }
                        out.position = self.apply(position, desired, settings, collision);
                    }
                }
            }

            MovementMode::RepositionAroundTarget => {
                if let Some(point) = self.reposition_target {
                    let desired = move_towards(
                        position,
                        point,
                        settings.reposition_move_speed.max(0.0) * dt,
                    );
                    out.position = self.apply(position, desired, settings, collision);
                    out.facing_dx = point.x - position.x;

                    let arrived = (out.position - point).length()
                        <= settings.arrive_distance.max(ARRIVE_EPSILON);
                    if arrived && !settings.reposition_single_target {
                        if let Some(target) = target {
                            self.reposition_target = Some(pick_reposition_target(
                                target,
                                self.anchor,
                                settings,
                                rng,
                            ));
                        }
                    }
                }
            }
        }

        out
    }

    fn tick_jump(
        &mut self,
        dt: f64,
        position: Vec2,
        target: Option<Vec2>,
        settings: &MovementSettings,
        collision: &dyn CollisionQuery,
        mut out: MovementTick,
    ) -> MovementTick {
        if !self.jump.active {
            if self.elapsed >= self.jump.next_at {
                self.begin_next_jump(position, target, settings, collision);
                out.facing_dx = self.jump.dir_sign;
            }
            return out;
        }

        self.jump.timer += dt;
        let duration = settings.jump_duration.max(0.01);
        let t = clamp01(self.jump.timer / duration);

        let mut pos = self.jump.start.lerp(self.jump.end, t);
        // Parabola with the apex at t = 0.5.
        pos.y += 4.0 * settings.jump_height.max(0.0) * t * (1.0 - t);

        out.position = self.apply(position, pos, settings, collision);
        out.facing_dx = self.jump.dir_sign;

        if t >= 1.0 {
            self.jump.active = false;
            out.position = self.apply(out.position, self.jump.end, settings, collision);
            self.jump.next_at = self.elapsed + settings.jump_interval.max(0.0);
        }

        out
    }

    fn begin_next_jump(
        &mut self,
        origin: Vec2,
        target: Option<Vec2>,
        settings: &MovementSettings,
        collision: &dyn CollisionQuery,
    ) {
        self.jump.active = true;
        self.jump.timer = 0.0;

        let sign = self.resolve_jump_direction(origin, target, settings);
        self.jump.dir_sign = sign;

        if self.mode == MovementMode::JumpToHigherPlatform {
            if let Some(landing) = higher_platform_landing(origin, sign, settings, collision) {
                self.jump.start = origin;
                self.jump.end = landing;
                return;
            }

            if !settings.jump_fallback_to_arc {
                self.jump.active = false;
                self.jump.next_at = self.elapsed + settings.jump_interval.max(0.0);
                return;
            }
        }

        let horizontal = settings.jump_distance.max(0.0) * sign;
        let mut end = origin + Vec2::new(horizontal, 0.0);
        if !settings.jump_horizontal_only {
            if let Some(target) = target {
                end.y = target.y;
            }
        }

        self.jump.start = Vec2::new(origin.x, self.anchor.y);
        self.jump.end = end;
    }

    fn resolve_jump_direction(
        &mut self,
        origin: Vec2,
        target: Option<Vec2>,
        settings: &MovementSettings,
    ) -> f64 {
        let mut sign = if self.jump.dir_sign == 0.0 {
            1.0
        } else {
            self.jump.dir_sign
        };

        if settings.jump_towards_target {
            if let Some(target) = target {
                let dx = target.x - origin.x;
                if dx.abs() > 0.001 {
                    sign = dx.signum();
                }
            }
        } else {
            // Alternate when not tracking the target.
            sign = -sign;
        }

        if sign == 0.0 {
            sign = 1.0;
        }
        sign
    }

    fn begin_hover_lift(&mut self, position: Vec2, settings: &MovementSettings) {
        self.hover.wave_elapsed = 0.0;

        let lift = settings.hover_base_lift.max(0.0);
        if !settings.hover_lift_with_jump || lift <= 1e-4 {
            self.hover.lift_active = false;
            return;
        }

        self.hover.lift_active = true;
        self.hover.lift_timer = 0.0;
        self.hover.lift_start = position;
        self.hover.lift_end = Vec2::new(position.x, self.anchor.y + lift);
    }

    fn tick_hover(
        &mut self,
        dt: f64,
        position: Vec2,
        settings: &MovementSettings,
        collision: &dyn CollisionQuery,
        mut out: MovementTick,
    ) -> MovementTick {
        if self.hover.lift_active {
            self.hover.lift_timer += dt;
            let duration = settings.hover_lift_jump_duration.max(0.01);
            let t = clamp01(self.hover.lift_timer / duration);

            let mut pos = self.hover.lift_start.lerp(self.hover.lift_end, t);
            pos.y += 4.0 * settings.hover_lift_jump_height.max(0.0) * t * (1.0 - t);
            out.position = self.apply(position, pos, settings, collision);

            if t >= 1.0 {
                self.hover.lift_active = false;
                out.position =
                    self.apply(out.position, self.hover.lift_end, settings, collision);
                self.hover.wave_elapsed = 0.0;
            }
            return out;
        }

        self.hover.wave_elapsed += dt;
        let t = self.hover.wave_elapsed;
        let x = (t * TAU * settings.hover_side_frequency.max(0.0)).sin()
            * settings.hover_side_amplitude;
        let y = settings.hover_base_lift
            + (t * TAU * settings.hover_frequency.max(0.0)).sin() * settings.hover_amplitude;
        let hover_target = self.anchor + Vec2::new(x, y);

        let desired = if settings.hover_use_direct_position {
            if settings.hover_clamp_direct_speed {
                move_towards(
                    position,
                    hover_target,
                    settings.hover_direct_max_speed.max(0.0) * dt,
                )
            } else {
                hover_target
            }
        } else {
            move_towards(position, hover_target, settings.hover_move_speed.max(0.0) * dt)
        };
        out.position = self.apply(position, desired, settings, collision);

        // Face the travel direction of the hover wave itself.
        out.facing_dx = (t * TAU * settings.hover_side_frequency.max(0.0)).cos()
            * settings.hover_side_amplitude;
        out
    }

    /// Collision-resolved positional write.
    fn apply(
        &self,
        current: Vec2,
        desired: Vec2,
        settings: &MovementSettings,
        collision: &dyn CollisionQuery,
    ) -> Vec2 {
        resolve_collision_safe(
            current,
            desired,
            settings,
            collision,
            self.ignores_one_way(settings),
        )
    }
}

/// Clamp a desired move against swept geometry.
pub fn resolve_collision_safe(
    current: Vec2,
    desired: Vec2,
    settings: &MovementSettings,
    collision: &dyn CollisionQuery,
    ignore_one_way: bool,
) -> Vec2 {
    if !settings.use_collision_safe_movement {
        return desired;
    }

    let delta = desired - current;
    let distance = delta.length();
    if distance <= 1e-4 {
        return desired;
    }

    let min_distance = if settings.ignore_initial_overlap_hits {
        CONTACT_EPSILON
    } else {
        0.0
    };

    match collision.sweep(current, delta, ignore_one_way, min_distance) {
        Some(hit_distance) => {
            let allowed = (hit_distance - settings.collision_skin.max(0.0)).max(0.0);
            if allowed >= distance {
                desired
            } else {
                current + delta / distance * allowed
            }
        }
        None => desired,
    }
}

/// Probe candidate forward offsets for a landable higher surface.
fn higher_platform_landing(
    origin: Vec2,
    sign: f64,
    settings: &MovementSettings,
    collision: &dyn CollisionQuery,
) -> Option<Vec2> {
    let candidates = settings.jump_higher_candidates.clamp(2, 16);
    let forward_min = settings.jump_higher_forward_min.max(0.05);
    let forward_max = settings.jump_higher_forward_max.max(forward_min);
    let min_rise = settings.jump_higher_min_rise.max(0.0);
    let max_rise = settings.jump_higher_max_rise.max(min_rise);

    let ray_start_y = origin.y + max_rise + 0.5;
    let ray_distance = ray_start_y - (origin.y - 1.0);

    for i in 0..candidates {
        let t = i as f64 / (candidates - 1) as f64;
        let forward = forward_min + (forward_max - forward_min) * t;
        let candidate_x = origin.x + sign * forward;

        let Some(hit) = collision.probe_down(Vec2::new(candidate_x, ray_start_y), ray_distance)
        else {
            continue;
        };
        // Only upward-facing surfaces qualify as landings.
        if hit.normal.y < 0.5 {
            continue;
        }

        let landing_y =
            hit.point.y + settings.body_half_height + settings.jump_landing_clearance.max(0.0);
        let rise = landing_y - origin.y;
        if rise < min_rise || rise > max_rise {
            continue;
        }

        return Some(Vec2::new(candidate_x, landing_y));
    }

    None
}

/// Random point in the annulus around the target, vertically clamped
/// around the anchor.
pub fn pick_reposition_target(
    target: Vec2,
    anchor: Vec2,
    settings: &MovementSettings,
    rng: &mut ChaCha8Rng,
) -> Vec2 {
    let min_r = settings
        .reposition_min_radius
        .min(settings.reposition_max_radius)
        .max(0.0);
    let max_r = settings
        .reposition_min_radius
        .max(settings.reposition_max_radius)
        .max(min_r);

    let direction = vec_from_deg(rng.gen_range(0.0..360.0));
    let radius = rng.gen_range(min_r..=max_r);
    let mut point = target + direction * radius;

    let y_limit = settings.reposition_max_y_offset.abs();
    point.y = point.y.clamp(anchor.y - y_limit, anchor.y + y_limit);
    point
}
