//! Per-projectile motion tasks.
//!
//! Each spawned projectile gets one `MotionTask`: a resumable state
//! machine advanced once per tick by the host. The task owns all of its
//! state after spawn — it reads nothing shared, so any number of tasks
//! from the same pattern can run concurrently.

use barrage_core::config::HomingConfig;
use barrage_core::types::{clamp01, rotate_deg, vec_from_deg, Vec2};

/// Lateral sine/cosine drift, resolved per bullet at spawn.
#[derive(Debug, Clone, Copy)]
pub struct WaveStyle {
    pub amplitude: f64,
    pub frequency: f64,
    /// Use cosine instead of sine for the offset curve.
    pub cosine: bool,
}

/// Outward spiral, resolved per bullet at spawn.
#[derive(Debug, Clone, Copy)]
pub struct SpiralStyle {
    /// Degrees per second.
    pub turn_rate_deg: f64,
    pub clockwise: bool,
    /// false = radius grows as speed x elapsed around the spawn origin;
    /// true = continuous position integration along a turning heading.
    pub combined: bool,
}

/// Motion styling snapshot attached to a spawn request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionStyle {
    /// Speed gained per second.
    pub acceleration: f64,
    pub wave: Option<WaveStyle>,
    pub spiral: Option<SpiralStyle>,
    pub homing: Option<HomingConfig>,
}

/// Result of advancing a task one tick.
#[derive(Debug, Clone, Copy)]
pub struct MotionFrame {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HomingPhase {
    /// Straight flight before the next stop (or after the last curve).
    Straight,
    /// Held still, waiting to redirect.
    Stopped,
    /// Lerping into the direction sampled at the end of the stop.
    Curving,
    /// All stops consumed; flying out on the final heading.
    Final,
}

#[derive(Debug, Clone, Copy)]
struct HomingState {
    phase: HomingPhase,
    stops_done: usize,
    phase_elapsed: f64,
    from_dir: Vec2,
    goal_dir: Vec2,
}

/// Resumable motion state machine for one projectile.
#[derive(Debug, Clone)]
pub struct MotionTask {
    style: MotionStyle,
    pos: Vec2,
    dir: Vec2,
    speed: f64,
    initial_speed: f64,
    elapsed: f64,
    origin: Vec2,
    spawn_angle_deg: f64,
    spiral_angle: f64,
    homing: Option<HomingState>,
}

impl MotionTask {
    pub fn new(position: Vec2, angle_deg: f64, speed: f64, style: MotionStyle) -> Self {
        let homing = style.homing.filter(|h| h.enabled).map(|_| HomingState {
            phase: HomingPhase::Straight,
            stops_done: 0,
            phase_elapsed: 0.0,
            from_dir: vec_from_deg(angle_deg),
            goal_dir: vec_from_deg(angle_deg),
        });

        Self {
            style,
            pos: position,
            dir: vec_from_deg(angle_deg),
            speed,
            initial_speed: speed,
            elapsed: 0.0,
            origin: position,
            spawn_angle_deg: angle_deg,
            spiral_angle: 0.0,
            homing,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    /// Advance one tick. `target` is the live target position, if any.
    pub fn advance(&mut self, dt: f64, target: Option<Vec2>) -> MotionFrame {
        let prev = self.pos;
        self.elapsed += dt;

        if self.homing.is_some() {
            self.advance_homing(dt, target);
        } else {
            self.advance_plain(dt);
        }

        let velocity = if dt > 0.0 {
            (self.pos - prev) / dt
        } else {
            self.dir * self.speed
        };
        MotionFrame {
            position: self.pos,
            velocity,
        }
    }

    fn advance_plain(&mut self, dt: f64) {
        self.speed += self.style.acceleration * dt;

        match self.style.spiral {
            Some(spiral) if !spiral.combined => {
                // Simple spiral: absolute polar placement around the origin.
                let sign = spiral_sign(spiral);
                self.spiral_angle += sign * spiral.turn_rate_deg * dt;
                let radius = self.initial_speed * self.elapsed;
                self.pos =
                    self.origin + vec_from_deg(self.spawn_angle_deg + self.spiral_angle) * radius;
            }
            Some(spiral) => {
                let sign = spiral_sign(spiral);
                self.dir = rotate_deg(self.dir, sign * spiral.turn_rate_deg * dt);
                self.pos += self.dir * self.speed * dt;
            }
            None => {
                self.pos += self.dir * self.speed * dt;
            }
        }

        self.apply_wave(dt);
    }

    fn advance_homing(&mut self, dt: f64, target: Option<Vec2>) {
        let config = match self.style.homing {
            Some(h) => h,
            None => return,
        };
        let mut homing = match self.homing {
            Some(h) => h,
            None => return,
        };

        // Styling runs during the initial straight window, and through
        // every phase when configured.
        let styled = config.keep_styles_through_phases
            || (homing.phase == HomingPhase::Straight && homing.stops_done == 0);

        match homing.phase {
            HomingPhase::Straight => {
                homing.phase_elapsed += dt;
                self.fly_forward(dt, styled);

                if homing.phase_elapsed >= config.initial_move_time {
                    homing.phase_elapsed = 0.0;
                    homing.phase = if homing.stops_done < config.max_stops {
                        HomingPhase::Stopped
                    } else {
                        HomingPhase::Final
                    };
                }
            }
            HomingPhase::Stopped => {
                homing.phase_elapsed += dt;
                if homing.phase_elapsed >= config.stop_duration {
                    homing.from_dir = self.dir;
                    // Redirect toward wherever the target is right now;
                    // a lost target keeps the old heading.
                    homing.goal_dir = target
                        .and_then(|t| (t - self.pos).try_normalize())
                        .unwrap_or(self.dir);
                    homing.phase_elapsed = 0.0;
                    homing.phase = HomingPhase::Curving;
                }
            }
            HomingPhase::Curving => {
                homing.phase_elapsed += dt;
                let curve = config.curve_duration.max(f64::EPSILON);
                let t = clamp01(homing.phase_elapsed / curve);
                self.dir = homing
                    .from_dir
                    .lerp(homing.goal_dir, t)
                    .try_normalize()
                    .unwrap_or(homing.goal_dir);
                self.fly_forward(dt, styled);

                if t >= 1.0 {
                    self.dir = homing.goal_dir;
                    homing.stops_done += 1;
                    homing.phase_elapsed = 0.0;
                    homing.phase = HomingPhase::Straight;
                }
            }
            HomingPhase::Final => {
                self.fly_forward(dt, styled);
            }
        }

        self.homing = Some(homing);
    }

    /// Accelerate and integrate along the current heading, with optional
    /// styling. While homing, a spiral contributes heading rotation only —
    /// absolute polar placement would fight the redirect phases.
    fn fly_forward(&mut self, dt: f64, styled: bool) {
        self.speed += self.style.acceleration * dt;

        if styled {
            if let Some(spiral) = self.style.spiral {
                self.dir = rotate_deg(self.dir, spiral_sign(spiral) * spiral.turn_rate_deg * dt);
            }
        }

        self.pos += self.dir * self.speed * dt;

        if styled {
            self.apply_wave(dt);
        }
    }

    fn apply_wave(&mut self, dt: f64) {
        if let Some(wave) = self.style.wave {
            let phase = self.elapsed * wave.frequency;
            let offset = if wave.cosine { phase.cos() } else { phase.sin() } * wave.amplitude;
            self.pos += self.dir.perp() * offset * dt;
        }
    }
}

fn spiral_sign(spiral: SpiralStyle) -> f64 {
    if spiral.clockwise {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn homing_config() -> HomingConfig {
        HomingConfig {
            enabled: true,
            max_stops: 1,
            stop_duration: 0.5,
            initial_move_time: 1.0,
            curve_duration: 0.5,
            keep_styles_through_phases: false,
        }
    }

    #[test]
    fn test_straight_flight_covers_distance() {
        let mut task = MotionTask::new(Vec2::ZERO, 0.0, 10.0, MotionStyle::default());
        for _ in 0..100 {
            task.advance(0.01, None);
        }
        let pos = task.position();
        assert!((pos.x - 10.0).abs() < 1e-9, "x = {}", pos.x);
        assert!(pos.y.abs() < 1e-9);
    }

    #[test]
    fn test_acceleration_increases_speed() {
        let style = MotionStyle {
            acceleration: 5.0,
            ..MotionStyle::default()
        };
        let mut task = MotionTask::new(Vec2::ZERO, 0.0, 1.0, style);
        let early = task.advance(0.1, None).velocity.length();
        for _ in 0..50 {
            task.advance(0.1, None);
        }
        let late = task.advance(0.1, None).velocity.length();
        assert!(late > early, "speed should grow: {early} -> {late}");
    }

    #[test]
    fn test_wave_oscillates_around_heading() {
        let style = MotionStyle {
            wave: Some(WaveStyle {
                amplitude: 1.0,
                frequency: 10.0,
                cosine: false,
            }),
            ..MotionStyle::default()
        };
        let mut task = MotionTask::new(Vec2::ZERO, 0.0, 5.0, style);
        let mut max_y: f64 = 0.0;
        let mut final_y: f64 = 0.0;
        for _ in 0..200 {
            let frame = task.advance(0.01, None);
            max_y = max_y.max(frame.position.y);
            final_y = frame.position.y;
        }
        // The lateral offset integrates to (1 - cos(f t)) * a / f: it
        // peaks and comes back down rather than drifting monotonically.
        assert!(max_y > 0.15, "peak lateral drift, got {max_y}");
        assert!(final_y < max_y - 0.05, "drift returns toward the heading");
    }

    #[test]
    fn test_simple_spiral_radius_grows() {
        let style = MotionStyle {
            spiral: Some(SpiralStyle {
                turn_rate_deg: 90.0,
                clockwise: false,
                combined: false,
            }),
            ..MotionStyle::default()
        };
        let origin = Vec2::new(3.0, 4.0);
        let mut task = MotionTask::new(origin, 0.0, 2.0, style);
        let mut last_radius = 0.0;
        for _ in 0..100 {
            let frame = task.advance(0.01, None);
            let radius = (frame.position - origin).length();
            assert!(radius >= last_radius - 1e-9, "radius must not shrink");
            last_radius = radius;
        }
        // radius = speed * elapsed = 2.0 * 1.0
        assert!((last_radius - 2.0).abs() < 1e-6, "radius {last_radius}");
    }

    #[test]
    fn test_combined_spiral_curves_heading() {
        let style = MotionStyle {
            spiral: Some(SpiralStyle {
                turn_rate_deg: 180.0,
                clockwise: false,
                combined: true,
            }),
            ..MotionStyle::default()
        };
        let mut task = MotionTask::new(Vec2::ZERO, 0.0, 5.0, style);
        for _ in 0..50 {
            task.advance(0.01, None);
        }
        // After half a second at 180 deg/s the heading has rotated ~90
        // degrees, so the path bends upward.
        assert!(task.position().y > 0.5);
    }

    #[test]
    fn test_homing_stops_then_redirects() {
        let style = MotionStyle {
            homing: Some(homing_config()),
            ..MotionStyle::default()
        };
        let target = Vec2::new(0.0, 50.0);
        let mut task = MotionTask::new(Vec2::ZERO, 0.0, 10.0, style);

        // Initial window: moves along +X.
        for _ in 0..100 {
            task.advance(0.01, Some(target));
        }
        let after_initial = task.position();
        assert!(after_initial.x > 9.0);

        // Stop window: position frozen.
        for _ in 0..50 {
            task.advance(0.01, Some(target));
        }
        assert!((task.position() - after_initial).length() < 1e-9);

        // Curve + post-curve straight flight: moving toward the target now.
        for _ in 0..200 {
            task.advance(0.01, Some(target));
        }
        assert!(task.position().y > 1.0, "should bend toward the target");
    }

    #[test]
    fn test_homing_final_phase_keeps_last_heading() {
        let style = MotionStyle {
            homing: Some(homing_config()),
            ..MotionStyle::default()
        };
        let target = Vec2::new(0.0, 50.0);
        let mut task = MotionTask::new(Vec2::ZERO, 0.0, 10.0, style);

        // Run through initial + stop + curve + second straight window.
        for _ in 0..400 {
            task.advance(0.01, Some(target));
        }
        // Target disappears; final phase flight continues regardless.
        let before = task.position();
        let frame = task.advance(0.01, None);
        assert!((frame.position - before).length() > 0.0);
    }

    #[test]
    fn test_homing_survives_lost_target_during_stop() {
        let style = MotionStyle {
            homing: Some(homing_config()),
            ..MotionStyle::default()
        };
        let mut task = MotionTask::new(Vec2::ZERO, 0.0, 10.0, style);
        // No target at any point: the task keeps its spawn heading.
        for _ in 0..400 {
            task.advance(0.01, None);
        }
        assert!(task.position().x > 10.0);
        assert!(task.position().y.abs() < 1e-6);
    }
}
