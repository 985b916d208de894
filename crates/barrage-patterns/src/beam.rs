//! Beam lifecycle state machines.
//!
//! A beam volley telegraphs, grows to full range, stays active while
//! spinning, and despawns per its configured mode. Staggered volleys can
//! spin each beam on its own clock or share one clock that starts only
//! after the last beam has finished spawning.

use barrage_core::config::{BeamConfig, SpinConfig};
use barrage_core::types::{deg_from_vec, normalize_deg, Vec2};

use crate::spin::step_continuous_scaled;

/// One spin clock shared by every beam of a staggered volley.
#[derive(Debug, Clone)]
pub struct SharedSpinClock {
    spin: SpinConfig,
    start_delay: f64,
    run_remaining: f64,
    started: bool,
    angle_offset: f64,
    spin_speed: f64,
    change_rate: f64,
}

impl SharedSpinClock {
    pub(crate) fn new(
        spin: SpinConfig,
        spin_speed: f64,
        change_rate: f64,
        start_delay: f64,
        run_duration: f64,
    ) -> Self {
        Self {
            spin,
            start_delay,
            run_remaining: run_duration,
            started: false,
            angle_offset: 0.0,
            spin_speed,
            change_rate,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if !self.started {
            self.start_delay -= dt;
            if self.start_delay <= 0.0 {
                self.started = true;
            }
            return;
        }

        if self.run_remaining <= 0.0 {
            return;
        }
        self.run_remaining -= dt;

        step_continuous_scaled(
            &mut self.angle_offset,
            &mut self.spin_speed,
            &mut self.change_rate,
            &self.spin,
            dt,
        );
    }

    /// Zero until the clock has started.
    pub fn offset(&self) -> f64 {
        if self.started {
            self.angle_offset
        } else {
            0.0
        }
    }
}

/// Lifecycle phase of one beam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeamPhase {
    /// Waiting out the inter-beam stagger.
    Pending,
    /// Static indicator shown, optionally tracking the target.
    Telegraph,
    /// Tiled beam growing to full range.
    Growing,
    /// Full-length beam, spin applied.
    Active,
    Done,
}

/// Per-tick beam output for the host.
#[derive(Debug, Clone, Copy)]
pub struct BeamFrame {
    pub origin: Vec2,
    pub angle_deg: f64,
    pub length: f64,
    pub width: f64,
    pub phase: BeamPhase,
    pub despawn: bool,
}

/// Resumable lifecycle for one beam cast.
#[derive(Debug, Clone)]
pub struct BeamState {
    config: BeamConfig,
    spin: SpinConfig,
    aim: bool,
    /// Build-time cast angle; base for the shared clock.
    cast_base_angle: f64,
    spread_offset: f64,
    angle: f64,
    length: f64,
    local_spin_speed: f64,
    local_spin_change: f64,
    uses_shared_clock: bool,
    origin_offset: Vec2,
    start_delay: f64,
    /// Offset from volley start at which this beam despawns.
    active_until: f64,
    volley_elapsed: f64,
    phase: BeamPhase,
}

impl BeamState {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        config: BeamConfig,
        spin: SpinConfig,
        aim: bool,
        cast_base_angle: f64,
        spread_offset: f64,
        local_spin_speed: f64,
        local_spin_change: f64,
        uses_shared_clock: bool,
        origin_offset: Vec2,
        start_delay: f64,
        active_until: f64,
    ) -> Self {
        Self {
            config,
            spin,
            aim,
            cast_base_angle,
            spread_offset,
            angle: normalize_deg(cast_base_angle + spread_offset),
            length: 0.0,
            local_spin_speed,
            local_spin_change,
            uses_shared_clock,
            origin_offset,
            start_delay,
            active_until,
            volley_elapsed: 0.0,
            phase: BeamPhase::Pending,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == BeamPhase::Done
    }

    /// Advance one tick. `fire_point` is the live emitter position and
    /// `target` the live target, if any.
    pub fn advance(
        &mut self,
        dt: f64,
        fire_point: Vec2,
        target: Option<Vec2>,
        shared: Option<&SharedSpinClock>,
    ) -> BeamFrame {
        self.volley_elapsed += dt;
        let origin = fire_point + self.origin_offset;

        let telegraph_start = self.start_delay;
        let growth_start = telegraph_start + self.config.telegraph_duration;
        let active_start = growth_start + self.config.growth_duration;

        if self.volley_elapsed >= self.active_until {
            self.phase = BeamPhase::Done;
        } else if self.volley_elapsed < telegraph_start {
            self.phase = BeamPhase::Pending;
        } else if self.volley_elapsed < growth_start {
            self.phase = BeamPhase::Telegraph;
            if self.aim && self.config.track_target_during_telegraph {
                if let Some(t) = target {
                    let base =
                        deg_from_vec(t - origin, self.angle - self.spread_offset);
                    self.angle = normalize_deg(base + self.spread_offset);
                }
            }
        } else if self.volley_elapsed < active_start {
            if self.phase == BeamPhase::Telegraph && self.aim && !self.config.lock_to_telegraph_angle
            {
                // Re-sample the target once at beam spawn.
                if let Some(t) = target {
                    let base =
                        deg_from_vec(t - origin, self.angle - self.spread_offset);
                    self.angle = normalize_deg(base + self.spread_offset);
                }
            }
            self.phase = BeamPhase::Growing;
            let growth = self.config.growth_duration.max(f64::EPSILON);
            let progress = ((self.volley_elapsed - growth_start) / growth).clamp(0.0, 1.0);
            self.length = self.config.range * progress;
        } else {
            self.phase = BeamPhase::Active;
            self.length = self.config.range;

            if self.spin.enabled {
                match shared {
                    Some(clock) if self.uses_shared_clock => {
                        self.angle = normalize_deg(
                            self.cast_base_angle + self.spread_offset + clock.offset(),
                        );
                    }
                    _ => {
                        step_continuous_scaled(
                            &mut self.angle,
                            &mut self.local_spin_speed,
                            &mut self.local_spin_change,
                            &self.spin,
                            dt,
                        );
                    }
                }
            }
        }

        BeamFrame {
            origin,
            angle_deg: self.angle,
            length: self.length,
            width: self.config.width,
            phase: self.phase,
            despawn: self.phase == BeamPhase::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beam_config() -> BeamConfig {
        BeamConfig {
            telegraph_duration: 1.0,
            growth_duration: 0.5,
            beam_duration: 2.0,
            range: 10.0,
            ..BeamConfig::default()
        }
    }

    fn beam(config: BeamConfig, active_until: f64) -> BeamState {
        BeamState::new(
            config,
            SpinConfig::default(),
            false,
            90.0,
            0.0,
            0.0,
            0.0,
            false,
            Vec2::ZERO,
            0.0,
            active_until,
        )
    }

    #[test]
    fn test_phase_ordering() {
        let config = beam_config();
        let mut state = beam(config, 3.5);
        let dt = 0.05;
        let mut seen = Vec::new();
        loop {
            let frame = state.advance(dt, Vec2::ZERO, None, None);
            if seen.last() != Some(&frame.phase) {
                seen.push(frame.phase);
            }
            if frame.despawn {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                BeamPhase::Telegraph,
                BeamPhase::Growing,
                BeamPhase::Active,
                BeamPhase::Done
            ]
        );
    }

    #[test]
    fn test_growth_reaches_full_range() {
        let config = beam_config();
        let mut state = beam(config, 3.5);
        let mut max_len: f64 = 0.0;
        for _ in 0..64 {
            let frame = state.advance(0.05, Vec2::ZERO, None, None);
            assert!(frame.length <= config.range + 1e-9);
            max_len = max_len.max(frame.length);
        }
        assert_eq!(max_len, config.range);
    }

    #[test]
    fn test_stagger_delays_telegraph() {
        let config = beam_config();
        let mut state = BeamState::new(
            config,
            SpinConfig::default(),
            false,
            0.0,
            0.0,
            0.0,
            0.0,
            false,
            Vec2::ZERO,
            0.5,
            4.0,
        );
        let frame = state.advance(0.1, Vec2::ZERO, None, None);
        assert_eq!(frame.phase, BeamPhase::Pending);
        for _ in 0..5 {
            state.advance(0.1, Vec2::ZERO, None, None);
        }
        let frame = state.advance(0.1, Vec2::ZERO, None, None);
        assert_eq!(frame.phase, BeamPhase::Telegraph);
    }

    #[test]
    fn test_telegraph_tracks_target() {
        let mut config = beam_config();
        config.track_target_during_telegraph = true;
        let mut state = BeamState::new(
            config,
            SpinConfig::default(),
            true,
            0.0,
            0.0,
            0.0,
            0.0,
            false,
            Vec2::ZERO,
            0.0,
            4.0,
        );
        // Target straight up: telegraph should swing to ~90 degrees.
        let frame = state.advance(0.1, Vec2::ZERO, Some(Vec2::new(0.0, 5.0)), None);
        assert_eq!(frame.phase, BeamPhase::Telegraph);
        assert!((frame.angle_deg - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_shared_clock_waits_for_start() {
        let spin = SpinConfig {
            enabled: true,
            speed: 90.0,
            ..SpinConfig::default()
        };
        let mut clock = SharedSpinClock::new(spin, 90.0, 0.0, 0.5, 2.0);
        clock.advance(0.25);
        assert_eq!(clock.offset(), 0.0);
        clock.advance(0.25);
        // Started; a further tick accumulates offset.
        clock.advance(0.5);
        assert!(clock.offset() > 0.0);
    }
}
