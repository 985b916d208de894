//! Per-activation angular state for a pattern slot.
//!
//! `SpinState` is the only mutable state derived from a `PatternConfig`.
//! It is allocated per emission slot, reset from the config on activation,
//! and owned exclusively by that slot while active — configs themselves
//! are never written at runtime.

use barrage_core::config::{PatternConfig, SpinConfig};
use barrage_core::enums::SpinMode;
use barrage_core::types::normalize_deg;

/// Mutable angular/spin state for one emission slot.
#[derive(Debug, Clone)]
pub struct SpinState {
    /// Current base fire angle, normalized to [0,360).
    pub fire_angle: f64,
    /// Current spin speed in degrees per step (Continuous mode).
    pub spin_speed: f64,
    /// Degrees per step added to the spin speed.
    pub change_rate: f64,
    /// Fixed center angle held for the whole activation (PingPong mode).
    pub center_angle: f64,
    /// Oscillating offset, always within [-max_speed, +max_speed].
    pub spin_offset: f64,
    /// Ping-pong travel direction, +1 or -1.
    pub spin_dir: f64,
    /// Set once the base angle has been seeded from the target this
    /// activation.
    pub seeded_from_target: bool,
}

impl SpinState {
    pub fn from_config(config: &PatternConfig) -> Self {
        let mut state = Self {
            fire_angle: 0.0,
            spin_speed: 0.0,
            change_rate: 0.0,
            center_angle: 0.0,
            spin_offset: 0.0,
            spin_dir: 1.0,
            seeded_from_target: false,
        };
        state.reset_from_config(config);
        state
    }

    /// Restore config defaults; called on slot activation and deactivation.
    pub fn reset_from_config(&mut self, config: &PatternConfig) {
        self.fire_angle = normalize_deg(config.fire_angle);
        self.center_angle = self.fire_angle;
        self.spin_speed = config.spin.speed;
        self.change_rate = config.spin.change_rate;
        self.spin_offset = 0.0;
        self.spin_dir = 1.0;
        self.seeded_from_target = false;
    }

    /// The angle volleys are built from right now.
    pub fn current_angle(&self, spin: &SpinConfig) -> f64 {
        match spin.mode {
            SpinMode::Continuous => self.fire_angle,
            SpinMode::PingPong => normalize_deg(self.center_angle + self.spin_offset),
        }
    }

    /// Seed the base angle from the target, once per activation.
    pub fn seed_from_target(&mut self, target_angle_deg: f64) {
        let angle = normalize_deg(target_angle_deg);
        self.fire_angle = angle;
        self.center_angle = angle;
        self.seeded_from_target = true;
    }

    /// Advance by one discrete step at the configured granularity.
    pub fn step(&mut self, spin: &SpinConfig) {
        if !spin.enabled {
            return;
        }

        match spin.mode {
            SpinMode::Continuous => {
                self.fire_angle = normalize_deg(self.fire_angle + self.spin_speed);

                self.spin_speed += self.change_rate;
                self.spin_speed = self.spin_speed.clamp(-spin.max_speed, spin.max_speed);

                if spin.reversal && self.spin_speed.abs() >= spin.max_speed {
                    self.change_rate = -self.change_rate;
                }
            }
            SpinMode::PingPong => {
                let step = spin.speed.abs();
                let max = spin.max_speed.abs();
                let mut next = self.spin_offset + self.spin_dir * step;

                // Reverse exactly at the bound, never overshooting.
                if next >= max {
                    next = max;
                    self.spin_dir = -1.0;
                } else if next <= -max {
                    next = -max;
                    self.spin_dir = 1.0;
                }
                self.spin_offset = next;
            }
        }
    }
}

/// Time-scaled continuous spin step for beams, which spin every tick while
/// active rather than per emission step. Operates on local copies so each
/// beam (or shared clock) evolves independently of the slot state.
pub fn step_continuous_scaled(
    angle: &mut f64,
    spin_speed: &mut f64,
    change_rate: &mut f64,
    spin: &SpinConfig,
    dt: f64,
) {
    *angle = normalize_deg(*angle + *spin_speed * dt);

    *spin_speed += *change_rate * dt;
    *spin_speed = spin_speed.clamp(-spin.max_speed, spin.max_speed);

    if spin.reversal && spin_speed.abs() >= spin.max_speed {
        *change_rate = -*change_rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::enums::SpinMode;

    fn spin_config(mode: SpinMode, speed: f64, change: f64, max: f64, reversal: bool) -> SpinConfig {
        SpinConfig {
            enabled: true,
            mode,
            speed,
            change_rate: change,
            max_speed: max,
            reversal,
            ..SpinConfig::default()
        }
    }

    fn state_for(config: &SpinConfig) -> SpinState {
        let pattern = PatternConfig {
            fire_angle: 90.0,
            spin: *config,
            ..PatternConfig::default()
        };
        SpinState::from_config(&pattern)
    }

    #[test]
    fn test_continuous_angle_stays_normalized() {
        let config = spin_config(SpinMode::Continuous, 170.0, 0.0, 180.0, false);
        let mut state = state_for(&config);
        for _ in 0..100 {
            state.step(&config);
            assert!((0.0..360.0).contains(&state.fire_angle));
        }
    }

    #[test]
    fn test_continuous_speed_clamped_and_reversed() {
        let config = spin_config(SpinMode::Continuous, 0.0, 5.0, 20.0, true);
        let mut state = state_for(&config);
        let mut saw_negative_rate = false;
        for _ in 0..50 {
            state.step(&config);
            assert!(state.spin_speed.abs() <= 20.0);
            if state.change_rate < 0.0 {
                saw_negative_rate = true;
            }
        }
        assert!(saw_negative_rate, "reversal should flip the change rate");
    }

    #[test]
    fn test_ping_pong_never_exceeds_max() {
        let config = spin_config(SpinMode::PingPong, 7.0, 0.0, 30.0, false);
        let mut state = state_for(&config);
        for _ in 0..200 {
            state.step(&config);
            assert!(
                state.spin_offset.abs() <= 30.0,
                "offset {} exceeded bound",
                state.spin_offset
            );
        }
    }

    #[test]
    fn test_ping_pong_reverses_exactly_at_bound() {
        // Step 10 into a bound of 25: offsets 10, 20, 25 (clamped), then back
        let config = spin_config(SpinMode::PingPong, 10.0, 0.0, 25.0, false);
        let mut state = state_for(&config);

        state.step(&config);
        assert_eq!(state.spin_offset, 10.0);
        state.step(&config);
        assert_eq!(state.spin_offset, 20.0);
        state.step(&config);
        assert_eq!(state.spin_offset, 25.0);
        assert_eq!(state.spin_dir, -1.0);
        state.step(&config);
        assert_eq!(state.spin_offset, 15.0);
    }

    #[test]
    fn test_ping_pong_period_stable() {
        // A full cycle returns to the starting offset after a fixed number
        // of steps regardless of when it is observed.
        let config = spin_config(SpinMode::PingPong, 10.0, 0.0, 20.0, false);
        let mut state = state_for(&config);
        let mut offsets = Vec::new();
        for _ in 0..16 {
            state.step(&config);
            offsets.push(state.spin_offset);
        }
        // 10,20,10,0,-10,-20,-10,0 repeating
        assert_eq!(&offsets[..8], &offsets[8..]);
    }

    #[test]
    fn test_seed_from_target_once() {
        let config = spin_config(SpinMode::Continuous, 5.0, 0.0, 180.0, false);
        let mut state = state_for(&config);
        assert!(!state.seeded_from_target);
        state.seed_from_target(42.0);
        assert!(state.seeded_from_target);
        assert_eq!(state.fire_angle, 42.0);

        let pattern = PatternConfig {
            fire_angle: 90.0,
            spin: config,
            ..PatternConfig::default()
        };
        state.reset_from_config(&pattern);
        assert!(!state.seeded_from_target);
        assert_eq!(state.fire_angle, 90.0);
    }

    #[test]
    fn test_disabled_spin_is_inert() {
        let mut config = spin_config(SpinMode::Continuous, 15.0, 1.0, 180.0, false);
        config.enabled = false;
        let mut state = state_for(&config);
        let before = state.fire_angle;
        state.step(&config);
        assert_eq!(state.fire_angle, before);
    }
}
