//! Damage-threshold retreat trigger and target computation.

use barrage_core::config::{PatrolSettings, RetreatSettings};
use barrage_core::enums::RetreatMode;
use barrage_core::types::{vec_from_deg, Vec2};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Accumulates damage between retreat triggers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetreatTracker {
    accumulated_damage: f64,
    last_known_health: Option<f64>,
    cooldown_remaining: f64,
}

impl RetreatTracker {
    pub fn accumulated(&self) -> f64 {
        self.accumulated_damage
    }

    /// Record a health reading; only positive deltas count as damage.
    pub fn track(&mut self, current_health: Option<f64>) {
        let Some(current) = current_health else {
            return;
        };

        match self.last_known_health {
            None => self.last_known_health = Some(current),
            Some(last) => {
                let delta = last - current;
                if delta > 0.0 {
                    self.accumulated_damage += delta;
                }
                self.last_known_health = Some(current);
            }
        }
    }

    pub fn tick(&mut self, dt: f64) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining -= dt;
        }
    }

    /// Whether the retreat trigger condition holds right now.
    pub fn should_trigger(
        &self,
        settings: &RetreatSettings,
        hp_fraction: Option<f64>,
    ) -> bool {
        if !settings.enabled {
            return false;
        }
        if self.cooldown_remaining > 0.0 {
            return false;
        }
        // A health source must be attached for the trigger to fire.
        let Some(hp) = hp_fraction else {
            return false;
        };
        if hp > settings.only_below_hp_fraction {
            return false;
        }

        self.accumulated_damage >= settings.damage_threshold.max(0.01)
    }

    /// Consume the trigger: reset the accumulator and start the cooldown.
    pub fn consume(&mut self, settings: &RetreatSettings) {
        self.accumulated_damage = 0.0;
        self.cooldown_remaining = settings.cooldown.max(0.0);
    }
}

/// Compute where a retreat beat goes.
pub fn compute_retreat_target(
    settings: &RetreatSettings,
    patrol: &PatrolSettings,
    origin: Vec2,
    target: Vec2,
    rng: &mut ChaCha8Rng,
) -> Vec2 {
    match settings.mode {
        RetreatMode::AwayFromTarget => {
            let away = (origin - target)
                .try_normalize()
                .unwrap_or(Vec2::new(1.0, 0.0));
            origin + away * settings.distance
        }
        RetreatMode::RandomAroundTarget => {
            let direction = vec_from_deg(rng.gen_range(0.0..360.0));
            target + direction * settings.distance
        }
        RetreatMode::NearestWaypoint => patrol
            .waypoints
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (*a - origin).length_squared();
                let db = (*b - origin).length_squared();
                da.total_cmp(&db)
            })
            .unwrap_or(origin),
    }
}
