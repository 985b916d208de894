//! Static AABB collision world.
//!
//! Stands in for the engine physics collaborator: point-in-time sweep
//! casts (inflated by the boss body's half extents) and downward ray
//! probes for landing-surface detection.

use barrage_core::types::Vec2;
use barrage_director::hooks::{CollisionQuery, SurfaceHit};
use serde::{Deserialize, Serialize};

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    fn inflated(&self, by: Vec2) -> Self {
        Self {
            min: self.min - by,
            max: self.max + by,
        }
    }

    /// Slab-method ray entry distance, if the ray hits at all.
    fn ray_entry(&self, origin: Vec2, dir: Vec2) -> Option<f64> {
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;

        for axis in 0..2 {
            let (o, d, lo, hi) = match axis {
                0 => (origin.x, dir.x, self.min.x, self.max.x),
                _ => (origin.y, dir.y, self.min.y, self.max.y),
            };

            if d.abs() < 1e-12 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let t0 = (lo - o) / d;
            let t1 = (hi - o) / d;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(t_min.max(0.0))
    }
}

/// Immutable level geometry: solid walls plus one-way platforms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticWorld {
    pub solids: Vec<Aabb>,
    pub one_way: Vec<Aabb>,
    /// Boss body half extents, used to inflate sweeps.
    pub body_half_extents: Vec2,
}

impl CollisionQuery for StaticWorld {
    fn sweep(
        &self,
        from: Vec2,
        delta: Vec2,
        ignore_one_way: bool,
        min_distance: f64,
    ) -> Option<f64> {
        let distance = delta.length();
        if distance <= 1e-12 {
            return None;
        }
        let dir = delta / distance;

        let mut nearest: Option<f64> = None;
        let mut consider = |aabb: &Aabb| {
            if let Some(t) = aabb.inflated(self.body_half_extents).ray_entry(from, dir) {
                if t > min_distance && nearest.is_none_or(|n| t < n) {
                    nearest = Some(t);
                }
            }
        };

        for solid in &self.solids {
            consider(solid);
        }
        if !ignore_one_way {
            for platform in &self.one_way {
                consider(platform);
            }
        }

        nearest
    }

    fn probe_down(&self, origin: Vec2, max_distance: f64) -> Option<SurfaceHit> {
        let dir = Vec2::new(0.0, -1.0);
        let mut nearest: Option<f64> = None;

        for aabb in self.solids.iter().chain(self.one_way.iter()) {
            // A landing probe looks for top surfaces below the ray start.
            if origin.y < aabb.max.y {
                continue;
            }
            if let Some(t) = aabb.ray_entry(origin, dir) {
                if t <= max_distance && nearest.is_none_or(|n| t < n) {
                    nearest = Some(t);
                }
            }
        }

        nearest.map(|t| SurfaceHit {
            point: origin + dir * t,
            normal: Vec2::new(0.0, 1.0),
        })
    }
}
