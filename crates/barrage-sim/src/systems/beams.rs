//! Beam system — advances beam volleys and their shared spin clocks.
//!
//! Beams are grouped per volley (not per entity) because a volley's
//! staggered casts may share one spin clock.

use barrage_core::types::Vec2;
use barrage_patterns::beam::{BeamFrame, BeamState, SharedSpinClock};

/// One fire invocation's worth of beams, advanced together.
#[derive(Debug)]
pub struct ActiveBeamVolley {
    pub beams: Vec<BeamState>,
    pub clock: Option<SharedSpinClock>,
}

/// Advance every volley one tick; finished volleys are removed.
/// Returns the frames of all still-live beams, for rendering/damage.
pub fn run(
    volleys: &mut Vec<ActiveBeamVolley>,
    dt: f64,
    fire_point: Vec2,
    target: Option<Vec2>,
) -> Vec<BeamFrame> {
    let mut frames = Vec::new();

    for volley in volleys.iter_mut() {
        if let Some(clock) = volley.clock.as_mut() {
            clock.advance(dt);
        }
        let clock = volley.clock.as_ref();

        for beam in &mut volley.beams {
            let frame = beam.advance(dt, fire_point, target, clock);
            if !frame.despawn {
                frames.push(frame);
            }
        }
        volley.beams.retain(|beam| !beam.is_done());
    }

    volleys.retain(|volley| !volley.beams.is_empty());
    frames
}
