//! Scripted step sequencer.
//!
//! Scans forward from a persistent cursor (wrapping once when looping),
//! evaluating each step's health gate. Gate failures either skip the step
//! or abort the whole scan for this cycle.

use barrage_core::config::SequenceStep;
use barrage_core::enums::{GateFailPolicy, HealthGate};

/// Cursor into an ordered scripted step list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedSequencer {
    cursor: usize,
}

impl ScriptedSequencer {
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Find the next gate-passing step, advancing the cursor past every
    /// step considered. Returns None when the scan is exhausted or a
    /// failing step stops the sequence.
    pub fn try_next(
        &mut self,
        steps: &[SequenceStep],
        loop_sequence: bool,
        hp_fraction: f64,
    ) -> Option<SequenceStep> {
        if steps.is_empty() {
            return None;
        }

        let count = steps.len();
        for _ in 0..count {
            if self.cursor >= count {
                if !loop_sequence {
                    return None;
                }
                self.cursor = 0;
            }

            let step = steps[self.cursor];
            self.cursor += 1;

            if !passes_health_gate(&step, hp_fraction) {
                match step.on_gate_fail {
                    GateFailPolicy::StopSequence => return None,
                    GateFailPolicy::SkipStep => continue,
                }
            }

            return Some(step);
        }

        None
    }
}

/// Evaluate a step's health gate against the current hp fraction.
pub fn passes_health_gate(step: &SequenceStep, hp_fraction: f64) -> bool {
    match step.health_gate {
        HealthGate::None => true,
        HealthGate::AtOrBelow => hp_fraction <= step.gate_a,
        HealthGate::AtOrAbove => hp_fraction >= step.gate_a,
        HealthGate::Between => {
            // Thresholds accepted in either order.
            let min = step.gate_a.min(step.gate_b);
            let max = step.gate_a.max(step.gate_b);
            hp_fraction >= min && hp_fraction <= max
        }
    }
}
