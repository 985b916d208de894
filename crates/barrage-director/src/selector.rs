//! Attack eligibility and selection policies.
//!
//! Both policies first run with immediate repeats disallowed; if nothing
//! qualifies they run once more with repeats allowed so the boss never
//! stalls. Random draws go through the director's seeded RNG.

use barrage_core::config::AttackDefinition;
use barrage_core::enums::AttackSelectMode;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Persistent cursor for Sequence mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionState {
    cursor: Option<usize>,
}

impl SelectionState {
    pub fn reset(&mut self) {
        self.cursor = None;
    }
}

/// Inputs a selection pass needs.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub attacks: &'a [AttackDefinition],
    pub mode: AttackSelectMode,
    pub hp_fraction: f64,
    /// Distance to the target; selection needs a target to gate against.
    pub distance: Option<f64>,
    /// Index of the currently/previously active attack, for repeat checks.
    pub last_index: Option<usize>,
}

/// Eligibility predicate for one attack.
pub fn is_eligible(
    ctx: &SelectionContext,
    index: usize,
    distance: f64,
    disallow_repeat: bool,
) -> bool {
    let attack = &ctx.attacks[index];

    if attack.pattern.is_none() {
        return false;
    }
    if ctx.mode == AttackSelectMode::WeightedRandom && attack.weight <= 0.0 {
        return false;
    }
    if ctx.hp_fraction < attack.min_hp_fraction || ctx.hp_fraction > attack.max_hp_fraction {
        return false;
    }
    if distance < attack.min_distance || distance > attack.max_distance {
        return false;
    }
    if disallow_repeat && !attack.allow_repeat && Some(index) == ctx.last_index {
        return false;
    }

    true
}

/// Pick the next attack index, or None when nothing is eligible even with
/// repeats allowed.
pub fn pick_next(
    ctx: &SelectionContext,
    state: &mut SelectionState,
    rng: &mut ChaCha8Rng,
) -> Option<usize> {
    let picked = match ctx.mode {
        AttackSelectMode::Sequence => pick_sequence(ctx, state, true),
        AttackSelectMode::WeightedRandom => pick_weighted(ctx, rng, true),
    };
    if picked.is_some() {
        return picked;
    }

    // Fallback: allow repeats so the boss never stalls.
    match ctx.mode {
        AttackSelectMode::Sequence => pick_sequence(ctx, state, false),
        AttackSelectMode::WeightedRandom => pick_weighted(ctx, rng, false),
    }
}

fn pick_sequence(
    ctx: &SelectionContext,
    state: &mut SelectionState,
    disallow_repeat: bool,
) -> Option<usize> {
    if ctx.attacks.is_empty() {
        return None;
    }
    let distance = ctx.distance?;

    for _ in 0..ctx.attacks.len() {
        let next = state.cursor.map_or(0, |c| (c + 1) % ctx.attacks.len());
        state.cursor = Some(next);

        if is_eligible(ctx, next, distance, disallow_repeat) {
            return Some(next);
        }
    }

    None
}

fn pick_weighted(
    ctx: &SelectionContext,
    rng: &mut ChaCha8Rng,
    disallow_repeat: bool,
) -> Option<usize> {
    if ctx.attacks.is_empty() {
        return None;
    }
    let distance = ctx.distance?;

    let mut eligible = Vec::new();
    let mut total_weight = 0.0;
    for index in 0..ctx.attacks.len() {
        if !is_eligible(ctx, index, distance, disallow_repeat) {
            continue;
        }
        eligible.push(index);
        total_weight += ctx.attacks[index].weight;
    }

    if eligible.is_empty() {
        return None;
    }

    let roll = rng.gen_range(0.0..=total_weight);
    let mut accumulated = 0.0;
    for &index in &eligible {
        accumulated += ctx.attacks[index].weight;
        if roll <= accumulated {
            return Some(index);
        }
    }

    eligible.last().copied()
}
