//! Promotion ranking
//!
//! Fills vacancies top-down within a single turn. Seats freed at level L by
//! promotions into L+1 are visible when L itself is ranked, so a retirement at
//! the top cascades all the way down in one turn.
//!
//! # Scoring
//!
//! ```text
//! score = base_merit × (1 − luck) + noise × luck,   noise ~ U[0, 1)
//! ```
//!
//! One noise draw per candidate, in candidate order, even when `luck` is 0.
//! Candidates are ordered by score descending, then age descending; anything
//! still tied keeps candidate order.

use crate::models::agent::Agent;
use crate::models::hierarchy::{Hierarchy, LevelCounts};
use crate::rng::RngManager;
use std::cmp::Ordering;

/// Result of one promotion pass
#[derive(Debug)]
pub struct PromotionOutcome {
    /// Occupancy per level after all promotions
    pub counts: LevelCounts,

    /// Agents moved up one level this turn
    pub num_promoted: usize,
}

/// Blend merit and noise by the luck factor
pub fn score(base_merit: f64, noise: f64, luck_factor: f64) -> f64 {
    base_merit * (1.0 - luck_factor) + noise * luck_factor
}

/// Rank `candidates` (indices into `agents`) best first
///
/// Draws exactly one value from `rng` per candidate.
///
/// # Example
/// ```
/// use cohort_ladder_core::{Agent, AgentKind, RngManager};
/// use cohort_ladder_core::phases::promotion::rank_candidates;
///
/// let agents = vec![
///     Agent::new(0, 1, 1, 0.2, AgentKind::Random),
///     Agent::new(1, 1, 1, 0.8, AgentKind::Random),
/// ];
/// let mut rng = RngManager::new(42);
///
/// // With no luck the higher merit always wins
/// assert_eq!(rank_candidates(&agents, &[0, 1], 0.0, &mut rng), vec![1, 0]);
/// assert_eq!(rng.draws(), 2);
/// ```
pub fn rank_candidates(
    agents: &[Agent],
    candidates: &[usize],
    luck_factor: f64,
    rng: &mut RngManager,
) -> Vec<usize> {
    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .map(|&index| {
            let noise = rng.next_f64();
            (index, score(agents[index].base_merit(), noise, luck_factor))
        })
        .collect();

    // Stable sort: full ties keep candidate order
    scored.sort_by(|&(a_index, a_score), &(b_index, b_score)| {
        compare_ranked(
            (a_score, agents[a_index].age()),
            (b_score, agents[b_index].age()),
        )
    });

    scored.into_iter().map(|(index, _)| index).collect()
}

/// Fill vacancies from level `top` down to level 2, then append each
/// survivor's level to its history
///
/// Level 1 is never filled here; replenishment hires into it afterwards.
pub fn run_promotions(
    survivors: &mut [Agent],
    hierarchy: &Hierarchy,
    luck_factor: f64,
    rng: &mut RngManager,
) -> PromotionOutcome {
    let top = hierarchy.top_level();

    // Partition by level as of the start of the pass. An agent promoted into
    // L sits in the L-1 bucket, which is only read when ranking for L.
    let mut by_level: Vec<Vec<usize>> = vec![Vec::new(); usize::from(top)];
    for (index, agent) in survivors.iter().enumerate() {
        if let Some(bucket) = by_level.get_mut(usize::from(agent.level()).wrapping_sub(1)) {
            bucket.push(index);
        }
    }

    let mut counts = hierarchy.occupancy(survivors.iter());
    let mut num_promoted = 0;

    for level in (2..=top).rev() {
        let vacancies = hierarchy.capacity(level).saturating_sub(counts.get(level));
        if vacancies == 0 {
            continue;
        }

        let candidates = &by_level[usize::from(level) - 2];
        if candidates.is_empty() {
            continue;
        }

        let ranked = rank_candidates(survivors, candidates, luck_factor, rng);
        for index in ranked.into_iter().take(vacancies) {
            survivors[index].promote_to(level);
            counts.add(level);
            counts.remove(level - 1);
            num_promoted += 1;
        }
    }

    for agent in survivors.iter_mut() {
        agent.record_level();
    }

    PromotionOutcome {
        counts,
        num_promoted,
    }
}

/// Order `(score, age)` keys best first: higher score, then older
fn compare_ranked(a: (f64, u32), b: (f64, u32)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| b.1.cmp(&a.1))
}
