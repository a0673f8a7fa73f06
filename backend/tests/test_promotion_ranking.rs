//! Tests for promotion ranking at the luck boundaries
//!
//! Luck 0 must be a pure merit sort (older first on ties); luck 1 must make
//! merit irrelevant.

use cohort_ladder_core::phases::promotion::{rank_candidates, run_promotions, score};
use cohort_ladder_core::{Agent, AgentKind, Hierarchy, RngManager};
use std::collections::BTreeMap;

fn agent(id: u64, level: u8, age: u32, merit: f64) -> Agent {
    Agent::new(id, level, age, merit, AgentKind::Random)
}

#[test]
fn test_score_endpoints() {
    assert_eq!(score(0.7, 0.2, 0.0), 0.7);
    assert_eq!(score(0.7, 0.2, 1.0), 0.2);
    assert!((score(0.8, 0.2, 0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn test_zero_luck_is_pure_merit_order() {
    let agents = vec![
        agent(0, 1, 1, 0.3),
        agent(1, 1, 1, 0.9),
        agent(2, 1, 1, 0.1),
        agent(3, 1, 1, 0.6),
    ];
    for seed in 1..20 {
        let mut rng = RngManager::new(seed);
        let ranked = rank_candidates(&agents, &[0, 1, 2, 3], 0.0, &mut rng);
        assert_eq!(ranked, vec![1, 3, 0, 2]);
        assert_eq!(rng.draws(), 4);
    }
}

#[test]
fn test_zero_luck_ties_go_to_older_agent() {
    let agents = vec![
        agent(0, 1, 1, 0.5),
        agent(1, 1, 3, 0.5),
        agent(2, 1, 2, 0.5),
        agent(3, 1, 3, 0.5),
    ];
    let mut rng = RngManager::new(42);
    let ranked = rank_candidates(&agents, &[0, 1, 2, 3], 0.0, &mut rng);
    // Equal age and merit keep candidate order
    assert_eq!(ranked, vec![1, 3, 2, 0]);
}

#[test]
fn test_full_luck_ignores_merit() {
    let agents = vec![agent(0, 1, 1, 0.9), agent(1, 1, 1, 0.1)];
    let mut rng = RngManager::new(2024);
    let trials = 20_000;

    let wins = (0..trials)
        .filter(|_| rank_candidates(&agents, &[0, 1], 1.0, &mut rng)[0] == 0)
        .count();
    let share = wins as f64 / trials as f64;

    assert!((0.45..0.55).contains(&share), "high-merit share {}", share);
}

#[test]
fn test_partial_luck_favors_merit() {
    let agents = vec![agent(0, 1, 1, 0.9), agent(1, 1, 1, 0.1)];
    let mut rng = RngManager::new(7);
    let trials = 20_000;

    let wins = (0..trials)
        .filter(|_| rank_candidates(&agents, &[0, 1], 0.5, &mut rng)[0] == 0)
        .count();

    assert!(wins as f64 / trials as f64 > 0.8);
}

#[test]
fn test_single_seat_goes_to_best_candidate() {
    let hierarchy = Hierarchy::from_map(&BTreeMap::from([(1, 3), (2, 1)])).unwrap();
    let mut survivors = vec![agent(0, 1, 1, 0.2), agent(1, 1, 2, 0.8), agent(2, 1, 1, 0.5)];
    let mut rng = RngManager::new(1);

    let outcome = run_promotions(&mut survivors, &hierarchy, 0.0, &mut rng);

    assert_eq!(outcome.num_promoted, 1);
    assert_eq!(survivors[1].level(), 2);
    assert_eq!(outcome.counts.get(2), 1);
    assert_eq!(outcome.counts.get(1), 2);
}

#[test]
fn test_no_draws_without_vacancies() {
    let hierarchy = Hierarchy::from_map(&BTreeMap::from([(1, 2), (2, 1)])).unwrap();
    let mut survivors = vec![agent(0, 2, 1, 0.2), agent(1, 1, 1, 0.8)];
    let mut rng = RngManager::new(1);

    let outcome = run_promotions(&mut survivors, &hierarchy, 0.5, &mut rng);

    assert_eq!(outcome.num_promoted, 0);
    assert_eq!(rng.draws(), 0);
    assert_eq!(survivors[0].history(), &[2, 2, 2]);
}
