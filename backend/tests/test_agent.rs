//! Tests for the Agent model and AgentFactory

use cohort_ladder_core::{Agent, AgentFactory, AgentKind, ProfileId, RngManager};

#[test]
fn test_agent_new_pads_history_to_age() {
    let agent = Agent::new(3, 2, 3, 0.4, AgentKind::Random);

    assert_eq!(agent.id(), 3);
    assert_eq!(agent.level(), 2);
    assert_eq!(agent.age(), 3);
    assert_eq!(agent.base_merit(), 0.4);
    assert_eq!(agent.history(), &[2, 2, 2, 2]);
    assert!(agent.is_active());
}

#[test]
fn test_new_hire_history() {
    let agent = Agent::new(0, 1, 0, 0.5, AgentKind::Random);
    assert_eq!(agent.history(), &[1]);
    assert_eq!(agent.history().len(), agent.age() as usize + 1);
}

#[test]
fn test_survive_and_promote() {
    let mut agent = Agent::new(0, 1, 0, 0.5, AgentKind::Random);

    agent.age_one_turn();
    agent.promote_to(2);
    agent.record_level();

    assert_eq!(agent.age(), 1);
    assert_eq!(agent.level(), 2);
    assert_eq!(agent.history(), &[1, 2]);
}

#[test]
fn test_retirement_due_at_tenure() {
    let young = Agent::new(0, 1, 3, 0.5, AgentKind::Random);
    let old = Agent::new(1, 1, 4, 0.5, AgentKind::Random);

    assert!(!young.is_due_for_retirement(4));
    assert!(old.is_due_for_retirement(4));
}

#[test]
fn test_retire_deactivates() {
    let mut agent = Agent::new(0, 3, 4, 0.5, AgentKind::Random);
    agent.retire();
    assert!(!agent.is_active());
    assert_eq!(agent.level(), 3);
}

#[test]
fn test_kind_profile() {
    assert_eq!(AgentKind::Probe(ProfileId(2)).profile(), Some(ProfileId(2)));
    assert_eq!(AgentKind::Random.profile(), None);
}

#[test]
fn test_factory_ids_are_sequential_across_kinds() {
    let mut factory = AgentFactory::new();
    let mut rng = RngManager::new(42);

    let a = factory.spawn_random(1, 0, &mut rng);
    let b = factory.spawn_probe(1, 0, ProfileId(0), 0.9);
    let c = factory.spawn_random(2, 1, &mut rng);

    assert_eq!((a.id(), b.id(), c.id()), (0, 1, 2));
    assert_eq!(factory.next_id(), 3);
}

#[test]
fn test_factory_probe_takes_fixed_merit_without_drawing() {
    let mut factory = AgentFactory::new();
    let mut rng = RngManager::new(42);

    let probe = factory.spawn_probe(1, 0, ProfileId(4), 1.0);
    assert_eq!(probe.base_merit(), 1.0);
    assert_eq!(probe.kind(), AgentKind::Probe(ProfileId(4)));
    assert_eq!(rng.draws(), 0);

    let random = factory.spawn_random(1, 0, &mut rng);
    assert_eq!(random.kind(), AgentKind::Random);
    assert!((0.0..1.0).contains(&random.base_merit()));
    assert_eq!(rng.draws(), 1);
}

#[test]
fn test_random_merit_comes_from_rng_sequence() {
    let mut factory = AgentFactory::new();
    let mut rng = RngManager::new(42);
    let mut reference = RngManager::new(42);

    let agent = factory.spawn_random(1, 0, &mut rng);
    assert_eq!(agent.base_merit(), reference.next_f64());
}
