//! Level-1 refill with probe injection
//!
//! After promotions settle, every open seat at level 1 is filled. Each profile
//! still below its sample target gets one fresh probe hire, in profile order,
//! as long as seats remain; the rest go to ordinary random-merit entrants.
//!
//! When there are fewer seats than hungry profiles, the profiles earlier in
//! the configured list win. Later profiles wait for a turn with more seats or
//! for the earlier ones to reach their targets.

use crate::models::agent::{Agent, AgentFactory};
use crate::models::probe::{ProbeProfile, ProfileId, SampleBook};
use crate::rng::RngManager;

/// Agents hired this turn
#[derive(Debug)]
pub struct ReplenishmentOutcome {
    /// New level-1 agents in creation (and id) order
    pub hires: Vec<Agent>,

    /// How many of `hires` are probes
    pub num_probes: usize,
}

/// Hire `vacancies` new level-1, age-0 agents
pub fn run_replenishment(
    vacancies: usize,
    profiles: &[ProbeProfile],
    samples: &SampleBook,
    factory: &mut AgentFactory,
    rng: &mut RngManager,
) -> ReplenishmentOutcome {
    let mut hires = Vec::with_capacity(vacancies);

    for (index, profile) in profiles.iter().enumerate() {
        if hires.len() >= vacancies {
            break;
        }
        let id = ProfileId(index);
        if samples.needs(id) {
            hires.push(factory.spawn_probe(1, 0, id, profile.merit));
        }
    }
    let num_probes = hires.len();

    while hires.len() < vacancies {
        hires.push(factory.spawn_random(1, 0, rng));
    }

    ReplenishmentOutcome { hires, num_probes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agent::AgentKind;
    use crate::models::probe::default_profiles;

    #[test]
    fn test_one_probe_per_needed_profile_then_random() {
        let profiles = default_profiles();
        let samples = SampleBook::new(profiles.len(), 3);
        let mut factory = AgentFactory::new();
        let mut rng = RngManager::new(5);

        let outcome = run_replenishment(8, &profiles, &samples, &mut factory, &mut rng);

        assert_eq!(outcome.hires.len(), 8);
        assert_eq!(outcome.num_probes, 5);
        for (index, hire) in outcome.hires.iter().take(5).enumerate() {
            assert_eq!(hire.kind(), AgentKind::Probe(ProfileId(index)));
            assert_eq!(hire.base_merit(), profiles[index].merit);
        }
        assert!(outcome.hires[5..].iter().all(|a| a.kind() == AgentKind::Random));
        assert_eq!(rng.draws(), 3);

        let ids: Vec<_> = outcome.hires.iter().map(Agent::id).collect();
        assert_eq!(ids, (0..8u64).collect::<Vec<_>>());
    }

    #[test]
    fn test_scarce_seats_go_to_earlier_profiles() {
        let profiles = default_profiles();
        let samples = SampleBook::new(profiles.len(), 3);
        let mut factory = AgentFactory::new();
        let mut rng = RngManager::new(5);

        let outcome = run_replenishment(2, &profiles, &samples, &mut factory, &mut rng);

        let kinds: Vec<_> = outcome.hires.iter().map(Agent::kind).collect();
        assert_eq!(
            kinds,
            vec![AgentKind::Probe(ProfileId(0)), AgentKind::Probe(ProfileId(1))]
        );
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_satisfied_profiles_are_skipped() {
        let profiles = default_profiles();
        let mut samples = SampleBook::new(profiles.len(), 1);
        let done = Agent::new(99, 1, 4, 0.5, AgentKind::Probe(ProfileId(0)));
        samples.record(ProfileId(0), &done);
        let mut factory = AgentFactory::new();
        let mut rng = RngManager::new(5);

        let outcome = run_replenishment(2, &profiles, &samples, &mut factory, &mut rng);

        assert_eq!(outcome.hires[0].kind(), AgentKind::Probe(ProfileId(1)));
        assert_eq!(outcome.hires[1].kind(), AgentKind::Probe(ProfileId(2)));
    }

    #[test]
    fn test_no_vacancies_hires_nobody() {
        let profiles = default_profiles();
        let samples = SampleBook::new(profiles.len(), 1);
        let mut factory = AgentFactory::new();
        let mut rng = RngManager::new(5);

        let outcome = run_replenishment(0, &profiles, &samples, &mut factory, &mut rng);
        assert!(outcome.hires.is_empty());
        assert_eq!(factory.next_id(), 0);
    }
}
