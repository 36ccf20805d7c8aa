use std::cmp::Reverse;

use crate::ai::Agent;
use crate::error::EvolutionError;

/// Agents ordered by descending score; equal scores keep population order.
pub fn rank(agents: &[Agent]) -> Vec<&Agent> {
    let mut ranked: Vec<&Agent> = agents.iter().collect();
    ranked.sort_by_key(|a| Reverse(a.score()));
    ranked
}

/// Truncation selection: the `count` highest-scoring agents, best first.
pub fn select_survivors(agents: &[Agent], count: usize) -> Vec<&Agent> {
    let mut ranked = rank(agents);
    ranked.truncate(count);
    ranked
}

/// Build a population of `size` fresh agents from `survivors`.
///
/// The survivor list is walked `size / survivors.len()` times in rank order;
/// every entry becomes a new agent carrying a deep copy of the survivor's
/// network with zeroed score and counters.
pub fn repopulate(survivors: &[&Agent], size: usize) -> Result<Vec<Agent>, EvolutionError> {
    if survivors.is_empty() {
        return Err(EvolutionError::InvalidPopulation(
            "cannot repopulate from zero survivors".into(),
        ));
    }
    if size % survivors.len() != 0 {
        return Err(EvolutionError::InvalidPopulation(format!(
            "population size {} is not a multiple of {} survivors",
            size,
            survivors.len()
        )));
    }

    let copies = size / survivors.len();
    Ok((0..copies)
        .flat_map(|_| survivors.iter().map(|parent| parent.offspring()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Network;
    use crate::algebra::Vector;
    use crate::game::Move;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn agent_with(score: u64, marker: f64) -> Agent {
        let mut network = Network::new(&[8, 4, 2]).unwrap();
        network
            .perturb_biases(0, &Vector::from_fn(4, |_| marker))
            .unwrap();
        let mut agent = Agent::with_network(network);
        agent.add_score(score);
        agent.record_move(Move::Defect);
        agent
    }

    #[test]
    fn test_rank_is_descending_and_stable() {
        let agents = vec![
            agent_with(10, 0.0),
            agent_with(30, 1.0),
            agent_with(10, 2.0),
            agent_with(30, 3.0),
        ];
        let ranked: Vec<u64> = rank(&agents).iter().map(|a| a.score()).collect();
        assert_eq!(ranked, vec![30, 30, 10, 10]);

        let ranked = rank(&agents);
        assert_eq!(ranked[0].network(), agents[1].network());
        assert_eq!(ranked[1].network(), agents[3].network());
        assert_eq!(ranked[2].network(), agents[0].network());
    }

    #[test]
    fn test_select_and_repopulate_top_two_of_four() {
        let agents = vec![
            agent_with(20, 0.2),
            agent_with(40, 0.4),
            agent_with(10, 0.1),
            agent_with(30, 0.3),
        ];
        let survivors = select_survivors(&agents, 2);
        assert_eq!(survivors.len(), 2);
        assert_eq!(survivors[0].score(), 40);
        assert_eq!(survivors[1].score(), 30);

        let next = repopulate(&survivors, 4).unwrap();
        assert_eq!(next.len(), 4);
        for (i, child) in next.iter().enumerate() {
            assert_eq!(child.network(), survivors[i % 2].network());
            assert_eq!(child.score(), 0);
            assert_eq!(child.total_moves(), 0);
        }
        let best = next
            .iter()
            .filter(|a| a.network() == agents[1].network())
            .count();
        let second = next
            .iter()
            .filter(|a| a.network() == agents[3].network())
            .count();
        assert_eq!((best, second), (2, 2));
    }

    #[test]
    fn test_repopulate_rejects_uneven_split() {
        let agents = vec![agent_with(1, 0.0), agent_with(2, 0.0), agent_with(3, 0.0)];
        let survivors = select_survivors(&agents, 3);
        assert!(repopulate(&survivors, 4).is_err());
        assert!(repopulate(&[], 4).is_err());
        assert_eq!(repopulate(&survivors, 6).unwrap().len(), 6);
    }

    #[test]
    fn test_offspring_do_not_alias_parents() {
        let agents = vec![agent_with(5, 0.5)];
        let survivors = select_survivors(&agents, 1);
        let mut next = repopulate(&survivors, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let config = crate::ai::MutationConfig {
            probability: 1.0,
            magnitude: 0.05,
        };
        next[0].mutate(&config, &mut rng).unwrap();
        assert_ne!(next[0].network(), agents[0].network());
        assert_eq!(next[1].network(), agents[0].network());
    }
}
