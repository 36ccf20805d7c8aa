use rand::rngs::StdRng;

use crate::ai::{Agent, MutationConfig, FEATURE_COUNT};
use crate::error::EvolutionError;

use super::report::{GenerationReport, GenerationSummary, LeaderboardEntry};
use super::selection::{repopulate, select_survivors};
use super::tournament::{Tournament, TournamentConfig};

/// Population shape.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub size: usize,
    /// Agents kept by truncation selection each generation.
    pub survivors: usize,
    /// Network layer widths; the first must match the feature vector length.
    pub layer_sizes: Vec<usize>,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        PopulationConfig {
            size: 100,
            survivors: 50,
            layer_sizes: vec![FEATURE_COUNT, 6, 6, 6, 2],
        }
    }
}

/// A generation-by-generation evolving set of agents.
///
/// The caller decides how many generations to play; each call to
/// [`Population::play_generation`] runs the tournament, truncates to the
/// survivors, refills the population with their offspring and mutates every
/// offspring.
pub struct Population {
    agents: Vec<Agent>,
    survivors: usize,
    tournament: Tournament,
    mutation: MutationConfig,
    rng: StdRng,
    generation: usize,
}

impl Population {
    /// `size` zero-initialised agents, keeping half each generation, with
    /// default tournament and mutation settings.
    pub fn initialize(size: usize, layer_sizes: &[usize], rng: StdRng) -> Result<Self, EvolutionError> {
        let config = PopulationConfig {
            size,
            survivors: size / 2,
            layer_sizes: layer_sizes.to_vec(),
        };
        Self::from_config(
            &config,
            &TournamentConfig::default(),
            &MutationConfig::default(),
            rng,
        )
    }

    pub fn from_config(
        config: &PopulationConfig,
        tournament: &TournamentConfig,
        mutation: &MutationConfig,
        rng: StdRng,
    ) -> Result<Self, EvolutionError> {
        let agents = (0..config.size)
            .map(|_| Agent::new(&config.layer_sizes))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_agents(agents, config.survivors, tournament, mutation, rng)
    }

    /// Build a population around existing agents.
    pub fn from_agents(
        agents: Vec<Agent>,
        survivors: usize,
        tournament: &TournamentConfig,
        mutation: &MutationConfig,
        rng: StdRng,
    ) -> Result<Self, EvolutionError> {
        let size = agents.len();
        if size == 0 {
            return Err(EvolutionError::InvalidPopulation("population is empty".into()));
        }
        if survivors == 0 || survivors > size || size % survivors != 0 {
            return Err(EvolutionError::InvalidPopulation(format!(
                "{survivors} survivors cannot refill a population of {size}"
            )));
        }
        if let Some(agent) = agents
            .iter()
            .find(|a| a.network().input_size() != FEATURE_COUNT)
        {
            return Err(EvolutionError::InvalidPopulation(format!(
                "network input width {} does not match {} features",
                agent.network().input_size(),
                FEATURE_COUNT
            )));
        }

        Ok(Population {
            agents,
            survivors,
            tournament: Tournament::new(tournament.clone())?,
            mutation: mutation.clone(),
            rng,
            generation: 0,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn size(&self) -> usize {
        self.agents.len()
    }

    pub fn survivors(&self) -> usize {
        self.survivors
    }

    /// Number of generations played so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Play one full generation and report the survivors' leaderboard.
    ///
    /// On error the population is left as it was before selection.
    pub fn play_generation(&mut self) -> Result<GenerationReport, EvolutionError> {
        self.tournament.play(&mut self.agents, &mut self.rng)?;
        let summary = GenerationSummary::from_agents(&self.agents);

        let survivors = select_survivors(&self.agents, self.survivors);
        let leaderboard: Vec<LeaderboardEntry> = survivors
            .iter()
            .enumerate()
            .map(|(i, agent)| LeaderboardEntry {
                rank: i + 1,
                score: agent.score(),
                defection_rate: agent.defection_rate(),
            })
            .collect();
        let mut next = repopulate(&survivors, self.agents.len())?;

        for agent in &mut next {
            agent.mutate(&self.mutation, &mut self.rng)?;
        }

        self.agents = next;
        self.generation += 1;
        log::debug!(
            "generation {}: best {} | mean {:.1} | defection {:.2}%",
            self.generation,
            summary.best_score,
            summary.mean_score,
            summary.mean_defection_rate
        );

        Ok(GenerationReport {
            generation: self.generation,
            leaderboard,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Network;
    use crate::algebra::Vector;
    use rand::SeedableRng;

    const LAYERS: [usize; 5] = [8, 6, 6, 6, 2];

    fn biased_agent(cooperate: f64, defect: f64) -> Agent {
        let mut network = Network::new(&LAYERS).unwrap();
        network
            .perturb_biases(3, &Vector::from(vec![cooperate, defect]))
            .unwrap();
        Agent::with_network(network)
    }

    fn no_mutation() -> MutationConfig {
        MutationConfig {
            probability: 0.0,
            magnitude: 0.05,
        }
    }

    #[test]
    fn test_initialize_builds_zeroed_population() {
        let pop = Population::initialize(100, &LAYERS, StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(pop.size(), 100);
        assert_eq!(pop.survivors(), 50);
        assert_eq!(pop.generation(), 0);
        let zero = Network::new(&LAYERS).unwrap();
        assert!(pop.agents().iter().all(|a| a.network() == &zero && a.score() == 0));
    }

    #[test]
    fn test_invalid_populations_are_rejected() {
        let rng = || StdRng::seed_from_u64(0);
        assert!(Population::initialize(0, &LAYERS, rng()).is_err());
        assert!(Population::initialize(1, &LAYERS, rng()).is_err());
        assert!(Population::initialize(4, &[7, 2], rng()).is_err());
        assert!(Population::initialize(4, &[8], rng()).is_err());

        let agents: Vec<Agent> = (0..6).map(|_| Agent::new(&LAYERS).unwrap()).collect();
        let tournament = TournamentConfig::default();
        assert!(Population::from_agents(agents.clone(), 4, &tournament, &no_mutation(), rng()).is_err());
        assert!(Population::from_agents(agents.clone(), 7, &tournament, &no_mutation(), rng()).is_err());
        assert!(Population::from_agents(agents, 3, &tournament, &no_mutation(), rng()).is_ok());
    }

    #[test]
    fn test_generation_keeps_top_agents_twice() {
        // Hawks always defect, doves always cooperate. Each hawk scores
        // 100 + 2 * 500 and each dove 300 + 0, so both hawks survive.
        let first_hawk = biased_agent(0.0, 50.0);
        let second_hawk = biased_agent(0.0, 60.0);
        let agents = vec![
            biased_agent(50.0, 0.0),
            first_hawk.clone(),
            biased_agent(55.0, 0.0),
            second_hawk.clone(),
        ];
        let mut pop = Population::from_agents(
            agents,
            2,
            &TournamentConfig::default(),
            &no_mutation(),
            StdRng::seed_from_u64(42),
        )
        .unwrap();

        let report = pop.play_generation().unwrap();
        assert_eq!(report.generation, 1);
        assert_eq!(report.leaderboard.len(), 2);
        assert_eq!(report.leaderboard[0].rank, 1);
        assert_eq!(report.leaderboard[0].score, 1100);
        assert_eq!(report.leaderboard[1].score, 1100);
        assert_eq!(report.leaderboard[1].defection_rate, 100.0);
        assert_eq!(report.summary.best_score, 1100);
        assert!((report.summary.mean_score - 700.0).abs() < 1e-9);

        let networks: Vec<&Network> = pop.agents().iter().map(Agent::network).collect();
        assert_eq!(
            networks,
            vec![
                first_hawk.network(),
                second_hawk.network(),
                first_hawk.network(),
                second_hawk.network(),
            ]
        );
        assert!(pop.agents().iter().all(|a| a.score() == 0 && a.total_moves() == 0));
    }

    #[test]
    fn test_every_offspring_is_mutated() {
        let always = MutationConfig {
            probability: 1.0,
            magnitude: 0.05,
        };
        let mut pop = Population::from_config(
            &PopulationConfig {
                size: 6,
                survivors: 3,
                layer_sizes: LAYERS.to_vec(),
            },
            &TournamentConfig {
                rounds: 10,
                threads: 1,
            },
            &always,
            StdRng::seed_from_u64(8),
        )
        .unwrap();

        pop.play_generation().unwrap();
        let zero = Network::new(&LAYERS).unwrap();
        assert!(pop.agents().iter().all(|a| a.network() != &zero));
    }

    #[test]
    fn test_size_is_stable_across_generations() {
        let mut pop = Population::from_config(
            &PopulationConfig {
                size: 10,
                survivors: 5,
                layer_sizes: LAYERS.to_vec(),
            },
            &TournamentConfig {
                rounds: 20,
                threads: 1,
            },
            &MutationConfig::default(),
            StdRng::seed_from_u64(3),
        )
        .unwrap();

        for expected in 1..=3 {
            let report = pop.play_generation().unwrap();
            assert_eq!(report.generation, expected);
            assert_eq!(report.leaderboard.len(), 5);
            assert!(report
                .leaderboard
                .windows(2)
                .all(|w| w[0].score >= w[1].score));
            assert_eq!(pop.size(), 10);
        }
    }

    #[test]
    fn test_same_seed_same_evolution() {
        let run = |threads: usize| {
            let mut pop = Population::from_config(
                &PopulationConfig {
                    size: 6,
                    survivors: 3,
                    layer_sizes: LAYERS.to_vec(),
                },
                &TournamentConfig { rounds: 15, threads },
                &MutationConfig {
                    probability: 0.5,
                    magnitude: 0.05,
                },
                StdRng::seed_from_u64(1234),
            )
            .unwrap();
            let reports: Vec<GenerationReport> =
                (0..3).map(|_| pop.play_generation().unwrap()).collect();
            let networks: Vec<Network> = pop.agents().iter().map(|a| a.network().clone()).collect();
            (reports, networks)
        };

        assert_eq!(run(1), run(1));
        assert_eq!(run(1), run(2));
    }
}
