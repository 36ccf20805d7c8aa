use rand::Rng;

use crate::ai::networks::Network;
use crate::algebra::{Matrix, Vector};
use crate::error::NetworkError;
use crate::game::Move;

/// Mutation hyperparameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Chance that a single `mutate` call alters the network at all.
    pub probability: f64,
    /// Perturbation entries are drawn uniformly from `[-magnitude, magnitude)`.
    pub magnitude: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        MutationConfig {
            probability: 0.1,
            magnitude: 0.05,
        }
    }
}

/// The single parameter tensor touched by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    Weights(usize),
    Biases(usize),
}

/// One evolving strategy: a network plus its game bookkeeping.
///
/// Score and move counters belong to the current generation only; offspring
/// start from zero.
#[derive(Debug, Clone)]
pub struct Agent {
    network: Network,
    score: u64,
    total_moves: u64,
    defections: u64,
}

impl Agent {
    /// Create an agent with a zero-initialised network.
    pub fn new(layer_sizes: &[usize]) -> Result<Self, NetworkError> {
        Ok(Self::with_network(Network::new(layer_sizes)?))
    }

    /// Create a fresh agent around an existing network.
    pub fn with_network(network: Network) -> Self {
        Agent {
            network,
            score: 0,
            total_moves: 0,
            defections: 0,
        }
    }

    /// A fresh agent carrying a deep copy of this agent's network.
    pub fn offspring(&self) -> Agent {
        Agent::with_network(self.network.clone())
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    pub fn total_moves(&self) -> u64 {
        self.total_moves
    }

    pub fn defections(&self) -> u64 {
        self.defections
    }

    /// Percentage of recorded moves that were defections, 0 before any move.
    pub fn defection_rate(&self) -> f64 {
        if self.total_moves == 0 {
            return 0.0;
        }
        self.defections as f64 / self.total_moves as f64 * 100.0
    }

    /// Sample a move without touching the counters.
    ///
    /// The network output goes through softmax; the agent cooperates when a
    /// uniform draw in `[0, 1)` falls below the first probability. A NaN
    /// probability therefore always yields `Defect`.
    pub fn choose<R: Rng + ?Sized>(&self, features: &Vector, rng: &mut R) -> Result<Move, NetworkError> {
        let probabilities = self.network.forward(features)?.softmax();
        let cooperate = probabilities.components()[0];
        if rng.random::<f64>() < cooperate {
            Ok(Move::Cooperate)
        } else {
            Ok(Move::Defect)
        }
    }

    pub fn record_move(&mut self, m: Move) {
        self.total_moves += 1;
        if m.is_defect() {
            self.defections += 1;
        }
    }

    /// Sample a move and record it.
    pub fn decide<R: Rng + ?Sized>(&mut self, features: &Vector, rng: &mut R) -> Result<Move, NetworkError> {
        let m = self.choose(features, rng)?;
        self.record_move(m);
        Ok(m)
    }

    /// With `config.probability`, add uniform noise to exactly one weight
    /// matrix or one bias vector (50/50 between the two lists, then a uniform
    /// index). Returns the tensor that changed, if any.
    pub fn mutate<R: Rng + ?Sized>(
        &mut self,
        config: &MutationConfig,
        rng: &mut R,
    ) -> Result<Option<MutationTarget>, NetworkError> {
        if rng.random::<f64>() >= config.probability {
            return Ok(None);
        }

        let alter_weights = rng.random_bool(0.5);
        let index = rng.random_range(0..self.network.transition_count());

        let span = 2.0 * config.magnitude;
        let mut noise = || rng.random::<f64>() * span - config.magnitude;
        let target = if alter_weights {
            let shape = &self.network.weights()[index];
            let delta = Matrix::from_fn(shape.rows(), shape.columns(), |_, _| noise());
            self.network.perturb_weights(index, &delta)?;
            MutationTarget::Weights(index)
        } else {
            let delta = Vector::from_fn(self.network.biases()[index].len(), |_| noise());
            self.network.perturb_biases(index, &delta)?;
            MutationTarget::Biases(index)
        };

        log::trace!("mutated {target:?}");
        Ok(Some(target))
    }
}
