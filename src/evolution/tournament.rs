use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::ai::{encode_features, Agent};
use crate::error::{EvolutionError, NetworkError};
use crate::game::{MatchHistory, Seat};

/// Tournament settings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Rounds per match.
    pub rounds: usize,
    /// Worker threads for the match phase; 1 plays every match inline.
    pub threads: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            rounds: 100,
            threads: 1,
        }
    }
}

/// Outcome of one match: the full move history of both seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    history: MatchHistory,
}

impl MatchRecord {
    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn score(&self, seat: Seat) -> u64 {
        self.history.score(seat)
    }

    /// Credit moves and points to the agents that played the two seats.
    pub fn apply(&self, first: &mut Agent, second: &mut Agent) {
        for (seat, agent) in [(Seat::First, first), (Seat::Second, second)] {
            for &m in self.history.moves(seat) {
                agent.record_move(m);
            }
            agent.add_score(self.history.score(seat));
        }
    }
}

/// Play a match of `rounds` simultaneous rounds between two agents.
///
/// Each round both agents see the history before the round (roles swapped)
/// plus their own fresh noise draw. Agents are not modified; use
/// [`MatchRecord::apply`] to credit the result.
pub fn play_match<R: Rng + ?Sized>(
    first: &Agent,
    second: &Agent,
    rounds: usize,
    rng: &mut R,
) -> Result<MatchRecord, NetworkError> {
    let mut history = MatchHistory::with_capacity(rounds);
    for _ in 0..rounds {
        let features = encode_features(&history, Seat::First, rounds, rng.random());
        let first_move = first.choose(&features, rng)?;
        let features = encode_features(&history, Seat::Second, rounds, rng.random());
        let second_move = second.choose(&features, rng)?;
        history.push(first_move, second_move);
    }
    Ok(MatchRecord { history })
}

/// One scheduled match of the round robin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pairing {
    first: usize,
    second: usize,
    seed: u64,
}

/// Every unordered pair `(i, j)` with `i < j`, each with its own match seed.
fn schedule<R: Rng + ?Sized>(population: usize, rng: &mut R) -> Vec<Pairing> {
    let mut pairings = Vec::with_capacity(population * population.saturating_sub(1) / 2);
    for first in 0..population {
        for second in first + 1..population {
            pairings.push(Pairing {
                first,
                second,
                seed: rng.random(),
            });
        }
    }
    pairings
}

/// Round-robin tournament runner.
///
/// Matches are pure functions of the two agents and a per-match seed drawn
/// from the caller's RNG, so results do not depend on the thread count.
pub struct Tournament {
    config: TournamentConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Result<Self, EvolutionError> {
        let pool = if config.threads > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.threads)
                    .build()?,
            )
        } else {
            None
        };
        Ok(Tournament { config, pool })
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Play every pair of distinct agents once and accumulate scores and
    /// move counters into the agents.
    pub fn play<R: Rng + ?Sized>(&self, agents: &mut [Agent], rng: &mut R) -> Result<(), EvolutionError> {
        let pairings = schedule(agents.len(), rng);
        let rounds = self.config.rounds;

        let records = {
            let view: &[Agent] = agents;
            let run = |p: &Pairing| {
                let mut match_rng = StdRng::seed_from_u64(p.seed);
                play_match(&view[p.first], &view[p.second], rounds, &mut match_rng)
            };
            match &self.pool {
                Some(pool) => pool.install(|| {
                    pairings
                        .par_iter()
                        .map(run)
                        .collect::<Result<Vec<_>, NetworkError>>()
                })?,
                None => pairings.iter().map(run).collect::<Result<Vec<_>, NetworkError>>()?,
            }
        };

        for (p, record) in pairings.iter().zip(&records) {
            let (head, tail) = agents.split_at_mut(p.second);
            record.apply(&mut head[p.first], &mut tail[0]);
        }

        log::trace!("played {} matches of {} rounds", pairings.len(), rounds);
        Ok(())
    }
}
