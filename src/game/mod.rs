//! Iterated prisoner's dilemma rules: moves, the fixed payoff table, and the
//! per-match move history.

mod history;
mod moves;
mod seat;

pub use history::MatchHistory;
pub use moves::{payoff, Move, PUNISHMENT, REWARD, SUCKER, TEMPTATION};
pub use seat::Seat;
