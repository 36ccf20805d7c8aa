use crate::algebra::Vector;
use crate::game::{MatchHistory, Seat};

/// Length of the feature vector fed to every strategy network.
pub const FEATURE_COUNT: usize = 8;

/// How many past rounds of each seat are visible to a strategy.
pub const HISTORY_DEPTH: usize = 3;

/// Value used for history slots that precede the first round.
pub const MISSING_MOVE: f64 = 1.0;

/// Encode the match state as seen from `seat`, before the next round.
///
/// ```text
/// [own(-1), own(-2), own(-3), opp(-1), opp(-2), opp(-3), round / rounds, noise]
/// ```
///
/// Moves are 0.0 (cooperate) or 1.0 (defect); slots before the first round
/// hold [`MISSING_MOVE`].
pub fn encode_features(history: &MatchHistory, seat: Seat, rounds: usize, noise: f64) -> Vector {
    let mut data = [0.0f64; FEATURE_COUNT];
    for back in 1..=HISTORY_DEPTH {
        data[back - 1] = slot(history, seat, back);
        data[HISTORY_DEPTH + back - 1] = slot(history, seat.other(), back);
    }
    data[2 * HISTORY_DEPTH] = history.rounds_played() as f64 / rounds as f64;
    data[2 * HISTORY_DEPTH + 1] = noise;
    Vector::from(data.to_vec())
}

fn slot(history: &MatchHistory, seat: Seat, back: usize) -> f64 {
    history
        .recent(seat, back)
        .map_or(MISSING_MOVE, |m| m.as_feature())
}
