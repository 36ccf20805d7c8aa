use super::moves::{payoff, Move};
use super::seat::Seat;

/// Moves played so far by both seats of a match, in round order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchHistory {
    moves: [Vec<Move>; 2],
}

impl MatchHistory {
    pub fn with_capacity(rounds: usize) -> Self {
        MatchHistory {
            moves: [Vec::with_capacity(rounds), Vec::with_capacity(rounds)],
        }
    }

    /// Number of completed rounds.
    pub fn rounds_played(&self) -> usize {
        self.moves[0].len()
    }

    /// Record one simultaneous round.
    pub fn push(&mut self, first: Move, second: Move) {
        self.moves[0].push(first);
        self.moves[1].push(second);
    }

    pub fn moves(&self, seat: Seat) -> &[Move] {
        &self.moves[seat.index()]
    }

    /// The move `seat` played `back` rounds ago (1 = previous round).
    pub fn recent(&self, seat: Seat, back: usize) -> Option<Move> {
        if back == 0 {
            return None;
        }
        let moves = self.moves(seat);
        moves.len().checked_sub(back).map(|i| moves[i])
    }

    /// Total points scored by `seat` over every recorded round.
    pub fn score(&self, seat: Seat) -> u64 {
        self.moves(seat)
            .iter()
            .zip(self.moves(seat.other()))
            .map(|(&own, &other)| payoff(own, other))
            .sum()
    }

    /// Number of defections by `seat`.
    pub fn defections(&self, seat: Seat) -> u64 {
        self.moves(seat).iter().filter(|m| m.is_defect()).count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_moves() {
        let mut h = MatchHistory::default();
        assert_eq!(h.recent(Seat::First, 1), None);
        h.push(Move::Cooperate, Move::Defect);
        h.push(Move::Defect, Move::Defect);
        assert_eq!(h.rounds_played(), 2);
        assert_eq!(h.recent(Seat::First, 1), Some(Move::Defect));
        assert_eq!(h.recent(Seat::First, 2), Some(Move::Cooperate));
        assert_eq!(h.recent(Seat::First, 3), None);
        assert_eq!(h.recent(Seat::Second, 2), Some(Move::Defect));
    }

    #[test]
    fn test_scores_follow_payoff_table() {
        let mut h = MatchHistory::default();
        h.push(Move::Cooperate, Move::Cooperate); // 3 / 3
        h.push(Move::Defect, Move::Cooperate); // 5 / 0
        h.push(Move::Defect, Move::Defect); // 1 / 1
        assert_eq!(h.score(Seat::First), 9);
        assert_eq!(h.score(Seat::Second), 4);
        assert_eq!(h.defections(Seat::First), 2);
        assert_eq!(h.defections(Seat::Second), 1);
    }
}
