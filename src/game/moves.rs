/// Points for mutual cooperation.
pub const REWARD: u64 = 3;
/// Points for defecting against a cooperator.
pub const TEMPTATION: u64 = 5;
/// Points for mutual defection.
pub const PUNISHMENT: u64 = 1;
/// Points for cooperating against a defector.
pub const SUCKER: u64 = 0;

/// One decision in a round of the dilemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// Decision code: 0 = cooperate, 1 = defect.
    pub fn code(self) -> u8 {
        match self {
            Move::Cooperate => 0,
            Move::Defect => 1,
        }
    }

    /// Value of this move inside a feature vector.
    pub fn as_feature(self) -> f64 {
        f64::from(self.code())
    }

    pub fn is_defect(self) -> bool {
        self == Move::Defect
    }
}

/// Points earned by a player choosing `own` against an opponent choosing `other`.
pub fn payoff(own: Move, other: Move) -> u64 {
    match (own, other) {
        (Move::Cooperate, Move::Cooperate) => REWARD,
        (Move::Defect, Move::Defect) => PUNISHMENT,
        (Move::Defect, Move::Cooperate) => TEMPTATION,
        (Move::Cooperate, Move::Defect) => SUCKER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_table() {
        assert_eq!(payoff(Move::Cooperate, Move::Cooperate), 3);
        assert_eq!(payoff(Move::Defect, Move::Defect), 1);
        assert_eq!(payoff(Move::Defect, Move::Cooperate), 5);
        assert_eq!(payoff(Move::Cooperate, Move::Defect), 0);
    }

    #[test]
    fn test_move_codes() {
        assert_eq!(Move::Cooperate.code(), 0);
        assert_eq!(Move::Defect.code(), 1);
        assert_eq!(Move::Defect.as_feature(), 1.0);
        assert!(!Move::Cooperate.is_defect());
    }
}
