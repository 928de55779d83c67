//! Moves and the payoff matrix

use serde::{Deserialize, Serialize};
use crate::error::InvalidInput;

/// A move in the Prisoner's Dilemma
///
/// On the wire a move is a single integer: `0` defects, `1` cooperates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Move {
    Defect = 0,
    Cooperate = 1,
}

impl Move {
    pub fn is_cooperate(self) -> bool {
        self == Move::Cooperate
    }
}

impl TryFrom<u8> for Move {
    type Error = InvalidInput;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Move::Defect),
            1 => Ok(Move::Cooperate),
            other => Err(InvalidInput::InvalidMove(other)),
        }
    }
}

impl From<Move> for u8 {
    fn from(mv: Move) -> Self {
        mv as u8
    }
}

/// Payoff matrix for the Prisoner's Dilemma
/// Returns (score_a, score_b)
pub fn payoff(a: Move, b: Move) -> (u8, u8) {
    match (a, b) {
        (Move::Cooperate, Move::Cooperate) => (3, 3),
        (Move::Cooperate, Move::Defect) => (0, 5),
        (Move::Defect, Move::Cooperate) => (5, 0),
        (Move::Defect, Move::Defect) => (1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_matrix() {
        assert_eq!(payoff(Move::Cooperate, Move::Cooperate), (3, 3));
        assert_eq!(payoff(Move::Cooperate, Move::Defect), (0, 5));
        assert_eq!(payoff(Move::Defect, Move::Cooperate), (5, 0));
        assert_eq!(payoff(Move::Defect, Move::Defect), (1, 1));
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(u8::from(Move::Defect), 0);
        assert_eq!(u8::from(Move::Cooperate), 1);
        assert_eq!(Move::try_from(0), Ok(Move::Defect));
        assert_eq!(Move::try_from(1), Ok(Move::Cooperate));
        assert_eq!(Move::try_from(2), Err(InvalidInput::InvalidMove(2)));
    }

    #[test]
    fn test_serde_as_integer() {
        let json = serde_json::to_string(&[Move::Cooperate, Move::Defect]).unwrap();
        assert_eq!(json, "[1,0]");

        let parsed: Vec<Move> = serde_json::from_str("[0,1,1]").unwrap();
        assert_eq!(parsed, vec![Move::Defect, Move::Cooperate, Move::Cooperate]);

        assert!(serde_json::from_str::<Move>("3").is_err());
    }
}
