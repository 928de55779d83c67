//! Input validation errors
//!
//! Every failure is a caller-side contract violation; nothing here is retried.

use thiserror::Error;
use crate::history::OpponentId;

/// Malformed history input
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// The current opponent is missing from one of the history tables.
    #[error("opponent {0} is not present in both history tables")]
    UnknownOpponent(OpponentId),

    /// The two tables are not keyed over the same opponents.
    #[error("history tables disagree on opponents (missing from own: {missing_in_own:?}, missing from theirs: {missing_in_theirs:?})")]
    KeySetMismatch {
        missing_in_own: Vec<OpponentId>,
        missing_in_theirs: Vec<OpponentId>,
    },

    /// Both sides must have recorded one move per completed round.
    #[error("history length mismatch for opponent {opponent}: own={own}, theirs={theirs}")]
    LengthMismatch {
        opponent: OpponentId,
        own: usize,
        theirs: usize,
    },

    #[error("opponent {0} appears more than once in a history table")]
    DuplicateOpponent(OpponentId),

    #[error("invalid move value {0} (expected 0 = defect or 1 = cooperate)")]
    InvalidMove(u8),
}
