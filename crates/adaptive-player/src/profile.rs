//! Opponent profiling
//!
//! Profiles are derived from the history tables on every call and never
//! stored.

use serde::{Deserialize, Serialize};
use crate::history::{HistoryTable, OpponentId};
use crate::moves::{payoff, Move};
use crate::policy::{NEUTRAL_COOPERATION_RATE, NEUTRAL_EXPECTED_VALUE, ROUND_CAP};

/// What the engine believes about one opponent
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentProfile {
    pub opponent: OpponentId,
    /// Rounds played so far
    pub rounds: usize,
    /// Fraction of the opponent's moves that were cooperative
    pub cooperation_rate: f64,
    /// Mean payoff per round earned against this opponent
    pub expected_value: f64,
}

/// Fraction of `theirs` that cooperated; neutral when empty
pub fn cooperation_rate(theirs: &[Move]) -> f64 {
    if theirs.is_empty() {
        return NEUTRAL_COOPERATION_RATE;
    }
    let cooperations = theirs.iter().filter(|m| m.is_cooperate()).count();
    cooperations as f64 / theirs.len() as f64
}

/// Mean payoff the caller earned over the paired rounds; neutral when unplayed
pub fn expected_value(own: &[Move], theirs: &[Move]) -> f64 {
    if own.is_empty() || theirs.is_empty() {
        return NEUTRAL_EXPECTED_VALUE;
    }
    let total: u32 = own
        .iter()
        .zip(theirs)
        .map(|(&mine, &other)| payoff(mine, other).0 as u32)
        .sum();
    total as f64 / own.len() as f64
}

/// Profile a single opponent from its paired histories
pub fn profile_opponent(opponent: OpponentId, own: &[Move], theirs: &[Move]) -> OpponentProfile {
    OpponentProfile {
        opponent,
        rounds: own.len(),
        cooperation_rate: cooperation_rate(theirs),
        expected_value: expected_value(own, theirs),
    }
}

/// Profile every opponent still below the round cap, in `own` table order
///
/// Assumes the tables have passed [`crate::history::check_aligned`].
pub fn profile_opponents(own: &HistoryTable, theirs: &HistoryTable) -> Vec<OpponentProfile> {
    own.iter()
        .filter(|(_, moves)| moves.len() < ROUND_CAP)
        .map(|(id, moves)| {
            let profile = profile_opponent(id, moves, theirs.get(id).unwrap_or(&[]));
            log::trace!(
                "profile {}: rounds={} coop={:.3} ev={:.3}",
                id,
                profile.rounds,
                profile.cooperation_rate,
                profile.expected_value
            );
            profile
        })
        .collect()
}
