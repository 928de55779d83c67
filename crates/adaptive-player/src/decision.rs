//! Per-round decision: which move to play and whom to face next
//!
//! [`decide`] is pure. It borrows both history tables, validates them,
//! profiles every opponent still below the round cap and applies the fixed
//! policy in [`crate::policy`]. Identical inputs always give identical output.

use serde::{Deserialize, Serialize};
use crate::error::InvalidInput;
use crate::history::{check_aligned, HistoryTable, OpponentId};
use crate::moves::Move;
use crate::policy::{
    EXPLOIT_PERIOD, EXPLOIT_THRESHOLD, MIRROR_THRESHOLD, PROBE_PERIOD, ROUND_CAP,
    STAY_EXPECTED_VALUE, TRUST_WINDOW,
};
use crate::profile::{cooperation_rate, profile_opponents, OpponentProfile};

/// Which policy rule produced the move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveReason {
    /// No rounds played yet.
    FirstContact,
    /// Still inside the unconditional cooperation window.
    TrustWindow,
    /// Periodic defection against a highly cooperative opponent.
    Exploit,
    /// Cooperation with a highly cooperative opponent between exploits.
    Reward,
    /// Tit-for-tat against a moderately cooperative opponent.
    Mirror,
    /// Periodic cooperation to test a mostly defecting opponent.
    Probe,
    /// Defection against a mostly defecting opponent.
    Punish,
}

/// Which pairing rule produced the next opponent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairingReason {
    /// Every opponent has reached the round cap.
    Exhausted,
    /// Nothing has been played yet; pick the first fresh opponent.
    ExploreStranger,
    /// The current opponent pays well enough to keep.
    StayProfitable,
    /// Highest expected value among uncapped opponents.
    BestExpectedValue,
    /// No rule produced a candidate; keep the current opponent.
    Fallback,
    /// The selection had reached the cap and was swapped for another.
    CapCorrected,
}

/// Outcome of one call to [`decide`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(rename = "move")]
    pub mv: Move,
    pub next_opponent: OpponentId,
    pub move_reason: MoveReason,
    pub pairing_reason: PairingReason,
}

impl From<Decision> for (Move, OpponentId) {
    fn from(decision: Decision) -> Self {
        (decision.mv, decision.next_opponent)
    }
}

/// Choose the move against `current` and the opponent for the next round
///
/// # Arguments
/// * `current` - Opponent currently paired with the caller
/// * `own` - Caller's moves against each known opponent
/// * `theirs` - Each opponent's moves against the caller, keyed like `own`
///
/// # Errors
/// [`InvalidInput`] if `current` is missing from either table, the tables
/// disagree on their opponents, or any pair of histories differ in length.
///
/// Ties are broken by the iteration order of `own`.
pub fn decide(
    current: OpponentId,
    own: &HistoryTable,
    theirs: &HistoryTable,
) -> Result<Decision, InvalidInput> {
    check_aligned(current, own, theirs)?;

    let profiles = profile_opponents(own, theirs);

    let own_current = own.get(current).unwrap_or(&[]);
    let their_current = theirs.get(current).unwrap_or(&[]);
    let (mv, move_reason) = choose_move(own_current, their_current);

    let (next_opponent, pairing_reason) = choose_next_opponent(current, own, &profiles);

    let decision = Decision { mv, next_opponent, move_reason, pairing_reason };
    log::debug!(
        "vs {} after {} rounds: {:?} ({:?}), next {} ({:?})",
        current,
        own_current.len(),
        mv,
        move_reason,
        next_opponent,
        pairing_reason
    );
    Ok(decision)
}

/// Move against one opponent given both sides' moves so far
///
/// Rules are tried in order: first contact, trust window, exploit band,
/// mirror band, probe band.
pub fn choose_move(own: &[Move], theirs: &[Move]) -> (Move, MoveReason) {
    let Some(&last) = theirs.last() else {
        return (Move::Cooperate, MoveReason::FirstContact);
    };

    if theirs.len() < TRUST_WINDOW {
        return (Move::Cooperate, MoveReason::TrustWindow);
    }

    let rate = cooperation_rate(theirs);
    let own_count = own.len();

    if rate > EXPLOIT_THRESHOLD {
        if own_count > 0 && own_count % EXPLOIT_PERIOD == 0 {
            (Move::Defect, MoveReason::Exploit)
        } else {
            (Move::Cooperate, MoveReason::Reward)
        }
    } else if rate > MIRROR_THRESHOLD {
        (last, MoveReason::Mirror)
    } else if own_count % PROBE_PERIOD == 0 {
        (Move::Cooperate, MoveReason::Probe)
    } else {
        (Move::Defect, MoveReason::Punish)
    }
}

/// Opponent to pair with next
///
/// `profiles` must come from [`profile_opponents`] over the same `own` table.
pub fn choose_next_opponent(
    current: OpponentId,
    own: &HistoryTable,
    profiles: &[OpponentProfile],
) -> (OpponentId, PairingReason) {
    let available: Vec<OpponentId> = own
        .iter()
        .filter(|(_, moves)| moves.len() < ROUND_CAP)
        .map(|(id, _)| id)
        .collect();

    if available.is_empty() {
        log::warn!(
            "all {} opponents reached the round cap; continuing with {}",
            own.len(),
            current
        );
        return (current, PairingReason::Exhausted);
    }

    let selection = if own.is_fresh() {
        available
            .iter()
            .copied()
            .find(|&id| own.rounds(id) == 0)
            .map_or((current, PairingReason::Fallback), |id| {
                (id, PairingReason::ExploreStranger)
            })
    } else {
        select_by_expected_value(current, profiles)
    };

    correct_for_cap(selection, own, &available)
}

/// Stay with a profitable current opponent, otherwise take the best one
fn select_by_expected_value(
    current: OpponentId,
    profiles: &[OpponentProfile],
) -> (OpponentId, PairingReason) {
    let staying = profiles.iter().any(|p| {
        p.opponent == current && p.expected_value > STAY_EXPECTED_VALUE && p.rounds < ROUND_CAP
    });
    if staying {
        return (current, PairingReason::StayProfitable);
    }

    // Strict comparison keeps the first maximal entry.
    let best = profiles.iter().fold(None::<&OpponentProfile>, |best, p| match best {
        Some(b) if b.expected_value >= p.expected_value => Some(b),
        _ => Some(p),
    });

    match best {
        Some(p) => (p.opponent, PairingReason::BestExpectedValue),
        None => (current, PairingReason::Fallback),
    }
}

/// Swap a capped selection for the first other available opponent
fn correct_for_cap(
    (selected, reason): (OpponentId, PairingReason),
    own: &HistoryTable,
    available: &[OpponentId],
) -> (OpponentId, PairingReason) {
    if own.rounds(selected) < ROUND_CAP {
        return (selected, reason);
    }
    match available.iter().copied().find(|&id| id != selected) {
        Some(alternative) => (alternative, PairingReason::CapCorrected),
        None => (selected, reason),
    }
}

/// Human-readable summary of a decision
pub fn describe_decision(decision: &Decision) -> String {
    let move_desc = match decision.move_reason {
        MoveReason::FirstContact => "First meeting: cooperate.",
        MoveReason::TrustWindow => "Still building trust: cooperate.",
        MoveReason::Exploit => "Opponent is highly cooperative: periodic defection.",
        MoveReason::Reward => "Opponent is highly cooperative: cooperate.",
        MoveReason::Mirror => "Opponent is moderately cooperative: copy their last move.",
        MoveReason::Probe => "Opponent mostly defects: cooperate once to test them.",
        MoveReason::Punish => "Opponent mostly defects: defect.",
    };
    let pairing_desc = match decision.pairing_reason {
        PairingReason::Exhausted => "every opponent is at the round cap",
        PairingReason::ExploreStranger => "trying a new opponent",
        PairingReason::StayProfitable => "current opponent is profitable",
        PairingReason::BestExpectedValue => "highest expected payoff",
        PairingReason::Fallback => "no better candidate",
        PairingReason::CapCorrected => "preferred opponent is at the round cap",
    };
    format!("{} Next: {} ({}).", move_desc, decision.next_opponent, pairing_desc)
}
