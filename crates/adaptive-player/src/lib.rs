//! Adaptive Player for an Iterated Prisoner's Dilemma tournament
//!
//! Given the caller's history against every known opponent, [`decide`]
//! picks the move to play against the current opponent and the opponent to
//! pair with next. The policy is fixed (see [`policy`]) and the function is
//! pure: the tournament engine owns the history tables and the round cap.
//!
//! This crate is compiled to:
//! - Native (for the tournament engine)
//! - WASM (for the frontend, behind the `wasm` feature)

mod decision;
mod error;
mod history;
mod moves;
pub mod policy;
mod profile;

#[cfg(feature = "wasm")]
mod wasm;

pub use decision::{
    choose_move, choose_next_opponent, decide, describe_decision, Decision, MoveReason,
    PairingReason,
};
pub use error::InvalidInput;
pub use history::{check_aligned, HistoryTable, OpponentId};
pub use moves::{payoff, Move};
pub use policy::PolicyConstants;
pub use profile::{
    cooperation_rate, expected_value, profile_opponent, profile_opponents, OpponentProfile,
};
