//! Fixed policy constants
//!
//! The heuristic is not tunable at runtime. Every threshold the decision
//! engine compares against lives here so it can be audited in one place.

use serde::Serialize;

// ── Pairing ──────────────────────────────────────────────────────────

/// Maximum rounds the tournament allows between two participants.
pub const ROUND_CAP: usize = 200;

/// Stay with the current opponent when its expected value exceeds this.
pub const STAY_EXPECTED_VALUE: f64 = 3.0;

// ── Move selection ───────────────────────────────────────────────────

/// Rounds of unconditional cooperation before the opponent is judged.
pub const TRUST_WINDOW: usize = 5;

/// Above this cooperation rate the opponent is exploited periodically.
pub const EXPLOIT_THRESHOLD: f64 = 0.7;

/// Above this (and up to [`EXPLOIT_THRESHOLD`]) the engine plays tit-for-tat.
pub const MIRROR_THRESHOLD: f64 = 0.4;

/// Against cooperative opponents, defect every this many own moves.
pub const EXPLOIT_PERIOD: usize = 7;

/// Against defecting opponents, cooperate every this many own moves.
pub const PROBE_PERIOD: usize = 5;

// ── Neutral priors ───────────────────────────────────────────────────

/// Cooperation rate assumed for an opponent with no recorded moves.
pub const NEUTRAL_COOPERATION_RATE: f64 = 0.5;

/// Midpoint between the worst (0) and best (5) single-round payoff.
pub const NEUTRAL_EXPECTED_VALUE: f64 = 2.5;

/// All constants in one serializable snapshot (exposed to the frontend)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PolicyConstants {
    pub round_cap: usize,
    pub stay_expected_value: f64,
    pub trust_window: usize,
    pub exploit_threshold: f64,
    pub mirror_threshold: f64,
    pub exploit_period: usize,
    pub probe_period: usize,
    pub neutral_cooperation_rate: f64,
    pub neutral_expected_value: f64,
}

impl PolicyConstants {
    pub const CURRENT: Self = Self {
        round_cap: ROUND_CAP,
        stay_expected_value: STAY_EXPECTED_VALUE,
        trust_window: TRUST_WINDOW,
        exploit_threshold: EXPLOIT_THRESHOLD,
        mirror_threshold: MIRROR_THRESHOLD,
        exploit_period: EXPLOIT_PERIOD,
        probe_period: PROBE_PERIOD,
        neutral_cooperation_rate: NEUTRAL_COOPERATION_RATE,
        neutral_expected_value: NEUTRAL_EXPECTED_VALUE,
    };
}
