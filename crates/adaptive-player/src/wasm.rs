//! WASM bindings for the frontend

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{
    decide, describe_decision, profile_opponents, HistoryTable, OpponentId, PolicyConstants,
};

/// Parse a history table from its JSON form: `[[id, [0, 1, ...]], ...]`
fn parse_table(json: &str) -> Result<HistoryTable, String> {
    serde_json::from_str::<HistoryTable>(json).map_err(|e| format!("Invalid history table: {}", e))
}

/// Decide the move and next opponent for one round
///
/// # Arguments
/// * `current_opponent` - Id of the opponent currently paired with the caller
/// * `own_history_json` - Caller's moves per opponent, as `[[id, [moves]], ...]`
/// * `their_history_json` - Opponents' moves per opponent, keyed like the above
///
/// # Returns
/// `{move, next_opponent, move_reason, pairing_reason}`
#[wasm_bindgen]
pub fn decide_round(
    current_opponent: u32,
    own_history_json: &str,
    their_history_json: &str,
) -> Result<JsValue, JsError> {
    let own = parse_table(own_history_json)
        .map_err(|e| JsError::new(&format!("Own history: {}", e)))?;
    let theirs = parse_table(their_history_json)
        .map_err(|e| JsError::new(&format!("Opponent history: {}", e)))?;

    let decision = decide(OpponentId(current_opponent), &own, &theirs)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&decision)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Same as [`decide_round`] but returns a one-line human-readable summary
#[wasm_bindgen]
pub fn explain_round(
    current_opponent: u32,
    own_history_json: &str,
    their_history_json: &str,
) -> Result<String, JsError> {
    let own = parse_table(own_history_json).map_err(|e| JsError::new(&e))?;
    let theirs = parse_table(their_history_json).map_err(|e| JsError::new(&e))?;

    let decision = decide(OpponentId(current_opponent), &own, &theirs)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(describe_decision(&decision))
}

/// Cooperation rate and expected value for every opponent below the cap
#[wasm_bindgen]
pub fn get_opponent_profiles(
    own_history_json: &str,
    their_history_json: &str,
) -> Result<JsValue, JsError> {
    let own = parse_table(own_history_json).map_err(|e| JsError::new(&e))?;
    let theirs = parse_table(their_history_json).map_err(|e| JsError::new(&e))?;

    let first = own.opponents().next().ok_or_else(|| JsError::new("No opponents"))?;
    crate::check_aligned(first, &own, &theirs).map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&profile_opponents(&own, &theirs))
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Policy thresholds, for display
#[wasm_bindgen]
pub fn get_policy_constants() -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&PolicyConstants::CURRENT)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
