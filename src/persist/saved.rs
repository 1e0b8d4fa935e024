//! The persisted game record and its codecs.

use serde::{Deserialize, Serialize};

use crate::core::{GameRngState, GridError, Result};

/// What the shell writes on quit and reads back on startup.
///
/// `array` keeps signed cells so a hand-edited file with negative values is
/// rejected by `GridEngine::resume` instead of wrapping. Missing keys fall
/// back to an empty record, as a fresh install has no file at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    #[serde(default)]
    pub best_score: u32,

    #[serde(default)]
    pub game_over: bool,

    #[serde(default)]
    pub array: Vec<Vec<i64>>,

    /// RNG checkpoint so a resumed game spawns the same tiles.
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

/// Render the record as the shell's pretty-printed JSON document.
pub fn to_json(saved: &SavedGame) -> Result<String> {
    serde_json::to_string_pretty(saved).map_err(|e| GridError::Encode(e.to_string()))
}

/// Parse a JSON document written by `to_json` (or by an older shell).
pub fn from_json(text: &str) -> Result<SavedGame> {
    serde_json::from_str(text).map_err(|e| GridError::Decode(e.to_string()))
}

/// Encode the record as a compact binary checkpoint.
pub fn to_bytes(saved: &SavedGame) -> Result<Vec<u8>> {
    bincode::serialize(saved).map_err(|e| GridError::Encode(e.to_string()))
}

/// Decode a checkpoint written by `to_bytes`.
pub fn from_bytes(bytes: &[u8]) -> Result<SavedGame> {
    bincode::deserialize(bytes).map_err(|e| GridError::Decode(e.to_string()))
}
