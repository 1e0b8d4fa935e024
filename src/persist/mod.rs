//! Persisted state exchanged with the presentation shell.
//!
//! The engine never touches the filesystem. It produces a `SavedGame` via
//! `GridEngine::save` and accepts one via `GridEngine::resume`; this module
//! turns that record into text (the shell's JSON store) or compact bytes.

mod saved;

pub use saved::{from_bytes, from_json, to_bytes, to_json, SavedGame};
