//! Persistence codecs for tournament records.
//!
//! The engine returns records for the caller to store. These helpers give the
//! storage layer a compact binary form and a JSON form for APIs. Decoding does
//! not restore a tournament; pass the result to
//! [`BracketEngine::restore`](super::BracketEngine::restore) to re-check it.

use super::errors::{BracketError, BracketResult};
use super::models::Tournament;

/// Largest accepted binary snapshot (1MB)
pub const MAX_SNAPSHOT_SIZE: usize = 1024 * 1024;

fn config() -> bincode::config::Configuration {
    bincode::config::standard()
}

/// Encode a tournament as bytes
pub fn encode(tournament: &Tournament) -> BracketResult<Vec<u8>> {
    let bytes = bincode::serde::encode_to_vec(tournament, config())?;
    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(BracketError::SnapshotTooLarge(bytes.len()));
    }
    Ok(bytes)
}

/// Decode a tournament from bytes produced by [`encode`]
pub fn decode(bytes: &[u8]) -> BracketResult<Tournament> {
    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(BracketError::SnapshotTooLarge(bytes.len()));
    }
    let (tournament, _) = bincode::serde::decode_from_slice(bytes, config())?;
    Ok(tournament)
}

pub fn to_json(tournament: &Tournament) -> BracketResult<String> {
    Ok(serde_json::to_string(tournament)?)
}

pub fn from_json(json: &str) -> BracketResult<Tournament> {
    Ok(serde_json::from_str(json)?)
}
