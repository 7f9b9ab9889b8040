//! One-shot export of the game state to a portable snapshot file.
//!
//! The snapshot is the persisted layout plus a human-readable save-time
//! label, pretty-printed for the player to keep or move between
//! machines. Producing one is a pure read: it never touches the durable
//! save slot or the last-save instant.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use idlemine_types::GameState;

use crate::error::StoreError;

/// A standalone serialized copy of the game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The full game state in the persisted layout.
    #[serde(flatten)]
    pub state: GameState,
    /// Human-readable label of when the snapshot was taken.
    #[serde(rename = "saveTime")]
    pub save_time: String,
}

/// Build a snapshot of `state` labeled with `now`.
pub fn snapshot(state: &GameState, now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        state: state.clone(),
        save_time: now.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }
}

/// File name for an export taken at `now`: `idlemine_save_YYYY-MM-DD.json`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("idlemine_save_{}.json", now.format("%Y-%m-%d"))
}

/// Write a pretty-printed snapshot of `state` into `dir`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] or [`StoreError::Io`] if
/// encoding or the write fails.
pub async fn write_snapshot(
    state: &GameState,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, StoreError> {
    let json = serde_json::to_string_pretty(&snapshot(state, now))?;
    let path = dir.join(export_file_name(now));
    tokio::fs::write(&path, json).await?;
    Ok(path)
}
