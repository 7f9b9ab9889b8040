//! The persistence gateway: durable save/load plus snapshot export.
//!
//! The gateway owns the JSON encoding of [`GameState`] and the
//! last-save bookkeeping. Its load path never raises: absent records
//! mean defaults, and malformed records are absorbed (logged, defaults
//! retained) so a broken save can never take the engine down.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use idlemine_types::GameState;

use crate::error::StoreError;
use crate::export;
use crate::file::FileStore;
use crate::memory::MemoryStore;
use crate::redis::RedisStore;

/// The storage backend behind a [`Gateway`].
#[derive(Clone)]
pub enum SaveBackend {
    /// Redis-compatible key-value store.
    Redis(RedisStore),
    /// JSON file on local disk.
    File(FileStore),
    /// In-memory slot, for tests.
    Memory(MemoryStore),
}

impl SaveBackend {
    /// Store the serialized save record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend write fails.
    pub async fn write(&self, json: &str) -> Result<(), StoreError> {
        match self {
            Self::Redis(store) => store.write(json).await,
            Self::File(store) => store.write(json).await,
            Self::Memory(store) => store.write(json),
        }
    }

    /// Read the serialized save record, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend read fails.
    pub async fn read(&self) -> Result<Option<String>, StoreError> {
        match self {
            Self::Redis(store) => store.read().await,
            Self::File(store) => store.read().await,
            Self::Memory(store) => store.read(),
        }
    }

    /// Delete the save record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend delete fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match self {
            Self::Redis(store) => store.clear().await,
            Self::File(store) => store.clear().await,
            Self::Memory(store) => store.clear(),
        }
    }
}

/// Durable save/load of the game state, plus one-shot export.
#[derive(Clone)]
pub struct Gateway {
    backend: SaveBackend,
}

impl Gateway {
    /// Create a gateway over the given backend.
    pub const fn new(backend: SaveBackend) -> Self {
        Self { backend }
    }

    /// Persist the full state, refreshing its last-save instant first.
    ///
    /// The instant is truncated to millisecond precision so the value in
    /// memory equals the value that round-trips through the record.
    /// Repeated saves with no intervening mutation produce identical
    /// payloads except for this timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the backend write fails.
    /// Callers treat a failed save as non-fatal: the state stays valid
    /// in memory and the next save retries.
    pub async fn save(&self, state: &mut GameState) -> Result<(), StoreError> {
        let now = Utc::now();
        state.last_save = DateTime::from_timestamp_millis(now.timestamp_millis());

        let json = serde_json::to_string(state)?;
        self.backend.write(&json).await?;

        debug!(balance = %state.balance, hashrate = state.hashrate, "state saved");
        Ok(())
    }

    /// Load the saved state, degrading to defaults on any failure.
    ///
    /// - No record: fresh defaults (not an error).
    /// - Malformed record: corrupt-save warning, fresh defaults.
    /// - Backend failure: warning, fresh defaults.
    ///
    /// A successfully decoded state is normalized so the documented
    /// invariants hold before the engine starts mutating it.
    pub async fn load_or_default(&self) -> GameState {
        match self.backend.read().await {
            Ok(Some(json)) => match serde_json::from_str::<GameState>(&json) {
                Ok(mut state) => {
                    if state.normalize() {
                        warn!("loaded save violated invariants, repaired");
                    }
                    info!(
                        balance = %state.balance,
                        hashrate = state.hashrate,
                        "saved state loaded"
                    );
                    state
                }
                Err(e) => {
                    warn!(error = %e, "corrupt save data, starting from defaults");
                    GameState::new()
                }
            },
            Ok(None) => {
                info!("no saved state, starting fresh");
                GameState::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to read save, starting from defaults");
                GameState::new()
            }
        }
    }

    /// Write a portable snapshot of `state` into `dir`, named with the
    /// current date.
    ///
    /// A pure read of the state: neither the durable record nor the
    /// last-save instant is touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the file write fails.
    pub async fn export_snapshot(
        &self,
        state: &GameState,
        dir: &Path,
    ) -> Result<PathBuf, StoreError> {
        export::write_snapshot(state, dir, Utc::now()).await
    }

    /// Return a reference to the underlying backend.
    pub const fn backend(&self) -> &SaveBackend {
        &self.backend
    }
}
