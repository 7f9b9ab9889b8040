//! In-memory save-slot backend.
//!
//! The storage analog of a stub decision source: unit tests exercise the
//! gateway and engine against this backend so no external service is
//! required. It still round-trips through the serialized JSON form, so
//! encoding bugs do not hide.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::StoreError;

/// Save slot held in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a serialized record (for tests of
    /// the load path, including corrupt data).
    pub fn with_record(json: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(json.into()))),
        }
    }

    /// Store the serialized save record.
    ///
    /// # Errors
    ///
    /// Infallible; typed for symmetry with the durable backends.
    pub fn write(&self, json: &str) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(json.to_owned());
        Ok(())
    }

    /// Read the serialized save record, if one exists.
    ///
    /// # Errors
    ///
    /// Infallible; typed for symmetry with the durable backends.
    pub fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    /// Delete the save record.
    ///
    /// # Errors
    ///
    /// Infallible; typed for symmetry with the durable backends.
    pub fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
