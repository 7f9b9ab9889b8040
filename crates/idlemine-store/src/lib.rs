//! Save-slot persistence for the Idlemine engine.
//!
//! One player, one record: the whole [`GameState`] serializes to a
//! single JSON document held by a pluggable backend. Three backends are
//! provided:
//!
//! - [`redis`] -- a Redis-compatible store under a fixed key (the
//!   durable default for hosted deployments).
//! - [`file`] -- a JSON file on local disk (the durable default for
//!   local play).
//! - [`memory`] -- an in-memory slot for tests.
//!
//! The [`Gateway`] sits above the backend and owns the persistence
//! contract: `save` refreshes the last-save instant, `load_or_default`
//! never raises (absent or corrupt records degrade to defaults), and
//! `export_snapshot` is a pure read producing a portable file.
//!
//! [`GameState`]: idlemine_types::GameState

pub mod error;
pub mod export;
pub mod file;
pub mod gateway;
pub mod memory;
pub mod redis;

// Re-export primary types at crate root.
pub use error::StoreError;
pub use export::{export_file_name, snapshot, write_snapshot, Snapshot};
pub use file::FileStore;
pub use gateway::{Gateway, SaveBackend};
pub use memory::MemoryStore;
pub use redis::{RedisStore, SAVE_KEY};
