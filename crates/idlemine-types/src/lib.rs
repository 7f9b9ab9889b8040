//! Shared type definitions for the Idlemine engine.
//!
//! This crate is the single source of truth for all types that cross the
//! engine boundary. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` so any front end can consume the command/event interface
//! with compile-time-checked payloads.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for withdrawal receipts
//! - [`enums`] -- Upgrade kinds and the player-facing error taxonomy
//! - [`state`] -- The game state and its persisted layout
//! - [`events`] -- Events the engine emits to front-end subscribers
//! - [`commands`] -- Commands front ends submit to the engine

pub mod commands;
pub mod enums;
pub mod events;
pub mod ids;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use commands::EngineCommand;
pub use enums::{ErrorKind, UpgradeKind};
pub use events::EngineEvent;
pub use ids::WithdrawalId;
pub use state::{GameState, UpgradeSlot};
