//! Commands front ends submit to the engine.
//!
//! Input wiring (buttons, text fields) is out of scope: whatever the
//! front end looks like, it reduces player intent to one of these values
//! and sends it over the engine's command channel. Loading happens once
//! at startup and is deliberately not a command.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::UpgradeKind;

/// A command accepted by the engine actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum EngineCommand {
    /// Begin one manual mining action. A no-op while one is in progress.
    StartManualMine,

    /// Purchase one unit of the given upgrade.
    BuyUpgrade {
        /// The upgrade to buy.
        upgrade: UpgradeKind,
    },

    /// Request a balance debit to an external destination. Only the
    /// local ledger effect is modeled; no settlement occurs.
    Withdraw {
        /// Requested amount. Non-numeric input is rejected by the front
        /// end's parser and never reaches the engine.
        #[ts(as = "String")]
        amount: Decimal,
        /// Opaque destination identifier (e.g. a wallet address).
        destination: String,
    },

    /// Write a portable snapshot of the current state to disk.
    ExportSnapshot,

    /// Persist the current state immediately.
    Save,

    /// Save and stop the engine.
    Shutdown,
}
