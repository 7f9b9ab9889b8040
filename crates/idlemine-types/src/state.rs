//! The game state and its persisted layout.
//!
//! [`GameState`] is the single shared mutable resource of the engine. It
//! is owned exclusively by the engine actor task; no other task ever
//! holds a reference to it, so no locking is required.
//!
//! The serde layout below is the durable save format (one record under a
//! fixed key): camelCase field names, currency amounts encoded as decimal
//! strings for exactness, and the last-save instant as epoch milliseconds
//! or `null`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::UpgradeKind;

/// Per-upgrade inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct UpgradeSlot {
    /// Number of units owned. Only ever increases, by exactly 1 per
    /// successful purchase.
    pub owned: u32,
    /// Price of the first unit, before geometric growth.
    #[serde(rename = "price")]
    #[ts(as = "String")]
    pub base_price: Decimal,
    /// Hashrate added by each owned unit.
    #[serde(rename = "hashrate")]
    pub hashrate_increment: u64,
}

impl UpgradeSlot {
    /// Create an empty slot with the catalog constants for `kind`.
    pub fn new(kind: UpgradeKind) -> Self {
        Self {
            owned: 0,
            base_price: kind.base_price(),
            hashrate_increment: kind.hashrate_increment(),
        }
    }
}

/// The complete mutable game state.
///
/// # Invariants (hold between operations)
///
/// - `balance >= 0`
/// - `mined` never decreases
/// - `hashrate == sum(owned * hashrate_increment)` over all upgrades
///
/// A freshly loaded save is passed through [`GameState::normalize`] to
/// restore these invariants before the engine starts mutating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    /// Spendable currency amount.
    #[ts(as = "String")]
    pub balance: Decimal,
    /// Current accrual rate, derived from the upgrade inventory.
    pub hashrate: u64,
    /// Cumulative lifetime currency produced.
    #[ts(as = "String")]
    pub mined: Decimal,
    /// Upgrade inventory keyed by the fixed upgrade set.
    pub upgrades: BTreeMap<UpgradeKind, UpgradeSlot>,
    /// Instant of the last durable save; absent before the first save.
    /// Stored at millisecond precision.
    #[serde(rename = "lastSaveTimestamp", with = "chrono::serde::ts_milliseconds_option")]
    #[ts(type = "number | null")]
    pub last_save: Option<DateTime<Utc>>,
}

impl Default for GameState {
    fn default() -> Self {
        let upgrades = UpgradeKind::all()
            .iter()
            .map(|kind| (*kind, UpgradeSlot::new(*kind)))
            .collect();
        Self {
            balance: Decimal::ZERO,
            hashrate: 0,
            mined: Decimal::ZERO,
            upgrades,
            last_save: None,
        }
    }
}

impl GameState {
    /// Create a fresh state with an empty inventory and zero balances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the hashrate implied by the upgrade inventory.
    ///
    /// Saturating on overflow; the catalog constants keep realistic
    /// inventories far below that.
    pub fn derived_hashrate(&self) -> u64 {
        self.upgrades
            .values()
            .map(|slot| u64::from(slot.owned).saturating_mul(slot.hashrate_increment))
            .fold(0_u64, u64::saturating_add)
    }

    /// Repair a loaded state so the documented invariants hold.
    ///
    /// Re-inserts missing upgrade slots with catalog defaults, clamps
    /// negative currency amounts to zero, and recomputes `hashrate` from
    /// the inventory when the stored value disagrees. Returns `true` if
    /// anything had to be repaired (callers log the event).
    pub fn normalize(&mut self) -> bool {
        let mut repaired = false;

        for kind in UpgradeKind::all() {
            if !self.upgrades.contains_key(kind) {
                self.upgrades.insert(*kind, UpgradeSlot::new(*kind));
                repaired = true;
            }
        }

        if self.balance < Decimal::ZERO {
            self.balance = Decimal::ZERO;
            repaired = true;
        }
        if self.mined < Decimal::ZERO {
            self.mined = Decimal::ZERO;
            repaired = true;
        }

        let derived = self.derived_hashrate();
        if self.hashrate != derived {
            self.hashrate = derived;
            repaired = true;
        }

        repaired
    }
}
