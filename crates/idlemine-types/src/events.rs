//! Events the engine emits to front-end subscribers.
//!
//! Presentation concerns (rendering, sound, notification banners) live
//! entirely outside the engine: front ends subscribe to these events and
//! react however they like. Engine mutations are synchronous and
//! side-effect-free except for emitting these values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ErrorKind, UpgradeKind};
use crate::ids::WithdrawalId;

/// An event emitted by the engine after an observable state change.
///
/// Serialized with a `type` tag (kebab-case) so untyped consumers can
/// dispatch on the event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EngineEvent {
    /// The balance changed. Carries the full headline numbers so a front
    /// end never needs to query state.
    BalanceChanged {
        /// Current spendable balance.
        #[ts(as = "String")]
        balance: Decimal,
        /// Cumulative lifetime production.
        #[ts(as = "String")]
        mined: Decimal,
        /// Current accrual rate.
        hashrate: u64,
    },

    /// A manual mining action ran to completion.
    MiningCompleted {
        /// The lump payout credited to the balance.
        #[ts(as = "String")]
        amount: Decimal,
    },

    /// Offline catch-up earnings were credited at startup.
    OfflineEarnings {
        /// The credited amount (already capped).
        #[ts(as = "String")]
        amount: Decimal,
        /// Real seconds since the last save, before capping -- for
        /// display purposes.
        elapsed_seconds: u64,
    },

    /// An upgrade purchase succeeded.
    UpgradePurchased {
        /// The purchased upgrade kind.
        upgrade: UpgradeKind,
        /// Hashrate added by the new unit.
        hashrate_increment: u64,
    },

    /// A withdrawal request passed validation and was debited.
    WithdrawalAccepted {
        /// Receipt identifier for the request.
        id: WithdrawalId,
        /// The debited amount.
        #[ts(as = "String")]
        amount: Decimal,
        /// The opaque destination identifier supplied by the player.
        destination: String,
    },

    /// An export snapshot was written to disk.
    SnapshotExported {
        /// Path of the written file.
        path: String,
    },

    /// A player-facing validation error. Never fatal.
    Error {
        /// The error category.
        kind: ErrorKind,
        /// Human-readable description for display.
        message: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn events_carry_a_kebab_case_type_tag() {
        let event = EngineEvent::MiningCompleted {
            amount: Decimal::new(2, 0),
        };
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "mining-completed");
        assert_eq!(value["amount"], "2");
    }

    #[test]
    fn error_event_names_the_kind() {
        let event = EngineEvent::Error {
            kind: ErrorKind::BelowMinimumWithdrawal,
            message: "minimum withdrawal is 100 CR".to_owned(),
        };
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["kind"], "below-minimum-withdrawal");
    }

    #[test]
    fn event_roundtrip_serde() {
        let event = EngineEvent::UpgradePurchased {
            upgrade: UpgradeKind::Farm,
            hashrate_increment: 50,
        };
        let json = serde_json::to_string(&event).unwrap();
        let restored: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, event);
    }
}
