//! Enumeration types for the Idlemine engine.
//!
//! The upgrade catalog is a fixed set: every upgrade kind carries its
//! base price and hashrate increment as compile-time constants, mirroring
//! the persisted save layout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Upgrade kinds
// ---------------------------------------------------------------------------

/// A purchasable upgrade that permanently raises the accrual rate.
///
/// The set is fixed; unknown identifiers are rejected at the command
/// boundary (see [`UpgradeKind::parse`]) and never reach the economy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum UpgradeKind {
    /// A single graphics card. Cheap, small hashrate bump.
    Gpu,
    /// A rack of cards working together.
    Farm,
    /// Purpose-built mining silicon. Expensive, large bump.
    Asic,
}

impl UpgradeKind {
    /// All upgrade kinds in catalog order (cheapest first).
    pub const fn all() -> &'static [Self] {
        &[Self::Gpu, Self::Farm, Self::Asic]
    }

    /// Base price of the first unit, before geometric growth.
    pub fn base_price(self) -> Decimal {
        match self {
            Self::Gpu => Decimal::new(100, 0),
            Self::Farm => Decimal::new(1_000, 0),
            Self::Asic => Decimal::new(10_000, 0),
        }
    }

    /// Hashrate added by each owned unit.
    pub const fn hashrate_increment(self) -> u64 {
        match self {
            Self::Gpu => 5,
            Self::Farm => 50,
            Self::Asic => 500,
        }
    }

    /// The identifier used in the persisted layout and command payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gpu => "gpu",
            Self::Farm => "farm",
            Self::Asic => "asic",
        }
    }

    /// Parse an upgrade identifier from a front-end string.
    ///
    /// Returns `None` for identifiers outside the fixed set; callers map
    /// that to [`ErrorKind::UnknownUpgradeType`] before the request
    /// reaches the economy.
    pub fn parse(identifier: &str) -> Option<Self> {
        match identifier {
            "gpu" => Some(Self::Gpu),
            "farm" => Some(Self::Farm),
            "asic" => Some(Self::Asic),
            _ => None,
        }
    }
}

impl core::fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Player-facing error categories carried by [`error` events].
///
/// These are returned to the caller for display, never raised as faults:
/// no error condition in the engine terminates the process.
///
/// [`error` events]: crate::events::EngineEvent::Error
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Balance does not cover the requested purchase or withdrawal.
    InsufficientFunds,
    /// Withdrawal destination identifier was empty or blank.
    MissingDestination,
    /// Withdrawal amount was below the fixed minimum (100 CR).
    BelowMinimumWithdrawal,
    /// The persisted save could not be decoded. Recovered internally by
    /// falling back to defaults; surfaced only in logs.
    CorruptSaveData,
    /// An upgrade identifier outside the fixed set reached the boundary.
    UnknownUpgradeType,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upgrade_identifiers_roundtrip() {
        for kind in UpgradeKind::all() {
            assert_eq!(UpgradeKind::parse(kind.as_str()), Some(*kind));
        }
        assert_eq!(UpgradeKind::parse("quantum"), None);
        assert_eq!(UpgradeKind::parse(""), None);
    }

    #[test]
    fn upgrade_serializes_lowercase() {
        let json = serde_json::to_string(&UpgradeKind::Asic).unwrap();
        assert_eq!(json, "\"asic\"");
    }

    #[test]
    fn catalog_constants_match_save_layout() {
        assert_eq!(UpgradeKind::Gpu.base_price(), Decimal::new(100, 0));
        assert_eq!(UpgradeKind::Gpu.hashrate_increment(), 5);
        assert_eq!(UpgradeKind::Farm.base_price(), Decimal::new(1_000, 0));
        assert_eq!(UpgradeKind::Farm.hashrate_increment(), 50);
        assert_eq!(UpgradeKind::Asic.base_price(), Decimal::new(10_000, 0));
        assert_eq!(UpgradeKind::Asic.hashrate_increment(), 500);
    }
}
