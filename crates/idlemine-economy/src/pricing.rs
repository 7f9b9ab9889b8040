//! The geometric upgrade price curve.
//!
//! `price = floor(base * 1.15^owned)` -- strictly increasing in the owned
//! count. Computed by repeated exact decimal multiplication; no powers of
//! a binary float anywhere near the ledger.

use rust_decimal::Decimal;

use idlemine_types::{UpgradeKind, UpgradeSlot};

/// Per-unit growth factor of the price curve.
fn growth_factor() -> Decimal {
    Decimal::new(115, 2)
}

/// Price of the next unit of `upgrade` given the current owned count.
///
/// Pure and referentially transparent: the same `(upgrade, owned)` pair
/// always yields the same price.
pub fn price(upgrade: UpgradeKind, owned: u32) -> Decimal {
    price_from_base(upgrade.base_price(), owned)
}

/// Price of the next unit for an inventory slot.
pub fn slot_price(slot: &UpgradeSlot) -> Decimal {
    price_from_base(slot.base_price, slot.owned)
}

/// `floor(base * 1.15^owned)` by repeated checked multiplication.
///
/// Saturates at [`Decimal::MAX`] for absurd owned counts instead of
/// overflowing; the loop exits early once saturated.
pub fn price_from_base(base: Decimal, owned: u32) -> Decimal {
    let growth = growth_factor();
    let mut raw = base;
    for _ in 0..owned {
        raw = raw.saturating_mul(growth);
        if raw == Decimal::MAX {
            break;
        }
    }
    raw.floor()
}
