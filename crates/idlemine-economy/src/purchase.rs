//! Upgrade purchase validation and application.

use rust_decimal::Decimal;
use tracing::debug;

use idlemine_types::{GameState, UpgradeKind, UpgradeSlot};

use crate::pricing;
use crate::EconomyError;

/// Record of one successful upgrade purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    /// The purchased upgrade kind.
    pub upgrade: UpgradeKind,
    /// The price that was debited.
    pub price: Decimal,
    /// Hashrate added by the new unit.
    pub hashrate_increment: u64,
    /// Owned count after the purchase.
    pub owned: u32,
}

/// Buy one unit of `upgrade`, debiting the balance at the current curve
/// price.
///
/// On success the owned count increases by exactly one and the hashrate
/// by the slot's increment. On failure nothing is mutated.
///
/// # Errors
///
/// Returns [`EconomyError::InsufficientFunds`] when the balance does not
/// cover the price.
pub fn buy(state: &mut GameState, upgrade: UpgradeKind) -> Result<PurchaseReceipt, EconomyError> {
    let slot = state
        .upgrades
        .entry(upgrade)
        .or_insert_with(|| UpgradeSlot::new(upgrade));
    let price = pricing::slot_price(slot);

    if state.balance < price {
        return Err(EconomyError::InsufficientFunds {
            required: price,
            available: state.balance,
        });
    }

    state.balance = state.balance.saturating_sub(price);
    slot.owned = slot.owned.saturating_add(1);
    let hashrate_increment = slot.hashrate_increment;
    let owned = slot.owned;
    state.hashrate = state.hashrate.saturating_add(hashrate_increment);

    debug!(%upgrade, %price, owned, hashrate = state.hashrate, "upgrade purchased");

    Ok(PurchaseReceipt {
        upgrade,
        price,
        hashrate_increment,
        owned,
    })
}
