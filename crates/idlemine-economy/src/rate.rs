//! Income formulas shared across the engine.
//!
//! The accrual divisor (10 000) is deliberately shared between the
//! per-tick amount and the per-offline-second amount: the scheduler ticks
//! at 10 Hz, so displayed accrual runs ten times faster than the
//! "per second" label implies. The original balance tuning depends on
//! that ratio, so it is preserved exactly rather than "fixed".

use rust_decimal::Decimal;

/// Currency produced by one accrual tick (and by one offline second).
///
/// `hashrate / 10_000`, computed exactly as a scale-4 decimal.
pub fn tick_income(hashrate: u64) -> Decimal {
    Decimal::new(i64::try_from(hashrate).unwrap_or(i64::MAX), 4)
}

/// Lump payout of one completed manual mining action.
///
/// `1 + hashrate / 100`, computed exactly as a scale-2 decimal.
pub fn manual_mine_payout(hashrate: u64) -> Decimal {
    let bonus = Decimal::new(i64::try_from(hashrate).unwrap_or(i64::MAX), 2);
    Decimal::ONE.saturating_add(bonus)
}

/// Total offline catch-up credit for `capped_seconds` of absence.
pub fn offline_earnings(hashrate: u64, capped_seconds: u64) -> Decimal {
    tick_income(hashrate).saturating_mul(Decimal::from(capped_seconds))
}
