//! Accrual tick application and the autosave cadence.
//!
//! Both functions are pure over the state and an explicit `now`, so the
//! timing-free parts of the scheduler contract are testable without a
//! runtime: the async loop in [`engine`] only decides *when* to call
//! them.
//!
//! [`engine`]: crate::engine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use idlemine_economy::rate;
use idlemine_types::GameState;

/// Apply one accrual tick to the state.
///
/// With `hashrate == 0` the tick is a complete no-op and `None` is
/// returned -- no mutation, and the caller skips its save check too.
/// Otherwise the per-tick income is added to both `balance` and `mined`
/// and returned.
pub fn apply_accrual(state: &mut GameState) -> Option<Decimal> {
    if state.hashrate == 0 {
        return None;
    }
    let income = rate::tick_income(state.hashrate);
    state.balance = state.balance.saturating_add(income);
    state.mined = state.mined.saturating_add(income);
    Some(income)
}

/// Whether a periodic autosave is due at `now`.
///
/// Due when the state has never been saved, or when more than `interval`
/// has elapsed since the last save.
pub fn autosave_due(state: &GameState, now: DateTime<Utc>, interval: chrono::Duration) -> bool {
    state
        .last_save
        .is_none_or(|last| now.signed_duration_since(last) > interval)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn n_ticks_accumulate_exactly() {
        let mut state = GameState::new();
        state.hashrate = 5;
        state.balance = dec!(2.5);

        for _ in 0..1_000 {
            assert_eq!(apply_accrual(&mut state), Some(dec!(0.0005)));
        }

        // 2.5 + 1000 * 5/10000, exact.
        assert_eq!(state.balance, dec!(3.0));
        assert_eq!(state.mined, dec!(0.5));
    }

    #[test]
    fn zero_hashrate_tick_is_a_no_op() {
        let mut state = GameState::new();
        state.balance = dec!(10);
        let before = state.clone();

        assert_eq!(apply_accrual(&mut state), None);
        assert_eq!(state, before);
    }

    #[test]
    fn mined_tracks_production_not_spending() {
        let mut state = GameState::new();
        state.hashrate = 10_000;

        apply_accrual(&mut state);
        state.balance = Decimal::ZERO; // spend everything

        apply_accrual(&mut state);
        assert_eq!(state.mined, dec!(2));
        assert_eq!(state.balance, dec!(1));
    }

    #[test]
    fn autosave_due_when_never_saved() {
        let state = GameState::new();
        assert!(autosave_due(&state, Utc::now(), Duration::seconds(30)));
    }

    #[test]
    fn autosave_respects_the_interval() {
        let now = Utc::now();
        let mut state = GameState::new();

        state.last_save = Some(now - Duration::seconds(10));
        assert!(!autosave_due(&state, now, Duration::seconds(30)));

        state.last_save = Some(now - Duration::seconds(31));
        assert!(autosave_due(&state, now, Duration::seconds(30)));
    }
}
