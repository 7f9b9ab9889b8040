//! Offline catch-up credit, applied once immediately after load.
//!
//! Absence is credited at the per-second rate, hard-capped at 24 hours
//! so neither long absences nor clock manipulation yield unbounded
//! income. A clock that moved backwards counts as zero elapsed time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;

use idlemine_types::GameState;

use crate::rate;

/// Default hard cap on credited offline time, in seconds (24 hours).
pub const OFFLINE_CAP_SECS: u64 = 86_400;

/// What a reconciliation credited, for the `offline-earnings` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineReport {
    /// The credited amount.
    pub earnings: Decimal,
    /// Real seconds since the last save, before capping.
    pub elapsed_seconds: u64,
    /// Seconds actually credited after the cap.
    pub capped_seconds: u64,
}

/// Credit earnings for the time between the last save and `now`.
///
/// Returns `None` -- and leaves the state untouched -- when there is no
/// last-save instant, no accrual source (`hashrate == 0`), or no positive
/// elapsed time. No save is forced here; the next autosave covers it.
pub fn reconcile(
    state: &mut GameState,
    now: DateTime<Utc>,
    cap_secs: u64,
) -> Option<OfflineReport> {
    let last_save = state.last_save?;

    let elapsed = now.signed_duration_since(last_save).num_seconds();
    let elapsed_seconds = u64::try_from(elapsed).unwrap_or(0);
    let capped_seconds = elapsed_seconds.min(cap_secs);

    let earnings = rate::offline_earnings(state.hashrate, capped_seconds);
    if earnings <= Decimal::ZERO {
        return None;
    }

    state.balance = state.balance.saturating_add(earnings);
    state.mined = state.mined.saturating_add(earnings);

    info!(%earnings, elapsed_seconds, capped_seconds, "offline earnings credited");

    Some(OfflineReport {
        earnings,
        elapsed_seconds,
        capped_seconds,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use rust_decimal_macros::dec;

    use super::*;

    fn state_with(hashrate: u64, saved_secs_ago: i64, now: DateTime<Utc>) -> GameState {
        let mut state = GameState::new();
        state.hashrate = hashrate;
        state.last_save = Some(now - Duration::seconds(saved_secs_ago));
        state
    }

    #[test]
    fn uncapped_absence_credits_per_second_rate() {
        let now = Utc::now();
        let mut state = state_with(10_000, 10_000, now);

        let report = reconcile(&mut state, now, OFFLINE_CAP_SECS).unwrap();

        assert_eq!(report.earnings, dec!(10000));
        assert_eq!(report.elapsed_seconds, 10_000);
        assert_eq!(report.capped_seconds, 10_000);
        assert_eq!(state.balance, dec!(10000));
        assert_eq!(state.mined, dec!(10000));
    }

    #[test]
    fn absence_beyond_the_cap_is_clamped() {
        let now = Utc::now();
        let mut state = state_with(10_000, 100_000, now);

        let report = reconcile(&mut state, now, OFFLINE_CAP_SECS).unwrap();

        assert_eq!(report.earnings, dec!(86400));
        assert_eq!(report.elapsed_seconds, 100_000);
        assert_eq!(report.capped_seconds, 86_400);
    }

    #[test]
    fn earnings_never_exceed_the_cap_bound() {
        let now = Utc::now();
        for secs in [1_i64, 3_600, 86_400, 400_000, 10_000_000] {
            let mut state = state_with(7_500, secs, now);
            if let Some(report) = reconcile(&mut state, now, OFFLINE_CAP_SECS) {
                let bound = rate::offline_earnings(7_500, OFFLINE_CAP_SECS);
                assert!(report.earnings <= bound);
            }
        }
    }

    #[test]
    fn zero_hashrate_earns_nothing_regardless_of_absence() {
        let now = Utc::now();
        let mut state = state_with(0, 1_000_000, now);
        let before = state.clone();

        assert!(reconcile(&mut state, now, OFFLINE_CAP_SECS).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn never_saved_means_no_credit() {
        let now = Utc::now();
        let mut state = GameState::new();
        state.hashrate = 10_000;

        assert!(reconcile(&mut state, now, OFFLINE_CAP_SECS).is_none());
        assert_eq!(state.balance, Decimal::ZERO);
    }

    #[test]
    fn backwards_clock_counts_as_zero_elapsed() {
        let now = Utc::now();
        let mut state = GameState::new();
        state.hashrate = 10_000;
        state.last_save = Some(now + Duration::seconds(500));

        assert!(reconcile(&mut state, now, OFFLINE_CAP_SECS).is_none());
        assert_eq!(state.balance, Decimal::ZERO);
    }
}
