//! Event subscriber that narrates engine events into the log.
//!
//! This is the binary's stand-in for a front end: it consumes the same
//! broadcast stream a UI would and turns each event into a structured
//! log line. Balance ticks are logged at trace level so a 10 Hz accrual
//! does not drown the interesting events.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, trace, warn};

use idlemine_types::EngineEvent;

/// Spawn a task that logs every engine event until the stream closes.
pub fn spawn_event_logger(mut events: broadcast::Receiver<EngineEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => log_event(&event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "event logger fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Write one event to the log at an appropriate level.
fn log_event(event: &EngineEvent) {
    match event {
        EngineEvent::BalanceChanged {
            balance,
            mined,
            hashrate,
        } => trace!(%balance, %mined, hashrate, "balance changed"),
        EngineEvent::MiningCompleted { amount } => info!(%amount, "mined"),
        EngineEvent::OfflineEarnings {
            amount,
            elapsed_seconds,
        } => info!(
            %amount,
            away = %format_elapsed(*elapsed_seconds),
            "offline earnings credited"
        ),
        EngineEvent::UpgradePurchased {
            upgrade,
            hashrate_increment,
        } => info!(%upgrade, hashrate_increment, "upgrade purchased"),
        EngineEvent::WithdrawalAccepted {
            id,
            amount,
            destination,
        } => info!(%id, %amount, destination = %destination, "withdrawal accepted"),
        EngineEvent::SnapshotExported { path } => info!(path = %path, "snapshot exported"),
        EngineEvent::Error { kind, message } => warn!(?kind, message = %message, "rejected"),
    }
}

/// Humanize a second count as `2h 13m 5s`, omitting leading zero parts.
fn format_elapsed(total_secs: u64) -> String {
    let hours = total_secs.checked_div(3_600).unwrap_or(0);
    let minutes = total_secs
        .checked_rem(3_600)
        .unwrap_or(0)
        .checked_div(60)
        .unwrap_or(0);
    let seconds = total_secs.checked_rem(60).unwrap_or(0);

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h "));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m "));
    }
    out.push_str(&format!("{seconds}s"));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn short_durations_show_seconds_only() {
        assert_eq!(format_elapsed(0), "0s");
        assert_eq!(format_elapsed(59), "59s");
    }

    #[test]
    fn minutes_and_hours_appear_when_nonzero() {
        assert_eq!(format_elapsed(60), "1m 0s");
        assert_eq!(format_elapsed(125), "2m 5s");
        assert_eq!(format_elapsed(3_600), "1h 0s");
        assert_eq!(format_elapsed(7_985), "2h 13m 5s");
    }

    #[tokio::test]
    async fn logger_ends_when_the_stream_closes() {
        let (tx, rx) = broadcast::channel(8);
        let logger = spawn_event_logger(rx);
        tx.send(EngineEvent::MiningCompleted {
            amount: rust_decimal::Decimal::ONE,
        })
        .unwrap();
        drop(tx);
        logger.await.unwrap();
    }
}
