//! The manual mining state machine.
//!
//! Exactly one manual mining attempt can be in flight at a time; the
//! action itself enforces that, independent of whatever front end
//! triggered it. Once begun the action always completes -- there is no
//! failure state and no cancellation. The step cadence paces the action
//! against automatic accrual so manual spamming cannot dominate the
//! economy; the payout is computed at completion from the hashrate, not
//! from the pacing.

use tracing::debug;

/// Result of advancing the mining progress by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningStep {
    /// No action is in flight; nothing happened.
    Idle,
    /// The action advanced but has not finished.
    InProgress {
        /// Progress after this step, in percent (0..100).
        progress_percent: u8,
    },
    /// The action just finished and the machine returned to idle. The
    /// caller credits the payout and emits the completion event.
    Completed,
}

/// One player-triggered mining attempt: `Idle -> InProgress -> Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualMiningAction {
    step_percent: u8,
    progress: Option<u8>,
}

impl ManualMiningAction {
    /// Create an idle action advancing `step_percent` per step.
    pub const fn new(step_percent: u8) -> Self {
        Self {
            step_percent,
            progress: None,
        }
    }

    /// Whether an attempt is currently in flight.
    pub const fn in_progress(&self) -> bool {
        self.progress.is_some()
    }

    /// Current progress in percent, while in flight.
    pub const fn progress_percent(&self) -> Option<u8> {
        self.progress
    }

    /// Try to begin an attempt.
    ///
    /// Returns `false` -- and changes nothing -- while another attempt
    /// is in flight: the trigger is disabled by the action itself.
    pub fn begin(&mut self) -> bool {
        if self.progress.is_some() {
            debug!("manual mine rejected: already in progress");
            return false;
        }
        self.progress = Some(0);
        true
    }

    /// Advance the in-flight attempt by one step.
    ///
    /// Returns [`MiningStep::Completed`] exactly once per attempt, at
    /// which point the machine is idle again and [`begin`] is accepted.
    ///
    /// [`begin`]: ManualMiningAction::begin
    pub fn advance(&mut self) -> MiningStep {
        let Some(progress) = self.progress else {
            return MiningStep::Idle;
        };

        let progress = progress.saturating_add(self.step_percent);
        if progress >= 100 {
            self.progress = None;
            return MiningStep::Completed;
        }

        self.progress = Some(progress);
        MiningStep::InProgress {
            progress_percent: progress,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn begin_is_rejected_while_in_flight() {
        let mut action = ManualMiningAction::new(2);
        assert!(action.begin());
        assert!(!action.begin());
        assert!(action.in_progress());
    }

    #[test]
    fn completes_after_exactly_fifty_steps_at_two_percent() {
        let mut action = ManualMiningAction::new(2);
        assert!(action.begin());

        for step in 1..50u8 {
            assert_eq!(
                action.advance(),
                MiningStep::InProgress {
                    progress_percent: step.saturating_mul(2),
                }
            );
        }
        assert_eq!(action.advance(), MiningStep::Completed);
        assert!(!action.in_progress());
    }

    #[test]
    fn idle_advance_does_nothing() {
        let mut action = ManualMiningAction::new(2);
        assert_eq!(action.advance(), MiningStep::Idle);
    }

    #[test]
    fn machine_is_reusable_after_completion() {
        let mut action = ManualMiningAction::new(50);
        assert!(action.begin());
        assert_eq!(
            action.advance(),
            MiningStep::InProgress {
                progress_percent: 50,
            }
        );
        assert_eq!(action.advance(), MiningStep::Completed);

        assert!(action.begin());
        assert_eq!(action.progress_percent(), Some(0));
    }

    #[test]
    fn odd_step_sizes_still_terminate() {
        let mut action = ManualMiningAction::new(3);
        assert!(action.begin());
        let mut steps = 1_u32;
        while action.advance() != MiningStep::Completed {
            assert!(action.in_progress());
            steps = steps.checked_add(1).unwrap();
        }
        // ceil(100 / 3)
        assert_eq!(steps, 34);
    }
}
