//! Economy rules for the Idlemine engine.
//!
//! Every currency amount in this crate is a [`Decimal`] -- no floating
//! point. All quantity arithmetic is checked or saturating; nothing here
//! panics.
//!
//! # Architecture
//!
//! - [`rate`] -- The income formulas shared by automatic accrual, manual
//!   mining, and offline reconciliation.
//! - [`pricing`] -- The geometric upgrade price curve.
//! - [`purchase`] -- Upgrade purchase validation and application.
//! - [`withdraw`] -- Withdrawal validation and application.
//! - [`offline`] -- One-shot offline catch-up credit at load time.
//!
//! # Validation policy
//!
//! Player-facing failures are typed [`EconomyError`] values returned to
//! the caller for display. They never mutate state: an operation either
//! applies completely or not at all.

pub mod offline;
pub mod pricing;
pub mod purchase;
pub mod rate;
pub mod withdraw;

// Re-export primary entry points at crate root.
pub use offline::{reconcile, OfflineReport};
pub use pricing::price;
pub use purchase::{buy, PurchaseReceipt};
pub use withdraw::{withdraw, WithdrawalReceipt, MIN_WITHDRAWAL};

use rust_decimal::Decimal;

use idlemine_types::ErrorKind;

/// Errors produced by economy validation.
///
/// Each variant maps onto one player-facing [`ErrorKind`]; the engine
/// forwards these as `error` events rather than raising them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    /// The balance does not cover the required amount.
    #[error("insufficient funds: need {required} CR, have {available} CR")]
    InsufficientFunds {
        /// The amount the operation needed.
        required: Decimal,
        /// The spendable balance at validation time.
        available: Decimal,
    },

    /// The withdrawal destination identifier was empty or blank.
    #[error("withdrawal destination is missing")]
    MissingDestination,

    /// The withdrawal amount was below the fixed minimum.
    #[error("minimum withdrawal is {MIN_WITHDRAWAL} CR, got {amount} CR")]
    BelowMinimumWithdrawal {
        /// The rejected amount.
        amount: Decimal,
    },
}

impl EconomyError {
    /// The player-facing error category for this failure.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::MissingDestination => ErrorKind::MissingDestination,
            Self::BelowMinimumWithdrawal { .. } => ErrorKind::BelowMinimumWithdrawal,
        }
    }
}
