//! Withdrawal validation and application.
//!
//! Only the local ledger effect is modeled: a successful request debits
//! the balance and produces a receipt. No settlement to the destination
//! ever occurs.

use rust_decimal::Decimal;
use tracing::debug;

use idlemine_types::{GameState, WithdrawalId};

use crate::EconomyError;

/// Fixed minimum withdrawal amount in CR.
pub const MIN_WITHDRAWAL: Decimal = Decimal::ONE_HUNDRED;

/// Record of one accepted withdrawal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalReceipt {
    /// Receipt identifier for the request.
    pub id: WithdrawalId,
    /// The debited amount.
    pub amount: Decimal,
    /// The destination identifier, trimmed of surrounding whitespace.
    pub destination: String,
}

/// Validate and apply a withdrawal request.
///
/// Validation order is fixed, first failure wins: destination, then
/// minimum amount, then balance. Non-numeric amounts never reach this
/// function -- the front end's parser rejects them before a [`Decimal`]
/// exists.
///
/// # Errors
///
/// Returns [`EconomyError::MissingDestination`],
/// [`EconomyError::BelowMinimumWithdrawal`], or
/// [`EconomyError::InsufficientFunds`] -- in that precedence -- without
/// mutating state.
pub fn withdraw(
    state: &mut GameState,
    amount: Decimal,
    destination: &str,
) -> Result<WithdrawalReceipt, EconomyError> {
    let destination = destination.trim();
    if destination.is_empty() {
        return Err(EconomyError::MissingDestination);
    }

    if amount < MIN_WITHDRAWAL {
        return Err(EconomyError::BelowMinimumWithdrawal { amount });
    }

    if amount > state.balance {
        return Err(EconomyError::InsufficientFunds {
            required: amount,
            available: state.balance,
        });
    }

    state.balance = state.balance.saturating_sub(amount);
    let receipt = WithdrawalReceipt {
        id: WithdrawalId::new(),
        amount,
        destination: destination.to_owned(),
    };

    debug!(id = %receipt.id, %amount, destination, "withdrawal accepted");

    Ok(receipt)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn funded_state(balance: Decimal) -> GameState {
        let mut state = GameState::new();
        state.balance = balance;
        state
    }

    #[test]
    fn blank_destination_is_rejected_first() {
        let mut state = funded_state(dec!(10));
        // Amount is also invalid, but the destination check wins.
        let err = withdraw(&mut state, dec!(1), "   ").unwrap_err();
        assert_eq!(err, EconomyError::MissingDestination);
        assert_eq!(state.balance, dec!(10));
    }

    #[test]
    fn below_minimum_is_rejected() {
        let mut state = funded_state(dec!(500));
        let err = withdraw(&mut state, dec!(50), "wallet-1").unwrap_err();
        assert_eq!(err, EconomyError::BelowMinimumWithdrawal { amount: dec!(50) });
        assert_eq!(state.balance, dec!(500));
    }

    #[test]
    fn overdraw_is_rejected() {
        let mut state = funded_state(dec!(150));
        let err = withdraw(&mut state, dec!(200), "wallet-1").unwrap_err();
        assert_eq!(
            err,
            EconomyError::InsufficientFunds {
                required: dec!(200),
                available: dec!(150),
            }
        );
        assert_eq!(state.balance, dec!(150));
    }

    #[test]
    fn accepted_withdrawal_debits_exactly() {
        let mut state = funded_state(dec!(250.50));
        let receipt = withdraw(&mut state, dec!(100.25), "  wallet-1  ").unwrap();
        assert_eq!(receipt.amount, dec!(100.25));
        assert_eq!(receipt.destination, "wallet-1");
        assert_eq!(state.balance, dec!(150.25));
    }

    #[test]
    fn minimum_amount_is_inclusive() {
        let mut state = funded_state(dec!(100));
        let receipt = withdraw(&mut state, dec!(100), "wallet-1").unwrap();
        assert_eq!(receipt.amount, dec!(100));
        assert_eq!(state.balance, Decimal::ZERO);
    }

    #[test]
    fn withdrawal_does_not_touch_mined() {
        let mut state = funded_state(dec!(1000));
        state.mined = dec!(1000);
        withdraw(&mut state, dec!(500), "wallet-1").unwrap();
        assert_eq!(state.mined, dec!(1000));
    }
}
