//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Withdrawal requests are the only engine entity that needs a durable
//! identity (the receipt a front end shows the player). The ID uses
//! UUID v7 (time-ordered) so receipts sort by creation time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for an accepted withdrawal request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct WithdrawalId(pub Uuid);

impl WithdrawalId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for WithdrawalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for WithdrawalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for WithdrawalId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<WithdrawalId> for Uuid {
    fn from(id: WithdrawalId) -> Self {
        id.0
    }
}
