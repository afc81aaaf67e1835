//! # Storage Traits
//!
//! The persistence gateway seen from the domain layer. The ledger is saved
//! and loaded as a whole; there are no per-record operations.

use anyhow::Result;

use crate::domain::models::ExpenseRecord;

/// Load/save the full expense ledger.
///
/// The record store calls `load_expenses` once at startup and
/// `save_expenses` after every committed mutation.
pub trait LedgerStorage: Send + Sync {
    /// Read the persisted ledger. `Ok(None)` means nothing has been saved yet.
    fn load_expenses(&self) -> Result<Option<Vec<ExpenseRecord>>>;

    /// Replace the persisted ledger with `expenses`, in order.
    fn save_expenses(&self, expenses: &[ExpenseRecord]) -> Result<()>;
}
