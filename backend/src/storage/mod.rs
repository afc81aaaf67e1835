//! # Storage Module
//!
//! Persistence gateway for the expense ledger.
//!
//! The domain layer only knows the [`LedgerStorage`] trait; the file-backed
//! implementation keeps the ledger as a single JSON document inside the data
//! directory:
//!
//! ```text
//! data/
//! ├── config.yaml
//! ├── expenses.json           ← the ledger
//! └── exported_expenses.csv   ← written on export
//! ```

pub mod file;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use file::{ExpenseRepository, FileConnection};
pub use traits::LedgerStorage;
