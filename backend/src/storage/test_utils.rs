//! Test utilities: temp-dir environments and storage doubles.
//!
//! `TestEnvironment` owns its `TempDir`, so the data directory is removed
//! when the environment is dropped, even if the test panics.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, TimeZone};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

use super::file::FileConnection;
use super::traits::LedgerStorage;
use crate::domain::models::ExpenseRecord;

pub struct TestEnvironment {
    pub connection: FileConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = FileConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Storage that keeps the last saved ledger in memory
#[derive(Default)]
pub struct InMemoryStorage {
    saved: Mutex<Option<Vec<ExpenseRecord>>>,
    save_count: AtomicUsize,
}

impl InMemoryStorage {
    pub fn with_expenses(expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            saved: Mutex::new(Some(expenses)),
            save_count: AtomicUsize::new(0),
        }
    }

    pub fn saved(&self) -> Option<Vec<ExpenseRecord>> {
        self.saved.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl LedgerStorage for InMemoryStorage {
    fn load_expenses(&self) -> Result<Option<Vec<ExpenseRecord>>> {
        Ok(self.saved())
    }

    fn save_expenses(&self, expenses: &[ExpenseRecord]) -> Result<()> {
        *self.saved.lock().unwrap() = Some(expenses.to_vec());
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Storage whose every call fails, like an unwritable data directory
#[derive(Default)]
pub struct FailingStorage;

impl LedgerStorage for FailingStorage {
    fn load_expenses(&self) -> Result<Option<Vec<ExpenseRecord>>> {
        Err(anyhow!("disk unavailable"))
    }

    fn save_expenses(&self, _expenses: &[ExpenseRecord]) -> Result<()> {
        Err(anyhow!("disk unavailable"))
    }
}

/// 31 July 2024, 2:05 PM local time
pub fn test_instant() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 7, 31, 14, 5, 0).unwrap()
}

pub fn sample_expense(id: i64, name: &str, unit_amount: f64, quantity: f64) -> ExpenseRecord {
    ExpenseRecord::new(id, name.to_string(), unit_amount, quantity, test_instant())
}
