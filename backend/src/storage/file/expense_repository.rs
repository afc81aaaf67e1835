use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use std::fs;
use tracing::{debug, info, warn};

use super::connection::FileConnection;
use crate::domain::models::ExpenseRecord;
use crate::storage::traits::LedgerStorage;

/// JSON-file ledger repository
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    connection: FileConnection,
}

impl ExpenseRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    /// Move an unreadable ledger document aside so the next save cannot
    /// overwrite it.
    fn quarantine_corrupt_file(&self) -> Result<()> {
        let path = self.connection.expenses_file_path();
        let mut quarantine_name = path.as_os_str().to_os_string();
        quarantine_name.push(format!(".corrupt-{}", Utc::now().timestamp_millis()));

        fs::rename(&path, &quarantine_name)
            .with_context(|| format!("quarantining corrupt ledger {}", path.display()))?;
        warn!("⚠️ Moved unreadable ledger to {:?}", quarantine_name);
        Ok(())
    }
}

impl LedgerStorage for ExpenseRepository {
    fn load_expenses(&self) -> Result<Option<Vec<ExpenseRecord>>> {
        let path = self.connection.expenses_file_path();
        if !path.exists() {
            info!("📄 No ledger found at {}, starting empty", path.display());
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("reading ledger {}", path.display()))?;

        // A literal `null` document is treated like a missing one
        match serde_json::from_str::<Option<Vec<ExpenseRecord>>>(&contents) {
            Ok(expenses) => {
                debug!(
                    "Loaded {} expenses from {:?}",
                    expenses.as_ref().map_or(0, Vec::len),
                    path
                );
                Ok(expenses)
            }
            Err(parse_error) => {
                if let Err(e) = self.quarantine_corrupt_file() {
                    warn!("⚠️ {}", e);
                }
                Err(anyhow!("ledger {} is corrupt: {}", path.display(), parse_error))
            }
        }
    }

    fn save_expenses(&self, expenses: &[ExpenseRecord]) -> Result<()> {
        let path = self.connection.expenses_file_path();
        let json = serde_json::to_string_pretty(expenses)?;
        self.connection.write_atomically(&path, json.as_bytes())?;
        debug!("Saved {} expenses to {:?}", expenses.len(), path);
        Ok(())
    }
}
