//! Export service domain logic.
//!
//! Builds a read-only snapshot of the whole ledger, appends a synthetic
//! "Total" row and renders the result as CSV. The REST layer either returns
//! the CSV text directly or asks for it to be written into the data
//! directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info};

use super::errors::{LedgerError, LedgerResult};
use super::models::ExpenseRecord;
use super::numeral_formatter::group_with_separators;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "₱";
pub const DEFAULT_MIN_EXPORT_RECORDS: usize = 2;
pub const EXPORT_FILE_NAME: &str = "exported_expenses.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub currency_symbol: String,
    pub min_export_records: usize,
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            min_export_records: DEFAULT_MIN_EXPORT_RECORDS,
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

/// One CSV line of the export. Every column is text so the total row can
/// leave `id` empty and carry a currency string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub id: String,
    pub name: String,
    pub unit_amount: String,
    pub quantity: String,
    pub total_amount: String,
    pub created_date: String,
    pub created_time: String,
}

impl From<&ExpenseRecord> for ExportRow {
    fn from(expense: &ExpenseRecord) -> Self {
        Self {
            id: expense.id.to_string(),
            name: expense.name.clone(),
            unit_amount: format!("{:.2}", expense.unit_amount),
            quantity: format!("{:.0}", expense.quantity.trunc()),
            total_amount: format!("{:.2}", expense.total_amount),
            created_date: expense.created_date.clone(),
            created_time: expense.created_time.clone(),
        }
    }
}

/// Where an export landed
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub path: PathBuf,
    /// Expense rows written, not counting the total row
    pub expense_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ExportService {
    config: ExportConfig,
}

impl ExportService {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Ledger rows followed by the total row.
    ///
    /// The total is taken over the full, unfiltered ledger.
    pub fn snapshot(&self, expenses: &[ExpenseRecord]) -> LedgerResult<Vec<ExportRow>> {
        if expenses.len() < self.config.min_export_records {
            return Err(LedgerError::InsufficientExpenses {
                required: self.config.min_export_records,
                actual: expenses.len(),
            });
        }

        let total: f64 = expenses.iter().map(|e| e.total_amount).sum();
        let mut rows: Vec<ExportRow> = expenses.iter().map(ExportRow::from).collect();
        rows.push(ExportRow {
            id: String::new(),
            name: "Total".to_string(),
            unit_amount: String::new(),
            quantity: String::new(),
            total_amount: format!(
                "{}{}",
                self.config.currency_symbol,
                group_with_separators(total)
            ),
            created_date: String::new(),
            created_time: String::new(),
        });

        Ok(rows)
    }

    pub fn render_csv(&self, rows: &[ExportRow]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flushing csv: {}", e.error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Snapshot and render in one step
    pub fn export_csv(&self, expenses: &[ExpenseRecord]) -> LedgerResult<String> {
        let rows = self.snapshot(expenses)?;
        self.render_csv(&rows).map_err(|e| {
            error!("❌ Rendering export failed: {:#}", e);
            LedgerError::PersistenceUnavailable(e.to_string())
        })
    }

    /// Write the CSV export into `directory`, replacing any previous export.
    pub fn write_export(
        &self,
        expenses: &[ExpenseRecord],
        directory: &Path,
    ) -> LedgerResult<ExportFile> {
        let csv = self.export_csv(expenses)?;
        let path = directory.join(&self.config.file_name);

        write_file_atomically(&path, csv.as_bytes()).map_err(|e| {
            error!("❌ Export to {} failed: {:#}", path.display(), e);
            LedgerError::PersistenceUnavailable(e.to_string())
        })?;

        info!("📄 Exported {} expenses to {}", expenses.len(), path.display());
        Ok(ExportFile {
            path,
            expense_count: expenses.len(),
        })
    }
}

fn write_file_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("csv.tmp");
    std::fs::write(&temp_path, contents)
        .with_context(|| format!("writing {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("moving export into place at {}", path.display()))?;
    Ok(())
}
