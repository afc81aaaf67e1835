//! Domain-level command and query types.
//!
//! The presentation layer talks to the engine exclusively through these
//! types. The REST layer maps the public DTOs from the `shared` crate onto
//! them; raw form text goes through the `from_input` constructors, which run
//! the input sanitizer.

use super::errors::{LedgerError, LedgerResult};
use super::input_sanitizer::{parse_amount, parse_quantity};
use super::models::ExpenseRecord;

/// Input for creating a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExpenseCommand {
    pub name: String,
    pub unit_amount: f64,
    /// `None` (or anything that is not a positive count) means 1
    pub quantity: Option<f64>,
}

impl AddExpenseCommand {
    pub fn new(name: impl Into<String>, unit_amount: f64, quantity: Option<f64>) -> Self {
        Self {
            name: name.into(),
            unit_amount,
            quantity,
        }
    }

    /// Build from the raw text of the add form.
    pub fn from_input(name: &str, amount: &str, quantity: Option<&str>) -> LedgerResult<Self> {
        let unit_amount = parse_amount(amount)
            .map_err(|e| LedgerError::invalid_input(format!("amount: {}", e)))?;
        Ok(Self {
            name: name.to_string(),
            unit_amount,
            quantity: quantity.and_then(parse_quantity),
        })
    }
}

/// Input for editing an expense.
///
/// Name and amount are validated as a pair: an omitted field keeps its
/// current value, and if either supplied value is invalid neither is applied.
/// A supplied amount that is not a finite positive number (NaN included) is
/// invalid. Quantity is applied on its own whenever it is a positive count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateExpenseCommand {
    pub id: i64,
    pub name: Option<String>,
    pub unit_amount: Option<f64>,
    pub quantity: Option<f64>,
}

impl UpdateExpenseCommand {
    /// Build from the raw text of the edit form.
    pub fn from_input(
        id: i64,
        name: Option<&str>,
        amount: Option<&str>,
        quantity: Option<&str>,
    ) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
            // an unparseable amount still has to reject the name/amount pair
            unit_amount: amount.map(|raw| parse_amount(raw).unwrap_or(f64::NAN)),
            quantity: quantity.and_then(parse_quantity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteExpenseCommand {
    pub id: i64,
}

/// Query for the filtered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpensesQuery {
    pub query: String,
    pub date: Option<String>,
}

impl FilterExpensesQuery {
    pub fn new(query: impl Into<String>, date: Option<String>) -> Self {
        Self {
            query: query.into(),
            date,
        }
    }
}

/// Every command the presentation layer can issue.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    Add(AddExpenseCommand),
    Update(UpdateExpenseCommand),
    Delete(DeleteExpenseCommand),
    ClearAll,
    Filter(FilterExpensesQuery),
}

/// Result of adding an expense.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExpenseResult {
    pub expense: ExpenseRecord,
    pub persistence_warning: Option<String>,
}

/// Result of an edit of an existing expense.
///
/// `expense` is the record as it now stands. When the name/amount pair was
/// refused, `rejected` holds the reason; a quantity change may still have
/// been applied and saved.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpenseResult {
    pub expense: ExpenseRecord,
    pub persistence_warning: Option<String>,
    pub rejected: Option<LedgerError>,
}

impl UpdateExpenseResult {
    pub fn is_rejected(&self) -> bool {
        self.rejected.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteExpenseResult {
    pub id: i64,
    pub removed: bool,
    pub persistence_warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClearExpensesResult {
    pub cleared_count: usize,
    pub persistence_warning: Option<String>,
}

/// Derived view handed to the presentation layer after filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseView {
    pub expenses: Vec<ExpenseRecord>,
    pub total_amount: f64,
    pub total_display: String,
    pub ledger_size: usize,
}

/// What `LedgerEngine::execute` produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Added(AddExpenseResult),
    Updated(UpdateExpenseResult),
    Deleted(DeleteExpenseResult),
    Cleared(ClearExpensesResult),
    Filtered(ExpenseView),
}
