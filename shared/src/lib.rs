use serde::{Deserialize, Serialize};

/// Expense record as exchanged with a presentation layer.
///
/// `id` is the creation timestamp in epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Trimmed expense name, never truncated
    pub name: String,
    /// Cost of a single item
    pub unit_amount: f64,
    /// Integer-like item count
    pub quantity: f64,
    /// Always `unit_amount * quantity`
    pub total_amount: f64,
    /// Creation date in `DD/MM/YYYY` form
    pub created_date: String,
    /// Creation time in `hh:mm AM/PM` form
    pub created_time: String,
}

/// Represents an expense formatted for table display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedExpense {
    pub id: i64,
    /// Name truncated to the display limit (with a trailing "...")
    pub display_name: String,
    /// Untruncated name, for tooltips and the edit form
    pub full_name: String,
    pub formatted_unit_amount: String,
    pub formatted_quantity: String,
    pub formatted_total_amount: String,
    /// Long-form date such as "Jul 31, 2024"
    pub formatted_date: String,
    pub created_time: String,
}

/// Query for the filtered expense view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListRequest {
    /// Case-insensitive substring matched against expense names
    pub query: Option<String>,
    /// Creation date, either `YYYY-MM-DD` (date picker) or `DD/MM/YYYY`
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<FormattedExpense>,
    /// Sum of the filtered view
    pub total_amount: f64,
    /// e.g. "240.00 (Two Hundred Forty Pesos)"; empty when the view is empty
    pub total_display: String,
    /// Number of records in the whole ledger, regardless of the filter
    pub ledger_size: usize,
}

/// Raw, unsanitized form input for a new expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpenseRequest {
    pub name: String,
    /// Amount as typed, grouping separators allowed ("1,234.50")
    pub amount: String,
    /// Quantity as typed; absent or invalid means 1
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpenseResponse {
    pub expense: Expense,
    pub persistence_warning: Option<String>,
}

/// Raw edit-form input. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub name: Option<String>,
    pub amount: Option<String>,
    pub quantity: Option<String>,
}

/// Record after an edit. `error` is set when the name/amount pair was
/// refused; a quantity change may still have been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseResponse {
    pub expense: Expense,
    pub persistence_warning: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub id: i64,
    pub removed: bool,
    pub persistence_warning: Option<String>,
}

/// Bulk clear request; `confirmation` must read "CONFIRM"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearExpensesRequest {
    pub confirmation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearExpensesResponse {
    pub cleared_count: usize,
    pub persistence_warning: Option<String>,
}

/// Result of writing the export file into the data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToFileResponse {
    pub file_path: String,
    /// Expense rows written, excluding the synthetic total row
    pub expense_count: usize,
}

/// A single keystroke-level formatting request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatInputRequest {
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatInputResponse {
    pub value: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
