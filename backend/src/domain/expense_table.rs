//! Expense table domain logic.
//!
//! Turns ledger records into the display rows the presentation layer renders:
//! names truncated to a configurable width, amounts grouped with separators,
//! quantities as whole counts and creation dates in long form
//! (`Jul 31, 2024`). Storage never sees any of this; the full name is always
//! carried alongside the truncated one.

use serde::{Deserialize, Serialize};
use shared::FormattedExpense;

use super::models::ExpenseRecord;
use super::numeral_formatter::group_with_separators;

pub const DEFAULT_NAME_DISPLAY_LIMIT: usize = 35;
const ELLIPSIS: &str = "...";
const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Configuration for expense table display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseTableConfig {
    /// Longest name shown before truncation, in characters
    pub name_display_limit: usize,
}

impl Default for ExpenseTableConfig {
    fn default() -> Self {
        Self {
            name_display_limit: DEFAULT_NAME_DISPLAY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseTableService {
    config: ExpenseTableConfig,
}

impl ExpenseTableService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExpenseTableConfig) -> Self {
        Self { config }
    }

    pub fn format_expenses_for_table<'a, I>(&self, expenses: I) -> Vec<FormattedExpense>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        expenses
            .into_iter()
            .map(|e| self.format_single_expense(e))
            .collect()
    }

    pub fn format_single_expense(&self, expense: &ExpenseRecord) -> FormattedExpense {
        FormattedExpense {
            id: expense.id,
            display_name: self.display_name(&expense.name),
            full_name: expense.name.clone(),
            formatted_unit_amount: group_with_separators(expense.unit_amount),
            formatted_quantity: format!("{:.0}", expense.quantity.trunc()),
            formatted_total_amount: group_with_separators(expense.total_amount),
            formatted_date: self.format_date(expense),
            created_time: expense.created_time.clone(),
        }
    }

    /// Truncate `name` to the display limit, ending in "..." when shortened
    pub fn display_name(&self, name: &str) -> String {
        let limit = self.config.name_display_limit;
        if name.chars().count() <= limit {
            return name.to_string();
        }

        let keep = limit.saturating_sub(ELLIPSIS.len());
        let mut truncated: String = name.chars().take(keep).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    }

    /// Long-form creation date; falls back to the stored text if unparseable
    pub fn format_date(&self, expense: &ExpenseRecord) -> String {
        expense
            .created_on()
            .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_else(|| expense.created_date.clone())
    }
}
