//! Search and date filter over the ledger.
//!
//! The name query is a case-insensitive substring match and is not trimmed.
//! The date is compared against `created_date`; ISO (`YYYY-MM-DD`) input from
//! a date picker is converted to the stored `DD/MM/YYYY` form first.

use chrono::NaiveDate;

use super::models::expense::CREATED_DATE_FORMAT;
use super::models::ExpenseRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    query: String,
    date: Option<String>,
}

impl ExpenseFilter {
    pub fn new(query: &str, date: Option<&str>) -> Self {
        Self {
            query: query.to_lowercase(),
            date: date
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(normalize_filter_date),
        }
    }

    pub fn matches(&self, expense: &ExpenseRecord) -> bool {
        let name_matches =
            self.query.is_empty() || expense.name.to_lowercase().contains(&self.query);
        let date_matches = self
            .date
            .as_deref()
            .map_or(true, |date| expense.created_date == date);
        name_matches && date_matches
    }

    /// Matching records in ledger order
    pub fn apply<'a>(&self, expenses: &'a [ExpenseRecord]) -> Vec<&'a ExpenseRecord> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Convert a filter date to the `created_date` storage form.
///
/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`; anything else is returned as given
/// and will only match a record with that exact text.
pub fn normalize_filter_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, CREATED_DATE_FORMAT))
        .map(|date| date.format(CREATED_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn filter_expenses<'a>(
    expenses: &'a [ExpenseRecord],
    query: &str,
    date: Option<&str>,
) -> Vec<&'a ExpenseRecord> {
    ExpenseFilter::new(query, date).apply(expenses)
}
