//! Running total over a set of expenses, with its display string.

use super::models::ExpenseRecord;
use super::numeral_formatter::{amount_in_words, group_with_separators};

pub const DEFAULT_CURRENCY_NAME: &str = "Pesos";

#[derive(Debug, Clone)]
pub struct TotalService {
    currency_name: String,
}

impl Default for TotalService {
    fn default() -> Self {
        Self::new(DEFAULT_CURRENCY_NAME)
    }
}

impl TotalService {
    pub fn new(currency_name: impl Into<String>) -> Self {
        Self {
            currency_name: currency_name.into(),
        }
    }

    pub fn currency_name(&self) -> &str {
        &self.currency_name
    }

    /// Sum of `total_amount` over `expenses`
    pub fn total<'a, I>(&self, expenses: I) -> f64
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        expenses.into_iter().map(|e| e.total_amount).sum()
    }

    /// `"240.00 (Two Hundred Forty Pesos)"`, or an empty string for no expenses.
    ///
    /// Words are read from the total rounded to cents, not from the floor of
    /// the raw total, so `999.999` reads as `1,000.00 (One Thousand ...)`
    /// rather than "Nine Hundred Ninety Nine". For totals already at two
    /// decimals both readings agree.
    pub fn total_display<'a, I>(&self, expenses: I) -> String
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut expenses = expenses.into_iter().peekable();
        if expenses.peek().is_none() {
            return String::new();
        }

        let sum = self.total(expenses);
        let cents_rounded = (sum * 100.0).round() / 100.0;
        format!(
            "{} ({} {})",
            group_with_separators(sum),
            amount_in_words(cents_rounded),
            self.currency_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::sample_expense;

    #[test]
    fn test_total_of_single_expense() {
        let service = TotalService::default();
        let expenses = vec![sample_expense(1, "Coffee", 120.0, 2.0)];

        assert_eq!(service.total(&expenses), 240.0);
        assert_eq!(service.total_display(&expenses), "240.00 (Two Hundred Forty Pesos)");
    }

    #[test]
    fn test_total_display_empty() {
        let service = TotalService::default();
        let expenses: Vec<ExpenseRecord> = Vec::new();

        assert_eq!(service.total(&expenses), 0.0);
        assert_eq!(service.total_display(&expenses), "");
    }

    #[test]
    fn test_total_display_groups_and_drops_cents_in_words() {
        let service = TotalService::default();
        let expenses = vec![
            sample_expense(1, "Laptop", 1000.0, 1.0),
            sample_expense(2, "Mouse", 234.5, 1.0),
        ];

        assert_eq!(
            service.total_display(&expenses),
            "1,234.50 (One Thousand Two Hundred Thirty Four Pesos)"
        );
    }

    #[test]
    fn test_words_follow_rounded_total() {
        let service = TotalService::new("Dollars");
        let expenses = vec![sample_expense(1, "Odd", 999.999, 1.0)];

        assert_eq!(service.total_display(&expenses), "1,000.00 (One Thousand Dollars)");
    }
}
