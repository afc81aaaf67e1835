//! Error kinds reported by the ledger engine.

use thiserror::Error;

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Empty name, non-positive or non-numeric amount/quantity
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("expense {0} not found")]
    NotFound(i64),

    /// The sanitizer/parser could not interpret the text as a numeral
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Save or load could not complete. Never fatal: the ledger keeps
    /// operating in memory.
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("export needs at least {required} expenses, ledger has {actual}")]
    InsufficientExpenses { required: usize, actual: usize },
}

impl LedgerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        LedgerError::InvalidInput(message.into())
    }

    /// Message suitable for a validation alert in the presentation layer
    pub fn user_message(&self) -> String {
        match self {
            LedgerError::InvalidInput(_) | LedgerError::NotANumber(_) => {
                "Please fill in both the text and number fields with valid values.".to_string()
            }
            LedgerError::NotFound(_) => "That expense no longer exists.".to_string(),
            LedgerError::PersistenceUnavailable(_) => {
                "Your expenses could not be saved; changes are kept until the app closes."
                    .to_string()
            }
            LedgerError::InsufficientExpenses { .. } => "Insufficient expenses.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(LedgerError::NotFound(42).to_string(), "expense 42 not found");
        assert_eq!(
            LedgerError::NotANumber("abc".to_string()).to_string(),
            "'abc' is not a number"
        );
        assert_eq!(
            LedgerError::InsufficientExpenses { required: 2, actual: 1 }.to_string(),
            "export needs at least 2 expenses, ledger has 1"
        );
    }

    #[test]
    fn test_user_messages_share_validation_alert() {
        let invalid = LedgerError::invalid_input("empty name");
        let nan = LedgerError::NotANumber("x".to_string());
        assert_eq!(invalid.user_message(), nan.user_message());
        assert_eq!(
            LedgerError::InsufficientExpenses { required: 2, actual: 0 }.user_message(),
            "Insufficient expenses."
        );
    }
}
