use crate::domain::models::ExpenseRecord;
use crate::domain::{
    AddExpenseCommand, ExpenseView, FilterExpensesQuery, LedgerResult, UpdateExpenseCommand,
};
use shared::{
    AddExpenseRequest, Expense as SharedExpense, ExpenseListRequest, ExpenseListResponse,
    FormattedExpense, UpdateExpenseRequest,
};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: ExpenseRecord) -> SharedExpense {
        SharedExpense {
            id: domain.id,
            name: domain.name,
            unit_amount: domain.unit_amount,
            quantity: domain.quantity,
            total_amount: domain.total_amount,
            created_date: domain.created_date,
            created_time: domain.created_time,
        }
    }

    pub fn to_add_command(request: &AddExpenseRequest) -> LedgerResult<AddExpenseCommand> {
        AddExpenseCommand::from_input(&request.name, &request.amount, request.quantity.as_deref())
    }

    pub fn to_update_command(id: i64, request: &UpdateExpenseRequest) -> UpdateExpenseCommand {
        UpdateExpenseCommand::from_input(
            id,
            request.name.as_deref(),
            request.amount.as_deref(),
            request.quantity.as_deref(),
        )
    }

    pub fn to_filter_query(request: ExpenseListRequest) -> FilterExpensesQuery {
        FilterExpensesQuery::new(request.query.unwrap_or_default(), request.date)
    }

    pub fn to_list_response(view: ExpenseView, rows: Vec<FormattedExpense>) -> ExpenseListResponse {
        ExpenseListResponse {
            expenses: rows,
            total_amount: view.total_amount,
            total_display: view.total_display,
            ledger_size: view.ledger_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::sample_expense;

    #[test]
    fn test_to_dto_copies_every_field() {
        let dto = ExpenseMapper::to_dto(sample_expense(5, "Coffee", 120.0, 2.0));

        assert_eq!(dto.id, 5);
        assert_eq!(dto.name, "Coffee");
        assert_eq!(dto.total_amount, 240.0);
        assert_eq!(dto.created_date, "31/07/2024");
        assert_eq!(dto.created_time, "02:05 PM");
    }

    #[test]
    fn test_missing_query_matches_everything() {
        let query = ExpenseMapper::to_filter_query(ExpenseListRequest::default());
        assert_eq!(query, FilterExpensesQuery::default());
    }
}
