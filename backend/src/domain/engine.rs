//! The single owning handle over the ledger.
//!
//! `LedgerEngine` holds the record store together with the read-side
//! services (totals, table formatting, export). Callers either use the
//! per-command methods or hand a `LedgerCommand` to `execute`.

use std::path::Path;
use std::sync::Arc;

use shared::FormattedExpense;

use super::clock::Clock;
use super::commands::{
    AddExpenseCommand, AddExpenseResult, ClearExpensesResult, CommandOutcome, DeleteExpenseCommand,
    DeleteExpenseResult, ExpenseView, FilterExpensesQuery, LedgerCommand, UpdateExpenseCommand,
    UpdateExpenseResult,
};
use super::errors::LedgerResult;
use super::expense_filter::ExpenseFilter;
use super::expense_service::ExpenseService;
use super::expense_table::ExpenseTableService;
use super::export_service::{ExportFile, ExportService};
use super::models::ExpenseRecord;
use super::total_service::TotalService;
use crate::storage::LedgerStorage;

pub struct LedgerEngine {
    expense_service: ExpenseService,
    total_service: TotalService,
    table_service: ExpenseTableService,
    export_service: ExportService,
}

impl LedgerEngine {
    /// Engine with default display and export settings
    pub fn new(storage: Arc<dyn LedgerStorage>, clock: Arc<dyn Clock>) -> Self {
        Self::with_services(
            ExpenseService::new(storage, clock),
            TotalService::default(),
            ExpenseTableService::default(),
            ExportService::default(),
        )
    }

    pub fn with_services(
        expense_service: ExpenseService,
        total_service: TotalService,
        table_service: ExpenseTableService,
        export_service: ExportService,
    ) -> Self {
        Self {
            expense_service,
            total_service,
            table_service,
            export_service,
        }
    }

    pub fn execute(&mut self, command: LedgerCommand) -> LedgerResult<CommandOutcome> {
        match command {
            LedgerCommand::Add(cmd) => self.add_expense(cmd).map(CommandOutcome::Added),
            LedgerCommand::Update(cmd) => self.update_expense(cmd).map(CommandOutcome::Updated),
            LedgerCommand::Delete(cmd) => Ok(CommandOutcome::Deleted(self.delete_expense(cmd))),
            LedgerCommand::ClearAll => Ok(CommandOutcome::Cleared(self.clear_expenses())),
            LedgerCommand::Filter(query) => {
                Ok(CommandOutcome::Filtered(self.filter_expenses(&query)))
            }
        }
    }

    pub fn add_expense(&mut self, command: AddExpenseCommand) -> LedgerResult<AddExpenseResult> {
        self.expense_service.add_expense(command)
    }

    pub fn update_expense(
        &mut self,
        command: UpdateExpenseCommand,
    ) -> LedgerResult<UpdateExpenseResult> {
        self.expense_service.update_expense(command)
    }

    pub fn delete_expense(&mut self, command: DeleteExpenseCommand) -> DeleteExpenseResult {
        self.expense_service.delete_expense(command)
    }

    pub fn clear_expenses(&mut self) -> ClearExpensesResult {
        self.expense_service.clear_expenses()
    }

    /// Matching records plus the total of the filtered view.
    ///
    /// `ledger_size` always counts the whole ledger.
    pub fn filter_expenses(&self, query: &FilterExpensesQuery) -> ExpenseView {
        let filter = ExpenseFilter::new(&query.query, query.date.as_deref());
        let matches = filter.apply(self.expense_service.expenses());

        ExpenseView {
            total_amount: self.total_service.total(matches.iter().copied()),
            total_display: self.total_service.total_display(matches.iter().copied()),
            expenses: matches.into_iter().cloned().collect(),
            ledger_size: self.expense_service.len(),
        }
    }

    pub fn format_rows(&self, expenses: &[ExpenseRecord]) -> Vec<FormattedExpense> {
        self.table_service.format_expenses_for_table(expenses)
    }

    /// CSV export of the full ledger
    pub fn export_csv(&self) -> LedgerResult<String> {
        self.export_service.export_csv(self.expense_service.expenses())
    }

    pub fn export_to_directory(&self, directory: &Path) -> LedgerResult<ExportFile> {
        self.export_service
            .write_export(self.expense_service.expenses(), directory)
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        self.expense_service.expenses()
    }

    pub fn get_expense(&self, id: i64) -> Option<&ExpenseRecord> {
        self.expense_service.get_expense(id)
    }

    pub fn startup_warning(&self) -> Option<&str> {
        self.expense_service.startup_warning()
    }
}
