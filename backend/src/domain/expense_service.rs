//! Expense service: the record store of the ledger.
//!
//! `ExpenseService` exclusively owns the ordered list of expense records. It
//! is the only place the ledger is mutated; every committed mutation is
//! followed by a save through the persistence gateway. Storage failures never
//! abort a command: the ledger keeps working in memory and the failure comes
//! back as a `persistence_warning`.
use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info, warn};

use super::clock::Clock;
use super::commands::{
    AddExpenseCommand, AddExpenseResult, ClearExpensesResult, DeleteExpenseCommand,
    DeleteExpenseResult, UpdateExpenseCommand, UpdateExpenseResult,
};
use super::errors::{LedgerError, LedgerResult};
use super::input_sanitizer::normalize_quantity;
use super::models::ExpenseRecord;
use crate::storage::LedgerStorage;

pub struct ExpenseService {
    expenses: Vec<ExpenseRecord>,
    storage: Arc<dyn LedgerStorage>,
    clock: Arc<dyn Clock>,
    last_issued_id: i64,
    startup_warning: Option<String>,
}

impl ExpenseService {
    /// Create the store and hydrate it from `storage`.
    ///
    /// Missing or unreadable data yields an empty ledger; the reason is kept
    /// in `startup_warning`.
    pub fn new(storage: Arc<dyn LedgerStorage>, clock: Arc<dyn Clock>) -> Self {
        let (expenses, startup_warning) = match storage.load_expenses() {
            Ok(Some(loaded)) => (Self::restore_invariants(loaded), None),
            Ok(None) => (Vec::new(), None),
            Err(e) => {
                let warning = LedgerError::PersistenceUnavailable(e.to_string());
                warn!("⚠️ Could not load ledger, starting empty: {}", e);
                (Vec::new(), Some(warning.to_string()))
            }
        };

        let last_issued_id = expenses.iter().map(|e| e.id).max().unwrap_or(0);
        info!("📒 Ledger ready with {} expenses", expenses.len());

        Self {
            expenses,
            storage,
            clock,
            last_issued_id,
            startup_warning,
        }
    }

    /// Why hydration fell back to an empty ledger, if it did
    pub fn startup_warning(&self) -> Option<&str> {
        self.startup_warning.as_deref()
    }

    /// The full ledger in insertion order
    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn get_expense(&self, id: i64) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn add_expense(&mut self, command: AddExpenseCommand) -> LedgerResult<AddExpenseResult> {
        let name = command.name.trim();
        Self::validate_name_and_amount(name, command.unit_amount)?;
        let quantity = command.quantity.and_then(normalize_quantity).unwrap_or(1.0);
        Self::validate_total(command.unit_amount, quantity)?;

        let now = self.clock.now();
        let id = self.next_id(now.timestamp_millis());
        let expense = ExpenseRecord::new(id, name.to_string(), command.unit_amount, quantity, now);

        self.expenses.push(expense.clone());
        let persistence_warning = self.persist();

        info!(
            "✅ Added expense {} '{}': {:.2} x {} = {:.2}",
            expense.id, expense.name, expense.unit_amount, expense.quantity, expense.total_amount
        );

        Ok(AddExpenseResult {
            expense,
            persistence_warning,
        })
    }

    /// Edit an expense in place.
    ///
    /// Name and amount change together or not at all; a rejected pair is
    /// reported in `rejected`. Quantity is applied whenever it is valid, even
    /// when the pair is rejected, and the total is re-derived either way. Any
    /// change that reaches memory is saved, and a failed save comes back in
    /// `persistence_warning` whether or not the pair was accepted.
    pub fn update_expense(
        &mut self,
        command: UpdateExpenseCommand,
    ) -> LedgerResult<UpdateExpenseResult> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == command.id)
            .ok_or(LedgerError::NotFound(command.id))?;

        let new_quantity = command.quantity.and_then(normalize_quantity);
        let current = &self.expenses[index];
        let pair = {
            let name = command
                .name
                .as_deref()
                .map(str::trim)
                .unwrap_or(current.name.as_str());
            let unit_amount = command.unit_amount.unwrap_or(current.unit_amount);
            Self::validate_name_and_amount(name, unit_amount)
                .and_then(|()| {
                    Self::validate_total(unit_amount, new_quantity.unwrap_or(current.quantity))
                })
                .map(|()| (name.to_string(), unit_amount))
        };
        let amount_after = pair
            .as_ref()
            .map_or(current.unit_amount, |(_, unit_amount)| *unit_amount);
        let new_quantity =
            new_quantity.filter(|quantity| Self::validate_total(amount_after, *quantity).is_ok());

        let expense = &mut self.expenses[index];
        if let Ok((name, unit_amount)) = &pair {
            expense.name = name.clone();
            expense.unit_amount = *unit_amount;
        }
        let quantity_changed = match new_quantity {
            Some(quantity) if quantity != expense.quantity => {
                expense.quantity = quantity;
                true
            }
            _ => false,
        };
        expense.recompute_total();
        let updated = expense.clone();

        let rejected = pair.err();
        let persistence_warning = if rejected.is_none() || quantity_changed {
            self.persist()
        } else {
            None
        };

        match &rejected {
            None => info!(
                "✏️ Updated expense {} '{}': {:.2} x {} = {:.2}",
                updated.id,
                updated.name,
                updated.unit_amount,
                updated.quantity,
                updated.total_amount
            ),
            Some(e) => warn!("❌ Rejected name/amount change for expense {}: {}", command.id, e),
        }

        Ok(UpdateExpenseResult {
            expense: updated,
            persistence_warning,
            rejected,
        })
    }

    pub fn delete_expense(&mut self, command: DeleteExpenseCommand) -> DeleteExpenseResult {
        let Some(index) = self.expenses.iter().position(|e| e.id == command.id) else {
            warn!("Expense {} not found for deletion", command.id);
            return DeleteExpenseResult {
                id: command.id,
                removed: false,
                persistence_warning: None,
            };
        };

        let removed = self.expenses.remove(index);
        let persistence_warning = self.persist();
        info!("🗑️ Deleted expense {} '{}'", removed.id, removed.name);

        DeleteExpenseResult {
            id: command.id,
            removed: true,
            persistence_warning,
        }
    }

    /// Empty the ledger unconditionally and persist the empty state.
    pub fn clear_expenses(&mut self) -> ClearExpensesResult {
        let cleared_count = self.expenses.len();
        self.expenses.clear();
        let persistence_warning = self.persist();
        info!("🧹 Cleared {} expenses", cleared_count);

        ClearExpensesResult {
            cleared_count,
            persistence_warning,
        }
    }

    fn validate_name_and_amount(name: &str, unit_amount: f64) -> LedgerResult<()> {
        if name.is_empty() {
            return Err(LedgerError::invalid_input("expense name cannot be empty"));
        }
        if !(unit_amount.is_finite() && unit_amount > 0.0) {
            return Err(LedgerError::invalid_input(format!(
                "amount must be greater than zero, got {}",
                unit_amount
            )));
        }
        Ok(())
    }

    /// `unit_amount * quantity` must stay representable; an infinite total
    /// cannot be written to the ledger document.
    fn validate_total(unit_amount: f64, quantity: f64) -> LedgerResult<()> {
        if (unit_amount * quantity).is_finite() {
            Ok(())
        } else {
            Err(LedgerError::invalid_input(format!(
                "total of {} x {} is too large",
                unit_amount, quantity
            )))
        }
    }

    /// Creation-timestamp ids, bumped past the last issued one on collision
    fn next_id(&mut self, timestamp_millis: i64) -> i64 {
        let id = if timestamp_millis > self.last_issued_id {
            timestamp_millis
        } else {
            self.last_issued_id + 1
        };
        self.last_issued_id = id;
        id
    }

    fn persist(&self) -> Option<String> {
        match self.storage.save_expenses(&self.expenses) {
            Ok(()) => None,
            Err(e) => {
                let warning = LedgerError::PersistenceUnavailable(e.to_string());
                error!("❌ Ledger kept in memory only: {}", warning);
                Some(warning.to_string())
            }
        }
    }

    /// Drop records that break the ledger invariants and re-derive totals.
    fn restore_invariants(loaded: Vec<ExpenseRecord>) -> Vec<ExpenseRecord> {
        let mut seen_ids = HashSet::new();
        let mut expenses = Vec::with_capacity(loaded.len());

        for mut expense in loaded {
            expense.name = expense.name.trim().to_string();
            if Self::validate_name_and_amount(&expense.name, expense.unit_amount).is_err() {
                warn!("⚠️ Dropping invalid stored expense {}", expense.id);
                continue;
            }
            if !seen_ids.insert(expense.id) {
                warn!("⚠️ Dropping stored expense with duplicate id {}", expense.id);
                continue;
            }
            expense.quantity = normalize_quantity(expense.quantity).unwrap_or(1.0);
            if Self::validate_total(expense.unit_amount, expense.quantity).is_err() {
                warn!(
                    "⚠️ Dropping stored expense {} with an unrepresentable total",
                    expense.id
                );
                continue;
            }
            expense.recompute_total();
            expenses.push(expense);
        }

        expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::storage::test_utils::{
        sample_expense, test_instant, FailingStorage, InMemoryStorage, TestEnvironment,
    };
    use crate::storage::ExpenseRepository;

    fn create_test_service() -> (ExpenseService, Arc<InMemoryStorage>) {
        let storage = Arc::new(InMemoryStorage::default());
        let service = ExpenseService::new(storage.clone(), Arc::new(FixedClock(test_instant())));
        (service, storage)
    }

    fn add(
        service: &mut ExpenseService,
        name: &str,
        amount: f64,
        quantity: Option<f64>,
    ) -> ExpenseRecord {
        service
            .add_expense(AddExpenseCommand::new(name, amount, quantity))
            .unwrap()
            .expense
    }

    #[test]
    fn test_add_expense_success() {
        let (mut service, storage) = create_test_service();

        let result = service
            .add_expense(AddExpenseCommand::new("  Coffee  ", 120.0, Some(2.0)))
            .unwrap();

        assert_eq!(result.expense.name, "Coffee");
        assert_eq!(result.expense.total_amount, 240.0);
        assert_eq!(result.expense.id, test_instant().timestamp_millis());
        assert_eq!(result.expense.created_date, "31/07/2024");
        assert!(result.persistence_warning.is_none());
        assert_eq!(storage.saved().unwrap(), vec![result.expense]);
    }

    #[test]
    fn test_add_expense_defaults_quantity() {
        let (mut service, _) = create_test_service();

        assert_eq!(add(&mut service, "Bread", 45.0, None).quantity, 1.0);
        assert_eq!(add(&mut service, "Bread", 45.0, Some(0.0)).quantity, 1.0);
        assert_eq!(add(&mut service, "Bread", 45.0, Some(-4.0)).quantity, 1.0);
        assert_eq!(add(&mut service, "Bread", 45.0, Some(3.9)).quantity, 3.0);
    }

    #[test]
    fn test_add_expense_rejects_invalid_input() {
        let (mut service, storage) = create_test_service();

        for (name, amount) in [("   ", 10.0), ("Tea", 0.0), ("Tea", -5.0), ("Tea", f64::NAN)] {
            let result = service.add_expense(AddExpenseCommand::new(name, amount, None));
            assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
        }

        assert!(service.is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_ids_are_unique_under_a_frozen_clock() {
        let (mut service, _) = create_test_service();

        let first = add(&mut service, "A", 1.0, None);
        let second = add(&mut service, "B", 1.0, None);
        let third = add(&mut service, "C", 1.0, None);

        assert!(first.id < second.id && second.id < third.id);
        let names: Vec<_> = service.expenses().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_update_nothing_keeps_total() {
        let (mut service, _) = create_test_service();
        let expense = add(&mut service, "Rice", 52.5, Some(4.0));

        let result = service
            .update_expense(UpdateExpenseCommand {
                id: expense.id,
                ..Default::default()
            })
            .unwrap();

        assert_eq!(result.expense.total_amount, 52.5 * 4.0);
        assert_eq!(result.expense, expense);
    }

    #[test]
    fn test_update_name_amount_and_quantity() {
        let (mut service, storage) = create_test_service();
        let expense = add(&mut service, "Rice", 50.0, Some(2.0));

        let result = service
            .update_expense(UpdateExpenseCommand {
                id: expense.id,
                name: Some(" Brown rice ".to_string()),
                unit_amount: Some(65.0),
                quantity: Some(3.0),
            })
            .unwrap();

        assert_eq!(result.expense.name, "Brown rice");
        assert_eq!(result.expense.unit_amount, 65.0);
        assert_eq!(result.expense.quantity, 3.0);
        assert_eq!(result.expense.total_amount, 195.0);
        assert_eq!(result.expense.created_date, expense.created_date);
        assert_eq!(storage.saved().unwrap()[0], result.expense);
    }

    #[test]
    fn test_update_invalid_pair_still_applies_quantity() {
        let (mut service, storage) = create_test_service();
        let expense = add(&mut service, "Coffee", 120.0, Some(2.0));

        let result = service
            .update_expense(UpdateExpenseCommand {
                id: expense.id,
                name: Some(String::new()),
                unit_amount: Some(50.0),
                quantity: Some(3.0),
            })
            .unwrap();

        assert!(matches!(result.rejected, Some(LedgerError::InvalidInput(_))));
        assert_eq!(result.expense.total_amount, 360.0);
        assert!(result.persistence_warning.is_none());
        let stored = service.get_expense(expense.id).unwrap();
        assert_eq!(stored.name, "Coffee");
        assert_eq!(stored.unit_amount, 120.0);
        assert_eq!(stored.quantity, 3.0);
        assert_eq!(stored.total_amount, 360.0);
        assert_eq!(storage.saved().unwrap()[0].quantity, 3.0);
    }

    #[test]
    fn test_update_invalid_amount_keeps_name() {
        let (mut service, storage) = create_test_service();
        let expense = add(&mut service, "Coffee", 120.0, None);

        let saves_before = storage.save_count();

        let result = service
            .update_expense(UpdateExpenseCommand {
                id: expense.id,
                name: Some("Latte".to_string()),
                unit_amount: Some(f64::NAN),
                quantity: None,
            })
            .unwrap();

        assert!(result.is_rejected());
        assert_eq!(service.get_expense(expense.id).unwrap().name, "Coffee");
        assert_eq!(storage.save_count(), saves_before);
    }

    #[test]
    fn test_update_ignores_invalid_quantity() {
        let (mut service, _) = create_test_service();
        let expense = add(&mut service, "Coffee", 100.0, Some(2.0));

        let result = service
            .update_expense(UpdateExpenseCommand {
                id: expense.id,
                name: None,
                unit_amount: Some(110.0),
                quantity: Some(0.0),
            })
            .unwrap();

        assert_eq!(result.expense.quantity, 2.0);
        assert_eq!(result.expense.total_amount, 220.0);
    }

    #[test]
    fn test_rejected_pair_reports_failed_save_of_quantity() {
        let mut service =
            ExpenseService::new(Arc::new(FailingStorage), Arc::new(FixedClock(test_instant())));
        let expense = add(&mut service, "Coffee", 120.0, Some(2.0));

        let result = service
            .update_expense(UpdateExpenseCommand {
                id: expense.id,
                name: Some(String::new()),
                unit_amount: Some(50.0),
                quantity: Some(3.0),
            })
            .unwrap();

        assert!(matches!(result.rejected, Some(LedgerError::InvalidInput(_))));
        assert_eq!(result.expense.quantity, 3.0);
        assert!(result.persistence_warning.unwrap().contains("disk unavailable"));
    }

    #[test]
    fn test_add_rejects_overflowing_total() {
        let (mut service, storage) = create_test_service();
        add(&mut service, "Coffee", 120.0, Some(2.0));
        let saves_before = storage.save_count();

        let command = AddExpenseCommand::from_input("Yacht", "1e308", Some("10")).unwrap();
        let result = service.add_expense(command);

        assert!(matches!(result, Err(LedgerError::InvalidInput(_))));
        assert_eq!(service.len(), 1);
        assert_eq!(storage.save_count(), saves_before);
    }

    #[test]
    fn test_update_rejects_overflowing_total() {
        let (mut service, _) = create_test_service();
        let expense = add(&mut service, "Yacht", 1e308, None);

        let quantity_only = service
            .update_expense(UpdateExpenseCommand {
                id: expense.id,
                quantity: Some(10.0),
                ..Default::default()
            })
            .unwrap();
        assert!(matches!(quantity_only.rejected, Some(LedgerError::InvalidInput(_))));
        assert_eq!(quantity_only.expense.quantity, 1.0);

        let with_amount = service
            .update_expense(UpdateExpenseCommand {
                id: expense.id,
                name: None,
                unit_amount: Some(1e307),
                quantity: Some(10.0),
            })
            .unwrap();
        assert!(with_amount.rejected.is_none());
        assert_eq!(with_amount.expense.quantity, 10.0);
        assert!(with_amount.expense.total_amount.is_finite());
    }

    #[test]
    fn test_ledger_survives_restart_after_oversized_input() {
        let env = TestEnvironment::new().unwrap();
        let storage = Arc::new(ExpenseRepository::new(env.connection.clone()));
        let clock = Arc::new(FixedClock(test_instant()));
        let mut service = ExpenseService::new(storage.clone(), clock.clone());
        add(&mut service, "Coffee", 120.0, Some(2.0));
        add(&mut service, "Tea", 80.0, None);
        let oversized = AddExpenseCommand::from_input("Yacht", "1e308", Some("10")).unwrap();
        assert!(service.add_expense(oversized).is_err());

        let restarted = ExpenseService::new(storage, clock);

        assert_eq!(restarted.len(), 2);
        assert!(restarted.startup_warning().is_none());
    }

    #[test]
    fn test_update_unknown_id() {
        let (mut service, storage) = create_test_service();

        let result = service.update_expense(UpdateExpenseCommand {
            id: 404,
            quantity: Some(2.0),
            ..Default::default()
        });

        assert_eq!(result, Err(LedgerError::NotFound(404)));
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_delete_expense() {
        let (mut service, storage) = create_test_service();
        let keep = add(&mut service, "Keep", 1.0, None);
        let removed = add(&mut service, "Drop", 2.0, None);
        let saves_before = storage.save_count();

        let result = service.delete_expense(DeleteExpenseCommand { id: removed.id });

        assert!(result.removed);
        assert_eq!(service.expenses(), &[keep]);
        assert_eq!(storage.save_count(), saves_before + 1);
    }

    #[test]
    fn test_delete_missing_expense_does_not_persist() {
        let (mut service, storage) = create_test_service();
        add(&mut service, "Keep", 1.0, None);
        let saves_before = storage.save_count();

        let result = service.delete_expense(DeleteExpenseCommand { id: 1 });

        assert!(!result.removed);
        assert_eq!(service.len(), 1);
        assert_eq!(storage.save_count(), saves_before);
    }

    #[test]
    fn test_clear_expenses_persists_empty_ledger() {
        let (mut service, storage) = create_test_service();
        for i in 0..5 {
            add(&mut service, &format!("Item {}", i), 10.0, None);
        }

        let result = service.clear_expenses();

        assert_eq!(result.cleared_count, 5);
        assert!(service.is_empty());
        assert_eq!(storage.saved(), Some(vec![]));
    }

    #[test]
    fn test_hydrates_and_restores_invariants() {
        let mut tampered = sample_expense(2, "Tampered", 10.0, 3.0);
        tampered.total_amount = 999.0;
        let mut fractional = sample_expense(3, " Padded ", 5.0, 1.0);
        fractional.quantity = 2.5;
        let storage = Arc::new(InMemoryStorage::with_expenses(vec![
            sample_expense(1, "Valid", 20.0, 1.0),
            tampered,
            sample_expense(1, "Duplicate id", 20.0, 1.0),
            sample_expense(4, "", 20.0, 1.0),
            sample_expense(5, "Free", 0.0, 1.0),
            fractional,
        ]));

        let service = ExpenseService::new(storage, Arc::new(FixedClock(test_instant())));

        let ids: Vec<_> = service.expenses().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(service.get_expense(2).unwrap().total_amount, 30.0);
        assert_eq!(service.get_expense(3).unwrap().name, "Padded");
        assert_eq!(service.get_expense(3).unwrap().quantity, 2.0);
        assert!(service.startup_warning().is_none());
    }

    #[test]
    fn test_hydration_drops_record_with_overflowing_total() {
        let env = TestEnvironment::new().unwrap();
        std::fs::write(
            env.connection.expenses_file_path(),
            r#"[
                {"id": 1, "name": "Coffee", "unitAmount": 120.0, "quantity": 2.0, "totalAmount": 240.0},
                {"id": 2, "name": "Yacht", "unitAmount": 1e308, "quantity": 10.0, "totalAmount": null},
                {"id": 3, "name": "Tea", "unitAmount": 80.0, "quantity": null, "totalAmount": null}
            ]"#,
        )
        .unwrap();
        let storage = Arc::new(ExpenseRepository::new(env.connection.clone()));

        let service = ExpenseService::new(storage, Arc::new(FixedClock(test_instant())));

        let ids: Vec<_> = service.expenses().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(service.get_expense(3).unwrap().total_amount, 80.0);
        assert!(service.startup_warning().is_none());
    }

    #[test]
    fn test_new_ids_follow_hydrated_ids() {
        let future_id = test_instant().timestamp_millis() + 10_000;
        let storage = Arc::new(InMemoryStorage::with_expenses(vec![sample_expense(
            future_id, "Later", 1.0, 1.0,
        )]));
        let mut service = ExpenseService::new(storage, Arc::new(FixedClock(test_instant())));

        let added = add(&mut service, "Now", 1.0, None);

        assert_eq!(added.id, future_id + 1);
    }

    #[test]
    fn test_unavailable_storage_is_not_fatal() {
        let mut service =
            ExpenseService::new(Arc::new(FailingStorage), Arc::new(FixedClock(test_instant())));
        assert!(service.startup_warning().unwrap().contains("persistence unavailable"));

        let result = service
            .add_expense(AddExpenseCommand::new("Coffee", 120.0, Some(2.0)))
            .unwrap();

        assert!(result.persistence_warning.unwrap().contains("disk unavailable"));
        assert_eq!(service.len(), 1);
    }
}
