//! # Domain Module
//!
//! Contains all business logic for the expense ledger.
//!
//! The domain layer owns the ledger and every rule about it: how raw form
//! text becomes a number, how records are created and edited, how totals are
//! read out in words, and what an export contains. It knows nothing about
//! HTTP and only talks to storage through the `LedgerStorage` trait.
//!
//! ## Module Organization
//!
//! - **input_sanitizer**: Cleaning and parsing amount/quantity text
//! - **numeral_formatter**: Grouped decimals and English word expansions
//! - **expense_service**: The record store; the only place the ledger mutates
//! - **total_service**: Sums and the `"240.00 (Two Hundred Forty Pesos)"` display
//! - **expense_filter**: Name query and creation-date filter
//! - **expense_table**: Display rows for the presentation layer
//! - **export_service**: CSV snapshot with a trailing total row
//! - **engine**: `LedgerEngine`, the single handle dispatching `LedgerCommand`s
//!
//! ## Business Rules
//!
//! - Expense names are trimmed and never empty
//! - Unit amounts are finite and greater than zero
//! - Quantities are whole counts, defaulting to 1
//! - `total_amount` is always `unit_amount * quantity`
//! - Ids are unique and follow creation order
//! - A failed save never loses the in-memory ledger

pub mod clock;
pub mod commands;
pub mod engine;
pub mod errors;
pub mod expense_filter;
pub mod expense_service;
pub mod expense_table;
pub mod export_service;
pub mod input_sanitizer;
pub mod models;
pub mod numeral_formatter;
pub mod total_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use commands::*;
pub use engine::LedgerEngine;
pub use errors::{LedgerError, LedgerResult};
pub use expense_filter::{filter_expenses, ExpenseFilter};
pub use expense_service::ExpenseService;
pub use expense_table::{ExpenseTableConfig, ExpenseTableService};
pub use export_service::{ExportConfig, ExportFile, ExportService};
pub use total_service::TotalService;
