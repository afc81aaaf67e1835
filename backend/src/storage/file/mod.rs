//! # File Storage Module
//!
//! JSON-document storage for the ledger. The document is an array of
//! expense records with camelCase field names:
//!
//! ```json
//! [
//!   {
//!     "id": 1722405900000,
//!     "name": "Coffee",
//!     "unitAmount": 120.0,
//!     "quantity": 2.0,
//!     "totalAmount": 240.0,
//!     "createdDate": "31/07/2024",
//!     "createdTime": "02:05 PM"
//!   }
//! ]
//! ```
//!
//! Writes go to a temp file first and are renamed into place, so a crash
//! mid-save leaves the previous document intact.

pub mod connection;
pub mod expense_repository;

pub use connection::FileConnection;
pub use expense_repository::ExpenseRepository;
