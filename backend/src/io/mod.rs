//! # IO Module
//!
//! The adapter layer between a presentation layer and the ledger engine.
//!
//! Requests arrive as JSON DTOs from the `shared` crate, are mapped onto
//! domain commands and run against the engine; domain results and errors are
//! mapped back to DTOs and HTTP status codes. No business rule lives here.

pub mod rest;
