//! # REST API Interface Layer
//!
//! HTTP endpoints for the expense ledger, all nested under `/api`:
//!
//! | Method & path | Handler |
//! |---|---|
//! | `GET /expenses?query=&date=` | filtered rows and the total of the view |
//! | `POST /expenses` | add an expense from raw form text |
//! | `PUT /expenses/:id` | edit an expense |
//! | `DELETE /expenses/:id` | remove an expense |
//! | `POST /expenses/clear` | remove everything, guarded by `CONFIRM` |
//! | `GET /expenses/export` | CSV download |
//! | `POST /expenses/export` | CSV written into the data directory |
//! | `POST /format/amount`, `POST /format/quantity` | keystroke formatting |
//!
//! Failures carry a JSON `ErrorResponse` body.

pub mod expense_apis;
pub mod export_apis;
pub mod format_apis;
pub mod mappers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::LedgerError;

/// HTTP status for a domain error
pub fn status_for(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::InvalidInput(_) | LedgerError::NotANumber(_) => StatusCode::BAD_REQUEST,
        LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
        LedgerError::InsufficientExpenses { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        LedgerError::PersistenceUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turn a domain error into a JSON error response, logging it on the way
pub fn error_response(err: LedgerError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("❌ {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }
    (status, Json(ErrorResponse::new(err.user_message()))).into_response()
}
