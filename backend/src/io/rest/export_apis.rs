//! # REST API for Data Export
//!
//! CSV export of the full ledger, either downloaded or written into the data
//! directory.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use crate::domain::export_service::EXPORT_FILE_NAME;
use crate::AppState;
use shared::ExportToFileResponse;

/// Download the ledger as CSV
pub async fn export_csv(State(state): State<AppState>) -> impl IntoResponse {
    info!("📄 GET /api/expenses/export");

    let result = state.engine().export_csv();

    match result {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Write the CSV export next to the ledger
pub async fn export_to_file(State(state): State<AppState>) -> impl IntoResponse {
    info!("📁 POST /api/expenses/export");

    let result = state.engine().export_to_directory(&state.config.data_directory);

    match result {
        Ok(file) => {
            let response = ExportToFileResponse {
                file_path: file.path.to_string_lossy().to_string(),
                expense_count: file.expense_count,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}
