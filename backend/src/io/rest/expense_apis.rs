//! # REST API for Expenses
//!
//! Listing, adding, editing, deleting and clearing expenses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{info, warn};

use super::mappers::ExpenseMapper;
use super::{error_response, status_for};
use crate::domain::input_sanitizer::is_clear_confirmed;
use crate::domain::{CommandOutcome, DeleteExpenseCommand, LedgerCommand, LedgerError};
use crate::AppState;
use shared::{
    AddExpenseRequest, AddExpenseResponse, ClearExpensesRequest, ClearExpensesResponse,
    DeleteExpenseResponse, ErrorResponse, ExpenseListRequest, UpdateExpenseRequest,
    UpdateExpenseResponse,
};

/// Filtered expense rows with the total of the view
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(request): Query<ExpenseListRequest>,
) -> impl IntoResponse {
    info!("GET /api/expenses - query: {:?}", request);

    let response = {
        let engine = state.engine();
        let view = engine.filter_expenses(&ExpenseMapper::to_filter_query(request));
        let rows = engine.format_rows(&view.expenses);
        ExpenseMapper::to_list_response(view, rows)
    };

    (StatusCode::OK, Json(response)).into_response()
}

pub async fn add_expense(
    State(state): State<AppState>,
    Json(request): Json<AddExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - request: {:?}", request);

    let result = ExpenseMapper::to_add_command(&request)
        .and_then(|command| state.engine().execute(LedgerCommand::Add(command)));

    match result {
        Ok(CommandOutcome::Added(added)) => {
            let response = AddExpenseResponse {
                expense: ExpenseMapper::to_dto(added.expense),
                persistence_warning: added.persistence_warning,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Ok(other) => unexpected_outcome(other),
        Err(e) => error_response(e),
    }
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/{} - request: {:?}", id, request);

    let command = ExpenseMapper::to_update_command(id, &request);
    let result = state.engine().execute(LedgerCommand::Update(command));

    match result {
        Ok(CommandOutcome::Updated(updated)) => {
            let status = match &updated.rejected {
                Some(e) => {
                    warn!("Update of {} partly rejected: {}", id, e);
                    status_for(e)
                }
                None => StatusCode::OK,
            };
            let response = UpdateExpenseResponse {
                expense: ExpenseMapper::to_dto(updated.expense),
                persistence_warning: updated.persistence_warning,
                error: updated.rejected.map(|e| e.user_message()),
            };
            (status, Json(response)).into_response()
        }
        Ok(other) => unexpected_outcome(other),
        Err(e) => error_response(e),
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", id);

    let result = state
        .engine()
        .execute(LedgerCommand::Delete(DeleteExpenseCommand { id }));

    match result {
        Ok(CommandOutcome::Deleted(deleted)) if deleted.removed => {
            let response = DeleteExpenseResponse {
                id: deleted.id,
                removed: deleted.removed,
                persistence_warning: deleted.persistence_warning,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(CommandOutcome::Deleted(_)) => error_response(LedgerError::NotFound(id)),
        Ok(other) => unexpected_outcome(other),
        Err(e) => error_response(e),
    }
}

/// Remove every expense once the user has typed "CONFIRM"
pub async fn clear_expenses(
    State(state): State<AppState>,
    Json(request): Json<ClearExpensesRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses/clear");

    if !is_clear_confirmed(&request.confirmation) {
        return error_response(LedgerError::invalid_input("clearing requires typing CONFIRM"));
    }

    let result = {
        let mut engine = state.engine();
        if engine.expenses().is_empty() {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse::new("No expenses to clear.")),
            )
                .into_response();
        }
        engine.execute(LedgerCommand::ClearAll)
    };

    match result {
        Ok(CommandOutcome::Cleared(cleared)) => {
            let response = ClearExpensesResponse {
                cleared_count: cleared.cleared_count,
                persistence_warning: cleared.persistence_warning,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(other) => unexpected_outcome(other),
        Err(e) => error_response(e),
    }
}

fn unexpected_outcome(outcome: CommandOutcome) -> axum::response::Response {
    tracing::error!("❌ Unexpected command outcome: {:?}", outcome);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("unexpected command outcome")),
    )
        .into_response()
}
