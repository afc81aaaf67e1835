//! # REST API for Live Input Formatting
//!
//! Pure string transforms the form fields call on every keystroke. The
//! caller is responsible for putting the caret back where the user expects.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::debug;

use crate::domain::input_sanitizer::sanitize_quantity_keystroke;
use crate::domain::numeral_formatter::live_group_keystroke;
use shared::{FormatInputRequest, FormatInputResponse};

/// Regroup an amount field, e.g. `"1234.5"` → `"1,234.5"`
pub async fn format_amount(Json(request): Json<FormatInputRequest>) -> impl IntoResponse {
    let value = live_group_keystroke(&request.raw);
    debug!("POST /api/format/amount - {:?} -> {:?}", request.raw, value);
    (StatusCode::OK, Json(FormatInputResponse { value }))
}

/// Strip decimals and minus signs from a quantity field
pub async fn format_quantity(Json(request): Json<FormatInputRequest>) -> impl IntoResponse {
    let value = sanitize_quantity_keystroke(&request.raw);
    debug!("POST /api/format/quantity - {:?} -> {:?}", request.raw, value);
    (StatusCode::OK, Json(FormatInputResponse { value }))
}
