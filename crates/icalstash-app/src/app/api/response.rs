use salvo::Response;
use salvo::writing::Json;
use serde::Serialize;

use crate::error::AppError;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Writes `err` as a JSON error body with its mapped status code.
///
/// Server-side failures log at error level, caller mistakes at debug.
pub fn render_error(res: &mut Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, status = status.as_u16(), "Request failed");
    } else {
        tracing::debug!(error = %err, status = status.as_u16(), "Request rejected");
    }

    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: err.to_string(),
    }));
}
