use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use super::{calendar_id, calendar_service};
use crate::app::api::response::render_error;
use crate::config::request_deadline;
use crate::error::AppResult;

/// ## Summary
/// DELETE /api/calendars/{calendar_id} - Remove the stored document
///
/// ## Errors
/// Returns HTTP 404 if no document is stored for the calendar
/// Returns HTTP 504 if the request deadline cancels the delete
/// Returns HTTP 500 for storage failures
#[handler]
#[tracing::instrument(skip_all, fields(method = "DELETE", path = %req.uri().path()))]
pub async fn delete(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::info!("Handling DELETE request");

    match delete_calendar(&calendar_id(req), depot).await {
        Ok(true) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Ok(false) => {
            tracing::debug!("Calendar not found");
            res.status_code(StatusCode::NOT_FOUND);
        }
        Err(e) => render_error(res, &e),
    }
}

async fn delete_calendar(calendar_id: &str, depot: &Depot) -> AppResult<bool> {
    let service = calendar_service(depot)?;
    let cancel = request_deadline(depot)?;
    let _deadline = cancel.clone().drop_guard();

    Ok(service.delete_calendar(calendar_id, &cancel).await?)
}
