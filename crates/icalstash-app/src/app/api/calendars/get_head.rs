use salvo::http::{HeaderValue, StatusCode};
use salvo::{Depot, Request, Response, handler};

use icalstash_core::constants::ICS_CONTENT_TYPE;

use super::{calendar_id, calendar_service};
use crate::app::api::response::render_error;
use crate::config::request_deadline;
use crate::error::AppResult;

/// ## Summary
/// GET /api/calendars/{calendar_id} - Return the stored document
///
/// ## Errors
/// Returns HTTP 404 if no document is stored for the calendar
/// Returns HTTP 504 if the request deadline cancels the read
/// Returns HTTP 500 for storage failures
#[handler]
#[tracing::instrument(skip_all, fields(method = "GET", path = %req.uri().path()))]
pub async fn get(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let body = match read_calendar(&calendar_id(req), depot).await {
        Ok(Some(body)) => body,
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
            return;
        }
        Err(e) => {
            render_error(res, &e);
            return;
        }
    };

    res.status_code(StatusCode::OK);
    #[expect(
        clippy::let_underscore_must_use,
        reason = "Header addition failure is non-fatal"
    )]
    let _ = res.add_header(
        "Content-Type",
        HeaderValue::from_static(ICS_CONTENT_TYPE),
        true,
    );
    if let Err(e) = res.write_body(body) {
        tracing::error!(error = %e, "Failed to write response body");
    }
}

/// ## Summary
/// HEAD /api/calendars/{calendar_id} - 200 if a document is stored, else 404
///
/// ## Errors
/// Returns HTTP 504 if the request deadline cancels the check
/// Returns HTTP 500 for storage failures
#[handler]
#[tracing::instrument(skip_all, fields(method = "HEAD", path = %req.uri().path()))]
pub async fn head(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match calendar_exists(&calendar_id(req), depot).await {
        Ok(true) => {
            res.status_code(StatusCode::OK);
        }
        Ok(false) => {
            res.status_code(StatusCode::NOT_FOUND);
        }
        Err(e) => render_error(res, &e),
    }
}

async fn read_calendar(calendar_id: &str, depot: &Depot) -> AppResult<Option<String>> {
    let service = calendar_service(depot)?;
    let cancel = request_deadline(depot)?;
    let _deadline = cancel.clone().drop_guard();

    Ok(service.get_calendar(calendar_id, &cancel).await?)
}

async fn calendar_exists(calendar_id: &str, depot: &Depot) -> AppResult<bool> {
    let service = calendar_service(depot)?;
    let cancel = request_deadline(depot)?;
    let _deadline = cancel.clone().drop_guard();

    Ok(service.calendar_exists(calendar_id, &cancel).await?)
}
