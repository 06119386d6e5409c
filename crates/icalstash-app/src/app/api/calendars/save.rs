use salvo::http::StatusCode;
use salvo::{Depot, Request, Response, handler};

use icalstash_core::constants::MAX_REQUEST_BODY_OCTETS;
use icalstash_service::calendar::SavedCalendar;
use icalstash_service::request::EventsRequest;

use super::calendar_service;
use crate::app::api::response::render_error;
use crate::config::request_deadline;
use crate::error::{AppError, AppResult};

/// ## Summary
/// POST /api/calendars - Encode a calendar and store it as `<calendar_id>.ics`
///
/// ## Side Effects
/// Overwrites any previously stored document for the same calendar.
///
/// ## Errors
/// Returns HTTP 400 for a malformed body or an invalid calendar
/// Returns HTTP 504 if the request deadline cancels storage
/// Returns HTTP 500 for encoding or storage failures
#[handler]
#[tracing::instrument(skip_all, fields(method = "POST"))]
pub async fn save(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match save_calendar(req, depot).await {
        Ok(saved) => {
            tracing::debug!(key = %saved.key, events = saved.events, "Save request completed");
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => render_error(res, &e),
    }
}

async fn save_calendar(req: &mut Request, depot: &Depot) -> AppResult<SavedCalendar> {
    req.set_secure_max_size(MAX_REQUEST_BODY_OCTETS);
    let request: EventsRequest = req
        .parse_json()
        .await
        .map_err(|e| AppError::InvalidBody(e.to_string()))?;

    let service = calendar_service(depot)?;
    let cancel = request_deadline(depot)?;
    let _deadline = cancel.clone().drop_guard();

    Ok(service.save_events(&request, &cancel).await?)
}
