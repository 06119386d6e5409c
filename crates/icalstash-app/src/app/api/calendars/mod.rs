//! `/api/calendars` handlers.

mod delete;
mod get_head;
mod save;


use std::sync::Arc;

use salvo::Router;

use icalstash_core::constants::CALENDARS_ROUTE_COMPONENT;
use icalstash_service::calendar::CalendarService;

use crate::depot::shared;
use crate::error::AppResult;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(CALENDARS_ROUTE_COMPONENT)
        .post(save::save)
        .push(
            Router::with_path("{calendar_id}")
                .get(get_head::get)
                .head(get_head::head)
                .delete(delete::delete),
        )
}

/// ## Summary
/// Extracts the `{calendar_id}` path parameter; empty when absent.
fn calendar_id(req: &salvo::Request) -> String {
    req.param::<String>("calendar_id").unwrap_or_default()
}

fn calendar_service(depot: &salvo::Depot) -> AppResult<Arc<CalendarService>> {
    shared(depot, "the calendar service")
}
