mod calendars;
mod response;

use salvo::Router;

pub use icalstash_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, CALENDARS_ROUTE_COMPONENT, CALENDARS_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the API router mounted under `/api`.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT).push(calendars::routes())
}
