use salvo::{Router, handler};

use icalstash_core::constants::HEALTH_ROUTE_COMPONENT;

#[handler]
async fn ready() -> &'static str {
    "OK"
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(HEALTH_ROUTE_COMPONENT).push(Router::with_path("ready").get(ready))
}
