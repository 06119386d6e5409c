pub mod api;
pub mod health;

use salvo::Router;

/// ## Summary
/// Builds the full route tree: the JSON API and the health probe.
#[must_use]
pub fn routes() -> Router {
    Router::new().push(api::routes()).push(health::routes())
}
