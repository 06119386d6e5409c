use std::time::Duration;

use tokio_util::sync::CancellationToken;

pub use icalstash_core::config::*;
use icalstash_store::cancel::deadline_token;

use crate::depot::shared;
use crate::error::AppResult;

/// ## Summary
/// Starts the per-request deadline: the returned token is cancelled once
/// `server.request_timeout_secs` has elapsed.
///
/// ## Errors
/// Returns an error if no `Settings` were shared with this route.
pub fn request_deadline(depot: &salvo::Depot) -> AppResult<CancellationToken> {
    let settings = shared::<Settings>(depot, "settings")?;
    let timeout = Duration::from_secs(settings.server.request_timeout_secs);
    Ok(deadline_token(&CancellationToken::new(), timeout))
}
