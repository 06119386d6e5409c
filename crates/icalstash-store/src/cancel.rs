//! Deadline-bound cancellation tokens.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// ## Summary
/// Returns a child of `parent` that is also cancelled once `timeout` elapses.
///
/// The timer task ends as soon as either token is cancelled.
#[must_use]
pub fn deadline_token(parent: &CancellationToken, timeout: Duration) -> CancellationToken {
    let token = parent.child_token();
    let timer = token.clone();

    tokio::spawn(async move {
        tokio::select! {
            () = timer.cancelled() => {}
            () = tokio::time::sleep(timeout) => {
                tracing::debug!(?timeout, "Request deadline reached");
                timer.cancel();
            }
        }
    });

    token
}
