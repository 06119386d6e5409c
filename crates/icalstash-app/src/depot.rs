//! Request-scoped access to process-wide state.

use std::any::Any;
use std::sync::Arc;

use salvo::async_trait;

use icalstash_core::error::CoreError;

use crate::error::AppResult;

/// Middleware that makes one shared `T` available to every handler below it.
///
/// Handlers read it back with [`shared`].
pub struct Share<T> {
    value: Arc<T>,
}

impl<T> Share<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

#[async_trait]
impl<T> salvo::Handler for Share<T>
where
    T: Any + Send + Sync,
{
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.value));
    }
}

/// ## Summary
/// Looks up the value a [`Share`] middleware placed in the depot.
///
/// ## Errors
/// Returns `CoreError::MissingContext` naming `what` when the route was
/// mounted without the matching middleware.
pub fn shared<T>(depot: &salvo::Depot, what: &'static str) -> AppResult<Arc<T>>
where
    T: Any + Send + Sync,
{
    depot
        .obtain::<Arc<T>>()
        .cloned()
        .map_err(|_missing| CoreError::MissingContext(what).into())
}
