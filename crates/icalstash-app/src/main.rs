use std::time::Duration;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use icalstash_app::app::routes;
use icalstash_app::depot::Share;
use icalstash_app::storage::build_store;
use icalstash_core::config::load_config;
use icalstash_service::calendar::CalendarService;
use icalstash_store::cancel::deadline_token;

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Logs at debug until the configured level is known.
fn init_tracing() -> FilterHandle {
    let (filter, handle) = reload::Layer::new(EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
    handle
}

fn apply_log_level(handle: &FilterHandle, level: &str) {
    match EnvFilter::try_new(level) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                tracing::warn!(error = %e, "Could not apply configured log level");
            }
        }
        Err(e) => tracing::warn!(level, error = %e, "Unusable log level, staying at debug"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter_handle = init_tracing();
    tracing::info!("Starting icalstash");

    let config = load_config()?;
    tracing::info!(config = ?config, "Configuration loaded");
    apply_log_level(&filter_handle, &config.logging.level);

    let service = CalendarService::new(build_store(&config));

    // Refuse to serve against a bucket that is not there.
    let startup = deadline_token(
        &CancellationToken::new(),
        Duration::from_secs(config.server.request_timeout_secs),
    );
    service.verify_bucket(&startup).await?;
    startup.cancel();

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new()
        .hoop(Share::new(service))
        .hoop(Share::new(config))
        .push(routes());

    tracing::info!(%bind_addr, "Accepting requests");
    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
