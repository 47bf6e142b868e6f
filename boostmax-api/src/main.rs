use boostmax_api::{app, worker, AppState};
use boostmax_core::{Config, Notifier, Storefront};
use chrono::Utc;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "boostmax_api=debug,boostmax_core=debug,boostmax_order=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting BoostMax on port {}", config.server.port);

    let storefront = Storefront::from_config(&config, Notifier::default(), Utc::now())?;
    let state = AppState::new(
        storefront,
        Duration::from_millis(config.simulator.tick_interval_ms),
    );

    tokio::spawn(worker::start_progress_worker(
        state.storefront.clone(),
        state.tick_interval,
    ));

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
