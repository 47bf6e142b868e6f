use boostmax_core::Storefront;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Tick the progress simulator forever
pub async fn start_progress_worker(storefront: Arc<Mutex<Storefront>>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    info!("Progress worker started, ticking every {:?}", interval);

    loop {
        ticker.tick().await;

        let mut store = storefront.lock().await;
        let report = store.tick(Utc::now());
        if !report.is_empty() {
            debug!(
                "Tick advanced {} orders, completed {}, {} still active",
                report.updated.len(),
                report.completed.len(),
                store.active_orders()
            );
        }
    }
}
