use boostmax_core::{Notifier, Storefront};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    /// Single writer: handlers and the progress worker take turns
    pub storefront: Arc<Mutex<Storefront>>,
    pub notifier: Notifier,
    pub tick_interval: Duration,
}

impl AppState {
    pub fn new(storefront: Storefront, tick_interval: Duration) -> Self {
        let notifier = storefront.notifier().clone();
        Self {
            storefront: Arc::new(Mutex::new(storefront)),
            notifier,
            tick_interval,
        }
    }
}
