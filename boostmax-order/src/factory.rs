use chrono::{DateTime, Utc};

use crate::models::{Order, OrderId};
use crate::validator::OrderRequest;

/// Builds new orders and hands out their ids.
///
/// Ids are the creation time in epoch milliseconds. When two orders land in
/// the same millisecond (or the clock steps back) the next id is bumped past
/// the last one issued, so ids stay strictly increasing.
#[derive(Debug, Default)]
pub struct OrderFactory {
    last_issued: u64,
}

impl OrderFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pending order from a validated request
    pub fn create(&mut self, request: OrderRequest<'_>, now: DateTime<Utc>) -> Order {
        let id = self.next_id(now);
        Order::new(
            id,
            request.tier().name.clone(),
            request.link().to_string(),
            request.quantity(),
            now,
        )
    }

    /// Make sure ids issued later never collide with an externally created one
    pub fn observe(&mut self, id: OrderId) {
        self.last_issued = self.last_issued.max(id.value());
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> OrderId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_issued.saturating_add(1));
        self.last_issued = id;
        OrderId::new(id)
    }
}
