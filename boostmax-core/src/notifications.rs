use boostmax_order::{Order, OrderId, ValidationError};
use serde::Serialize;
use tokio::sync::broadcast;

/// Messages pushed to the presentation layer
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorefrontEvent {
    OrderSubmitted {
        order_id: OrderId,
        service_name: String,
        quantity: u32,
        /// Acknowledgment text, e.g. "Лайки - 1000 шт."
        message: String,
    },
    SubmissionRejected {
        code: &'static str,
        message: String,
    },
    OrderUpdated {
        order: Order,
    },
}

impl StorefrontEvent {
    pub fn submitted(order: &Order) -> Self {
        StorefrontEvent::OrderSubmitted {
            order_id: order.id,
            service_name: order.service_name.clone(),
            quantity: order.quantity,
            message: format!("{} - {} шт.", order.service_name, order.quantity),
        }
    }

    pub fn rejected(error: &ValidationError) -> Self {
        StorefrontEvent::SubmissionRejected {
            code: error.code(),
            message: error.to_string(),
        }
    }
}

/// Fan-out channel for storefront events; sending never blocks or fails
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<StorefrontEvent>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.tx.subscribe()
    }

    pub fn send(&self, event: StorefrontEvent) {
        // No subscribers is fine
        let _ = self.tx.send(event);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_submitted_message() {
        let order = Order::new(OrderId::new(1), "Лайки".to_string(), "https://x.com/p/1".to_string(), 1000, Utc::now());
        let event = StorefrontEvent::submitted(&order);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ORDER_SUBMITTED");
        assert_eq!(json["message"], "Лайки - 1000 шт.");
    }

    #[test]
    fn test_send_without_subscribers() {
        let notifier = Notifier::default();
        notifier.send(StorefrontEvent::rejected(&ValidationError::MissingLink));

        let mut rx = notifier.subscribe();
        notifier.send(StorefrontEvent::rejected(&ValidationError::MissingService));
        match rx.try_recv().unwrap() {
            StorefrontEvent::SubmissionRejected { code, .. } => assert_eq!(code, "MISSING_SERVICE"),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
