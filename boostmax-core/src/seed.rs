use boostmax_order::{Order, OrderId, OrderStatus};
use chrono::{DateTime, Utc};

/// Sample history shown on a fresh storefront, newest first
pub fn demo_orders(now: DateTime<Utc>) -> Vec<Order> {
    let order = |id: u64, service: &str, link: &str, quantity: u32, status: OrderStatus, progress: u8| {
        Order::restore(OrderId::new(id), service.to_string(), link.to_string(), quantity, status, progress, now)
    };

    vec![
        order(1, "Подписчики", "https://instagram.com/user1", 500, OrderStatus::Completed, 100),
        order(2, "Лайки", "https://instagram.com/post/abc", 1000, OrderStatus::Processing, 65),
        order(3, "Просмотры", "https://youtube.com/watch?v=xyz", 2000, OrderStatus::Pending, 0),
    ]
}
