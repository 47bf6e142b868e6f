use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order status in the lifecycle.
///
/// Variants are declared in lifecycle order, so `Ord` doubles as the
/// forward-only check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Label shown on the order history badge
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Ожидает",
            OrderStatus::Processing => "В работе",
            OrderStatus::Completed => "Готово",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// Order identifier, derived from the creation timestamp in milliseconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(OrderId)
    }
}

pub const MAX_PROGRESS: u8 = 100;

/// A single submission against a service tier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Tier name copied at creation, so history survives catalog changes
    pub service_name: String,
    pub link: String,
    pub quantity: u32,
    pub status: OrderStatus,
    /// Simulated completion percentage, 0..=100
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(id: OrderId, service_name: String, link: String, quantity: u32, now: DateTime<Utc>) -> Self {
        Self {
            id,
            service_name,
            link,
            quantity,
            status: OrderStatus::Pending,
            progress: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild an order in an arbitrary lifecycle position (demo history).
    /// The ledger checks the invariants on admission.
    pub fn restore(
        id: OrderId,
        service_name: String,
        link: String,
        quantity: u32,
        status: OrderStatus,
        progress: u8,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            status,
            progress,
            ..Self::new(id, service_name, link, quantity, at)
        }
    }

    /// Set progress and derive the status from it
    pub fn advance(&mut self, progress: u8, now: DateTime<Utc>) {
        self.progress = progress.min(MAX_PROGRESS);
        self.status = if self.progress == MAX_PROGRESS {
            OrderStatus::Completed
        } else if self.progress > 0 {
            OrderStatus::Processing
        } else {
            self.status
        };
        self.updated_at = now;
    }

    /// Describe the first broken invariant, if any
    pub fn invariant_violation(&self) -> Option<&'static str> {
        if self.quantity == 0 {
            return Some("quantity must be at least 1");
        }
        if self.progress > MAX_PROGRESS {
            return Some("progress exceeds 100");
        }
        match self.status {
            OrderStatus::Completed if self.progress != MAX_PROGRESS => {
                Some("completed order must be at 100% progress")
            }
            OrderStatus::Pending | OrderStatus::Processing if self.progress == MAX_PROGRESS => {
                Some("order at 100% progress must be completed")
            }
            OrderStatus::Pending if self.progress != 0 => Some("pending order must be at 0% progress"),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
