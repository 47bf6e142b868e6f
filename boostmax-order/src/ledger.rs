use crate::models::{Order, OrderId};
use std::collections::HashMap;

/// Session order history, newest first.
///
/// Orders are only ever added at the head and never removed. Every mutation
/// goes through [`OrderLedger::update`], which refuses anything that would
/// move an order backwards in its lifecycle.
#[derive(Debug, Default)]
pub struct OrderLedger {
    // Oldest first; positions never shift because nothing is removed
    orders: Vec<Order>,
    index: HashMap<OrderId, usize>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an order at the head of the history
    pub fn submit(&mut self, order: Order) -> Result<&Order, LedgerError> {
        if self.index.contains_key(&order.id) {
            return Err(LedgerError::DuplicateId(order.id));
        }
        if let Some(reason) = order.invariant_violation() {
            return Err(LedgerError::InvalidOrder { id: order.id, reason });
        }

        let position = self.orders.len();
        self.index.insert(order.id, position);
        self.orders.push(order);
        Ok(&self.orders[position])
    }

    /// Newest-first snapshot
    pub fn all(&self) -> Vec<Order> {
        self.iter().cloned().collect()
    }

    /// Newest-first iterator
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().rev()
    }

    pub fn get(&self, id: &OrderId) -> Result<&Order, LedgerError> {
        self.index
            .get(id)
            .map(|&position| &self.orders[position])
            .ok_or(LedgerError::NotFound(*id))
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Apply a status/progress change to one order.
    ///
    /// The mutator works on a copy; the change is committed only if it keeps
    /// the order's identity, moves forward and leaves a consistent order.
    pub fn update<F>(&mut self, id: &OrderId, mutator: F) -> Result<&Order, LedgerError>
    where
        F: FnOnce(&mut Order),
    {
        let position = *self.index.get(id).ok_or(LedgerError::NotFound(*id))?;
        let current = &self.orders[position];

        let mut next = current.clone();
        mutator(&mut next);
        check_transition(current, &next)?;

        self.orders[position] = next;
        Ok(&self.orders[position])
    }
}

fn check_transition(current: &Order, next: &Order) -> Result<(), LedgerError> {
    let invalid = || LedgerError::InvalidTransition {
        id: current.id,
        from: format!("{} {}%", current.status, current.progress),
        to: format!("{} {}%", next.status, next.progress),
    };

    let identity_changed = next.id != current.id
        || next.service_name != current.service_name
        || next.link != current.link
        || next.quantity != current.quantity
        || next.created_at != current.created_at;

    if identity_changed || next.status < current.status || next.progress < current.progress {
        return Err(invalid());
    }
    if next.invariant_violation().is_some() {
        return Err(invalid());
    }

    Ok(())
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    #[error("Duplicate order id: {0}")]
    DuplicateId(OrderId),

    #[error("Invalid transition for order {id} from {from} to {to}")]
    InvalidTransition {
        id: OrderId,
        from: String,
        to: String,
    },

    #[error("Order {id} is inconsistent: {reason}")]
    InvalidOrder {
        id: OrderId,
        reason: &'static str,
    },
}

impl LedgerError {
    /// Breaches of ledger invariants, as opposed to a lookup miss
    pub fn is_invariant_breach(&self) -> bool {
        !matches!(self, LedgerError::NotFound(_))
    }
}
