use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::ledger::{LedgerError, OrderLedger};
use crate::models::{Order, OrderId, OrderStatus, MAX_PROGRESS};

/// One week
pub const MAX_START_DELAY_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// How often the background worker drives a tick
    pub tick_interval_ms: u64,
    /// Delay window between creation and the start of processing
    pub start_delay_min_secs: u64,
    pub start_delay_max_secs: u64,
    /// Progress gained per tick while processing, in percent
    pub min_step: u8,
    pub max_step: u8,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            start_delay_min_secs: 60,
            start_delay_max_secs: 300,
            min_step: 1,
            max_step: 5,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".to_string());
        }
        if self.start_delay_min_secs > self.start_delay_max_secs {
            return Err(format!(
                "start delay window is inverted: {}s > {}s",
                self.start_delay_min_secs, self.start_delay_max_secs
            ));
        }
        if self.start_delay_max_secs > MAX_START_DELAY_SECS {
            return Err(format!(
                "start delay of {}s exceeds the {}s limit",
                self.start_delay_max_secs, MAX_START_DELAY_SECS
            ));
        }
        if self.min_step == 0 || self.min_step > self.max_step || self.max_step >= MAX_PROGRESS {
            return Err(format!(
                "progress step must satisfy 1 <= min ({}) <= max ({}) < 100",
                self.min_step, self.max_step
            ));
        }
        Ok(())
    }
}

/// Outcome of one simulator tick
#[derive(Debug, Default)]
pub struct TickReport {
    /// Post-update snapshots of every order that changed
    pub updated: Vec<Order>,
    /// Orders that reached `completed` during this tick
    pub completed: Vec<OrderId>,
    /// Mutations the ledger refused
    pub rejected: Vec<LedgerError>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.rejected.is_empty()
    }
}

/// Moves non-terminal orders through `pending -> processing -> completed`.
///
/// Each tracked order carries the instant it is due to start processing.
/// Once an order completes its entry is dropped, so the work per tick is
/// bounded by the number of live orders.
pub struct ProgressSimulator<R = StdRng> {
    config: SimulatorConfig,
    rng: R,
    schedule: BTreeMap<OrderId, DateTime<Utc>>,
}

impl<R: Rng> ProgressSimulator<R> {
    /// `config` is expected to have passed [`SimulatorConfig::validate`]
    pub fn new(config: SimulatorConfig, rng: R) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid simulator config");
        Self {
            config,
            rng,
            schedule: BTreeMap::new(),
        }
    }

    /// Start following an order. Completed orders are ignored.
    pub fn track(&mut self, order: &Order) {
        let starts_at = match order.status {
            OrderStatus::Completed => return,
            OrderStatus::Processing => order.created_at,
            OrderStatus::Pending => {
                let delay = self
                    .rng
                    .gen_range(self.config.start_delay_min_secs..=self.config.start_delay_max_secs)
                    .min(MAX_START_DELAY_SECS);
                order.created_at + Duration::seconds(delay as i64)
            }
        };

        debug!("Tracking order {} (starts at {})", order.id, starts_at);
        self.schedule.insert(order.id, starts_at);
    }

    pub fn is_tracking(&self, id: &OrderId) -> bool {
        self.schedule.contains_key(id)
    }

    /// Number of orders still awaiting completion
    pub fn active(&self) -> usize {
        self.schedule.len()
    }

    /// When a tracked order is due to leave `pending`
    pub fn starts_at(&self, id: &OrderId) -> Option<DateTime<Utc>> {
        self.schedule.get(id).copied()
    }

    /// Advance every tracked order by one step
    pub fn tick(&mut self, ledger: &mut OrderLedger, now: DateTime<Utc>) -> TickReport {
        let mut report = TickReport::default();
        let due: Vec<(OrderId, DateTime<Utc>)> = self.schedule.iter().map(|(id, at)| (*id, *at)).collect();

        for (id, starts_at) in due {
            let (status, progress) = match ledger.get(&id) {
                Ok(order) => (order.status, order.progress),
                Err(e) => {
                    warn!("Dropping schedule for unknown order {}: {}", id, e);
                    self.schedule.remove(&id);
                    continue;
                }
            };

            let target = match status {
                OrderStatus::Completed => {
                    self.schedule.remove(&id);
                    continue;
                }
                OrderStatus::Pending if now < starts_at => continue,
                // Entering processing never lands on 100
                OrderStatus::Pending => self.step().min(MAX_PROGRESS - 1),
                OrderStatus::Processing => progress.saturating_add(self.step()).min(MAX_PROGRESS),
            };

            match ledger.update(&id, |order| order.advance(target, now)) {
                Ok(order) => {
                    if order.status == OrderStatus::Completed {
                        info!("Order {} completed", id);
                        report.completed.push(id);
                        self.schedule.remove(&id);
                    } else if status == OrderStatus::Pending {
                        info!("Order {} started processing at {}%", id, order.progress);
                    }
                    report.updated.push(order.clone());
                }
                Err(e) => {
                    warn!("Simulator update rejected for order {}: {}", id, e);
                    self.schedule.remove(&id);
                    report.rejected.push(e);
                }
            }
        }

        report
    }

    fn step(&mut self) -> u8 {
        self.rng.gen_range(self.config.min_step..=self.config.max_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn pending(id: u64, created: DateTime<Utc>) -> Order {
        Order::new(OrderId::new(id), "Просмотры".to_string(), "https://youtube.com/watch?v=xyz".to_string(), 2000, created)
    }

    fn simulator(seed: u64) -> ProgressSimulator<StdRng> {
        ProgressSimulator::new(SimulatorConfig::default(), StdRng::seed_from_u64(seed))
    }

    fn run_to_completion(sim: &mut ProgressSimulator<StdRng>, ledger: &mut OrderLedger, id: OrderId) -> Vec<Order> {
        let mut history = vec![ledger.get(&id).unwrap().clone()];
        for tick in 0..10_000 {
            let report = sim.tick(ledger, at(1_000 + tick));
            assert!(report.rejected.is_empty());
            history.extend(report.updated.into_iter().filter(|o| o.id == id));
            if !sim.is_tracking(&id) {
                break;
            }
        }
        history
    }

    #[test]
    fn test_config_validation() {
        assert!(SimulatorConfig::default().validate().is_ok());

        let inverted = SimulatorConfig { start_delay_min_secs: 10, start_delay_max_secs: 5, ..Default::default() };
        assert!(inverted.validate().is_err());

        let zero_step = SimulatorConfig { min_step: 0, ..Default::default() };
        assert!(zero_step.validate().is_err());

        let too_slow = SimulatorConfig { start_delay_max_secs: MAX_START_DELAY_SECS + 1, ..Default::default() };
        assert!(too_slow.validate().is_err());

        let whole_step = SimulatorConfig { max_step: 100, ..Default::default() };
        assert!(whole_step.validate().is_err());
    }

    #[test]
    fn test_start_delay_within_window() {
        let mut sim = simulator(1);
        for id in 1..=100 {
            let order = pending(id, at(0));
            sim.track(&order);

            let delay = sim.starts_at(&order.id).unwrap() - at(0);
            assert!(delay >= Duration::seconds(60) && delay <= Duration::seconds(300));
        }
    }

    #[test]
    fn test_pending_waits_for_delay() {
        let mut sim = simulator(2);
        let mut ledger = OrderLedger::new();
        let order = pending(1, at(0));
        ledger.submit(order.clone()).unwrap();
        sim.track(&order);

        let starts_at = sim.starts_at(&order.id).unwrap();
        let report = sim.tick(&mut ledger, starts_at - Duration::seconds(1));
        assert!(report.is_empty());
        assert_eq!(ledger.get(&order.id).unwrap().status, OrderStatus::Pending);

        let report = sim.tick(&mut ledger, starts_at);
        assert_eq!(report.updated.len(), 1);
        let started = ledger.get(&order.id).unwrap();
        assert_eq!(started.status, OrderStatus::Processing);
        assert!(started.progress > 0 && started.progress < 100);
    }

    #[test]
    fn test_lifecycle_is_monotonic_and_bounded() {
        let mut sim = simulator(3);
        let mut ledger = OrderLedger::new();
        let order = pending(1, at(0));
        ledger.submit(order.clone()).unwrap();
        sim.track(&order);

        let history = run_to_completion(&mut sim, &mut ledger, order.id);

        for pair in history.windows(2) {
            let (before, after) = (&pair[0], &pair[1]);
            assert!(after.progress >= before.progress);
            assert!(after.status >= before.status);
            assert!(after.progress - before.progress <= 5);
            // pending never jumps straight to completed
            assert!(!(before.status == OrderStatus::Pending && after.status == OrderStatus::Completed));
        }

        let last = history.last().unwrap();
        assert_eq!(last.status, OrderStatus::Completed);
        assert_eq!(last.progress, 100);
        assert!(!sim.is_tracking(&order.id));
        assert_eq!(sim.active(), 0);
    }

    #[test]
    fn test_completed_orders_not_tracked() {
        let mut sim = simulator(4);
        let done = Order::restore(OrderId::new(1), "Подписчики".to_string(), "https://instagram.com/user1".to_string(), 500, OrderStatus::Completed, 100, at(0));

        sim.track(&done);
        assert_eq!(sim.active(), 0);
    }

    #[test]
    fn test_processing_order_continues_immediately() {
        let mut sim = simulator(5);
        let mut ledger = OrderLedger::new();
        let order = Order::restore(OrderId::new(2), "Лайки".to_string(), "https://instagram.com/post/abc".to_string(), 1000, OrderStatus::Processing, 65, at(0));
        ledger.submit(order.clone()).unwrap();
        sim.track(&order);

        let report = sim.tick(&mut ledger, at(1));
        assert_eq!(report.updated.len(), 1);
        assert!(ledger.get(&order.id).unwrap().progress > 65);
    }

    #[test]
    fn test_unknown_order_is_retired() {
        let mut sim = simulator(6);
        let mut ledger = OrderLedger::new();
        sim.track(&pending(42, at(0)));

        let report = sim.tick(&mut ledger, at(10_000));
        assert!(report.is_empty());
        assert!(!sim.is_tracking(&OrderId::new(42)));
    }
}
