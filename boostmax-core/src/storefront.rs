use bigdecimal::BigDecimal;
use boostmax_catalog::{Catalog, PricingEngine, QuantityBounds, ServiceTier};
use boostmax_order::{
    validate, LedgerError, Order, OrderFactory, OrderId, OrderLedger, ProgressSimulator, TickReport,
};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::app_config::Config;
use crate::notifications::{Notifier, StorefrontEvent};
use crate::seed::demo_orders;
use crate::selection::Selection;
use crate::CoreResult;

/// Read-only snapshot handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct StorefrontView {
    pub selection: SelectionView,
    pub total: BigDecimal,
    pub currency: String,
    pub bounds: QuantityBounds,
    pub orders: Vec<OrderView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionView {
    pub tier: Option<ServiceTier>,
    pub link: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub status_label: &'static str,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            order: order.clone(),
            status_label: order.status.label(),
        }
    }
}

/// One interactive storefront session: the order form, the order history
/// and the simulator driving it.
///
/// Every operation runs to completion; callers sharing a storefront across
/// tasks must serialize access.
pub struct Storefront<R = StdRng> {
    catalog: Arc<Catalog>,
    pricing: PricingEngine,
    selection: Selection,
    ledger: OrderLedger,
    factory: OrderFactory,
    simulator: ProgressSimulator<R>,
    notifier: Notifier,
    strict_invariants: bool,
}

impl Storefront<StdRng> {
    /// Wire a storefront from loaded configuration
    pub fn from_config(config: &Config, notifier: Notifier, now: DateTime<Utc>) -> CoreResult<Self> {
        config.validate()?;

        let catalog = Arc::new(config.build_catalog()?);
        let selection = Selection::new(catalog.bounds().default);
        let simulator = ProgressSimulator::new(config.simulator.clone(), StdRng::from_entropy());

        let mut storefront = Self::new(
            catalog,
            PricingEngine::new(config.pricing.clone()),
            selection,
            simulator,
            notifier,
        );
        storefront.strict_invariants = config.strict_invariants;

        if config.seed_demo_orders {
            storefront.seed(demo_orders(now))?;
        }

        Ok(storefront)
    }
}

impl<R: Rng> Storefront<R> {
    pub fn new(
        catalog: Arc<Catalog>,
        pricing: PricingEngine,
        selection: Selection,
        simulator: ProgressSimulator<R>,
        notifier: Notifier,
    ) -> Self {
        Self {
            catalog,
            pricing,
            selection,
            ledger: OrderLedger::new(),
            factory: OrderFactory::new(),
            simulator,
            notifier,
            strict_invariants: cfg!(debug_assertions),
        }
    }

    pub fn with_strict_invariants(mut self, strict: bool) -> Self {
        self.strict_invariants = strict;
        self
    }

    /// Admit pre-existing orders, given newest first
    pub fn seed(&mut self, orders: Vec<Order>) -> CoreResult<()> {
        for order in orders.into_iter().rev() {
            self.factory.observe(order.id);
            let admitted = self.ledger.submit(order)?;
            self.simulator.track(admitted);
        }
        info!("Seeded {} orders", self.ledger.len());
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_tier(&self) -> Option<&ServiceTier> {
        self.selection
            .tier_id
            .as_deref()
            .and_then(|id| self.catalog.lookup(id).ok())
    }

    pub fn select_tier(&mut self, id: &str) -> CoreResult<&ServiceTier> {
        let tier = self.catalog.lookup(id)?;
        self.selection.tier_id = Some(tier.id.clone());
        Ok(tier)
    }

    pub fn clear_selection(&mut self) {
        self.selection.reset(self.catalog.bounds().default);
    }

    pub fn set_link(&mut self, link: impl Into<String>) {
        self.selection.link = link.into();
    }

    /// Stored as given; bounds are enforced on submit
    pub fn set_quantity(&mut self, quantity: u32) {
        self.selection.quantity = quantity;
    }

    /// Total for the current form, `0.00` without a tier
    pub fn current_total(&self) -> BigDecimal {
        self.pricing
            .display_total(self.selected_tier(), self.selection.quantity)
    }

    /// Validate the form, create the order and put it at the head of the history.
    ///
    /// Validation failures leave the form untouched and are also published
    /// as [`StorefrontEvent::SubmissionRejected`].
    pub fn submit_order(&mut self, now: DateTime<Utc>) -> CoreResult<Order> {
        let tier = match self.selection.tier_id.as_deref() {
            Some(id) => Some(self.catalog.lookup(id)?),
            None => None,
        };

        let request = match validate(tier, &self.selection.link, self.selection.quantity, &self.catalog.bounds()) {
            Ok(request) => request,
            Err(e) => {
                warn!("Order rejected: {}", e);
                self.notifier.send(StorefrontEvent::rejected(&e));
                return Err(e.into());
            }
        };

        let order = self.factory.create(request, now);
        if let Err(e) = self.ledger.submit(order.clone()) {
            self.invariant_breach(&e);
            return Err(e.into());
        }

        self.simulator.track(&order);
        self.selection.reset(self.catalog.bounds().default);

        info!(
            "Order {} created: {} x{} for {}",
            order.id,
            order.service_name,
            order.quantity,
            order.link
        );
        self.notifier.send(StorefrontEvent::submitted(&order));
        Ok(order)
    }

    /// Drive one simulator step and publish every changed order
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickReport {
        let report = self.simulator.tick(&mut self.ledger, now);

        for e in &report.rejected {
            self.invariant_breach(e);
        }
        for order in &report.updated {
            self.notifier.send(StorefrontEvent::OrderUpdated { order: order.clone() });
        }

        report
    }

    pub fn orders(&self) -> Vec<Order> {
        self.ledger.all()
    }

    pub fn order(&self, id: &OrderId) -> CoreResult<&Order> {
        Ok(self.ledger.get(id)?)
    }

    /// Orders the simulator is still moving
    pub fn active_orders(&self) -> usize {
        self.simulator.active()
    }

    pub fn view(&self) -> StorefrontView {
        StorefrontView {
            selection: SelectionView {
                tier: self.selected_tier().cloned(),
                link: self.selection.link.clone(),
                quantity: self.selection.quantity,
            },
            total: self.current_total(),
            currency: self.pricing.currency().to_string(),
            bounds: self.catalog.bounds(),
            orders: self.ledger.iter().map(OrderView::from).collect(),
        }
    }

    // A ledger breach is a logic bug; the offending mutation has already been dropped
    fn invariant_breach(&self, e: &LedgerError) {
        error!("Ledger invariant breached: {}", e);
        if self.strict_invariants {
            panic!("ledger invariant breached: {}", e);
        }
    }
}
