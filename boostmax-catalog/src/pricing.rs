use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

use crate::tier::ServiceTier;

/// Number of fractional digits in every displayed amount
pub const AMOUNT_SCALE: i64 = 2;

/// Round to two decimal places, half away from zero.
pub fn round2(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(AMOUNT_SCALE, RoundingMode::HalfUp)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// ISO currency code all unit prices are denominated in
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: "RUB".to_string(),
        }
    }
}

/// Derives order totals from tier unit prices
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn currency(&self) -> &str {
        &self.config.currency
    }

    /// `unit_price * quantity`, rounded to two places.
    ///
    /// Exact decimal arithmetic, so the result is monotonic in `quantity`.
    pub fn price(&self, tier: &ServiceTier, quantity: u32) -> BigDecimal {
        round2(&(&tier.unit_price * &BigDecimal::from(quantity)))
    }

    /// Total shown next to the order form; `0.00` until a tier is chosen
    pub fn display_total(&self, tier: Option<&ServiceTier>, quantity: u32) -> BigDecimal {
        match tier {
            Some(tier) => self.price(tier, quantity),
            None => BigDecimal::from(0).with_scale(AMOUNT_SCALE),
        }
    }
}
