use boostmax_catalog::{Catalog, PricingConfig, QuantityBounds, ServiceTier};
use boostmax_order::SimulatorConfig;
use serde::Deserialize;
use std::env;

use crate::CoreError;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub pricing: PricingConfig,
    pub ordering: OrderingConfig,
    pub simulator: SimulatorConfig,
    /// Replaces the built-in tiers when non-empty. Prices must be quoted strings.
    pub catalog: Vec<ServiceTier>,
    /// Show the sample order history at startup
    pub seed_demo_orders: bool,
    /// Panic on ledger invariant breaches instead of logging and skipping them
    pub strict_invariants: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pricing: PricingConfig::default(),
            ordering: OrderingConfig::default(),
            simulator: SimulatorConfig::default(),
            catalog: Vec::new(),
            seed_demo_orders: true,
            strict_invariants: cfg!(debug_assertions),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OrderingConfig {
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub quantity_step: u32,
    pub default_quantity: u32,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        let bounds = QuantityBounds::default();
        Self {
            min_quantity: bounds.min,
            max_quantity: bounds.max,
            quantity_step: bounds.step,
            default_quantity: bounds.default,
        }
    }
}

impl OrderingConfig {
    pub fn bounds(&self) -> QuantityBounds {
        QuantityBounds {
            min: self.min_quantity,
            max: self.max_quantity,
            step: self.quantity_step,
            default: self.default_quantity,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, CoreError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `BOOSTMAX__SIMULATOR__MAX_STEP=10`
            .add_source(
                config::Environment::with_prefix("BOOSTMAX")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CoreError::Config(e.to_string()))?;

        let config: Config = s
            .try_deserialize()
            .map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the storefront cannot run with
    pub fn validate(&self) -> Result<(), CoreError> {
        self.simulator.validate().map_err(CoreError::Config)?;
        self.ordering
            .bounds()
            .validate()
            .map_err(|e| CoreError::Config(e.to_string()))?;
        if self.pricing.currency.trim().is_empty() {
            return Err(CoreError::Config("pricing.currency must not be empty".to_string()));
        }
        self.build_catalog()?;
        Ok(())
    }

    /// Catalog described by this configuration
    pub fn build_catalog(&self) -> Result<Catalog, CoreError> {
        let bounds = self.ordering.bounds();
        let catalog = if self.catalog.is_empty() {
            Catalog::builtin(bounds)?
        } else {
            Catalog::new(self.catalog.clone(), bounds)?
        };
        Ok(catalog)
    }
}
