pub mod tier;
pub mod pricing;

pub use tier::{Catalog, CatalogError, QuantityBounds, ServiceTier};
pub use pricing::{round2, PricingConfig, PricingEngine};
