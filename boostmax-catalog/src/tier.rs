use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// One purchasable service offering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceTier {
    pub id: String,
    pub name: String,
    /// Symbolic icon reference, passed through to the presentation layer untouched
    pub icon: String,
    /// Price per unit in the catalog currency
    pub unit_price: BigDecimal,
    pub description: String,
}

impl ServiceTier {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        unit_price: BigDecimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            unit_price,
            description: description.into(),
        }
    }
}

/// Quantity limits declared by the catalog for every tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuantityBounds {
    pub min: u32,
    pub max: u32,
    /// Input granularity hint for the presentation layer; not enforced on submit
    pub step: u32,
    /// Value the selection resets to after a successful order
    pub default: u32,
}

impl QuantityBounds {
    pub fn contains(&self, quantity: u32) -> bool {
        (self.min..=self.max).contains(&quantity)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.min == 0 || self.min > self.max || self.step == 0 || !self.contains(self.default) {
            return Err(CatalogError::InvalidBounds {
                min: self.min,
                max: self.max,
                default: self.default,
            });
        }
        Ok(())
    }
}

impl Default for QuantityBounds {
    fn default() -> Self {
        Self {
            min: 10,
            max: 10_000,
            step: 10,
            default: 100,
        }
    }
}

/// Immutable registry of offerable tiers, fixed for the lifetime of the process
#[derive(Debug, Clone)]
pub struct Catalog {
    tiers: Vec<ServiceTier>,
    bounds: QuantityBounds,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and non-positive prices
    pub fn new(tiers: Vec<ServiceTier>, bounds: QuantityBounds) -> Result<Self, CatalogError> {
        bounds.validate()?;

        if tiers.is_empty() {
            return Err(CatalogError::Empty);
        }

        let zero = BigDecimal::from(0);
        let mut seen = HashSet::new();
        for tier in &tiers {
            if !seen.insert(tier.id.as_str()) {
                return Err(CatalogError::DuplicateId(tier.id.clone()));
            }
            if tier.unit_price <= zero {
                return Err(CatalogError::InvalidPrice {
                    id: tier.id.clone(),
                    price: tier.unit_price.to_string(),
                });
            }
        }

        tracing::debug!("Catalog loaded with {} tiers", tiers.len());
        Ok(Self { tiers, bounds })
    }

    /// The storefront's built-in offering
    pub fn builtin(bounds: QuantityBounds) -> Result<Self, CatalogError> {
        Self::new(builtin_tiers(), bounds)
    }

    /// All tiers in declaration order
    pub fn list(&self) -> &[ServiceTier] {
        &self.tiers
    }

    pub fn lookup(&self, id: &str) -> Result<&ServiceTier, CatalogError> {
        self.tiers
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn bounds(&self) -> QuantityBounds {
        self.bounds
    }
}

fn builtin_tiers() -> Vec<ServiceTier> {
    // Literal decimal strings; parsing cannot fail
    let price = |s: &str| BigDecimal::from_str(s).unwrap_or_default();

    vec![
        ServiceTier::new("followers", "Подписчики", "Users", price("0.5"), "Быстрая накрутка подписчиков"),
        ServiceTier::new("likes", "Лайки", "Heart", price("0.3"), "Увеличение лайков на постах"),
        ServiceTier::new("views", "Просмотры", "Eye", price("0.2"), "Накрутка просмотров видео"),
        ServiceTier::new("comments", "Комментарии", "MessageSquare", price("1.0"), "Качественные комментарии"),
    ]
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Service tier not found: {0}")]
    NotFound(String),

    #[error("Duplicate service tier id: {0}")]
    DuplicateId(String),

    #[error("Service tier {id} has non-positive unit price {price}")]
    InvalidPrice {
        id: String,
        price: String,
    },

    #[error("Invalid quantity bounds: min {min}, max {max}, default {default}")]
    InvalidBounds {
        min: u32,
        max: u32,
        default: u32,
    },

    #[error("Catalog has no tiers")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(id: &str, price: &str) -> ServiceTier {
        ServiceTier::new(id, id, "Star", BigDecimal::from_str(price).unwrap(), "")
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin(QuantityBounds::default()).unwrap();

        let ids: Vec<&str> = catalog.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["followers", "likes", "views", "comments"]);

        let likes = catalog.lookup("likes").unwrap();
        assert_eq!(likes.name, "Лайки");
        assert_eq!(likes.unit_price, BigDecimal::from_str("0.3").unwrap());
    }

    #[test]
    fn test_lookup_missing() {
        let catalog = Catalog::builtin(QuantityBounds::default()).unwrap();
        assert_eq!(
            catalog.lookup("shares").unwrap_err(),
            CatalogError::NotFound("shares".to_string())
        );
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![tier("a", "1"), tier("a", "2")], QuantityBounds::default());
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateId("a".to_string()));
    }

    #[test]
    fn test_rejects_non_positive_price() {
        let result = Catalog::new(vec![tier("free", "0")], QuantityBounds::default());
        assert!(matches!(result, Err(CatalogError::InvalidPrice { .. })));

        let result = Catalog::new(vec![tier("neg", "-0.1")], QuantityBounds::default());
        assert!(matches!(result, Err(CatalogError::InvalidPrice { .. })));
    }

    #[test]
    fn test_bounds() {
        let bounds = QuantityBounds::default();
        assert!(!bounds.contains(9));
        assert!(bounds.contains(10));
        assert!(bounds.contains(10_000));
        assert!(!bounds.contains(10_001));

        let inverted = QuantityBounds { min: 100, max: 10, step: 1, default: 50 };
        assert!(Catalog::new(vec![tier("a", "1")], inverted).is_err());

        let default_outside = QuantityBounds { default: 5, ..QuantityBounds::default() };
        assert!(default_outside.validate().is_err());
    }

    #[test]
    fn test_tier_serializes_price_as_string() {
        let json = serde_json::to_value(tier("likes", "0.3")).unwrap();
        assert_eq!(json["unit_price"], "0.3");
    }
}
