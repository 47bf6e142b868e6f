use boostmax_catalog::{QuantityBounds, ServiceTier};

/// Input that passed validation; the only way to reach the factory
#[derive(Debug, Clone, Copy)]
pub struct OrderRequest<'a> {
    tier: &'a ServiceTier,
    link: &'a str,
    quantity: u32,
}

impl<'a> OrderRequest<'a> {
    pub fn tier(&self) -> &'a ServiceTier {
        self.tier
    }

    pub fn link(&self) -> &'a str {
        self.link
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Check submission preconditions. Rules run in order and the first failure wins.
pub fn validate<'a>(
    tier: Option<&'a ServiceTier>,
    link: &'a str,
    quantity: u32,
    bounds: &QuantityBounds,
) -> Result<OrderRequest<'a>, ValidationError> {
    let tier = tier.ok_or(ValidationError::MissingService)?;

    let link = link.trim();
    if link.is_empty() {
        return Err(ValidationError::MissingLink);
    }

    // The form restricts the range as well; it is re-checked here regardless
    if !bounds.contains(quantity) {
        return Err(ValidationError::QuantityOutOfRange {
            quantity,
            min: bounds.min,
            max: bounds.max,
        });
    }

    Ok(OrderRequest { tier, link, quantity })
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Выберите услугу")]
    MissingService,

    #[error("Укажите ссылку на профиль или пост")]
    MissingLink,

    #[error("Количество {quantity} вне допустимого диапазона {min}–{max}")]
    QuantityOutOfRange {
        quantity: u32,
        min: u32,
        max: u32,
    },
}

impl ValidationError {
    /// Stable machine-readable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingService => "MISSING_SERVICE",
            ValidationError::MissingLink => "MISSING_LINK",
            ValidationError::QuantityOutOfRange { .. } => "QUANTITY_OUT_OF_RANGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boostmax_catalog::Catalog;

    fn tier() -> ServiceTier {
        Catalog::builtin(QuantityBounds::default())
            .unwrap()
            .lookup("likes")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_missing_service_wins_over_everything() {
        let bounds = QuantityBounds::default();
        for (link, quantity) in [("", 0), ("https://x.com", 100), ("", 100_000)] {
            assert_eq!(
                validate(None, link, quantity, &bounds).unwrap_err(),
                ValidationError::MissingService
            );
        }
    }

    #[test]
    fn test_missing_link() {
        let tier = tier();
        let bounds = QuantityBounds::default();

        assert_eq!(validate(Some(&tier), "", 100, &bounds).unwrap_err(), ValidationError::MissingLink);
        assert_eq!(validate(Some(&tier), "   ", 100, &bounds).unwrap_err(), ValidationError::MissingLink);
        // Link is checked before quantity
        assert_eq!(validate(Some(&tier), "", 1, &bounds).unwrap_err(), ValidationError::MissingLink);
    }

    #[test]
    fn test_quantity_bounds() {
        let tier = tier();
        let bounds = QuantityBounds::default();

        assert_eq!(
            validate(Some(&tier), "https://x.com", 9, &bounds).unwrap_err(),
            ValidationError::QuantityOutOfRange { quantity: 9, min: 10, max: 10_000 }
        );
        assert!(validate(Some(&tier), "https://x.com", 10_001, &bounds).is_err());
        assert!(validate(Some(&tier), "https://x.com", 10, &bounds).is_ok());
        assert!(validate(Some(&tier), "https://x.com", 10_000, &bounds).is_ok());
    }

    #[test]
    fn test_valid_request() {
        let tier = tier();
        let request = validate(Some(&tier), " https://x.com/p/1 ", 1000, &QuantityBounds::default()).unwrap();

        assert_eq!(request.tier().id, "likes");
        assert_eq!(request.link(), "https://x.com/p/1");
        assert_eq!(request.quantity(), 1000);
    }
}
