use serde::{Deserialize, Serialize};

/// In-progress order form for one interactive session.
///
/// Owned by the storefront and passed in at construction, never global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub tier_id: Option<String>,
    pub link: String,
    pub quantity: u32,
}

impl Selection {
    pub fn new(default_quantity: u32) -> Self {
        Self {
            tier_id: None,
            link: String::new(),
            quantity: default_quantity,
        }
    }

    /// Back to an empty form after a successful submission
    pub fn reset(&mut self, default_quantity: u32) {
        *self = Self::new(default_quantity);
    }

    pub fn is_empty(&self) -> bool {
        self.tier_id.is_none() && self.link.is_empty()
    }
}
