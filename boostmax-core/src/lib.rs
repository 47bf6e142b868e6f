pub mod app_config;
pub mod selection;
pub mod notifications;
pub mod seed;
pub mod storefront;

use boostmax_catalog::CatalogError;
use boostmax_order::{LedgerError, ValidationError};

pub use app_config::Config;
pub use notifications::{Notifier, StorefrontEvent};
pub use selection::Selection;
pub use storefront::{OrderView, SelectionView, Storefront, StorefrontView};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
