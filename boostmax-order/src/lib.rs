pub mod models;
pub mod validator;
pub mod factory;
pub mod ledger;
pub mod simulator;

pub use models::{Order, OrderId, OrderStatus};
pub use validator::{validate, OrderRequest, ValidationError};
pub use factory::OrderFactory;
pub use ledger::{LedgerError, OrderLedger};
pub use simulator::{ProgressSimulator, SimulatorConfig, TickReport};
