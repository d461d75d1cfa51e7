//! Domain types for tradecost

pub mod contract;
pub mod order;
pub mod transaction;
pub mod validation;

pub use contract::{Contract, SecurityType};
pub use order::{ExecutionStyle, Order, OrderSide};
pub use transaction::Transaction;
pub use validation::ValidationError;
