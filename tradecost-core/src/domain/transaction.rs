use crate::domain::contract::Contract;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A realised fill: what was traded, at what price, and what it cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub time: DateTime<Utc>,
    pub contract: Contract,
    /// Signed: positive bought, negative sold.
    pub quantity: f64,
    pub price: f64,
    pub commission: f64,
}

impl Transaction {
    pub fn new(
        time: DateTime<Utc>,
        contract: Contract,
        quantity: f64,
        price: f64,
        commission: f64,
    ) -> Self {
        Self {
            time,
            contract,
            quantity,
            price,
            commission,
        }
    }

    /// Cash paid (negative) or received (positive), commission included.
    pub fn net_cash_flow(&self) -> f64 {
        -self.quantity * self.price - self.commission
    }
}
