//! Orders as seen by the cost models: contract, signed quantity, execution style.

use super::contract::Contract;
use super::validation::{finite, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction, derived from the sign of the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Positive quantities buy; zero and negative quantities sell.
    pub fn from_quantity(quantity: f64) -> Self {
        if quantity > 0.0 {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        }
    }
}

/// How an order is meant to fill.
///
/// `Market` and `Stop` are the styles the slippage models price explicitly.
/// Everything the order system may add later lands in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStyle {
    /// Fill at the prevailing price.
    Market,
    /// Becomes a market order once `stop_price` trades.
    Stop { stop_price: f64 },
    /// Fill at `limit_price` or better.
    Limit { limit_price: f64 },
    /// Any style without dedicated handling.
    Other { name: String },
}

impl ExecutionStyle {
    /// True for the styles that cross the spread when they fill.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, ExecutionStyle::Market | ExecutionStyle::Stop { .. })
    }
}

impl fmt::Display for ExecutionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStyle::Market => write!(f, "MarketOrder"),
            ExecutionStyle::Stop { stop_price } => write!(f, "StopOrder({stop_price})"),
            ExecutionStyle::Limit { limit_price } => write!(f, "LimitOrder({limit_price})"),
            ExecutionStyle::Other { name } => write!(f, "{name}"),
        }
    }
}

/// A single order handed to the cost models.
///
/// Built through [`Order::new`], which rejects non-finite quantities, so every
/// model downstream can rely on `quantity` being a real number. Deserialization
/// goes through the same check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOrder")]
pub struct Order {
    contract: Contract,
    quantity: f64,
    execution_style: ExecutionStyle,
}

/// Unchecked wire form of [`Order`].
#[derive(Deserialize)]
struct RawOrder {
    contract: Contract,
    quantity: f64,
    execution_style: ExecutionStyle,
}

impl TryFrom<RawOrder> for Order {
    type Error = ValidationError;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        Order::new(raw.contract, raw.quantity, raw.execution_style)
    }
}

impl Order {
    pub fn new(
        contract: Contract,
        quantity: f64,
        execution_style: ExecutionStyle,
    ) -> Result<Self, ValidationError> {
        let quantity = finite("quantity", quantity)?;
        Ok(Self {
            contract,
            quantity,
            execution_style,
        })
    }

    pub fn market(contract: Contract, quantity: f64) -> Result<Self, ValidationError> {
        Self::new(contract, quantity, ExecutionStyle::Market)
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn execution_style(&self) -> &ExecutionStyle {
        &self.execution_style
    }

    pub fn side(&self) -> OrderSide {
        OrderSide::from_quantity(self.quantity)
    }
}
