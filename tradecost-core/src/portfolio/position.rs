//! One contract's position over its lifetime, from first fill to flat.
//!
//! A position only ever points one way. Transactions in its direction build
//! it up and feed the average price and build commission; opposite-signed
//! transactions reduce it. Reaching zero closes it for good.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Contract, Transaction};

/// Quantities closer to zero than this count as flat.
const QUANTITY_EPSILON: f64 = 1e-9;

/// Errors from position updates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    #[error("position in {0} is closed")]
    Closed(String),

    #[error("transaction for {got} applied to position in {expected}")]
    ContractMismatch { expected: String, got: String },

    #[error("transaction of {transaction} would flip position of {position} (close it first)")]
    DirectionFlip { position: f64, transaction: f64 },

    #[error("transaction quantity must be non-zero")]
    ZeroQuantity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestPosition {
    contract: Contract,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    quantity: f64,
    direction: i8,
    is_closed: bool,
    current_price: f64,
    /// Sum of |q| over transactions that increased the position.
    bought_quantity: f64,
    /// Sum of |q| * price over the same transactions.
    bought_value: f64,
    build_commission: f64,
}

fn sign(x: f64) -> i8 {
    if x > QUANTITY_EPSILON {
        1
    } else if x < -QUANTITY_EPSILON {
        -1
    } else {
        0
    }
}

impl BacktestPosition {
    pub fn new(contract: Contract, start_time: DateTime<Utc>) -> Self {
        Self {
            contract,
            start_time,
            end_time: None,
            quantity: 0.0,
            direction: 0,
            is_closed: false,
            current_price: 0.0,
            bought_quantity: 0.0,
            bought_value: 0.0,
            build_commission: 0.0,
        }
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Time of the transaction that closed the position.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// 1 long, -1 short, 0 flat.
    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    /// Average price of everything bought into the position; 0 when flat.
    pub fn avg_price_per_unit(&self) -> f64 {
        if sign(self.quantity) == 0 || self.bought_quantity == 0.0 {
            return 0.0;
        }
        self.bought_value / self.bought_quantity
    }

    /// Commission paid on the transactions that built the position.
    pub fn total_commission_to_build_position(&self) -> f64 {
        self.build_commission
    }

    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    /// Cash equities: exposure equals market value.
    pub fn total_exposure(&self) -> f64 {
        self.market_value()
    }

    pub fn unrealized_pnl(&self) -> f64 {
        self.quantity * (self.current_price - self.avg_price_per_unit())
    }

    pub fn transact(&mut self, transaction: &Transaction) -> Result<(), PositionError> {
        if self.is_closed {
            return Err(PositionError::Closed(self.contract.symbol.clone()));
        }
        if transaction.contract != self.contract {
            return Err(PositionError::ContractMismatch {
                expected: self.contract.symbol.clone(),
                got: transaction.contract.symbol.clone(),
            });
        }
        let tx_sign = sign(transaction.quantity);
        if tx_sign == 0 {
            return Err(PositionError::ZeroQuantity);
        }

        let new_quantity = self.quantity + transaction.quantity;
        if self.direction != 0 && sign(new_quantity) == -self.direction {
            return Err(PositionError::DirectionFlip {
                position: self.quantity,
                transaction: transaction.quantity,
            });
        }

        if self.direction == 0 {
            self.direction = tx_sign;
        }
        if tx_sign == self.direction {
            let size = transaction.quantity.abs();
            self.bought_quantity += size;
            self.bought_value += size * transaction.price;
            self.build_commission += transaction.commission;
        }

        self.quantity = new_quantity;
        if sign(self.quantity) == 0 {
            self.quantity = 0.0;
            self.direction = 0;
            self.is_closed = true;
            self.end_time = Some(transaction.time);
        }
        Ok(())
    }

    /// Mark to market: longs at the bid, shorts at the ask.
    pub fn update_price(&mut self, bid_price: f64, ask_price: f64) -> Result<(), PositionError> {
        if self.is_closed {
            return Err(PositionError::Closed(self.contract.symbol.clone()));
        }
        match self.direction {
            1 => self.current_price = bid_price,
            -1 => self.current_price = ask_price,
            _ => {}
        }
        Ok(())
    }
}
