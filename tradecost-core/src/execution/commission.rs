//! Commission models: brokerage fee charged per filled order.
//!
//! Every model validates the fill price (finite, strictly positive) before
//! doing any arithmetic and returns a non-negative fee.

use super::error::CostError;
use crate::domain::validation::{non_negative, positive};
use crate::domain::Order;

/// Commission model: computes the fee for one filled order.
pub trait CommissionModel: Send + Sync {
    /// Fee owed for `order` filled at `fill_price` per unit.
    fn calculate_commission(&self, order: &Order, fill_price: f64) -> Result<f64, CostError>;

    /// Name of this model
    fn name(&self) -> &str;
}

/// Interactive Brokers US fixed pricing.
///
/// Per-share fee of 0.005, capped at 1% of trade value, with a 1.0 minimum
/// per order: `max(1.0, min(0.005 * q, 0.01 * price * q))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IbCommission;

impl IbCommission {
    pub const PER_SHARE: f64 = 0.005;
    pub const MAX_TRADE_VALUE_FRACTION: f64 = 0.01;
    pub const MINIMUM: f64 = 1.0;

    pub fn new() -> Self {
        Self
    }
}

impl CommissionModel for IbCommission {
    fn calculate_commission(&self, order: &Order, fill_price: f64) -> Result<f64, CostError> {
        let fill_price = positive("fill_price", fill_price)?;
        let quantity = order.quantity().abs();

        let per_share = Self::PER_SHARE * quantity;
        let cap = Self::MAX_TRADE_VALUE_FRACTION * fill_price * quantity;
        Ok(per_share.min(cap).max(Self::MINIMUM))
    }

    fn name(&self) -> &str {
        "IbCommission"
    }
}

/// Same fee for every order regardless of size.
#[derive(Debug, Clone, Copy)]
pub struct FixedCommission {
    commission: f64,
}

impl FixedCommission {
    pub fn new(commission: f64) -> Result<Self, CostError> {
        let commission = non_negative("commission", commission)?;
        Ok(Self { commission })
    }

    pub fn commission(&self) -> f64 {
        self.commission
    }
}

impl CommissionModel for FixedCommission {
    fn calculate_commission(&self, _order: &Order, fill_price: f64) -> Result<f64, CostError> {
        positive("fill_price", fill_price)?;
        Ok(self.commission)
    }

    fn name(&self) -> &str {
        "FixedCommission"
    }
}

/// Fee proportional to traded value: `|q| * price * bps / 10_000`.
#[derive(Debug, Clone, Copy)]
pub struct BpsTradeValueCommission {
    bps: f64,
}

impl BpsTradeValueCommission {
    pub fn new(bps: f64) -> Result<Self, CostError> {
        let bps = non_negative("commission_bps", bps)?;
        Ok(Self { bps })
    }

    pub fn bps(&self) -> f64 {
        self.bps
    }
}

impl CommissionModel for BpsTradeValueCommission {
    fn calculate_commission(&self, order: &Order, fill_price: f64) -> Result<f64, CostError> {
        let fill_price = positive("fill_price", fill_price)?;
        Ok(order.quantity().abs() * fill_price * (self.bps / 10_000.0))
    }

    fn name(&self) -> &str {
        "BpsTradeValueCommission"
    }
}

/// Frictionless brokerage.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCommission;

impl CommissionModel for NoCommission {
    fn calculate_commission(&self, _order: &Order, fill_price: f64) -> Result<f64, CostError> {
        positive("fill_price", fill_price)?;
        Ok(0.0)
    }

    fn name(&self) -> &str {
        "NoCommission"
    }
}
