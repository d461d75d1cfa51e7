//! Slippage models: adjust zero-impact fill prices for market impact.
//!
//! Slippage is directional: buyers pay more, sellers receive less.
//! - Market and stop orders: pay slippage (they cross the spread)
//! - Any other style: price passes through and a diagnostic is reported
//! - NaN prices stay NaN (slippage of an unknown price is unknown)

use std::sync::Arc;

use super::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use super::error::CostError;
use crate::domain::validation::{finite, ValidationError};
use crate::domain::{Order, OrderSide};

/// Slippage model: maps a batch of orders and their no-slippage prices to
/// fill prices, one per order, in the same order.
pub trait SlippageModel: Send + Sync {
    /// Fails with [`CostError::LengthMismatch`] when the two slices differ in
    /// length. Empty batches give an empty result.
    fn apply_slippage(
        &self,
        orders: &[Order],
        no_slippage_prices: &[f64],
    ) -> Result<Vec<f64>, CostError>;

    /// Name of this model
    fn name(&self) -> &str;
}

fn check_lengths(orders: &[Order], prices: &[f64]) -> Result<(), CostError> {
    if orders.len() != prices.len() {
        return Err(CostError::LengthMismatch {
            orders: orders.len(),
            prices: prices.len(),
        });
    }
    Ok(())
}

/// Fixed-fraction slippage: always `rate` of the price (e.g. 0.0001 = 1 bp).
#[derive(Clone)]
pub struct FractionSlippage {
    slippage_rate: f64,
    sink: Arc<dyn DiagnosticSink>,
}

impl FractionSlippage {
    /// Reports unsupported styles through the `log` facade.
    pub fn new(slippage_rate: f64) -> Result<Self, CostError> {
        Self::with_sink(slippage_rate, Arc::new(LogSink))
    }

    /// `slippage_rate` must be finite and in `[0, 1)`.
    pub fn with_sink(
        slippage_rate: f64,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, CostError> {
        let slippage_rate = finite("slippage_rate", slippage_rate)?;
        if !(0.0..1.0).contains(&slippage_rate) {
            return Err(ValidationError::new(
                "slippage_rate",
                slippage_rate,
                "must be in [0, 1)",
            )
            .into());
        }
        Ok(Self {
            slippage_rate,
            sink,
        })
    }

    pub fn slippage_rate(&self) -> f64 {
        self.slippage_rate
    }

    fn single_fill_price(&self, order: &Order, no_slippage_price: f64) -> f64 {
        if no_slippage_price.is_nan() {
            return f64::NAN;
        }
        let multiplier = match order.side() {
            OrderSide::Buy => 1.0 + self.slippage_rate,
            OrderSide::Sell => 1.0 - self.slippage_rate,
        };
        no_slippage_price * multiplier
    }
}

impl std::fmt::Debug for FractionSlippage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FractionSlippage")
            .field("slippage_rate", &self.slippage_rate)
            .finish_non_exhaustive()
    }
}

impl SlippageModel for FractionSlippage {
    fn apply_slippage(
        &self,
        orders: &[Order],
        no_slippage_prices: &[f64],
    ) -> Result<Vec<f64>, CostError> {
        check_lengths(orders, no_slippage_prices)?;

        let fill_prices = orders
            .iter()
            .zip(no_slippage_prices)
            .map(|(order, &price)| {
                if order.execution_style().is_aggressive() {
                    self.single_fill_price(order, price)
                } else {
                    self.sink.report(Diagnostic::UnsupportedExecutionStyle {
                        model: "FractionSlippage",
                        style: order.execution_style().clone(),
                    });
                    price
                }
            })
            .collect();
        Ok(fill_prices)
    }

    fn name(&self) -> &str {
        "FractionSlippage"
    }
}

/// Identity: fills at the no-slippage price.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSlippage;

impl SlippageModel for NoSlippage {
    fn apply_slippage(
        &self,
        orders: &[Order],
        no_slippage_prices: &[f64],
    ) -> Result<Vec<f64>, CostError> {
        check_lengths(orders, no_slippage_prices)?;
        Ok(no_slippage_prices.to_vec())
    }

    fn name(&self) -> &str {
        "NoSlippage"
    }
}
