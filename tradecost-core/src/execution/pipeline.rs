//! Fill pipeline: slippage first, then commission on the slipped price.
//!
//! Turns a batch of orders and their zero-impact prices into transactions.
//! Orders without a usable price are not filled and are reported to the sink;
//! the rest of the batch still fills.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::commission::{CommissionModel, IbCommission, NoCommission};
use super::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use super::error::CostError;
use super::slippage::{FractionSlippage, NoSlippage, SlippageModel};
use crate::domain::{Order, Transaction};

/// Execution friction for a backtest run: one slippage model plus one
/// commission model, built once and shared.
pub struct ExecutionCostModel {
    slippage: Box<dyn SlippageModel>,
    commission: Box<dyn CommissionModel>,
    sink: Arc<dyn DiagnosticSink>,
}

impl ExecutionCostModel {
    pub fn new(
        slippage: Box<dyn SlippageModel>,
        commission: Box<dyn CommissionModel>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            slippage,
            commission,
            sink,
        }
    }

    /// No slippage, no commission.
    pub fn frictionless() -> Self {
        Self::new(Box::new(NoSlippage), Box::new(NoCommission), Arc::new(LogSink))
    }

    /// IB fixed pricing with fractional slippage at `slippage_rate`.
    pub fn interactive_brokers(slippage_rate: f64) -> Result<Self, CostError> {
        let sink: Arc<dyn DiagnosticSink> = Arc::new(LogSink);
        let slippage = FractionSlippage::with_sink(slippage_rate, sink.clone())?;
        Ok(Self::new(Box::new(slippage), Box::new(IbCommission), sink))
    }

    pub fn slippage_model(&self) -> &dyn SlippageModel {
        self.slippage.as_ref()
    }

    pub fn commission_model(&self) -> &dyn CommissionModel {
        self.commission.as_ref()
    }

    /// Fill prices after slippage, positionally aligned with `orders`.
    pub fn fill_prices(
        &self,
        orders: &[Order],
        no_slippage_prices: &[f64],
    ) -> Result<Vec<f64>, CostError> {
        self.slippage.apply_slippage(orders, no_slippage_prices)
    }

    /// Commission for a single fill.
    pub fn commission(&self, order: &Order, fill_price: f64) -> Result<f64, CostError> {
        self.commission.calculate_commission(order, fill_price)
    }

    /// Simulate the fills of a batch at `time`.
    ///
    /// Output keeps the input order of the orders that filled. Orders whose
    /// slipped price is not finite produce a `MissingPrice` diagnostic, and
    /// orders whose price the commission model rejects produce an
    /// `InvalidPrice` diagnostic. Zero-quantity orders are skipped. Only a
    /// batch-level problem (length mismatch) fails the call.
    pub fn execute(
        &self,
        time: DateTime<Utc>,
        orders: &[Order],
        no_slippage_prices: &[f64],
    ) -> Result<Vec<Transaction>, CostError> {
        let fill_prices = self.fill_prices(orders, no_slippage_prices)?;

        let mut transactions = Vec::with_capacity(orders.len());
        for (order, fill_price) in orders.iter().zip(fill_prices) {
            if !fill_price.is_finite() {
                self.sink.report(Diagnostic::MissingPrice {
                    symbol: order.contract().symbol.clone(),
                });
                continue;
            }
            if order.quantity() == 0.0 {
                log::debug!("skipping zero-quantity order for {}", order.contract());
                continue;
            }

            let commission = match self.commission(order, fill_price) {
                Ok(commission) => commission,
                Err(CostError::Validation(err)) => {
                    log::debug!("commission rejected {}: {err}", order.contract());
                    self.sink.report(Diagnostic::InvalidPrice {
                        symbol: order.contract().symbol.clone(),
                        price: fill_price,
                    });
                    continue;
                }
                Err(err) => return Err(err),
            };
            log::debug!(
                "filled {} x {} @ {fill_price} (commission {commission}, {} / {})",
                order.quantity(),
                order.contract().symbol,
                self.slippage.name(),
                self.commission.name(),
            );
            transactions.push(Transaction::new(
                time,
                order.contract().clone(),
                order.quantity(),
                fill_price,
                commission,
            ));
        }
        Ok(transactions)
    }
}

impl std::fmt::Debug for ExecutionCostModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionCostModel")
            .field("slippage", &self.slippage.name())
            .field("commission", &self.commission.name())
            .finish_non_exhaustive()
    }
}
