//! Integration tests for the cost models.
//!
//! These exercise commission and slippage through the public API the way a
//! backtest's execution simulator calls them: fixed concrete scenarios,
//! mixed batches, diagnostics routing, and the full fill pipeline.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use tradecost_core::domain::{Contract, ExecutionStyle, Order};
use tradecost_core::execution::{
    CommissionModel, CostError, Diagnostic, ExecutionCostModel, FractionSlippage, IbCommission,
    RecordingSink, SlippageModel,
};
use tradecost_core::testing::assert_prices_close;

// ─── Helpers ──────────────────────────────────────────────────────────

fn contract(symbol: &str) -> Contract {
    Contract::equity(symbol, "NYSE")
}

fn market(quantity: f64) -> Order {
    Order::new(contract("SPY"), quantity, ExecutionStyle::Market).unwrap()
}

fn stop(quantity: f64) -> Order {
    Order::new(contract("SPY"), quantity, ExecutionStyle::Stop { stop_price: 100.0 }).unwrap()
}

fn limit(quantity: f64) -> Order {
    Order::new(contract("SPY"), quantity, ExecutionStyle::Limit { limit_price: 50.0 }).unwrap()
}

fn slippage(rate: f64) -> (FractionSlippage, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let model = FractionSlippage::with_sink(rate, sink.clone()).unwrap();
    (model, sink)
}

// ─── Commission scenarios ─────────────────────────────────────────────

#[test]
fn commission_small_order_is_floored() {
    let fee = IbCommission.calculate_commission(&market(100.0), 50.0).unwrap();
    assert_eq!(fee, 1.0);
}

#[test]
fn commission_large_order_pays_per_share() {
    let fee = IbCommission.calculate_commission(&market(10_000.0), 50.0).unwrap();
    assert!((fee - 50.0).abs() < 1e-10);
}

#[test]
fn commission_zero_quantity_pays_minimum() {
    let fee = IbCommission.calculate_commission(&market(0.0), 50.0).unwrap();
    assert_eq!(fee, 1.0);
}

// ─── Slippage scenarios ───────────────────────────────────────────────

#[test]
fn slippage_buy_market_order() {
    let (model, _) = slippage(0.01);
    let prices = model.apply_slippage(&[market(10.0)], &[100.0]).unwrap();
    assert_prices_close(&[101.0], &prices, 1e-10, 0.0);
}

#[test]
fn slippage_sell_stop_order() {
    let (model, _) = slippage(0.01);
    let prices = model.apply_slippage(&[stop(-5.0)], &[100.0]).unwrap();
    assert_prices_close(&[99.0], &prices, 1e-10, 0.0);
}

#[test]
fn slippage_mixed_batch_with_unsupported_style() {
    let (model, sink) = slippage(0.01);
    let orders = [market(10.0), market(-10.0), limit(10.0)];
    let prices = model.apply_slippage(&orders, &[100.0, 200.0, 50.0]).unwrap();

    assert_prices_close(&[101.0, 198.0, 50.0], &prices, 1e-10, 0.0);
    assert_eq!(sink.len(), 1);
    assert!(matches!(
        &sink.events()[0],
        Diagnostic::UnsupportedExecutionStyle { style: ExecutionStyle::Limit { .. }, .. }
    ));
}

#[test]
fn slippage_other_style_passes_through_at_any_rate() {
    let other = Order::new(
        contract("SPY"),
        7.0,
        ExecutionStyle::Other { name: "MarketOnCloseOrder".into() },
    )
    .unwrap();
    for rate in [0.0, 0.001, 0.5] {
        let (model, sink) = slippage(rate);
        let prices = model.apply_slippage(std::slice::from_ref(&other), &[42.0]).unwrap();
        assert_eq!(prices, vec![42.0]);
        assert_eq!(sink.len(), 1);
    }
}

#[test]
fn slippage_nan_propagates_for_every_side_and_style() {
    let (model, _) = slippage(0.01);
    let orders = [market(1.0), market(-1.0), stop(1.0), stop(-1.0), limit(1.0)];
    let prices = model.apply_slippage(&orders, &[f64::NAN; 5]).unwrap();
    assert_prices_close(&[f64::NAN; 5], &prices, 0.0, 0.0);
}

#[test]
fn slippage_unsupported_style_does_not_abort_batch() {
    let (model, sink) = slippage(0.01);
    let orders = [limit(1.0), market(1.0), limit(-1.0), stop(-1.0)];
    let prices = model.apply_slippage(&orders, &[10.0, 10.0, 10.0, 10.0]).unwrap();
    assert_prices_close(&[10.0, 10.1, 10.0, 9.9], &prices, 1e-10, 0.0);
    assert_eq!(sink.len(), 2);
}

#[test]
fn slippage_length_mismatch() {
    let (model, sink) = slippage(0.01);
    let err = model.apply_slippage(&[market(1.0), limit(1.0)], &[1.0]).unwrap_err();
    assert_eq!(err, CostError::LengthMismatch { orders: 2, prices: 1 });
    // Nothing is processed before the check.
    assert!(sink.is_empty());
}

#[test]
fn default_constructor_logs_instead_of_failing() {
    let model = FractionSlippage::new(0.01).unwrap();
    let prices = model.apply_slippage(&[limit(1.0)], &[10.0]).unwrap();
    assert_eq!(prices, vec![10.0]);
}

// ─── Fill pipeline ────────────────────────────────────────────────────

#[test]
fn pipeline_produces_transactions_in_input_order() {
    let sink = Arc::new(RecordingSink::new());
    let slip = FractionSlippage::with_sink(0.01, sink.clone()).unwrap();
    let cost = ExecutionCostModel::new(Box::new(slip), Box::new(IbCommission), sink.clone());
    let time = Utc.with_ymd_and_hms(2017, 2, 2, 16, 0, 0).unwrap();

    let orders = [
        Order::market(contract("AAA"), 10_000.0).unwrap(),
        Order::market(contract("BBB"), -100.0).unwrap(),
        Order::new(contract("CCC"), 5.0, ExecutionStyle::Limit { limit_price: 9.0 }).unwrap(),
    ];
    let txs = cost.execute(time, &orders, &[50.0, 200.0, 9.0]).unwrap();

    let symbols: Vec<&str> = txs.iter().map(|t| t.contract.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAA", "BBB", "CCC"]);

    assert_prices_close(
        &[50.5, 198.0, 9.0],
        &txs.iter().map(|t| t.price).collect::<Vec<_>>(),
        1e-10,
        0.0,
    );
    // 10_000 shares: per share 50 < cap 5050
    assert_prices_close(
        &[50.0, 1.0, 1.0],
        &txs.iter().map(|t| t.commission).collect::<Vec<_>>(),
        1e-10,
        0.0,
    );
    assert!(txs.iter().all(|t| t.time == time));
    assert_eq!(sink.len(), 1);
}

#[test]
fn pipeline_keeps_valid_fills_when_one_price_is_rejected() {
    let sink = Arc::new(RecordingSink::new());
    let slip = FractionSlippage::with_sink(0.01, sink.clone()).unwrap();
    let cost = ExecutionCostModel::new(Box::new(slip), Box::new(IbCommission), sink.clone());
    let time = Utc.with_ymd_and_hms(2017, 2, 2, 16, 0, 0).unwrap();

    // Limit orders pass through slippage, so a zero price reaches the commission model.
    let orders = [
        Order::market(contract("SPY"), 100.0).unwrap(),
        Order::new(contract("XYZ"), 10.0, ExecutionStyle::Limit { limit_price: 1.0 }).unwrap(),
    ];

    let txs = cost.execute(time, &orders, &[100.0, f64::NAN]).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].contract.symbol, "SPY");

    let txs = cost.execute(time, &orders, &[100.0, 0.0]).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].contract.symbol, "SPY");
    assert_prices_close(&[101.0], &[txs[0].price], 1e-10, 0.0);
    assert!(sink
        .events()
        .contains(&Diagnostic::InvalidPrice { symbol: "XYZ".into(), price: 0.0 }));
}
