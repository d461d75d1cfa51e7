//! tradecost core: execution cost models for backtests.
//!
//! This crate prices simulated fills:
//! - Domain types (contracts, orders with execution styles, transactions)
//! - Commission models (Interactive Brokers fixed, flat, basis points)
//! - Slippage models (fixed fraction of price) with injected diagnostics
//! - Fill pipeline: slippage, then commission, then transaction
//! - Backtest position accounting fed by those transactions
//! - TOML configuration for the whole cost stack

pub mod config;
pub mod domain;
pub mod execution;
pub mod portfolio;
pub mod testing;
