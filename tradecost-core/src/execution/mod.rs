//! Execution costs: what a fill really costs once friction is applied
//!
//! Key concepts:
//! - **Slippage**: zero-impact price → fill price, always against the trader
//! - **Commission**: brokerage fee charged on the slipped fill
//! - **Diagnostics**: recoverable events routed to an injected sink
//! - **Pipeline**: slippage then commission, producing transactions

pub mod commission;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod slippage;

pub use commission::{
    BpsTradeValueCommission, CommissionModel, FixedCommission, IbCommission, NoCommission,
};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, NullSink, RecordingSink};
pub use error::CostError;
pub use pipeline::ExecutionCostModel;
pub use slippage::{FractionSlippage, NoSlippage, SlippageModel};
