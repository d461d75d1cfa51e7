//! Non-fatal events raised while pricing fills.
//!
//! Models never log directly: they report to a [`DiagnosticSink`] handed to
//! them at construction. [`LogSink`] forwards to the `log` facade and is what
//! the default constructors use; [`RecordingSink`] keeps events in memory.

use crate::domain::ExecutionStyle;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

/// A recoverable condition observed by a cost model.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The slippage model has no rule for this style; the price passed through.
    UnsupportedExecutionStyle {
        model: &'static str,
        style: ExecutionStyle,
    },
    /// No usable price for the order, so it was not filled.
    MissingPrice { symbol: String },
    /// The fill price failed commission validation, so the order was not filled.
    InvalidPrice { symbol: String, price: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnsupportedExecutionStyle { model, style } => write!(
                f,
                "{model}: unsupported execution style: {style}. No slippage was applied"
            ),
            Diagnostic::MissingPrice { symbol } => {
                write!(f, "no price available for {symbol}, order not filled")
            }
            Diagnostic::InvalidPrice { symbol, price } => {
                write!(f, "invalid fill price {price} for {symbol}, order not filled")
            }
        }
    }
}

/// Receiver of diagnostics. Shared between threads, so implementations must
/// be safe to call concurrently.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to `log::warn!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        log::warn!(target: "tradecost::execution", "{diagnostic}");
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps diagnostics in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock still holds valid events; keep recording.
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}
