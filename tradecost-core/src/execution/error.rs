use crate::domain::ValidationError;
use thiserror::Error;

/// Errors from commission, slippage and fill-pipeline calls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("batch length mismatch: {orders} orders but {prices} prices")]
    LengthMismatch { orders: usize, prices: usize },
}

impl CostError {
    /// Name of the offending field for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CostError::Validation(e) => Some(e.field),
            CostError::LengthMismatch { .. } => None,
        }
    }
}
