//! Position accounting driven by the transactions the fill pipeline emits.

pub mod position;

pub use position::{BacktestPosition, PositionError};
