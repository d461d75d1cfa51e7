//! Serializable execution-cost configuration, loaded from TOML.
//!
//! ```toml
//! [commission]
//! type = "INTERACTIVE_BROKERS"
//!
//! [slippage]
//! type = "FRACTION"
//! rate = 0.0001
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::execution::{
    BpsTradeValueCommission, CommissionModel, CostError, DiagnosticSink, ExecutionCostModel,
    FixedCommission, FractionSlippage, IbCommission, NoCommission, NoSlippage, SlippageModel,
};

/// Errors from loading or building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] CostError),
}

/// Execution friction settings for a backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CostConfig {
    pub commission: CommissionConfig,
    pub slippage: SlippageConfig,
}

/// Commission configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionConfig {
    /// Interactive Brokers US fixed pricing
    InteractiveBrokers,

    /// Flat fee per order
    Fixed { commission: f64 },

    /// Basis points of traded value
    BpsTradeValue { bps: f64 },

    /// No commission
    None,
}

/// Slippage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlippageConfig {
    /// Fixed fraction of price (0.0001 = 1 bp)
    Fraction { rate: f64 },

    /// No slippage (ideal case)
    None,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            commission: CommissionConfig::InteractiveBrokers,
            slippage: SlippageConfig::Fraction { rate: 0.0001 },
        }
    }
}

impl CostConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn commission_model(&self) -> Result<Box<dyn CommissionModel>, CostError> {
        let model: Box<dyn CommissionModel> = match self.commission {
            CommissionConfig::InteractiveBrokers => Box::new(IbCommission),
            CommissionConfig::Fixed { commission } => Box::new(FixedCommission::new(commission)?),
            CommissionConfig::BpsTradeValue { bps } => {
                Box::new(BpsTradeValueCommission::new(bps)?)
            }
            CommissionConfig::None => Box::new(NoCommission),
        };
        Ok(model)
    }

    pub fn slippage_model(
        &self,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Box<dyn SlippageModel>, CostError> {
        let model: Box<dyn SlippageModel> = match self.slippage {
            SlippageConfig::Fraction { rate } => Box::new(FractionSlippage::with_sink(rate, sink)?),
            SlippageConfig::None => Box::new(NoSlippage),
        };
        Ok(model)
    }

    /// Validate every parameter and build the fill pipeline.
    pub fn build(&self, sink: Arc<dyn DiagnosticSink>) -> Result<ExecutionCostModel, ConfigError> {
        let slippage = self.slippage_model(sink.clone())?;
        let commission = self.commission_model()?;
        Ok(ExecutionCostModel::new(slippage, commission, sink))
    }
}
