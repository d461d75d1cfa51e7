use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad security classification of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityType {
    /// Cash equity
    Stk,
    /// Future
    Fut,
    /// Forex pair
    Cash,
    /// Index
    Ind,
}

/// Tradable contract: ticker plus the venue it trades on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    pub symbol: String,
    pub security_type: SecurityType,
    pub exchange: String,
}

impl Contract {
    pub fn new(symbol: impl Into<String>, security_type: SecurityType, exchange: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            security_type,
            exchange: exchange.into(),
        }
    }

    /// Shorthand for a cash equity.
    pub fn equity(symbol: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self::new(symbol, SecurityType::Stk, exchange)
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}@{})", self.symbol, self.security_type, self.exchange)
    }
}
