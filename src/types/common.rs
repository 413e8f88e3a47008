//! Common domain types for the Bithumb API.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Side of an order or trade: bids buy, asks sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Bid,
    /// Sell order
    Ask,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Bid => write!(f, "bid"),
            OrderSide::Ask => write!(f, "ask"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bid" => Ok(OrderSide::Bid),
            "ask" => Ok(OrderSide::Ask),
            other => Err(DecodeError::new(
                "type",
                format!("unknown order side `{other}`"),
            )),
        }
    }
}

/// Ledger search filter for the user transactions endpoint (`searchGb`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchType {
    /// All ledger entries
    #[default]
    All,
    /// Completed buys
    Buy,
    /// Completed sells
    Sell,
    /// Coin withdrawals in progress
    Withdrawing,
    /// Coin deposits
    Deposit,
    /// Completed coin withdrawals
    Withdrawal,
    /// KRW deposits
    KrwDeposit,
}

impl SearchType {
    /// The numeric code the exchange uses for this filter.
    pub fn code(&self) -> &'static str {
        match self {
            SearchType::All => "0",
            SearchType::Buy => "1",
            SearchType::Sell => "2",
            SearchType::Withdrawing => "3",
            SearchType::Deposit => "4",
            SearchType::Withdrawal => "5",
            SearchType::KrwDeposit => "9",
        }
    }
}

impl FromStr for SearchType {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(SearchType::All),
            "1" => Ok(SearchType::Buy),
            "2" => Ok(SearchType::Sell),
            "3" => Ok(SearchType::Withdrawing),
            "4" => Ok(SearchType::Deposit),
            "5" => Ok(SearchType::Withdrawal),
            "9" => Ok(SearchType::KrwDeposit),
            other => Err(DecodeError::new(
                "search",
                format!("unknown search type `{other}`"),
            )),
        }
    }
}

/// Candlestick bucket width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartInterval {
    /// 1 minute
    Min1,
    /// 3 minutes
    Min3,
    /// 5 minutes
    Min5,
    /// 10 minutes
    Min10,
    /// 30 minutes
    Min30,
    /// 1 hour
    Hour1,
    /// 6 hours
    Hour6,
    /// 12 hours
    Hour12,
    /// 24 hours
    Hour24,
}

impl ChartInterval {
    /// The interval token used in the candlestick request path.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartInterval::Min1 => "1m",
            ChartInterval::Min3 => "3m",
            ChartInterval::Min5 => "5m",
            ChartInterval::Min10 => "10m",
            ChartInterval::Min30 => "30m",
            ChartInterval::Hour1 => "1h",
            ChartInterval::Hour6 => "6h",
            ChartInterval::Hour12 => "12h",
            ChartInterval::Hour24 => "24h",
        }
    }
}

impl std::fmt::Display for ChartInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
