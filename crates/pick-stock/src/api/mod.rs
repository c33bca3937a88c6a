//! Market data sources

pub mod yahoo;

pub use yahoo::YahooFundamentalsClient;

use crate::error::Result;
use async_trait::async_trait;

/// Raw fundamentals for one symbol, exactly as the source reported them
///
/// Every field is optional: providers routinely omit values for some
/// symbols, and the collector decides what a gap means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fundamentals {
    /// Trailing twelve-month price-to-earnings ratio
    pub trailing_pe: Option<f64>,
    /// Year-over-year revenue growth as a fraction (0.15 = 15%)
    pub revenue_growth: Option<f64>,
    /// Return on equity as a fraction
    pub return_on_equity: Option<f64>,
    /// Current market price
    pub current_price: Option<f64>,
    /// Short display name
    pub short_name: Option<String>,
}

/// A source of per-symbol fundamentals
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundamentalsSource: Send + Sync {
    /// Fetch fundamentals for a single symbol
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals>;
}
