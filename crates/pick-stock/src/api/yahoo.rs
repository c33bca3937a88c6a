//! Yahoo Finance fundamentals client

use super::{Fundamentals, FundamentalsSource};
use crate::error::{PickError, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance quote-summary client
///
/// The connector carries Yahoo's session cookie and crumb, so one instance is
/// kept for the whole run instead of reconnecting per symbol.
pub struct YahooFundamentalsClient {
    connector: Mutex<yahoo::YahooConnector>,
}

impl YahooFundamentalsClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Result<Self> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| PickError::Source(e.to_string()))?;

        Ok(Self {
            connector: Mutex::new(connector),
        })
    }
}

#[async_trait]
impl FundamentalsSource for YahooFundamentalsClient {
    async fn fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        let summary = {
            let mut connector = self.connector.lock().await;
            connector
                .get_ticker_info(symbol)
                .await
                .map_err(|e| PickError::market_data(symbol, e.to_string()))?
        };

        let data = summary
            .quote_summary
            .and_then(|s| s.result)
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| PickError::market_data(symbol, "empty quote summary"))?;

        let detail = data.summary_detail.as_ref();
        let financial = data.financial_data.as_ref();

        let fundamentals = Fundamentals {
            trailing_pe: detail.and_then(|d| d.trailing_pe),
            revenue_growth: financial.and_then(|f| f.revenue_growth),
            return_on_equity: financial.and_then(|f| f.return_on_equity),
            current_price: financial.and_then(|f| f.current_price),
            short_name: data.quote_type.as_ref().and_then(|q| q.short_name.clone()),
        };

        debug!(symbol, ?fundamentals, "Fetched fundamentals");
        Ok(fundamentals)
    }
}
