//! Quote collection and screening
//!
//! Every ticker in the universe is fetched one after another and ends up as
//! exactly one [`TickerOutcome`]. A failed lookup only affects its own ticker.

use crate::api::{Fundamentals, FundamentalsSource};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A ticker that passed the screen and goes to the model
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Ticker symbol
    pub ticker: String,
    /// Display name, the ticker itself when the source has none
    pub name: String,
    /// Trailing P/E, two decimals
    pub price_to_earnings: f64,
    /// Revenue growth in percent, one decimal
    pub revenue_growth_pct: f64,
    /// Return on equity in percent, one decimal
    pub return_on_equity_pct: f64,
    /// Current price, zero when unknown
    pub price: f64,
}

/// Screening thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreeningThresholds {
    /// P/E must be strictly below this
    pub max_price_to_earnings: f64,
    /// Revenue growth fraction must be strictly above this
    pub min_revenue_growth: f64,
}

impl Default for ScreeningThresholds {
    fn default() -> Self {
        Self {
            max_price_to_earnings: 30.0,
            min_revenue_growth: 0.1,
        }
    }
}

/// Why a ticker with data was screened out
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// No usable P/E reported
    PriceToEarningsUnavailable,
    /// P/E zero or negative
    NonPositivePriceToEarnings(f64),
    /// P/E at or above the ceiling
    PriceToEarningsTooHigh(f64),
    /// Growth fraction at or below the floor (missing counts as zero)
    GrowthTooLow(f64),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PriceToEarningsUnavailable => write!(f, "P/E unavailable"),
            Self::NonPositivePriceToEarnings(pe) => write!(f, "non-positive P/E {pe}"),
            Self::PriceToEarningsTooHigh(pe) => write!(f, "P/E {pe} too high"),
            Self::GrowthTooLow(growth) => write!(f, "revenue growth {growth} too low"),
        }
    }
}

/// Why a ticker could not be evaluated at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipReason(pub String);

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What happened to one ticker
#[derive(Debug, Clone, PartialEq)]
pub enum TickerOutcome {
    /// Passed the screen
    Admitted(Candidate),
    /// Data retrieved but failed the screen
    Rejected { ticker: String, reason: RejectReason },
    /// Data could not be retrieved
    Skipped { ticker: String, reason: SkipReason },
}

impl TickerOutcome {
    /// Ticker this outcome belongs to
    pub fn ticker(&self) -> &str {
        match self {
            Self::Admitted(candidate) => &candidate.ticker,
            Self::Rejected { ticker, .. } | Self::Skipped { ticker, .. } => ticker,
        }
    }
}

/// Outcomes of one collection pass, in input ticker order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionReport {
    /// One entry per screened ticker
    pub outcomes: Vec<TickerOutcome>,
}

impl CollectionReport {
    /// Admitted candidates, in input order
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.outcomes.iter().filter_map(|o| match o {
            TickerOutcome::Admitted(candidate) => Some(candidate),
            _ => None,
        })
    }

    /// Consume the report, keeping only the candidates
    pub fn into_candidates(self) -> Vec<Candidate> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                TickerOutcome::Admitted(candidate) => Some(candidate),
                _ => None,
            })
            .collect()
    }

    /// Tickers that failed the screen
    pub fn rejected(&self) -> impl Iterator<Item = (&str, &RejectReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            TickerOutcome::Rejected { ticker, reason } => Some((ticker.as_str(), reason)),
            _ => None,
        })
    }

    /// Tickers whose data could not be retrieved
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            TickerOutcome::Skipped { ticker, reason } => Some((ticker.as_str(), reason)),
            _ => None,
        })
    }
}

/// Fetches and screens a fixed ticker list
pub struct Collector {
    source: Arc<dyn FundamentalsSource>,
    tickers: Vec<String>,
    thresholds: ScreeningThresholds,
}

impl Collector {
    /// Create a new collector
    pub fn new(
        source: Arc<dyn FundamentalsSource>,
        tickers: Vec<String>,
        thresholds: ScreeningThresholds,
    ) -> Self {
        Self {
            source,
            tickers,
            thresholds,
        }
    }

    /// Fetch and screen every ticker, sequentially
    pub async fn collect(&self) -> CollectionReport {
        let mut outcomes = Vec::with_capacity(self.tickers.len());

        for ticker in &self.tickers {
            let outcome = match self.source.fundamentals(ticker).await {
                Ok(fundamentals) => self.screen(ticker, &fundamentals),
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "Skipping ticker");
                    TickerOutcome::Skipped {
                        ticker: ticker.clone(),
                        reason: SkipReason(e.to_string()),
                    }
                }
            };

            if let TickerOutcome::Rejected { reason, .. } = &outcome {
                debug!(ticker = %ticker, %reason, "Screened out");
            }
            outcomes.push(outcome);
        }

        let report = CollectionReport { outcomes };
        let admitted = report.candidates().count();
        info!(
            admitted,
            rejected = report.rejected().count(),
            skipped = report.skipped().count(),
            "Collection finished"
        );
        if admitted == 0 {
            warn!("No ticker passed the screen");
        }

        report
    }

    /// Apply the screen to one ticker's fundamentals
    pub fn screen(&self, ticker: &str, fundamentals: &Fundamentals) -> TickerOutcome {
        let reject = |reason| TickerOutcome::Rejected {
            ticker: ticker.to_string(),
            reason,
        };

        let Some(pe) = fundamentals.trailing_pe.filter(|pe| !pe.is_nan()) else {
            return reject(RejectReason::PriceToEarningsUnavailable);
        };
        if pe <= 0.0 {
            return reject(RejectReason::NonPositivePriceToEarnings(pe));
        }
        if pe >= self.thresholds.max_price_to_earnings {
            return reject(RejectReason::PriceToEarningsTooHigh(pe));
        }

        let growth = fundamentals.revenue_growth.unwrap_or(0.0);
        if growth.is_nan() || growth <= self.thresholds.min_revenue_growth {
            return reject(RejectReason::GrowthTooLow(growth));
        }

        let name = fundamentals
            .short_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ticker);

        TickerOutcome::Admitted(Candidate {
            ticker: ticker.to_string(),
            name: name.to_string(),
            price_to_earnings: round_to(pe, 2),
            revenue_growth_pct: round_to(growth * 100.0, 1),
            return_on_equity_pct: round_to(fundamentals.return_on_equity.unwrap_or(0.0) * 100.0, 1),
            price: fundamentals.current_price.unwrap_or(0.0),
        })
    }
}

/// Round to a number of decimal places
///
/// Exact halves go to the even neighbour, so `18.125` becomes `18.12`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round_ties_even() / factor
}
