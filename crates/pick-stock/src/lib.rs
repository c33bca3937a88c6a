//! Daily stock pick
//!
//! Screens a fixed list of large-cap tech tickers on valuation and growth,
//! asks Claude to pick the single best candidate, and mails the answer.
//!
//! # Architecture
//!
//! A straight three-stage [`Pipeline`]:
//! - [`Collector`]: fetches fundamentals per ticker through a
//!   [`FundamentalsSource`] and screens them into [`Candidate`]s
//! - [`Requester`]: renders the candidates into one prompt and returns the
//!   model's reply verbatim
//! - [`Notifier`]: mails the reply to the configured account through a
//!   [`Mailer`]
//!
//! # Example
//!
//! ```rust,ignore
//! use pick_stock::{Pipeline, PickerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PickerConfig::from_env()?;
//!     let summary = Pipeline::from_config(&config)?.run().await?;
//!     println!("{} candidates", summary.candidates);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod collector;
pub mod config;
pub mod error;
pub mod notifier;
pub mod pipeline;
pub mod prompts;
pub mod requester;

// Re-export main types for convenience
pub use api::{Fundamentals, FundamentalsSource, YahooFundamentalsClient};
pub use collector::{
    Candidate, CollectionReport, Collector, RejectReason, ScreeningThresholds, SkipReason,
    TickerOutcome,
};
pub use config::PickerConfig;
pub use error::{PickError, Result};
pub use notifier::{Mailer, Notifier, OutgoingMail, SmtpMailer};
pub use pipeline::{Pipeline, RunSummary};
pub use prompts::Language;
pub use requester::Requester;
