//! Daily stock pick
//!
//! Runs one pick and exits. Takes no arguments.
//!
//! # Usage
//!
//! ```bash
//! export CLAUDE_API_KEY="sk-ant-..."
//! export EMAIL="me@gmail.com"
//! export EMAIL_PASSWORD="app-password"
//!
//! cargo run --bin daily-pick -p pick-stock
//! ```

use pick_stock::{Pipeline, PickerConfig};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pick_utils::init_tracing("warn,pick_stock=info,pick_llm=info");

    let config = PickerConfig::from_env()?;
    debug!(?config, "Loaded configuration");

    let summary = Pipeline::from_config(&config)?.run().await?;
    info!(
        candidates = summary.candidates,
        skipped = summary.skipped,
        "Daily pick sent"
    );

    Ok(())
}
