//! Update command implementation.

use crate::config::{TrackerConfig, load_universe};
use anyhow::{Context, Result};
use chrono::Utc;
use momo::{CycleOutcome, UpdateCycle, fmp::FmpPriceProvider, traits::parse_date};
use tracing::info;

/// Run one update cycle against FMP.
pub(crate) async fn run_update(config: &TrackerConfig, date: Option<&str>) -> Result<()> {
    let today = match date {
        Some(d) => parse_date(d)?,
        None => Utc::now().date_naive(),
    };
    let universe = load_universe(&config.tickers_path)?;
    let provider = FmpPriceProvider::from_env()
        .context("FMP provider needs FMP_API_KEY")?
        .with_end_date(today);

    let cycle = UpdateCycle::new(config.cycle_config());
    match cycle.run(&provider, &universe, today).await? {
        CycleOutcome::Recorded {
            date,
            ranked,
            universe,
        } => {
            info!(%date, ranked, universe, "update complete");
            println!("Recorded {date}: ranked {ranked} of {universe} symbols");
        }
        CycleOutcome::Skipped { latest } => {
            println!("Up to date: history already has {latest}");
        }
    }

    Ok(())
}
