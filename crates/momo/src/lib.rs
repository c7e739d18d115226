#![doc(issue_tracker_base_url = "https://github.com/distanlo/momentum-tracker/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # momo
//!
//! ETF momentum rank tracker.
//!
//! momo is an umbrella crate that re-exports the momo sub-crates and drives
//! the daily update cycle.
//!
//! ## Quick Start
//!
//! ```ignore
//! use momo::{CycleConfig, UpdateCycle};
//! use momo::fmp::FmpPriceProvider;
//!
//! # async fn example() -> momo::Result<()> {
//! let provider = FmpPriceProvider::from_env()?;
//! let universe = vec!["SPY".to_string(), "QQQ".to_string()];
//! let cycle = UpdateCycle::new(CycleConfig::new("ranks_history.csv"));
//! let today = chrono::Utc::now().date_naive();
//! let outcome = cycle.run(&provider, &universe, today).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`]: shared types, error taxonomy and the provider seam
//! - [`signals`]: momentum scoring and ranking
//! - [`history`]: the bounded rank history and its CSV file
//! - [`views`]: summary, heatmap, tiers and feed exports
//! - [`fmp`]: Financial Modeling Prep price provider
//!
//! ## Architecture
//!
//! 1. **Provider** returns adjusted closes for the universe
//! 2. **Signal** scores each symbol with 12-1 momentum
//! 3. **Ranking** turns scores into a dense snapshot
//! 4. **History** merges the snapshot under its date and persists atomically
//! 5. **Views** read the history and render the feeds

/// Version information for the momo crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cycle;

/// Shared types and trait seams.
pub mod traits {
    pub use momo_traits::*;
}

/// Momentum scoring and ranking.
pub mod signals {
    pub use momo_signals::*;
}

/// Rank history store.
pub mod history {
    pub use momo_history::*;
}

/// Derived views and exports.
pub mod views {
    pub use momo_views::*;
}

/// Financial Modeling Prep price provider.
pub mod fmp {
    pub use momo_fmp::*;
}

pub use cycle::{CycleConfig, CycleOutcome, UpdateCycle, latest_weekday};
pub use momo_traits::{
    Date, MarketData, MomoError, PriceProvider, PriceSeries, Rank, RankSnapshot, Result,
    Signal, Symbol,
};
