#![doc(issue_tracker_base_url = "https://github.com/distanlo/momentum-tracker/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait seams for the momentum tracker.
//!
//! This crate provides the vocabulary shared by every stage of the update
//! pipeline: fetched prices, the cleaned price table, per-symbol scores, ranks
//! and rank snapshots, and the error taxonomy.

/// The version of the momo-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod prices;
pub mod provider;
pub mod signal;
pub mod types;

// Re-exports
pub use error::{MomoError, Result};
pub use prices::PriceSeries;
pub use provider::PriceProvider;
pub use signal::{ScoreTable, Signal};
pub use types::{Date, MarketData, Rank, RankSnapshot, Symbol, date_from_epoch_days, parse_date};
