//! Views derived from the rank history.
//!
//! Everything here is a pure read of a [`momo_history::RankHistory`]:
//! - [`summary`]: rank at fixed offsets versus current rank
//! - [`heatmap`]: the newest dates, symbol-major
//! - [`tier`]: rank to strength band
//! - [`view`]: summary and heatmap merged into feed rows
//! - [`export`]: JSON, text and HTML renderings of the view

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod export;
pub mod heatmap;
pub mod summary;
pub mod tier;
pub mod view;

pub use heatmap::{Heatmap, build_heatmap};
pub use summary::{Summary, SummaryColumn, SummaryRow, build_summary};
pub use tier::Tier;
pub use view::{RankingRow, RankingView, SummaryOffsets, ViewConfig};
