//! Scoring and ranking for the momentum tracker.
//!
//! This crate turns a cleaned price table into one day's rank snapshot:
//! - [`momentum`]: the 12-1 long-term momentum signal
//! - [`rank`]: the rank transformer and its tie-break contract
//!
//! # Example
//!
//! ```ignore
//! use momo_signals::{momentum::LongTermMomentum, rank::rank_scores};
//! use momo_traits::Signal;
//!
//! let signal = LongTermMomentum::default();
//! let scores = signal.score(&prices)?;
//! let snapshot = rank_scores(&scores);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod momentum;
pub mod rank;

// Re-export key types
pub use momentum::{LongTermMomentum, LongTermMomentumConfig};
pub use rank::{RANK_METHOD, RankMethod, rank_scores};
