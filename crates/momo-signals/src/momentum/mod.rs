//! Momentum signals based on historical price ratios.
//!
//! The tracker ranks on a single horizon: 12-month momentum that skips the
//! most recent month (the "12-1" convention).

mod long_term;

pub use long_term::{LongTermMomentum, LongTermMomentumConfig};
