//! Long-term momentum signal based on 12-month returns, skipping the most recent month.

use momo_traits::{MomoError, PriceSeries, Result, ScoreTable, Signal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for long-term momentum signal.
///
/// Offsets count sessions back from the newest session in the price table,
/// with the newest session at offset 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongTermMomentumConfig {
    /// Offset of the start observation (default: 252 sessions ≈ 12 months)
    pub lookback_sessions: usize,

    /// Offset of the end observation (default: 21 sessions ≈ 1 month)
    pub skip_sessions: usize,
}

impl Default for LongTermMomentumConfig {
    fn default() -> Self {
        Self {
            lookback_sessions: 252,
            skip_sessions: 21,
        }
    }
}

impl LongTermMomentumConfig {
    /// Check that both offsets are positive and the window is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`MomoError::Config`] for an unusable window.
    pub fn validate(&self) -> Result<()> {
        if self.skip_sessions == 0 || self.skip_sessions >= self.lookback_sessions {
            return Err(MomoError::Config(format!(
                "momentum window needs 0 < skip_sessions ({}) < lookback_sessions ({})",
                self.skip_sessions, self.lookback_sessions
            )));
        }
        Ok(())
    }
}

/// Long-term momentum signal.
///
/// score = close(-skip) / close(-lookback) - 1
///
/// The score is a raw ratio; only its ordering matters downstream. A symbol
/// lacking either observation (fewer than `lookback_sessions` sessions of
/// history) or with a non-positive start price has an unknown score.
///
/// # Example
///
/// ```ignore
/// use momo_signals::momentum::LongTermMomentum;
///
/// // Default: 12-month momentum skipping last month
/// let signal = LongTermMomentum::default();
/// let scores = signal.score(&prices)?;
/// ```
#[derive(Debug, Clone)]
pub struct LongTermMomentum {
    config: LongTermMomentumConfig,
}

impl LongTermMomentum {
    /// Create a new long-term momentum signal with the given configuration.
    #[must_use]
    pub const fn new(config: LongTermMomentumConfig) -> Self {
        Self { config }
    }

    /// Get the lookback offset in sessions.
    #[must_use]
    pub const fn lookback_sessions(&self) -> usize {
        self.config.lookback_sessions
    }

    /// Get the skipped offset in sessions.
    #[must_use]
    pub const fn skip_sessions(&self) -> usize {
        self.config.skip_sessions
    }

    /// Momentum from two observations, `None` when the ratio is undefined.
    fn momentum(end: Option<f64>, start: Option<f64>) -> Option<f64> {
        let (end, start) = (end?, start?);
        if start <= 0.0 {
            return None;
        }
        Some(end / start - 1.0).filter(|m| m.is_finite())
    }
}

impl Default for LongTermMomentum {
    fn default() -> Self {
        Self::new(LongTermMomentumConfig::default())
    }
}

impl Signal for LongTermMomentum {
    fn name(&self) -> &str {
        "long_term_momentum"
    }

    fn lookback(&self) -> usize {
        self.config.lookback_sessions
    }

    fn score(&self, prices: &PriceSeries) -> Result<ScoreTable> {
        self.config.validate()?;

        let mut scores = ScoreTable::new();
        for (column, symbol) in prices.symbols().iter().enumerate() {
            let end = prices.close_at_offset(column, self.config.skip_sessions);
            let start = prices.close_at_offset(column, self.config.lookback_sessions);
            let score = Self::momentum(end, start);
            if score.is_none() {
                debug!(%symbol, sessions = prices.len(), "momentum unknown, insufficient history");
            }
            scores.push(symbol.clone(), score);
        }

        Ok(scores)
    }
}
