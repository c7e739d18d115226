//! Signal trait for scoring symbols from a price table.
//!
//! A signal turns a cleaned [`PriceSeries`] into one score per symbol. Scores
//! are only meaningful relative to each other within one evaluation; they are
//! consumed immediately by the rank transformer and never persisted.

use crate::{PriceSeries, Result, Symbol};

/// Per-symbol scores from one signal evaluation.
///
/// Entries keep the column order of the price table they were computed from,
/// which the rank transformer relies on for its tie-break. A symbol whose
/// score could not be computed carries `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    entries: Vec<(Symbol, Option<f64>)>,
}

impl ScoreTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a symbol's score. Non-finite scores are stored as unknown.
    pub fn push(&mut self, symbol: impl Into<Symbol>, score: Option<f64>) {
        self.entries
            .push((symbol.into(), score.filter(|s| s.is_finite())));
    }

    /// Score of a symbol; `None` if absent or unknown.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(s, _)| s == symbol)
            .and_then(|(_, score)| *score)
    }

    /// Iterate over entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.entries.iter().map(|(s, score)| (s.as_str(), *score))
    }

    /// Number of entries, known or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of symbols with a known score.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.entries.iter().filter(|(_, s)| s.is_some()).count()
    }
}

impl FromIterator<(Symbol, Option<f64>)> for ScoreTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, Option<f64>)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, score) in iter {
            table.push(symbol, score);
        }
        table
    }
}

/// A signal that scores symbols.
///
/// Implementations should be thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```no_run
/// use momo_traits::{PriceSeries, Result, ScoreTable, Signal};
///
/// struct LastClose;
///
/// impl Signal for LastClose {
///     fn name(&self) -> &str {
///         "last_close"
///     }
///
///     fn lookback(&self) -> usize {
///         1
///     }
///
///     fn score(&self, prices: &PriceSeries) -> Result<ScoreTable> {
///         Ok(prices
///             .symbols()
///             .iter()
///             .enumerate()
///             .map(|(i, s)| (s.clone(), prices.close_at_offset(i, 1)))
///             .collect())
///     }
/// }
/// ```
pub trait Signal: Send + Sync {
    /// Returns the name of this signal, used in logs.
    fn name(&self) -> &str;

    /// Number of sessions a symbol needs before it can be scored.
    ///
    /// Price providers are asked for at least this many sessions.
    fn lookback(&self) -> usize;

    /// Computes scores for every symbol in the (forward-filled) table.
    ///
    /// Symbols that cannot be scored get `None` rather than an error; an
    /// error means the whole evaluation failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is unusable as a whole.
    fn score(&self, prices: &PriceSeries) -> Result<ScoreTable>;
}
