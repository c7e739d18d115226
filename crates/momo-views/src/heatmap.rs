//! Rolling rank heatmap over the most recent dates.

use momo_history::RankHistory;
use momo_traits::{Date, Rank, Symbol};
use std::collections::BTreeMap;

/// Default number of dates in the heatmap.
pub const DEFAULT_WINDOW: usize = 10;

/// The newest dates of the history, symbol-major.
///
/// Columns run oldest to newest, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    /// Window dates, oldest first.
    pub dates: Vec<Date>,
    /// Per symbol, the rank on each window date.
    pub rows: BTreeMap<Symbol, Vec<Option<Rank>>>,
}

impl Heatmap {
    /// Row of one symbol.
    #[must_use]
    pub fn row(&self, symbol: &str) -> Option<&[Option<Rank>]> {
        self.rows.get(symbol).map(Vec::as_slice)
    }
}

/// Transpose the `window` newest rows (fewer if the history is shorter).
///
/// Every symbol in the history gets a row, even one with no rank inside the
/// window. Pure read.
#[must_use]
pub fn build_heatmap(history: &RankHistory, window: usize) -> Heatmap {
    let recent: Vec<_> = history.recent(window).collect();

    let rows = history
        .symbols()
        .iter()
        .map(|symbol| {
            let ranks = recent.iter().map(|(_, s)| s.get(symbol)).collect();
            (symbol.clone(), ranks)
        })
        .collect();

    Heatmap {
        dates: recent.iter().map(|(d, _)| *d).collect(),
        rows,
    }
}
