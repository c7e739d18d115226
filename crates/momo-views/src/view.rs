//! The combined ranking view that every feed renders.
//!
//! JSON, text and HTML exports all read the same [`RankingView`], so the
//! numbers they show cannot disagree.

use crate::{Tier, build_heatmap, build_summary, heatmap::DEFAULT_WINDOW};
use chrono::{DateTime, Utc};
use momo_history::RankHistory;
use momo_traits::{Date, Rank, Symbol};
use serde::{Deserialize, Serialize};

/// Offsets, in sessions, of the three historical summary columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOffsets {
    /// About one month back (default 21).
    pub one_month: usize,
    /// About six weeks back (default 30).
    pub six_weeks: usize,
    /// About two months back (default 42).
    pub two_months: usize,
}

impl Default for SummaryOffsets {
    fn default() -> Self {
        Self {
            one_month: 21,
            six_weeks: 30,
            two_months: 42,
        }
    }
}

impl SummaryOffsets {
    /// Offsets in summary column order.
    #[must_use]
    pub const fn as_array(&self) -> [usize; 3] {
        [self.one_month, self.six_weeks, self.two_months]
    }
}

/// Configuration of the ranking view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Summary offsets.
    pub offsets: SummaryOffsets,
    /// Number of dates in the rank history window.
    pub heatmap_window: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            offsets: SummaryOffsets::default(),
            heatmap_window: DEFAULT_WINDOW,
        }
    }
}

/// One symbol's line in every feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    /// The symbol.
    pub symbol: Symbol,
    /// Rank on the newest date.
    pub current: Option<Rank>,
    /// Tier of the current rank.
    pub tier: Tier,
    /// Rank one month back.
    pub one_month_ago: Option<Rank>,
    /// Rank six weeks back.
    pub six_weeks_ago: Option<Rank>,
    /// Rank two months back.
    pub two_months_ago: Option<Rank>,
    /// Rank on each window date, aligned with [`RankingView::window`].
    pub history: Vec<Option<Rank>>,
}

/// Summary and heatmap merged into feed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingView {
    /// When the view was generated.
    pub generated_at: DateTime<Utc>,
    /// The newest date in the history.
    pub current_date: Date,
    /// Heatmap dates, oldest first.
    pub window: Vec<Date>,
    /// Rows by current rank; unranked symbols last, by symbol.
    pub rows: Vec<RankingRow>,
}

impl RankingView {
    /// Build the view from the history. `None` for an empty history.
    #[must_use]
    pub fn build(
        history: &RankHistory,
        config: &ViewConfig,
        generated_at: DateTime<Utc>,
    ) -> Option<Self> {
        let summary = build_summary(history, &config.offsets.as_array())?;
        let heatmap = build_heatmap(history, config.heatmap_window);

        let mut rows: Vec<RankingRow> = summary
            .rows
            .into_iter()
            .map(|(symbol, row)| {
                let at = |i: usize| row.at_offsets.get(i).copied().flatten();
                RankingRow {
                    current: row.current,
                    tier: Tier::from_rank(row.current),
                    one_month_ago: at(0),
                    six_weeks_ago: at(1),
                    two_months_ago: at(2),
                    history: heatmap.row(&symbol).map(<[_]>::to_vec).unwrap_or_default(),
                    symbol,
                }
            })
            .collect();

        // Ranked first by rank, then unranked by symbol (rows arrive symbol-sorted).
        rows.sort_by_key(|row| (row.current.is_none(), row.current));

        Some(Self {
            generated_at,
            current_date: summary.current_date,
            window: heatmap.dates,
            rows,
        })
    }

    /// Number of symbols in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the view has no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
