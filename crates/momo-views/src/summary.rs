//! Rank at fixed offsets versus the current rank.

use momo_history::RankHistory;
use momo_traits::{Date, Rank, Symbol};
use std::collections::BTreeMap;

/// One offset column of a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryColumn {
    /// Requested offset in sessions back from the newest date.
    pub offset: usize,
    /// Date the offset resolved to after clamping.
    pub date: Date,
}

/// One symbol's summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// Rank on the newest date.
    pub current: Option<Rank>,
    /// Rank at each offset, in the order the offsets were requested.
    pub at_offsets: Vec<Option<Rank>>,
}

/// Ranks at fixed historical offsets for every symbol in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// The newest date in the history.
    pub current_date: Date,
    /// Resolved offset columns.
    pub columns: Vec<SummaryColumn>,
    /// Rows keyed by symbol.
    pub rows: BTreeMap<Symbol, SummaryRow>,
}

impl Summary {
    /// Row of one symbol.
    #[must_use]
    pub fn row(&self, symbol: &str) -> Option<&SummaryRow> {
        self.rows.get(symbol)
    }
}

/// Summarize the history at `offsets` sessions back from the newest date.
///
/// Offset N selects the N-th newest row (offset 1 is the newest); offsets
/// beyond the history clamp to the oldest row. Returns `None` for an empty
/// history. Pure read.
#[must_use]
pub fn build_summary(history: &RankHistory, offsets: &[usize]) -> Option<Summary> {
    let (current_date, current) = history.latest()?;

    let resolved: Vec<_> = offsets
        .iter()
        .filter_map(|&offset| {
            history
                .snapshot_at_offset(offset)
                .map(|(date, snapshot)| (SummaryColumn { offset, date }, snapshot))
        })
        .collect();

    let rows = history
        .symbols()
        .iter()
        .map(|symbol| {
            let row = SummaryRow {
                current: current.get(symbol),
                at_offsets: resolved.iter().map(|(_, s)| s.get(symbol)).collect(),
            };
            (symbol.clone(), row)
        })
        .collect();

    Some(Summary {
        current_date,
        columns: resolved.into_iter().map(|(c, _)| c).collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use momo_traits::RankSnapshot;

    fn day(i: i64) -> Date {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(i)
    }

    /// Store D1..Dn where symbol "SPY" has rank equal to the row number.
    fn numbered_history(n: u32) -> RankHistory {
        let mut history = RankHistory::new(365);
        for i in 1..=n {
            let snapshot: RankSnapshot =
                [("SPY".to_string(), Rank::new(i).unwrap())].into_iter().collect();
            history.record_snapshot(day(i64::from(i)), snapshot);
        }
        history
    }

    fn rank(r: u32) -> Option<Rank> {
        Rank::new(r)
    }

    #[test]
    fn test_offsets_on_42_row_history() {
        let history = numbered_history(42);
        let summary = build_summary(&history, &[21, 30, 42]).unwrap();

        let row = summary.row("SPY").unwrap();
        assert_eq!(row.current, rank(42));
        assert_eq!(row.at_offsets, vec![rank(22), rank(13), rank(1)]);
        assert_eq!(summary.current_date, day(42));
        assert_eq!(summary.columns[2], SummaryColumn { offset: 42, date: day(1) });
    }

    #[test]
    fn test_short_history_clamps_to_oldest() {
        let history = numbered_history(5);
        let summary = build_summary(&history, &[21, 30, 42]).unwrap();
        assert_eq!(summary.row("SPY").unwrap().at_offsets, vec![rank(1); 3]);
    }

    #[test]
    fn test_missing_cells_stay_missing() {
        let mut history = numbered_history(3);
        let newcomer: RankSnapshot = [
            ("SPY".to_string(), Rank::new(2).unwrap()),
            ("NEW".to_string(), Rank::new(1).unwrap()),
        ]
        .into_iter()
        .collect();
        history.record_snapshot(day(4), newcomer);

        let summary = build_summary(&history, &[3]).unwrap();
        let row = summary.row("NEW").unwrap();
        assert_eq!(row.current, rank(1));
        assert_eq!(row.at_offsets, vec![None]);
    }

    #[test]
    fn test_empty_history() {
        assert!(build_summary(&RankHistory::new(10), &[21]).is_none());
    }

    #[test]
    fn test_is_pure() {
        let history = numbered_history(10);
        let before = history.clone();
        let first = build_summary(&history, &[3, 5]);
        let second = build_summary(&history, &[3, 5]);
        assert_eq!(first, second);
        assert_eq!(history, before);
    }
}
