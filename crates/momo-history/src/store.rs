//! In-memory rank history.
//!
//! [`RankHistory`] maps each calendar date to that day's [`RankSnapshot`].
//! It holds at most one snapshot per date and at most `retention` dates,
//! evicting the oldest first.

use momo_traits::{Date, Rank, RankSnapshot, Symbol};
use std::collections::BTreeMap;
use tracing::debug;

/// Default number of most-recent dates kept.
pub const DEFAULT_RETENTION: usize = 365;

/// What [`RankHistory::record_snapshot`] did with the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// The date was new and became a row.
    Inserted,
    /// The date existed and its row was overwritten with different ranks.
    Replaced,
    /// The date existed with identical ranks.
    Unchanged,
}

/// Result of recording one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    /// How the date was written.
    pub kind: WriteKind,
    /// Dates dropped to honor the retention bound, oldest first.
    pub evicted: Vec<Date>,
}

/// Date-keyed, bounded history of rank snapshots.
///
/// Columns (symbols) are the ordered union of every symbol ever recorded and
/// are never dropped. A symbol absent from a date's snapshot has no rank on
/// that date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankHistory {
    retention: usize,
    symbols: Vec<Symbol>,
    rows: BTreeMap<Date, RankSnapshot>,
}

impl RankHistory {
    /// Creates an empty history keeping at most `retention` dates (minimum 1).
    #[must_use]
    pub fn new(retention: usize) -> Self {
        Self {
            retention: retention.max(1),
            symbols: Vec::new(),
            rows: BTreeMap::new(),
        }
    }

    /// Build a history from loaded rows.
    ///
    /// `symbols` fixes the column order; symbols found only in `rows` are
    /// appended. The retention bound is applied immediately.
    #[must_use]
    pub fn from_rows(
        retention: usize,
        symbols: Vec<Symbol>,
        rows: BTreeMap<Date, RankSnapshot>,
    ) -> Self {
        let mut history = Self::new(retention);
        history.symbols = symbols;
        for snapshot in rows.values() {
            history.observe_symbols(snapshot);
        }
        history.rows = rows;
        history.enforce_retention();
        history
    }

    /// Merge one date's snapshot into the history.
    ///
    /// An existing date is overwritten wholesale: symbols missing from
    /// `snapshot` lose their rank for that date only. Recording the same
    /// snapshot twice leaves the history unchanged.
    pub fn record_snapshot(&mut self, date: Date, snapshot: RankSnapshot) -> RecordSummary {
        self.observe_symbols(&snapshot);

        let kind = match self.rows.insert(date, snapshot) {
            None => WriteKind::Inserted,
            Some(previous) if self.rows.get(&date) == Some(&previous) => WriteKind::Unchanged,
            Some(_) => WriteKind::Replaced,
        };

        let evicted = self.enforce_retention();
        debug!(%date, ?kind, evicted = evicted.len(), "recorded snapshot");
        RecordSummary { kind, evicted }
    }

    /// Append unseen symbols to the column list.
    fn observe_symbols(&mut self, snapshot: &RankSnapshot) {
        for symbol in snapshot.symbols() {
            if !self.symbols.iter().any(|s| s == symbol) {
                self.symbols.push(symbol.to_string());
            }
        }
    }

    /// Drop the oldest dates beyond the retention bound.
    fn enforce_retention(&mut self) -> Vec<Date> {
        let mut evicted = Vec::new();
        while self.rows.len() > self.retention {
            match self.rows.pop_first() {
                Some((date, _)) => evicted.push(date),
                None => break,
            }
        }
        evicted
    }

    /// Maximum number of dates kept.
    #[must_use]
    pub const fn retention(&self) -> usize {
        self.retention
    }

    /// Number of dates held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the history holds no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All symbols ever recorded, in column order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Dates held, oldest first.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = Date> + '_ {
        self.rows.keys().copied()
    }

    /// Rows, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Date, &RankSnapshot)> {
        self.rows.iter().map(|(d, s)| (*d, s))
    }

    /// The newest date.
    #[must_use]
    pub fn latest_date(&self) -> Option<Date> {
        self.rows.last_key_value().map(|(d, _)| *d)
    }

    /// The newest row.
    #[must_use]
    pub fn latest(&self) -> Option<(Date, &RankSnapshot)> {
        self.rows.last_key_value().map(|(d, s)| (*d, s))
    }

    /// Rank of `symbol` on `date`.
    #[must_use]
    pub fn rank(&self, date: Date, symbol: &str) -> Option<Rank> {
        self.rows.get(&date).and_then(|s| s.get(symbol))
    }

    /// Row `offset` sessions back from the newest, where offset 1 is the
    /// newest row.
    ///
    /// An offset of zero is treated as 1, and an offset past the oldest row
    /// clamps to the oldest row. `None` only when the history is empty.
    #[must_use]
    pub fn snapshot_at_offset(&self, offset: usize) -> Option<(Date, &RankSnapshot)> {
        let index = self.rows.len().saturating_sub(offset.max(1));
        self.rows.iter().nth(index).map(|(d, s)| (*d, s))
    }

    /// The `window` newest rows, oldest first.
    pub fn recent(&self, window: usize) -> impl Iterator<Item = (Date, &RankSnapshot)> {
        self.rows
            .iter()
            .skip(self.rows.len().saturating_sub(window))
            .map(|(d, s)| (*d, s))
    }
}

impl Default for RankHistory {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}
