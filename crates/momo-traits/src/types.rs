//! Common types used throughout the momentum tracker.
//!
//! This module defines the symbol, date and rank vocabulary shared by every
//! crate, plus [`MarketData`], the long-format price frame handed over by a
//! price provider.

use crate::{MomoError, Result};
use derive_more::Display;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, typically an ETF ticker like "SPY".
pub type Symbol = String;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch, used to decode
/// polars `Date` values.
const UNIX_EPOCH_CE_DAYS: i32 = 719_163;

/// Parse a date string in `YYYY-MM-DD` format.
pub fn parse_date(value: &str) -> Result<Date> {
    Date::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| MomoError::InvalidDate(format!("'{value}': {e}")))
}

/// Convert a polars `Date` physical value (days since the Unix epoch).
pub fn date_from_epoch_days(days: i32) -> Result<Date> {
    Date::from_num_days_from_ce_opt(days + UNIX_EPOCH_CE_DAYS)
        .ok_or_else(|| MomoError::InvalidDate(format!("{days} days since epoch")))
}

/// A momentum rank: 1 is the strongest symbol of the day.
///
/// Ranks are always positive. A symbol without a rank is represented as
/// `Option::<Rank>::None`, never as zero.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Rank(u32);

impl Rank {
    /// Create a rank, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    /// The numeric rank.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// One date's ranking: symbol to rank for every symbol with a known score.
///
/// Symbols without a known score are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankSnapshot {
    ranks: BTreeMap<Symbol, Rank>,
}

impl RankSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ranks: BTreeMap::new(),
        }
    }

    /// Set the rank of a symbol, returning the previous rank if any.
    pub fn insert(&mut self, symbol: impl Into<Symbol>, rank: Rank) -> Option<Rank> {
        self.ranks.insert(symbol.into(), rank)
    }

    /// Rank of a symbol, if it was ranked.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<Rank> {
        self.ranks.get(symbol).copied()
    }

    /// Number of ranked symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Whether no symbol is ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Iterate over (symbol, rank) pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rank)> {
        self.ranks.iter().map(|(s, r)| (s.as_str(), *r))
    }

    /// Ranked symbols in symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.ranks.keys().map(String::as_str)
    }
}

impl FromIterator<(Symbol, Rank)> for RankSnapshot {
    fn from_iter<I: IntoIterator<Item = (Symbol, Rank)>>(iter: I) -> Self {
        Self {
            ranks: iter.into_iter().collect(),
        }
    }
}

/// Container for fetched market data.
///
/// `MarketData` wraps a long-format Polars DataFrame with one row per
/// observation.
///
/// # Expected Schema
///
/// - `symbol`: Security identifier (String)
/// - `date`: Trading date (Date)
/// - `close`: Adjusted close price (Float64)
#[derive(Debug, Clone)]
pub struct MarketData {
    /// The underlying DataFrame containing market data.
    data: DataFrame,
}

impl MarketData {
    /// Column holding the symbol.
    pub const SYMBOL: &'static str = "symbol";
    /// Column holding the session date.
    pub const DATE: &'static str = "date";
    /// Column holding the adjusted close.
    pub const CLOSE: &'static str = "close";

    /// Creates a new `MarketData` instance from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Build market data from (symbol, date, adjusted close) observations.
    ///
    /// # Errors
    ///
    /// Returns an error if the DataFrame cannot be constructed.
    pub fn from_observations(observations: Vec<(Symbol, Date, f64)>) -> Result<Self> {
        let mut symbols = Vec::with_capacity(observations.len());
        let mut dates = Vec::with_capacity(observations.len());
        let mut closes = Vec::with_capacity(observations.len());
        for (symbol, date, close) in observations {
            symbols.push(symbol);
            dates.push(date);
            closes.push(close);
        }

        let data = df! {
            Self::SYMBOL => symbols,
            Self::DATE => dates,
            Self::CLOSE => closes,
        }?;
        Ok(Self::new(data))
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Returns the number of rows in the market data.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the market data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Checks if a column exists in the market data.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(matches!(parse_date("15/01/2024"), Err(MomoError::InvalidDate(_))));
    }

    #[test]
    fn test_epoch_days() {
        assert_eq!(date_from_epoch_days(0).unwrap(), d(1970, 1, 1));
        assert_eq!(date_from_epoch_days(19_737).unwrap(), d(2024, 1, 15));
    }

    #[test]
    fn test_rank_rejects_zero() {
        assert!(Rank::new(0).is_none());
        assert_eq!(Rank::new(7).unwrap().get(), 7);
        assert_eq!(Rank::new(12).unwrap().to_string(), "12");
    }

    #[test]
    fn test_rank_serializes_as_number() {
        let json = serde_json::to_string(&Rank::new(3)).unwrap();
        assert_eq!(json, "3");
        let none: Option<Rank> = None;
        assert_eq!(serde_json::to_string(&none).unwrap(), "null");
    }

    #[test]
    fn test_snapshot_basics() {
        let mut snap = RankSnapshot::new();
        assert!(snap.is_empty());
        snap.insert("SPY", Rank::new(2).unwrap());
        snap.insert("QQQ", Rank::new(1).unwrap());
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.get("QQQ"), Rank::new(1));
        assert_eq!(snap.get("IWM"), None);
        assert_eq!(snap.symbols().collect::<Vec<_>>(), vec!["QQQ", "SPY"]);
    }

    #[test]
    fn test_market_data_from_observations() {
        let md = MarketData::from_observations(vec![
            ("SPY".to_string(), d(2024, 1, 2), 470.0),
            ("QQQ".to_string(), d(2024, 1, 2), 400.0),
        ])
        .unwrap();
        assert_eq!(md.len(), 2);
        assert!(md.has_column(MarketData::SYMBOL));
        assert!(md.has_column(MarketData::DATE));
        assert!(md.has_column(MarketData::CLOSE));
        assert!(!md.has_column("volume"));
    }

    #[test]
    fn test_market_data_empty() {
        let md = MarketData::from_observations(Vec::new()).unwrap();
        assert!(md.is_empty());
    }
}
