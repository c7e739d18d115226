//! Date-indexed price table.
//!
//! [`PriceSeries`] is the wide, aligned view of a fetched [`MarketData`] frame:
//! one row per session, one column per symbol. Cleaning (alignment and
//! forward-fill) happens here so that signals only ever see a rectangular
//! table.

use crate::{Date, MarketData, MomoError, Result, Symbol, date_from_epoch_days};
use std::collections::{BTreeSet, HashMap};

/// Adjusted closes for a universe of symbols over a common set of sessions.
///
/// Invariants: dates are strictly increasing, and every symbol has exactly
/// one (possibly unknown) close per date.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    dates: Vec<Date>,
    symbols: Vec<Symbol>,
    /// `closes[symbol][session]`
    closes: Vec<Vec<Option<f64>>>,
}

impl PriceSeries {
    /// Build a series from already aligned columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the dates are not strictly increasing or a column
    /// length does not match the number of dates.
    pub fn new(
        dates: Vec<Date>,
        symbols: Vec<Symbol>,
        closes: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        if dates.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MomoError::InvalidData(
                "price dates must be strictly increasing".to_string(),
            ));
        }
        if symbols.len() != closes.len() {
            return Err(MomoError::InvalidData(format!(
                "{} symbols but {} price columns",
                symbols.len(),
                closes.len()
            )));
        }
        if let Some((symbol, _)) = symbols
            .iter()
            .zip(&closes)
            .find(|(_, column)| column.len() != dates.len())
        {
            return Err(MomoError::InvalidData(format!(
                "price column for {symbol} does not cover {} sessions",
                dates.len()
            )));
        }

        Ok(Self {
            dates,
            symbols,
            closes,
        })
    }

    /// Align a long-format frame into a date-indexed table.
    ///
    /// Symbols keep their order of first appearance in the frame, which is
    /// the order the provider was asked for them. Rows with a null field are
    /// dropped, and non-positive or non-finite closes become unknown. No
    /// forward-fill is applied here.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing or has the wrong type.
    pub fn from_market_data(data: &MarketData) -> Result<Self> {
        for name in [MarketData::SYMBOL, MarketData::DATE, MarketData::CLOSE] {
            if !data.has_column(name) {
                return Err(MomoError::InvalidData(format!(
                    "market data is missing column '{name}'"
                )));
            }
        }

        let df = data.data();
        let symbol_col = df.column(MarketData::SYMBOL)?.as_materialized_series().str()?;
        let date_col = df.column(MarketData::DATE)?.as_materialized_series().date()?;
        let close_col = df.column(MarketData::CLOSE)?.as_materialized_series().f64()?;

        let mut order: Vec<Symbol> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut observations: Vec<(usize, Date, Option<f64>)> = Vec::with_capacity(df.height());

        for ((symbol, days), close) in symbol_col
            .into_iter()
            .zip(date_col.into_iter())
            .zip(close_col.into_iter())
        {
            let (Some(symbol), Some(days), Some(close)) = (symbol, days, close) else {
                continue;
            };
            let date = date_from_epoch_days(days)?;
            let idx = *index.entry(symbol.to_string()).or_insert_with(|| {
                order.push(symbol.to_string());
                order.len() - 1
            });
            let close = (close.is_finite() && close > 0.0).then_some(close);
            observations.push((idx, date, close));
        }

        let dates: Vec<Date> = observations
            .iter()
            .map(|(_, date, _)| *date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let positions: HashMap<Date, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut closes = vec![vec![None; dates.len()]; order.len()];
        for (idx, date, close) in observations {
            // A repeated (symbol, date) pair keeps the last observation.
            closes[idx][positions[&date]] = close;
        }

        Self::new(dates, order, closes)
    }

    /// Forward-fill gaps per symbol from the last known close.
    ///
    /// Only past values are used: a symbol's leading gap (before its first
    /// observation) stays unknown.
    pub fn forward_fill(&mut self) {
        for column in &mut self.closes {
            let mut last = None;
            for value in column.iter_mut() {
                match value {
                    Some(v) => last = Some(*v),
                    None => *value = last,
                }
            }
        }
    }

    /// Consuming variant of [`PriceSeries::forward_fill`].
    #[must_use]
    pub fn forward_filled(mut self) -> Self {
        self.forward_fill();
        self
    }

    /// Session dates, oldest first.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Symbols in column order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Number of sessions.
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table holds no sessions.
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The most recent session.
    pub fn latest_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// All closes of one symbol, oldest first.
    pub fn closes(&self, symbol: &str) -> Option<&[Option<f64>]> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .map(|i| self.closes[i].as_slice())
    }

    /// Close of the symbol at column `column`, `offset` sessions back.
    ///
    /// Offset 1 is the most recent session, offset `len` the oldest. An offset
    /// of zero or beyond the table yields `None`.
    pub fn close_at_offset(&self, column: usize, offset: usize) -> Option<f64> {
        if offset == 0 || offset > self.dates.len() {
            return None;
        }
        self.closes
            .get(column)
            .and_then(|c| c[self.dates.len() - offset])
    }

    /// Whether at least one close is known anywhere in the table.
    pub fn has_usable_prices(&self) -> bool {
        self.closes.iter().flatten().any(Option::is_some)
    }
}
