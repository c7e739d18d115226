//! Durable CSV format of the rank history.
//!
//! One row per date, one column per symbol, the date key first. Cells hold an
//! integer rank or are empty when the symbol has no rank that day. Files
//! written by other tools are accepted as long as they follow the same
//! shape: rows may come in any order, the key column may have any header,
//! and ranks may be written as integral floats (`3.0`).

use crate::{RankHistory, atomic::write_atomic_with};
use chrono::NaiveDateTime;
use momo_traits::{Date, MomoError, Rank, RankSnapshot, Result, Symbol};
use polars::prelude::*;
use std::{collections::BTreeMap, path::Path};
use tracing::{info, warn};

/// Header of the date key column in files written by this crate.
pub const DATE_COLUMN: &str = "date";

fn corrupt(context: impl std::fmt::Display) -> MomoError {
    MomoError::StoreCorrupt(context.to_string())
}

/// Parse a date key, accepting a trailing time of day.
fn parse_key(value: &str) -> Option<Date> {
    let value = value.trim();
    Date::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Convert a cell to a rank; `Err` for anything but a positive integer.
fn parse_rank(value: f64) -> std::result::Result<Rank, String> {
    if value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(format!("{value} is not a positive integer rank"));
    }
    Rank::new(value as u32).ok_or_else(|| format!("{value} is not a positive rank"))
}

/// Build the on-disk table: `date` first, then one nullable Int64 column per
/// symbol in column order, rows oldest first.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be assembled.
pub fn to_frame(history: &RankHistory) -> Result<DataFrame> {
    let dates: Vec<String> = history
        .dates()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();

    let mut columns = Vec::with_capacity(history.symbols().len() + 1);
    columns.push(Column::new(DATE_COLUMN.into(), dates));
    for symbol in history.symbols() {
        let ranks: Vec<Option<i64>> = history
            .iter()
            .map(|(_, snapshot)| snapshot.get(symbol).map(|r| i64::from(r.get())))
            .collect();
        columns.push(Column::new(symbol.as_str().into(), ranks));
    }

    Ok(DataFrame::new(columns)?)
}

/// Rebuild a history from an on-disk table.
///
/// # Errors
///
/// Returns [`MomoError::StoreCorrupt`] for unparseable dates, repeated dates,
/// or cells that are not positive integer ranks.
pub fn from_frame(df: &DataFrame, retention: usize) -> Result<RankHistory> {
    let columns = df.get_columns();
    let Some((key, symbol_columns)) = columns.split_first() else {
        return Err(corrupt("file has no columns"));
    };

    let keys = key
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(corrupt)?;
    let mut dates = Vec::with_capacity(df.height());
    for (row, value) in keys.str().map_err(corrupt)?.into_iter().enumerate() {
        let date = value
            .and_then(parse_key)
            .ok_or_else(|| corrupt(format!("row {}: invalid date {value:?}", row + 1)))?;
        dates.push(date);
    }

    let mut symbols: Vec<Symbol> = Vec::with_capacity(symbol_columns.len());
    let mut cells: Vec<Vec<Option<Rank>>> = Vec::with_capacity(symbol_columns.len());
    for column in symbol_columns {
        let symbol = column.name().trim().to_string();
        if symbol.is_empty() || symbols.contains(&symbol) {
            return Err(corrupt(format!("invalid or repeated symbol column {symbol:?}")));
        }

        let values = column
            .as_materialized_series()
            .strict_cast(&DataType::Float64)
            .map_err(|e| corrupt(format!("column {symbol}: {e}")))?;
        let ranks = values
            .f64()
            .map_err(corrupt)?
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value
                    .map(parse_rank)
                    .transpose()
                    .map_err(|e| corrupt(format!("row {}, column {symbol}: {e}", row + 1)))
            })
            .collect::<Result<Vec<_>>>()?;

        symbols.push(symbol);
        cells.push(ranks);
    }

    let mut rows: BTreeMap<Date, RankSnapshot> = BTreeMap::new();
    for (row, date) in dates.into_iter().enumerate() {
        let snapshot: RankSnapshot = symbols
            .iter()
            .zip(&cells)
            .filter_map(|(symbol, column)| column[row].map(|rank| (symbol.clone(), rank)))
            .collect();

        if rows.contains_key(&date) {
            return Err(corrupt(format!("date {date} appears more than once")));
        }
        if snapshot.is_empty() {
            warn!(%date, "ignoring history row without any rank");
            continue;
        }
        rows.insert(date, snapshot);
    }

    Ok(RankHistory::from_rows(retention, symbols, rows))
}

/// Load the history at `path`. A missing file is an empty history.
///
/// # Errors
///
/// Returns [`MomoError::StoreCorrupt`] if the file cannot be parsed, or an
/// I/O error if its existence cannot be determined.
pub fn load(path: &Path, retention: usize) -> Result<RankHistory> {
    if !path.try_exists()? {
        info!(path = %path.display(), "no rank history yet, starting empty");
        return Ok(RankHistory::new(retention));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| corrupt(format!("{}: {e}", path.display())))?;

    let history = from_frame(&df, retention)?;
    info!(
        path = %path.display(),
        dates = history.len(),
        symbols = history.symbols().len(),
        "loaded rank history"
    );
    Ok(history)
}

/// Persist the history to `path`, atomically replacing any previous file.
///
/// # Errors
///
/// Returns an error if the table cannot be built or written.
pub fn save(history: &RankHistory, path: &Path) -> Result<()> {
    let mut df = to_frame(history)?;
    write_atomic_with(path, |file| {
        CsvWriter::new(file).include_header(true).finish(&mut df)?;
        Ok(())
    })?;
    info!(path = %path.display(), dates = history.len(), "saved rank history");
    Ok(())
}
