//! Response types for the FMP price endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dividend-adjusted daily bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedPrice {
    /// Symbol, when the endpoint echoes it.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Date (YYYY-MM-DD).
    pub date: String,
    /// Adjusted open.
    #[serde(default)]
    pub adj_open: Option<f64>,
    /// Adjusted high.
    #[serde(default)]
    pub adj_high: Option<f64>,
    /// Adjusted low.
    #[serde(default)]
    pub adj_low: Option<f64>,
    /// Adjusted close.
    #[serde(default)]
    pub adj_close: Option<f64>,
    /// Volume.
    #[serde(default)]
    pub volume: Option<f64>,
}

impl AdjustedPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}
