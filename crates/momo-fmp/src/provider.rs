//! [`PriceProvider`] backed by the FMP client.

use crate::{FmpClient, FmpError, types::AdjustedPrice};
use chrono::{Days, NaiveDate, Utc};
use momo_traits::{Date, MarketData, MomoError, PriceProvider, Result, Symbol};
use tracing::{debug, info, warn};

/// Calendar days to request so that `sessions` trading sessions are covered.
///
/// Roughly 252 trading days per 365 calendar days, plus a buffer for holidays.
#[must_use]
pub fn calendar_days_for(sessions: usize) -> u64 {
    (sessions as f64 * 1.5) as u64 + 30
}

/// Convert one symbol's bars into `(symbol, date, close)` observations.
///
/// Bars without a parseable date or an adjusted close are dropped.
fn observations(symbol: &str, bars: &[AdjustedPrice]) -> Vec<(Symbol, Date, f64)> {
    bars.iter()
        .filter_map(|bar| {
            let date = bar.parsed_date()?;
            let close = bar.adj_close?;
            Some((symbol.to_string(), date, close))
        })
        .collect()
}

/// Price provider that queries FMP once per symbol.
///
/// Per-symbol failures are logged and skipped; the fetch fails only when no
/// symbol produced any prices.
#[derive(Debug, Clone)]
pub struct FmpPriceProvider {
    client: FmpClient,
    end_date: Option<NaiveDate>,
}

impl FmpPriceProvider {
    /// Wrap an existing client.
    #[must_use]
    pub const fn new(client: FmpClient) -> Self {
        Self {
            client,
            end_date: None,
        }
    }

    /// Create a provider from the `FMP_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    pub fn from_env() -> std::result::Result<Self, FmpError> {
        Ok(Self::new(FmpClient::from_env()?))
    }

    /// Fix the last requested date instead of using today's UTC date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    fn window(&self, sessions: usize) -> (NaiveDate, NaiveDate) {
        let to = self.end_date.unwrap_or_else(|| Utc::now().date_naive());
        let from = to
            .checked_sub_days(Days::new(calendar_days_for(sessions)))
            .unwrap_or(NaiveDate::MIN);
        (from, to)
    }
}

impl PriceProvider for FmpPriceProvider {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn fetch_closes(&self, symbols: &[Symbol], sessions: usize) -> Result<MarketData> {
        let (from, to) = self.window(sessions);
        info!(symbols = symbols.len(), %from, %to, "fetching adjusted closes from FMP");

        let mut rows = Vec::new();
        let mut failed = 0usize;
        let mut last_error = None;

        for symbol in symbols {
            match self.client.adjusted_prices(symbol, from, to).await {
                Ok(bars) => {
                    let obs = observations(symbol, &bars);
                    debug!(%symbol, bars = bars.len(), kept = obs.len(), "fetched");
                    rows.extend(obs);
                }
                Err(FmpError::RateLimitExceeded) => {
                    return Err(FmpError::RateLimitExceeded.into());
                }
                Err(e) => {
                    warn!(%symbol, error = %e, "failed to fetch prices, skipping");
                    failed += 1;
                    last_error = Some(e);
                }
            }
        }

        if rows.is_empty() {
            let reason = last_error.map_or_else(
                || "no prices returned".to_string(),
                |e| format!("no prices returned, last error: {e}"),
            );
            return Err(MomoError::ProviderUnavailable(reason));
        }
        if failed > 0 {
            warn!(failed, total = symbols.len(), "some symbols had no prices");
        }

        MarketData::from_observations(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: Option<f64>) -> AdjustedPrice {
        AdjustedPrice {
            symbol: None,
            date: date.to_string(),
            adj_open: None,
            adj_high: None,
            adj_low: None,
            adj_close: close,
            volume: None,
        }
    }

    #[test]
    fn test_calendar_days() {
        assert_eq!(calendar_days_for(252), 408);
        assert_eq!(calendar_days_for(0), 30);
    }

    #[test]
    fn test_window() {
        let end = NaiveDate::from_ymd_opt(2024, 7, 17).unwrap();
        let provider = FmpPriceProvider::new(FmpClient::new("k")).with_end_date(end);
        let (from, to) = provider.window(252);
        assert_eq!(to, end);
        assert_eq!((to - from).num_days(), 408);
    }

    #[tokio::test]
    async fn test_nothing_fetched_is_unavailable() {
        let provider = FmpPriceProvider::new(FmpClient::new("k"));
        let err = provider.fetch_closes(&[], 252).await.unwrap_err();
        assert!(err.is_provider_unavailable());
    }

    #[test]
    fn test_observations_drop_unusable_bars() {
        let bars = vec![
            bar("2024-07-17", Some(556.94)),
            bar("2024-07-16", None),
            bar("not-a-date", Some(1.0)),
        ];
        let obs = observations("SPY", &bars);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].0, "SPY");
        assert_eq!(obs[0].1, NaiveDate::from_ymd_opt(2024, 7, 17).unwrap());
    }
}
