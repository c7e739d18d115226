//! FMP API client implementation.

use crate::{Result, error::FmpError, types::AdjustedPrice};
use chrono::NaiveDate;
use reqwest::Client;
use std::env;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        if text.contains("\"Error Message\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Endpoint path for dividend-adjusted daily bars.
    fn adjusted_prices_endpoint(symbol: &str, from: NaiveDate, to: NaiveDate) -> String {
        format!(
            "historical-price-eod/dividend-adjusted?symbol={}&from={}&to={}",
            symbol.to_uppercase(),
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        )
    }

    /// Get dividend-adjusted daily bars for a symbol, newest first.
    ///
    /// # Arguments
    ///
    /// * `symbol` - ETF ticker symbol
    /// * `from` - First calendar date (inclusive)
    /// * `to` - Last calendar date (inclusive)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns no bars.
    pub async fn adjusted_prices(
        &self,
        symbol: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AdjustedPrice>> {
        let endpoint = Self::adjusted_prices_endpoint(symbol, from, to);
        // The stable API returns a flat array, not a wrapped response
        let bars: Vec<AdjustedPrice> = self.get(&endpoint).await?;
        if bars.is_empty() {
            return Err(FmpError::NoData(symbol.to_uppercase()));
        }
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key");
        assert_eq!(
            client.url("quote?symbol=SPY"),
            "https://financialmodelingprep.com/stable/quote?symbol=SPY&apikey=test_key"
        );
        assert_eq!(
            client.url("search-symbol"),
            "https://financialmodelingprep.com/stable/search-symbol?apikey=test_key"
        );
    }

    #[test]
    fn test_adjusted_prices_endpoint() {
        let from = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 7, 17).unwrap();
        assert_eq!(
            FmpClient::adjusted_prices_endpoint("spy", from, to),
            "historical-price-eod/dividend-adjusted?symbol=SPY&from=2023-05-01&to=2024-07-17"
        );
    }
}
