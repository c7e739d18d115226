//! Financial Modeling Prep (FMP) price provider for the momentum tracker.
//!
//! Fetches dividend-adjusted daily closes from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API and
//! exposes them through the [`momo_traits::PriceProvider`] seam.
//!
//! # Usage
//!
//! ```rust,ignore
//! use momo_fmp::FmpPriceProvider;
//! use momo_traits::PriceProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = FmpPriceProvider::from_env()?;
//!     let symbols = vec!["SPY".to_string(), "QQQ".to_string()];
//!     let data = provider.fetch_closes(&symbols, 252).await?;
//!     println!("{} observations", data.len());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod provider;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use provider::{FmpPriceProvider, calendar_days_for};
pub use types::AdjustedPrice;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
