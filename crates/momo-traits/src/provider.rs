//! Price provider seam.
//!
//! The core treats market data as a black box: a provider is asked for a
//! universe and a number of sessions, and answers with whatever it has.

use crate::{MarketData, Result, Symbol};
use std::future::Future;

/// A source of historical adjusted close prices.
pub trait PriceProvider: Send + Sync {
    /// Short provider name, used in logs.
    fn name(&self) -> &str;

    /// Fetch adjusted closes for `symbols`, covering at least `sessions`
    /// trading sessions that end at the most recent available session.
    ///
    /// Unrecognized or delisted symbols may be silently absent from the
    /// result; callers must handle partial universes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MomoError::ProviderUnavailable`] if nothing usable
    /// could be fetched.
    fn fetch_closes(
        &self,
        symbols: &[Symbol],
        sessions: usize,
    ) -> impl Future<Output = Result<MarketData>> + Send;
}
