//! The daily update cycle.
//!
//! One cycle is a locked read-modify-write of the history file:
//! load, guard against a duplicate date, fetch, score, rank, record, save.
//! Every whole-cycle failure returns before the save, so the file on disk is
//! either the previous version or the complete new one.

use chrono::{Datelike, Days, Weekday};
use momo_history::{CycleLock, DEFAULT_RETENTION, load, save};
use momo_signals::{LongTermMomentum, LongTermMomentumConfig, rank_scores};
use momo_traits::{Date, MomoError, PriceProvider, PriceSeries, Result, Signal, Symbol};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Most recent weekday at or before `today`.
///
/// Exchange holidays are not modeled; the post-fetch guard covers them.
#[must_use]
pub fn latest_weekday(today: Date) -> Date {
    let back = match today.weekday() {
        Weekday::Sat => 1,
        Weekday::Sun => 2,
        _ => 0,
    };
    today.checked_sub_days(Days::new(back)).unwrap_or(today)
}

/// Settings for an [`UpdateCycle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Path of the history CSV.
    pub history_path: PathBuf,
    /// Maximum number of dates kept in the history.
    pub retention: usize,
    /// Momentum window.
    pub momentum: LongTermMomentumConfig,
}

impl CycleConfig {
    /// Default settings for the history file at `history_path`.
    #[must_use]
    pub fn new(history_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            retention: DEFAULT_RETENTION,
            momentum: LongTermMomentumConfig::default(),
        }
    }
}

/// How a successful cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new snapshot was written.
    Recorded {
        /// Session date the snapshot is keyed under.
        date: Date,
        /// Symbols that received a rank.
        ranked: usize,
        /// Symbols requested from the provider.
        universe: usize,
    },
    /// The history already holds the newest available session.
    Skipped {
        /// Newest date in the history.
        latest: Date,
    },
}

/// Drives one update of the rank history.
#[derive(Debug, Clone)]
pub struct UpdateCycle {
    config: CycleConfig,
}

impl UpdateCycle {
    /// Create a cycle with the given settings.
    #[must_use]
    pub const fn new(config: CycleConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Run one cycle for `universe` as of the calendar date `today`.
    ///
    /// The snapshot is keyed by the newest session in the fetched prices,
    /// which may be earlier than `today`.
    ///
    /// # Errors
    ///
    /// - [`MomoError::Config`] for an empty universe or unusable window
    /// - [`MomoError::Locked`] if another cycle holds the history
    /// - [`MomoError::StoreCorrupt`] if the history file cannot be parsed
    /// - [`MomoError::ProviderUnavailable`] if no usable prices were fetched
    /// - [`MomoError::InsufficientHistory`] if no symbol could be scored
    ///
    /// The history file is untouched in every error case.
    pub async fn run<P: PriceProvider>(
        &self,
        provider: &P,
        universe: &[Symbol],
        today: Date,
    ) -> Result<CycleOutcome> {
        if universe.is_empty() {
            return Err(MomoError::Config("symbol universe is empty".to_string()));
        }
        self.config.momentum.validate()?;

        let path = &self.config.history_path;
        let _lock = CycleLock::acquire(CycleLock::path_for(path))?;
        let mut history = load(path, self.config.retention)?;

        let candidate = latest_weekday(today);
        if let Some(latest) = history.latest_date() {
            if latest >= candidate {
                info!(%latest, %candidate, "history already up to date, skipping fetch");
                return Ok(CycleOutcome::Skipped { latest });
            }
        }

        let signal = LongTermMomentum::new(self.config.momentum);
        let sessions = signal.lookback() + 1;
        info!(
            provider = provider.name(),
            symbols = universe.len(),
            sessions,
            "fetching prices"
        );
        let data = provider
            .fetch_closes(universe, sessions)
            .await
            .map_err(|e| {
                if e.is_provider_unavailable() {
                    e
                } else {
                    MomoError::ProviderUnavailable(format!("{}: {e}", provider.name()))
                }
            })?;

        let prices = PriceSeries::from_market_data(&data)?.forward_filled();
        let session = match prices.latest_date() {
            Some(date) if prices.has_usable_prices() => date,
            _ => {
                return Err(MomoError::ProviderUnavailable(format!(
                    "{} returned no usable prices",
                    provider.name()
                )));
            }
        };

        if let Some(latest) = history.latest_date() {
            if session <= latest {
                info!(%session, %latest, "no session newer than history, skipping");
                return Ok(CycleOutcome::Skipped { latest });
            }
        }

        let missing = universe
            .iter()
            .filter(|s| !prices.symbols().contains(*s))
            .count();
        if missing > 0 {
            warn!(missing, "symbols absent from provider response");
        }

        let scores = signal.score(&prices)?;
        let snapshot = rank_scores(&scores);
        if snapshot.is_empty() {
            return Err(MomoError::InsufficientHistory(format!(
                "no symbol has {} sessions of prices",
                signal.lookback()
            )));
        }

        let ranked = snapshot.len();
        let summary = history.record_snapshot(session, snapshot);
        save(&history, path)?;

        info!(
            date = %session,
            ranked,
            universe = universe.len(),
            evicted = summary.evicted.len(),
            "recorded rank snapshot"
        );
        Ok(CycleOutcome::Recorded {
            date: session,
            ranked,
            universe: universe.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use momo_history::RankHistory;
    use momo_traits::{MarketData, Rank};
    use std::{fs, path::Path};

    /// Provider answering from fixed observations.
    #[derive(Debug, Default)]
    struct FixedProvider {
        observations: Vec<(Symbol, Date, f64)>,
        fail: bool,
    }

    impl PriceProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_closes(&self, symbols: &[Symbol], _sessions: usize) -> Result<MarketData> {
            if self.fail {
                return Err(MomoError::ProviderUnavailable("outage".to_string()));
            }
            let rows = self
                .observations
                .iter()
                .filter(|(s, _, _)| symbols.contains(s))
                .cloned()
                .collect();
            MarketData::from_observations(rows)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// `n` weekdays ending at `end`, oldest first.
    fn weekdays(n: usize, end: Date) -> Vec<Date> {
        let mut out = Vec::with_capacity(n);
        let mut d = end;
        while out.len() < n {
            if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
                out.push(d);
            }
            d = d.pred_opt().unwrap();
        }
        out.reverse();
        out
    }

    /// Geometric price path with daily growth `g` over `n` sessions ending at `end`.
    fn path(symbol: &str, n: usize, end: Date, g: f64) -> Vec<(Symbol, Date, f64)> {
        weekdays(n, end)
            .into_iter()
            .enumerate()
            .map(|(i, d)| (symbol.to_string(), d, 100.0 * (1.0 + g).powi(i as i32)))
            .collect()
    }

    fn universe(symbols: &[&str]) -> Vec<Symbol> {
        symbols.iter().map(|s| (*s).to_string()).collect()
    }

    fn provider(end: Date) -> FixedProvider {
        let mut observations = path("SPY", 300, end, 0.001);
        observations.extend(path("QQQ", 300, end, 0.002));
        observations.extend(path("XYZ", 100, end, 0.01));
        FixedProvider {
            observations,
            fail: false,
        }
    }

    fn cycle(dir: &Path) -> UpdateCycle {
        UpdateCycle::new(CycleConfig::new(dir.join("ranks_history.csv")))
    }

    fn stored(cycle: &UpdateCycle) -> RankHistory {
        load(&cycle.config().history_path, DEFAULT_RETENTION).unwrap()
    }

    fn assert_lock_released(cycle: &UpdateCycle) {
        let lock = CycleLock::path_for(&cycle.config().history_path);
        assert!(CycleLock::acquire(lock).is_ok());
    }

    // Friday 2024-07-12 and the following Monday.
    fn friday() -> Date {
        date(2024, 7, 12)
    }

    fn monday() -> Date {
        date(2024, 7, 15)
    }

    #[test]
    fn test_latest_weekday() {
        assert_eq!(latest_weekday(friday()), friday());
        assert_eq!(latest_weekday(date(2024, 7, 13)), friday());
        assert_eq!(latest_weekday(date(2024, 7, 14)), friday());
        assert_eq!(latest_weekday(monday()), monday());
    }

    #[tokio::test]
    async fn test_records_ranks_and_skips_short_history() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());

        let outcome = cycle
            .run(&provider(friday()), &universe(&["SPY", "QQQ", "XYZ"]), friday())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            CycleOutcome::Recorded {
                date: friday(),
                ranked: 2,
                universe: 3
            }
        );

        let history = stored(&cycle);
        assert_eq!(history.len(), 1);
        assert_eq!(history.rank(friday(), "QQQ"), Rank::new(1));
        assert_eq!(history.rank(friday(), "SPY"), Rank::new(2));
        assert_eq!(history.rank(friday(), "XYZ"), None);
        assert_lock_released(&cycle);
    }

    #[tokio::test]
    async fn test_symbol_ranked_once_it_has_full_window() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());
        let symbols = universe(&["SPY", "XYZ"]);

        let mut young = path("SPY", 300, friday(), 0.001);
        young.extend(path("XYZ", 251, friday(), 0.01));
        let young = FixedProvider {
            observations: young,
            fail: false,
        };
        cycle.run(&young, &symbols, friday()).await.unwrap();
        assert_eq!(stored(&cycle).rank(friday(), "XYZ"), None);

        let mut grown = path("SPY", 301, monday(), 0.001);
        grown.extend(path("XYZ", 252, monday(), 0.01));
        let grown = FixedProvider {
            observations: grown,
            fail: false,
        };
        cycle.run(&grown, &symbols, monday()).await.unwrap();

        let history = stored(&cycle);
        assert_eq!(history.rank(monday(), "XYZ"), Rank::new(1));
        assert_eq!(history.rank(monday(), "SPY"), Rank::new(2));
        assert_eq!(history.rank(friday(), "XYZ"), None);
    }

    #[tokio::test]
    async fn test_rerun_same_day_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());
        let symbols = universe(&["SPY", "QQQ"]);

        cycle.run(&provider(friday()), &symbols, friday()).await.unwrap();
        let first = fs::read(&cycle.config().history_path).unwrap();

        let outcome = cycle
            .run(&provider(friday()), &symbols, friday())
            .await
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Skipped { latest: friday() });
        assert_eq!(fs::read(&cycle.config().history_path).unwrap(), first);
    }

    #[tokio::test]
    async fn test_skips_when_provider_has_nothing_newer() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());
        let symbols = universe(&["SPY", "QQQ"]);

        cycle.run(&provider(friday()), &symbols, friday()).await.unwrap();
        let first = fs::read(&cycle.config().history_path).unwrap();

        // Monday holiday: the provider still ends on Friday.
        let outcome = cycle
            .run(&provider(friday()), &symbols, monday())
            .await
            .unwrap();
        assert_eq!(outcome, CycleOutcome::Skipped { latest: friday() });
        assert_eq!(fs::read(&cycle.config().history_path).unwrap(), first);
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());
        let symbols = universe(&["SPY", "QQQ"]);
        let path = cycle.config().history_path.clone();

        cycle.run(&provider(friday()), &symbols, friday()).await.unwrap();
        let content = fs::read(&path).unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        let failing = FixedProvider {
            observations: Vec::new(),
            fail: true,
        };
        let err = cycle.run(&failing, &symbols, monday()).await.unwrap_err();
        assert!(err.is_provider_unavailable());

        let empty = FixedProvider::default();
        let err = cycle.run(&empty, &symbols, monday()).await.unwrap_err();
        assert!(err.is_provider_unavailable());

        let unusable = FixedProvider {
            observations: vec![("SPY".to_string(), monday(), f64::NAN)],
            fail: false,
        };
        let err = cycle.run(&unusable, &symbols, monday()).await.unwrap_err();
        assert!(err.is_provider_unavailable());

        assert_eq!(fs::read(&path).unwrap(), content);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);
        assert_lock_released(&cycle);
    }

    #[tokio::test]
    async fn test_all_short_history_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());
        let short = FixedProvider {
            observations: path("XYZ", 100, friday(), 0.01),
            fail: false,
        };

        let err = cycle
            .run(&short, &universe(&["XYZ"]), friday())
            .await
            .unwrap_err();
        assert!(matches!(err, MomoError::InsufficientHistory(_)));
        assert!(!fs::exists(&cycle.config().history_path).unwrap());
    }

    #[tokio::test]
    async fn test_locked_history_is_not_touched() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());
        let _held = CycleLock::acquire(CycleLock::path_for(&cycle.config().history_path)).unwrap();

        let err = cycle
            .run(&provider(friday()), &universe(&["SPY"]), friday())
            .await
            .unwrap_err();
        assert!(matches!(err, MomoError::Locked(_)));
        assert!(!fs::exists(&cycle.config().history_path).unwrap());
    }

    #[tokio::test]
    async fn test_lock_file_left_by_killed_run_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());
        fs::write(CycleLock::path_for(&cycle.config().history_path), "4242\n").unwrap();

        let outcome = cycle
            .run(&provider(friday()), &universe(&["SPY", "QQQ"]), friday())
            .await
            .unwrap();
        assert!(matches!(outcome, CycleOutcome::Recorded { .. }));
        assert_lock_released(&cycle);
    }

    #[tokio::test]
    async fn test_corrupt_history_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let cycle = cycle(dir.path());
        let path = cycle.config().history_path.clone();
        fs::write(&path, "date,SPY\n2024-07-11,abc\n").unwrap();

        let err = cycle
            .run(&provider(friday()), &universe(&["SPY"]), friday())
            .await
            .unwrap_err();
        assert!(matches!(err, MomoError::StoreCorrupt(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "date,SPY\n2024-07-11,abc\n");
        assert_lock_released(&cycle);
    }

    #[tokio::test]
    async fn test_empty_universe_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = cycle(dir.path())
            .run(&provider(friday()), &[], friday())
            .await
            .unwrap_err();
        assert!(matches!(err, MomoError::Config(_)));
    }
}
