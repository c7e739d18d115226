//! Tracker configuration and the symbol universe file.

use anyhow::{Context, Result, bail};
use momo::{
    CycleConfig, Symbol,
    history::DEFAULT_RETENTION,
    signals::LongTermMomentumConfig,
    views::{SummaryOffsets, ViewConfig, export::DEFAULT_CHART_URL, heatmap::DEFAULT_WINDOW},
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// Configuration file read when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "momo.json";

/// Settings for every subcommand, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct TrackerConfig {
    /// Universe file, `{"symbols": [...]}`.
    pub(crate) tickers_path: PathBuf,
    /// Rank history CSV.
    pub(crate) history_path: PathBuf,
    /// Directory for the rendered feeds.
    pub(crate) output_dir: PathBuf,
    /// Maximum number of dates kept in the history.
    pub(crate) retention: usize,
    /// Momentum window.
    pub(crate) momentum: LongTermMomentumConfig,
    /// Summary column offsets.
    pub(crate) offsets: SummaryOffsets,
    /// Number of dates in the rank history window.
    pub(crate) heatmap_window: usize,
    /// Chart link per ticker, `{ticker}` is substituted.
    pub(crate) chart_url_template: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tickers_path: PathBuf::from("tickers.json"),
            history_path: PathBuf::from("rankings_history.csv"),
            output_dir: PathBuf::from("api"),
            retention: DEFAULT_RETENTION,
            momentum: LongTermMomentumConfig::default(),
            offsets: SummaryOffsets::default(),
            heatmap_window: DEFAULT_WINDOW,
            chart_url_template: DEFAULT_CHART_URL.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Load settings from `path`, or from [`DEFAULT_CONFIG_PATH`] if present.
    ///
    /// An explicitly given file must exist; a missing default file means
    /// all defaults.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };
        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.momentum.validate()?;
        if self.retention == 0 {
            bail!("retention must be at least 1");
        }
        if self.heatmap_window == 0 {
            bail!("heatmap_window must be at least 1");
        }
        Ok(())
    }

    /// Settings for the update cycle.
    pub(crate) fn cycle_config(&self) -> CycleConfig {
        CycleConfig {
            history_path: self.history_path.clone(),
            retention: self.retention,
            momentum: self.momentum,
        }
    }

    /// Settings for the ranking view.
    pub(crate) const fn view_config(&self) -> ViewConfig {
        ViewConfig {
            offsets: self.offsets,
            heatmap_window: self.heatmap_window,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TickersFile {
    symbols: Vec<Symbol>,
}

/// Read the symbol universe, keeping file order and dropping repeats.
pub(crate) fn load_universe(path: &Path) -> Result<Vec<Symbol>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading universe {}", path.display()))?;
    let file: TickersFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing universe {}", path.display()))?;

    let mut symbols: Vec<Symbol> = Vec::with_capacity(file.symbols.len());
    for symbol in file.symbols {
        let symbol = symbol.trim().to_uppercase();
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    if symbols.is_empty() {
        bail!("universe {} has no symbols", path.display());
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.history_path, PathBuf::from("rankings_history.csv"));
        assert_eq!(config.retention, 365);
        assert_eq!(config.momentum.lookback_sessions, 252);
        assert_eq!(config.offsets.as_array(), [21, 30, 42]);
        assert_eq!(config.heatmap_window, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("momo.json");
        fs::write(
            &path,
            r#"{"retention": 200, "offsets": {"six_weeks": 28}, "output_dir": "public"}"#,
        )
        .unwrap();

        let config = TrackerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.retention, 200);
        assert_eq!(config.offsets.as_array(), [21, 28, 42]);
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.tickers_path, PathBuf::from("tickers.json"));
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TrackerConfig::load(Some(&dir.path().join("nope.json"))).is_err());
    }

    #[test]
    fn test_invalid_window_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("momo.json");
        fs::write(&path, r#"{"momentum": {"lookback_sessions": 10, "skip_sessions": 21}}"#)
            .unwrap();
        assert!(TrackerConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_universe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickers.json");
        fs::write(&path, r#"{"symbols": ["SPY", "qqq", " SPY", ""]}"#).unwrap();
        assert_eq!(load_universe(&path).unwrap(), vec!["SPY", "QQQ"]);

        fs::write(&path, r#"{"symbols": []}"#).unwrap();
        assert!(load_universe(&path).is_err());
    }
}
