//! Render command implementation.

use crate::config::TrackerConfig;
use anyhow::Result;
use chrono::Utc;
use momo::{
    history::load,
    views::{
        RankingView,
        export::{to_text, write_all},
    },
};
use std::path::PathBuf;
use tracing::info;

/// Render the feeds from the stored history.
///
/// An empty or absent history is not an error; nothing is written.
pub(crate) fn run_render(config: &TrackerConfig, output: Option<PathBuf>, print: bool) -> Result<()> {
    let history = load(&config.history_path, config.retention)?;
    let Some(view) = RankingView::build(&history, &config.view_config(), Utc::now()) else {
        info!(path = %config.history_path.display(), "rank history is empty, nothing to render");
        return Ok(());
    };

    let dir = output.unwrap_or_else(|| config.output_dir.clone());
    let written = write_all(&dir, &view, &config.chart_url_template)?;
    for path in &written {
        println!("Wrote {}", path.display());
    }
    if print {
        print!("{}", to_text(&view));
    }

    Ok(())
}
