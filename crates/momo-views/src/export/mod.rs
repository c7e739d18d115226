//! Bot-readable feeds rendered from a [`RankingView`].
//!
//! - [`json`]: structured data for programmatic access
//! - [`text`]: fixed-width table for chat bots
//! - [`html`]: static page for crawlers

pub mod html;
pub mod json;
pub mod text;

pub use html::{DEFAULT_CHART_URL, to_html};
pub use json::to_json;
pub use text::to_text;

use crate::RankingView;
use momo_history::write_atomic;
use momo_traits::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the structured JSON feed.
pub const JSON_FILE: &str = "rankings.json";
/// File name of the plain-text table.
pub const TEXT_FILE: &str = "latest.txt";
/// File name of the static HTML page.
pub const HTML_FILE: &str = "index.html";

/// Render all three feeds and atomically write them into `dir`.
///
/// Returns the written paths.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn write_all(dir: &Path, view: &RankingView, chart_url: &str) -> Result<Vec<PathBuf>> {
    let feeds = [
        (JSON_FILE, to_json(view)?),
        (TEXT_FILE, to_text(view)),
        (HTML_FILE, to_html(view, chart_url)),
    ];

    let mut written = Vec::with_capacity(feeds.len());
    for (name, contents) in feeds {
        let path = dir.join(name);
        write_atomic(&path, contents.as_bytes())?;
        info!(path = %path.display(), bytes = contents.len(), "wrote feed");
        written.push(path);
    }
    Ok(written)
}
