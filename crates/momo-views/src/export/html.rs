//! Minimal static HTML page for crawlers and browsers.

use crate::{
    RankingView, Tier,
    export::{HTML_FILE, JSON_FILE, TEXT_FILE},
};
use momo_traits::Rank;
use std::fmt::Write;

/// Default chart link for a ticker; `{ticker}` is substituted.
pub const DEFAULT_CHART_URL: &str = "https://www.tradingview.com/symbols/{ticker}/";

/// Escape text for HTML element content and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn rank_cell(out: &mut String, rank: Option<Rank>) -> std::fmt::Result {
    let style = Tier::from_rank(rank).cell_style();
    match rank {
        Some(r) => write!(out, r#"<td style="{style}">{r}</td>"#),
        None => write!(out, r#"<td style="{style}">-</td>"#),
    }
}

/// Render the view as a standalone HTML page.
///
/// Ticker cells link to `chart_url`, with `{ticker}` replaced by the symbol.
#[must_use]
pub fn to_html(view: &RankingView, chart_url: &str) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = render(view, chart_url, &mut out);
    out
}

fn render(view: &RankingView, chart_url: &str, out: &mut String) -> std::fmt::Result {
    let date = view.current_date.format("%Y-%m-%d");

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, r#"<html lang="en"><head><meta charset="utf-8">"#)?;
    writeln!(out, "<title>ETF Momentum Rankings - {date}</title>")?;
    writeln!(out, "<style>")?;
    writeln!(out, "body{{font-family:monospace;margin:20px}}")?;
    writeln!(out, "table{{border-collapse:collapse;width:100%}}")?;
    writeln!(out, "th,td{{border:1px solid #ccc;padding:4px 8px;text-align:right}}")?;
    writeln!(out, "th{{background:#333;color:#fff}}")?;
    writeln!(out, "td:first-child,th:first-child{{text-align:left}}")?;
    writeln!(out, "</style></head><body>")?;
    writeln!(out, "<h1>ETF Momentum Rankings</h1>")?;
    writeln!(
        out,
        "<p>As of <strong>{date}</strong>. Lower rank = stronger momentum.</p>"
    )?;

    write!(out, "<p>Tiers:")?;
    for tier in Tier::RANKED {
        write!(
            out,
            r#" <span style="{};padding:2px 6px">{}</span>"#,
            tier.cell_style(),
            tier.legend()
        )?;
    }
    writeln!(out, "</p>")?;

    write!(
        out,
        "<table><thead><tr><th>Ticker</th><th>Current</th><th>1 Mo Ago</th><th>6 Wk Ago</th><th>2 Mo Ago</th>"
    )?;
    for d in &view.window {
        write!(out, "<th>{}</th>", d.format("%m-%d"))?;
    }
    writeln!(out, "</tr></thead><tbody>")?;

    for row in &view.rows {
        let symbol = escape(&row.symbol);
        let link = escape(&chart_url.replace("{ticker}", &row.symbol));
        write!(
            out,
            r#"<tr><td><strong><a href="{link}">{symbol}</a></strong></td>"#
        )?;
        for rank in [
            row.current,
            row.one_month_ago,
            row.six_weeks_ago,
            row.two_months_ago,
        ] {
            rank_cell(out, rank)?;
        }
        for rank in &row.history {
            rank_cell(out, *rank)?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</tbody></table>")?;

    writeln!(out, "<h2>Bot-Readable Endpoints</h2>")?;
    writeln!(out, "<ul>")?;
    for (label, file) in [
        ("JSON", JSON_FILE),
        ("Plain Text", TEXT_FILE),
        ("HTML", HTML_FILE),
    ] {
        writeln!(
            out,
            r#"<li><strong>{label}:</strong> <a href="{file}">{file}</a></li>"#
        )?;
    }
    writeln!(out, "</ul>")?;
    writeln!(
        out,
        r#"<p style="margin-top:20px;color:#666">Generated {}</p>"#,
        view.generated_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    write!(out, "</body></html>")?;

    Ok(())
}
