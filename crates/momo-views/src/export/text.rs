//! Fixed-width plain-text table for simple bots and chat relays.

use crate::RankingView;
use momo_traits::Rank;
use std::fmt::Write;

fn summary_cell(rank: Option<Rank>) -> String {
    rank.map_or_else(|| "   -".to_string(), |r| format!("{:4}", r.get()))
}

fn history_cell(rank: Option<Rank>) -> String {
    rank.map_or_else(|| format!("{:>5}", "  -"), |r| format!("{:5}", r.get()))
}

/// Render the view as a plain-text report.
#[must_use]
pub fn to_text(view: &RankingView) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = render(view, &mut out);
    out
}

fn render(view: &RankingView, out: &mut String) -> std::fmt::Result {
    writeln!(out, "ETF Momentum Rankings  (as of {})", view.current_date.format("%Y-%m-%d"))?;
    writeln!(
        out,
        "Lower rank = stronger momentum.  Tiers: 1-10 strong | 11-25 good | 26-75 neutral | 76+ weak"
    )?;
    writeln!(out)?;

    let header = format!(
        "{:<8} {:>7} {:>7} {:>7} {:>7}  {:<8}",
        "Ticker", "Current", "1MoAgo", "6WkAgo", "2MoAgo", "Tier"
    );
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.len()))?;
    for row in &view.rows {
        writeln!(
            out,
            "{:<8} {:>7} {:>7} {:>7} {:>7}  {:<8}",
            row.symbol,
            summary_cell(row.current),
            summary_cell(row.one_month_ago),
            summary_cell(row.six_weeks_ago),
            summary_cell(row.two_months_ago),
            row.tier.label()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "--- {}-Day Rank History ---", view.window.len())?;
    writeln!(out)?;

    let mut header = format!("{:<8} ", "Ticker");
    let labels: Vec<String> = view
        .window
        .iter()
        .map(|d| format!("{:>5}", d.format("%m-%d")))
        .collect();
    header.push_str(&labels.join(" "));
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.len()))?;
    for row in &view.rows {
        let cells: Vec<String> = row.history.iter().map(|r| history_cell(*r)).collect();
        writeln!(out, "{:<8} {}", row.symbol, cells.join(" "))?;
    }

    Ok(())
}
