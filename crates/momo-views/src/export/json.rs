//! Structured JSON feed for programmatic consumers.

use crate::{RankingView, Tier};
use momo_traits::{Rank, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Tier to rank-range guide included in every feed.
#[derive(Debug, Serialize)]
struct TierGuide {
    strong: &'static str,
    good: &'static str,
    neutral: &'static str,
    weak: &'static str,
}

impl TierGuide {
    const fn new() -> Self {
        Self {
            strong: Tier::Strong.description(),
            good: Tier::Good.description(),
            neutral: Tier::Neutral.description(),
            weak: Tier::Weak.description(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FeedEntry<'a> {
    ticker: &'a str,
    current_rank: Option<Rank>,
    tier: Tier,
    #[serde(rename = "1_mo_ago")]
    one_month_ago: Option<Rank>,
    #[serde(rename = "6_wk_ago")]
    six_weeks_ago: Option<Rank>,
    #[serde(rename = "2_mo_ago")]
    two_months_ago: Option<Rank>,
    rank_history: BTreeMap<String, Option<Rank>>,
}

#[derive(Debug, Serialize)]
struct Feed<'a> {
    generated_at: String,
    current_date: String,
    total_etfs: usize,
    tier_guide: TierGuide,
    rankings: Vec<FeedEntry<'a>>,
}

/// Render the view as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(view: &RankingView) -> Result<String> {
    let rankings: Vec<FeedEntry<'_>> = view
        .rows
        .iter()
        .map(|row| FeedEntry {
            ticker: &row.symbol,
            current_rank: row.current,
            tier: row.tier,
            one_month_ago: row.one_month_ago,
            six_weeks_ago: row.six_weeks_ago,
            two_months_ago: row.two_months_ago,
            rank_history: view
                .window
                .iter()
                .zip(&row.history)
                .map(|(date, rank)| (date.format("%Y-%m-%d").to_string(), *rank))
                .collect(),
        })
        .collect();

    let feed = Feed {
        generated_at: view.generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        current_date: view.current_date.format("%Y-%m-%d").to_string(),
        total_etfs: rankings.len(),
        tier_guide: TierGuide::new(),
        rankings,
    };

    let mut json = serde_json::to_string_pretty(&feed)?;
    json.push('\n');
    Ok(json)
}
