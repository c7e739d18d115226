//! Rank transformer.
//!
//! Converts a [`ScoreTable`] into a dense [`RankSnapshot`]: rank 1 is the
//! highest score, symbols with unknown scores are left unranked.
//!
//! The tie-break is part of the history contract. Every snapshot ever written
//! to a store must be produced under the same [`RankMethod`], otherwise rank
//! comparisons across dates are meaningless.

use momo_traits::{Rank, RankSnapshot, ScoreTable};
use std::cmp::Ordering;

/// How tied scores are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMethod {
    /// Ties keep their order of appearance in the score table and receive
    /// consecutive ranks, so ranks are always 1..K without gaps.
    First,
}

/// The rank method every snapshot is written under.
pub const RANK_METHOD: RankMethod = RankMethod::First;

/// Rank known scores in descending order under [`RANK_METHOD`].
#[must_use]
pub fn rank_scores(scores: &ScoreTable) -> RankSnapshot {
    let mut known: Vec<(&str, f64)> = scores
        .iter()
        .filter_map(|(symbol, score)| score.map(|s| (symbol, s)))
        .collect();

    // Stable sort: equal scores keep table order.
    known.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    known
        .into_iter()
        .enumerate()
        .filter_map(|(i, (symbol, _))| {
            let rank = u32::try_from(i + 1).ok().and_then(Rank::new)?;
            Some((symbol.to_string(), rank))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, Option<f64>)]) -> ScoreTable {
        entries
            .iter()
            .map(|(s, v)| ((*s).to_string(), *v))
            .collect()
    }

    fn rank_of(snapshot: &RankSnapshot, symbol: &str) -> Option<u32> {
        snapshot.get(symbol).map(Rank::get)
    }

    #[test]
    fn test_descending_order() {
        let snap = rank_scores(&table(&[
            ("SPY", Some(0.10)),
            ("QQQ", Some(0.25)),
            ("TLT", Some(-0.05)),
        ]));
        assert_eq!(rank_of(&snap, "QQQ"), Some(1));
        assert_eq!(rank_of(&snap, "SPY"), Some(2));
        assert_eq!(rank_of(&snap, "TLT"), Some(3));
    }

    #[test]
    fn test_unknown_scores_are_unranked() {
        let snap = rank_scores(&table(&[("SPY", Some(0.1)), ("XYZ", None), ("QQQ", Some(0.2))]));
        assert_eq!(snap.len(), 2);
        assert_eq!(rank_of(&snap, "XYZ"), None);
        assert_eq!(rank_of(&snap, "SPY"), Some(2));
    }

    #[test]
    fn test_ties_follow_table_order() {
        let snap = rank_scores(&table(&[
            ("AAA", Some(0.1)),
            ("BBB", Some(0.3)),
            ("CCC", Some(0.1)),
            ("DDD", Some(0.1)),
        ]));
        assert_eq!(rank_of(&snap, "BBB"), Some(1));
        assert_eq!(rank_of(&snap, "AAA"), Some(2));
        assert_eq!(rank_of(&snap, "CCC"), Some(3));
        assert_eq!(rank_of(&snap, "DDD"), Some(4));
    }

    #[test]
    fn test_signed_zero_is_a_tie() {
        let snap = rank_scores(&table(&[("NEG", Some(-0.0)), ("POS", Some(0.0))]));
        assert_eq!(rank_of(&snap, "NEG"), Some(1));
        assert_eq!(rank_of(&snap, "POS"), Some(2));
    }

    #[test]
    fn test_ranks_are_dense_and_distinct() {
        let scores: Vec<(String, Option<f64>)> = (0..50)
            .map(|i| {
                let score = if i % 7 == 0 { None } else { Some(f64::from(i % 5)) };
                (format!("S{i:02}"), score)
            })
            .collect();
        let table: ScoreTable = scores.into_iter().collect();
        let snap = rank_scores(&table);

        let mut ranks: Vec<u32> = snap.iter().map(|(_, r)| r.get()).collect();
        ranks.sort_unstable();
        let expected: Vec<u32> = (1..=table.known_count() as u32).collect();
        assert_eq!(ranks, expected);
    }

    #[test]
    fn test_empty_table() {
        assert!(rank_scores(&ScoreTable::new()).is_empty());
    }

    #[test]
    fn test_rank_method_is_first() {
        assert_eq!(RANK_METHOD, RankMethod::First);
    }
}
