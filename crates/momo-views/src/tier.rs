//! Momentum tiers.
//!
//! Maps a rank to one of four ordered bands. Each cut point belongs to the
//! stronger tier: rank 10 is strong, rank 11 is good.

use derive_more::Display;
use momo_traits::Rank;
use serde::Serialize;

/// Highest rank in the strong tier.
pub const STRONG_MAX: u32 = 10;
/// Highest rank in the good tier.
pub const GOOD_MAX: u32 = 25;
/// Highest rank in the neutral tier.
pub const NEUTRAL_MAX: u32 = 75;

/// A momentum strength band.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Ranks 1-10.
    #[display("strong")]
    Strong,
    /// Ranks 11-25.
    #[display("good")]
    Good,
    /// Ranks 26-75.
    #[display("neutral")]
    Neutral,
    /// Ranks 76 and above.
    #[display("weak")]
    Weak,
    /// No rank.
    #[display("unknown")]
    Unknown,
}

impl Tier {
    /// The ranked tiers, strongest first.
    pub const RANKED: [Self; 4] = [Self::Strong, Self::Good, Self::Neutral, Self::Weak];

    /// Tier of a rank. Total over every rank and the missing rank.
    #[must_use]
    pub const fn from_rank(rank: Option<Rank>) -> Self {
        match rank {
            None => Self::Unknown,
            Some(rank) => match rank.get() {
                ..=STRONG_MAX => Self::Strong,
                ..=GOOD_MAX => Self::Good,
                ..=NEUTRAL_MAX => Self::Neutral,
                _ => Self::Weak,
            },
        }
    }

    /// Lowercase label used in feeds.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Weak => "weak",
            Self::Unknown => "unknown",
        }
    }

    /// Rank range covered by the tier.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Strong => "Rank 1-10",
            Self::Good => "Rank 11-25",
            Self::Neutral => "Rank 26-75",
            Self::Weak => "Rank 76+",
            Self::Unknown => "No rank",
        }
    }

    /// Short legend text.
    #[must_use]
    pub const fn legend(self) -> &'static str {
        match self {
            Self::Strong => "1-10 Strong",
            Self::Good => "11-25 Good",
            Self::Neutral => "26-75 Neutral",
            Self::Weak => "76+ Weak",
            Self::Unknown => "Unranked",
        }
    }

    /// Inline CSS for a table cell in this tier; empty for unknown.
    #[must_use]
    pub const fn cell_style(self) -> &'static str {
        match self {
            Self::Strong => "background:#008000;color:#fff",
            Self::Good => "background:#90EE90",
            Self::Neutral => "background:#FFFFE0",
            Self::Weak => "background:#FFB6C1",
            Self::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(rank: u32) -> Tier {
        Tier::from_rank(Rank::new(rank))
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(tier(1), Tier::Strong);
        assert_eq!(tier(10), Tier::Strong);
        assert_eq!(tier(11), Tier::Good);
        assert_eq!(tier(25), Tier::Good);
        assert_eq!(tier(26), Tier::Neutral);
        assert_eq!(tier(75), Tier::Neutral);
        assert_eq!(tier(76), Tier::Weak);
        assert_eq!(tier(u32::MAX), Tier::Weak);
        assert_eq!(Tier::from_rank(None), Tier::Unknown);
    }

    #[test]
    fn test_tiers_are_ordered() {
        let tiers: Vec<Tier> = (1..=200).map(tier).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
        assert!(Tier::Weak < Tier::Unknown);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Tier::Strong.label(), "strong");
        assert_eq!(Tier::Unknown.to_string(), "unknown");
        assert_eq!(serde_json::to_string(&Tier::Neutral).unwrap(), "\"neutral\"");
        for t in Tier::RANKED {
            assert_eq!(t.to_string(), t.label());
            assert!(!t.cell_style().is_empty());
        }
        assert!(Tier::Unknown.cell_style().is_empty());
    }
}
