use super::models::LeagueEntryDto;
use std::cmp::Ordering;

const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

const TIERS: [&str; 10] = [
    "IRON",
    "BRONZE",
    "SILVER",
    "GOLD",
    "PLATINUM",
    "EMERALD",
    "DIAMOND",
    "MASTER",
    "GRANDMASTER",
    "CHALLENGER",
];

// Lower index is the lower division.
const DIVISIONS: [&str; 4] = ["IV", "III", "II", "I"];

/// "TIER DIVISION" for the solo queue entry, if the player has one.
pub fn rank_tier(entries: &[LeagueEntryDto]) -> Option<String> {
    entries
        .iter()
        .find(|entry| entry.queue_type == SOLO_QUEUE)
        .map(|entry| format!("{} {}", entry.tier, entry.rank))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankTier {
    tier: usize,
    division: usize,
}

impl RankTier {
    pub fn parse(rank: &str) -> Option<Self> {
        let mut parts = rank.split_whitespace();
        let tier = parts.next()?.to_uppercase();
        let division = parts.next()?.to_uppercase();

        Some(RankTier {
            tier: TIERS.iter().position(|t| *t == tier)?,
            division: DIVISIONS.iter().position(|d| *d == division)?,
        })
    }

    /// Whole tiers from `base` up to `self`; negative when `self` is lower.
    pub fn tier_gap(&self, base: &RankTier) -> i32 {
        self.tier as i32 - base.tier as i32
    }
}

impl PartialOrd for RankTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankTier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then(self.division.cmp(&other.division))
    }
}

/// Compares two rank strings; unparseable ranks compare equal.
pub fn compare_ranks(a: &str, b: &str) -> Ordering {
    match (RankTier::parse(a), RankTier::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn entry(queue: &str, tier: &str, rank: &str) -> LeagueEntryDto {
        LeagueEntryDto {
            queue_type: queue.to_string(),
            tier: tier.to_string(),
            rank: rank.to_string(),
            league_points: 0,
            wins: 0,
            losses: 0,
        }
    }

    #[test]
    fn picks_solo_queue_entry() {
        let entries = vec![
            entry("RANKED_FLEX_SR", "GOLD", "I"),
            entry("RANKED_SOLO_5x5", "SILVER", "II"),
        ];
        assert_eq!(rank_tier(&entries).as_deref(), Some("SILVER II"));
    }

    #[test]
    fn flex_only_is_unranked() {
        assert_eq!(rank_tier(&[entry("RANKED_FLEX_SR", "GOLD", "I")]), None);
        assert_eq!(rank_tier(&[]), None);
    }

    #[rstest]
    #[case("GOLD I", "GOLD IV", Ordering::Greater)]
    #[case("SILVER I", "GOLD IV", Ordering::Less)]
    #[case("DIAMOND II", "diamond ii", Ordering::Equal)]
    #[case("GOLD", "SILVER I", Ordering::Equal)]
    #[case("WOOD I", "SILVER I", Ordering::Equal)]
    fn rank_comparison(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(compare_ranks(a, b), expected);
    }

    #[test]
    fn tier_gap_counts_whole_tiers() {
        let silver = RankTier::parse("SILVER IV").unwrap();
        let plat = RankTier::parse("PLATINUM I").unwrap();
        let master = RankTier::parse("MASTER I").unwrap();

        assert_eq!(plat.tier_gap(&silver), 2);
        assert_eq!(silver.tier_gap(&master), -5);
    }
}
