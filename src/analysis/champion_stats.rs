#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionStats {
    pub name: String,
    pub games: u32,
    pub wins: u32,
}

impl ChampionStats {
    pub fn new(name: String) -> Self {
        ChampionStats {
            name,
            games: 0,
            wins: 0,
        }
    }

    /// Percentage, 0 when the champion has no games.
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64 * 100.0
        }
    }

    pub fn share(&self, total_games: u32) -> f64 {
        if total_games == 0 {
            0.0
        } else {
            self.games as f64 / total_games as f64
        }
    }
}

/// Champion → {games, wins}, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChampionStatsTracker {
    stats: Vec<ChampionStats>,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, champion_name: &str, won: bool) {
        let index = match self.stats.iter().position(|c| c.name == champion_name) {
            Some(index) => index,
            None => {
                self.stats.push(ChampionStats::new(champion_name.to_string()));
                self.stats.len() - 1
            }
        };

        let entry = &mut self.stats[index];
        entry.games += 1;
        if won {
            entry.wins += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChampionStats> {
        self.stats.iter()
    }

    pub fn get_champion(&self, name: &str) -> Option<&ChampionStats> {
        self.stats.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let mut tracker = ChampionStatsTracker::new();
        tracker.record_game("Zed", true);
        tracker.record_game("Ahri", false);
        tracker.record_game("Zed", false);

        let names: Vec<_> = tracker.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Ahri"]);

        let zed = tracker.get_champion("Zed").unwrap();
        assert_eq!((zed.games, zed.wins), (2, 1));
        assert_eq!(zed.win_rate(), 50.0);
    }

    #[test]
    fn empty_champion_has_zero_rates() {
        let champ = ChampionStats::new("Teemo".to_string());
        assert_eq!(champ.win_rate(), 0.0);
        assert_eq!(champ.share(0), 0.0);
    }
}
