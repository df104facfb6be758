use super::accumulator::RawStatSample;
use serde::{Deserialize, Serialize};

const TOP_CHAMPIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopChampion {
    pub name: String,
    pub games: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub total_games: u32,
    pub win_rate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub kda: f64,
    pub cs_per_min: f64,
    pub avg_vision: f64,
    pub avg_damage_share: f64,
    pub avg_win_streak: f64,
    pub max_win_streak: u32,
    pub avg_loss_streak: f64,
    pub max_loss_streak: u32,
    pub champion_diversity: f64,
    pub top_champions: Vec<TopChampion>,
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn mean<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v.into()).sum::<f64>() / values.len() as f64
}

fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// (k + a) / d, or k + a when the player never died.
pub fn kda_ratio(avg_kills: f64, avg_deaths: f64, avg_assists: f64) -> f64 {
    if avg_deaths > 0.0 {
        (avg_kills + avg_assists) / avg_deaths
    } else {
        avg_kills + avg_assists
    }
}

/// 1 - Σ share², i.e. an inverted Herfindahl index: 0 for a one-trick,
/// approaching 1 - 1/n for n evenly played champions.
pub fn champion_diversity(sample: &RawStatSample) -> f64 {
    if sample.total_games == 0 {
        return 0.0;
    }
    let concentration: f64 = sample
        .champions
        .iter()
        .map(|c| c.share(sample.total_games).powi(2))
        .sum();
    1.0 - concentration
}

fn top_champions(sample: &RawStatSample) -> Vec<TopChampion> {
    let mut champions: Vec<_> = sample.champions.iter().collect();
    // stable: equal game counts keep first-seen order
    champions.sort_by(|a, b| b.games.cmp(&a.games));

    champions
        .into_iter()
        .take(TOP_CHAMPIONS)
        .map(|c| TopChampion {
            name: c.name.clone(),
            games: c.games,
            win_rate: round_to(c.win_rate(), 1),
        })
        .collect()
}

pub fn aggregate(sample: &RawStatSample) -> AggregatedStats {
    let avg_kills = mean(&sample.kills);
    let avg_deaths = mean(&sample.deaths);
    let avg_assists = mean(&sample.assists);

    AggregatedStats {
        total_games: sample.total_games,
        win_rate: round_to(percentage(sample.wins, sample.total_games), 1),
        avg_kills: round_to(avg_kills, 1),
        avg_deaths: round_to(avg_deaths, 1),
        avg_assists: round_to(avg_assists, 1),
        kda: round_to(kda_ratio(avg_kills, avg_deaths, avg_assists), 2),
        cs_per_min: round_to(mean(&sample.cs_per_min), 1),
        avg_vision: round_to(mean(&sample.vision_scores), 1),
        avg_damage_share: round_to(mean(&sample.damage_share), 1),
        avg_win_streak: round_to(mean(&sample.win_streaks), 1),
        max_win_streak: sample.win_streaks.iter().copied().max().unwrap_or(0),
        avg_loss_streak: round_to(mean(&sample.loss_streaks), 1),
        max_loss_streak: sample.loss_streaks.iter().copied().max().unwrap_or(0),
        champion_diversity: round_to(champion_diversity(sample), 2),
        top_champions: top_champions(sample),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::champion_stats::ChampionStatsTracker;

    fn sample_with_champions(games: &[(&str, u32, u32)]) -> RawStatSample {
        let mut champions = ChampionStatsTracker::new();
        let mut total = 0;
        let mut wins = 0;
        for (name, played, won) in games {
            for i in 0..*played {
                champions.record_game(name, i < *won);
            }
            total += played;
            wins += won;
        }
        RawStatSample {
            total_games: total,
            wins,
            champions,
            ..RawStatSample::default()
        }
    }

    #[test]
    fn empty_sample_is_all_zero() {
        let stats = aggregate(&RawStatSample::default());
        assert_eq!(stats, AggregatedStats::default());
        assert!(stats.top_champions.is_empty());
    }

    #[test]
    fn zero_deaths_kda_is_undivided() {
        let sample = RawStatSample {
            total_games: 2,
            kills: vec![4, 6],
            deaths: vec![0, 0],
            assists: vec![2, 0],
            ..RawStatSample::default()
        };
        assert_eq!(aggregate(&sample).kda, 6.0);
    }

    #[test]
    fn kda_divides_by_average_deaths() {
        let sample = RawStatSample {
            total_games: 2,
            kills: vec![4, 6],
            deaths: vec![2, 2],
            assists: vec![2, 0],
            ..RawStatSample::default()
        };
        assert_eq!(aggregate(&sample).kda, 3.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(2.125, 2), 2.13);
        assert_eq!(round_to(-0.25, 1), -0.3);
        assert_eq!(round_to(66.66666, 1), 66.7);
    }

    #[test]
    fn one_trick_has_zero_diversity() {
        let stats = aggregate(&sample_with_champions(&[("Yasuo", 20, 8)]));
        assert_eq!(stats.champion_diversity, 0.0);
        assert_eq!(stats.top_champions[0].win_rate, 40.0);
    }

    #[test]
    fn even_split_approaches_one_minus_inverse_n() {
        let sample = sample_with_champions(&[("A", 5, 0), ("B", 5, 0), ("C", 5, 0), ("D", 5, 0)]);
        assert!((champion_diversity(&sample) - 0.75).abs() < 1e-12);
        assert_eq!(aggregate(&sample).champion_diversity, 0.75);
    }

    #[test]
    fn top_champions_break_ties_by_first_seen() {
        let sample = sample_with_champions(&[("A", 5, 5), ("B", 5, 1), ("C", 7, 0), ("D", 1, 1)]);
        let names: Vec<_> = aggregate(&sample).top_champions.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn streak_extremes_and_averages() {
        let sample = RawStatSample {
            total_games: 10,
            wins: 4,
            win_streaks: vec![2, 1, 1],
            loss_streaks: vec![3, 3],
            ..RawStatSample::default()
        };
        let stats = aggregate(&sample);
        assert_eq!(stats.win_rate, 40.0);
        assert_eq!(stats.avg_win_streak, 1.3);
        assert_eq!(stats.max_win_streak, 2);
        assert_eq!(stats.avg_loss_streak, 3.0);
        assert_eq!(stats.max_loss_streak, 3);
    }

    #[test]
    fn season_stats_are_identical_across_runs() {
        use crate::analysis::accumulate;
        use crate::api::models::MatchDto;
        use serde_json::json;

        // Tied champions and tied streaks leave ordering to the tie-breaks.
        let season: Vec<MatchDto> = [
            ("Ahri", true, 1500), ("Zed", true, 1800), ("Ahri", false, 0),
            ("Lux", false, 1320), ("Zed", true, 2100), ("Lux", true, 1200),
        ]
        .iter()
        .map(|(champion, won, duration)| {
            serde_json::from_value(json!({
                "info": {
                    "gameDuration": duration,
                    "queueId": 420,
                    "participants": [
                        { "puuid": "me", "teamId": 100, "win": won, "kills": 7, "deaths": 3,
                          "assists": 9, "totalMinionsKilled": 170, "neutralMinionsKilled": 12,
                          "visionScore": 21, "totalDamageDealtToChampions": 18000,
                          "championName": champion },
                        { "puuid": "ally", "teamId": 100, "win": won,
                          "totalDamageDealtToChampions": 22000 },
                        { "puuid": "foe", "teamId": 200, "win": !won }
                    ]
                }
            }))
            .unwrap()
        })
        .collect();

        let first = aggregate(&accumulate(&season, "me"));
        let second = aggregate(&accumulate(&season, "me"));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.total_games, 6);
    }
}
