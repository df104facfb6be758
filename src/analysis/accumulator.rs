use super::champion_stats::ChampionStatsTracker;
use super::extractor::{extract_game, GameLine};
use super::streak::StreakTracker;
use crate::api::models::MatchDto;
use tracing::debug;

/// Per-game observations for one player across a match sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStatSample {
    pub total_games: u32,
    pub wins: u32,
    pub kills: Vec<u32>,
    pub deaths: Vec<u32>,
    pub assists: Vec<u32>,
    pub cs_per_min: Vec<f64>,
    pub vision_scores: Vec<u32>,
    pub damage_share: Vec<f64>,
    pub win_streaks: Vec<u32>,
    pub loss_streaks: Vec<u32>,
    pub champions: ChampionStatsTracker,
}

/// Fold state: the sample being built plus the open streak.
#[derive(Debug, Default)]
struct Accumulator {
    sample: RawStatSample,
    streaks: StreakTracker,
}

impl Accumulator {
    fn push(mut self, game: GameLine) -> Self {
        let sample = &mut self.sample;

        sample.total_games += 1;
        if game.won {
            sample.wins += 1;
        }
        self.streaks.record(game.won);

        sample.kills.push(game.kills);
        sample.deaths.push(game.deaths);
        sample.assists.push(game.assists);
        sample.vision_scores.push(game.vision_score);

        match game.cs_per_min() {
            Some(cs) => sample.cs_per_min.push(cs),
            None => debug!(champion = %game.champion, "zero-length game left out of cs/min"),
        }

        if let Some(share) = game.damage_share() {
            sample.damage_share.push(share);
        }

        sample.champions.record_game(&game.champion, game.won);
        self
    }

    fn finish(self) -> RawStatSample {
        let runs = self.streaks.finish();
        RawStatSample {
            win_streaks: runs.win_streaks,
            loss_streaks: runs.loss_streaks,
            ..self.sample
        }
    }
}

/// Folds `matches` (in the order given) into one player's raw sample.
/// Matches the player is not in, or that are structurally broken, are skipped.
pub fn accumulate(matches: &[MatchDto], puuid: &str) -> RawStatSample {
    matches
        .iter()
        .filter_map(|game| extract_game(game, puuid))
        .fold(Accumulator::default(), Accumulator::push)
        .finish()
}
