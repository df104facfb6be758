use crate::analysis::{
    accumulate, aggregate, classify, frequent_opponents, Achievement, AggregatedStats,
    EncounteredPlayer,
};
use crate::api::models::{AccountDto, MatchDto};
use crate::api::rank::rank_tier;
use crate::api::{MatchSource, Platform, RiotId};
use crate::config::Config;
use crate::error::AppError;
use crate::narrative::{
    comparison_or_fallback, year_review_or_fallback, ComparisonInput, Narrator, Postcard,
    YearReview, YearReviewInput,
};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::roster::find_pro;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const MIN_PLAYER_GAMES: usize = 10;
pub const MIN_PRO_GAMES: usize = 5;
const FREQUENT_OPPONENTS: usize = 5;
const PRO_RECENCY_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub summoner_name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub pro_player_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    YearReview,
    ProComparison,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProInfo {
    pub name: String,
    pub team: String,
    pub role: String,
    pub rank: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub status: String,
    pub mode: ReportMode,
    pub your_rank: String,
    pub your_stats: AggregatedStats,
    pub achievements: Vec<Achievement>,
    pub postcards: Vec<Postcard>,
    pub used_topics: Vec<String>,
    pub frequent_opponents: Vec<EncounteredPlayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_stats: Option<AggregatedStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_info: Option<ProInfo>,
}

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub season: i32,
    pub season_start: DateTime<Utc>,
    pub match_limit: usize,
    /// Platform used when a request names no region.
    pub default_region: String,
}

impl AnalysisSettings {
    pub fn from_config(config: &Config) -> Self {
        AnalysisSettings {
            season: config.season_year,
            season_start: config.season_start(),
            match_limit: config.match_limit,
            default_region: config.region.clone(),
        }
    }
}

/// One player's season: their identity, rank and the ranked solo games kept.
struct Season {
    account: AccountDto,
    rank: Option<String>,
    matches: Vec<MatchDto>,
}

pub struct Analyzer<'a> {
    source: &'a dyn MatchSource,
    narrator: &'a dyn Narrator,
    progress: &'a dyn ProgressSink,
    settings: AnalysisSettings,
}

impl<'a> Analyzer<'a> {
    pub fn new(
        source: &'a dyn MatchSource,
        narrator: &'a dyn Narrator,
        progress: &'a dyn ProgressSink,
        settings: AnalysisSettings,
    ) -> Self {
        Analyzer {
            source,
            narrator,
            progress,
            settings,
        }
    }

    fn step(&self, message: &str) {
        self.progress.report(ProgressEvent::step(message));
    }

    fn lookup_account(&self, platform: &Platform, name: &str) -> Result<AccountDto, AppError> {
        let riot_id = RiotId::parse(name, platform)?;
        self.source
            .account(platform, &riot_id)?
            .ok_or_else(|| AppError::PlayerNotFound(riot_id.to_string()))
    }

    fn lookup_rank(&self, platform: &Platform, puuid: &str) -> Result<Option<String>, AppError> {
        Ok(rank_tier(&self.source.league_entries(platform, puuid)?))
    }

    /// Ranked solo games since season start, newest first.
    fn fetch_matches(
        &self,
        platform: &Platform,
        puuid: &str,
        min_games: usize,
        report_each: bool,
    ) -> Result<Vec<MatchDto>, AppError> {
        let start = self.settings.season_start.timestamp();
        let ids = self
            .source
            .match_ids(platform, puuid, self.settings.match_limit, start)?;

        if ids.len() < min_games {
            return Err(AppError::NotEnoughGames {
                found: ids.len(),
                required: min_games,
            });
        }

        let ids = &ids[..ids.len().min(self.settings.match_limit)];
        let total = ids.len();
        let mut matches = Vec::with_capacity(total);

        for (idx, match_id) in ids.iter().enumerate() {
            if report_each {
                self.progress.report(ProgressEvent::Match {
                    current: idx + 1,
                    total,
                });
            }
            // A single bad match is skipped; the count check below decides.
            match self.source.match_detail(platform, match_id) {
                Ok(Some(detail)) if detail.is_ranked_solo() => matches.push(detail),
                Ok(Some(_)) => {}
                Ok(None) => debug!(%match_id, "match detail unavailable, skipping"),
                Err(e) => warn!(%match_id, error = %e, "match detail failed, skipping"),
            }
        }

        if matches.len() < min_games {
            return Err(AppError::NotEnoughGames {
                found: matches.len(),
                required: min_games,
            });
        }

        info!(puuid, kept = matches.len(), fetched = total, "ranked matches collected");
        Ok(matches)
    }

    fn player_season(&self, platform: &Platform, name: &str) -> Result<Season, AppError> {
        self.step("Looking up summoner...");
        let account = self.lookup_account(platform, name)?;

        self.step("Getting current rank...");
        let rank = self.lookup_rank(platform, &account.puuid)?;
        if rank.is_none() {
            return Err(AppError::Unranked);
        }

        self.step("Fetching match history...");
        let matches = self.fetch_matches(platform, &account.puuid, MIN_PLAYER_GAMES, true)?;

        Ok(Season {
            account,
            rank,
            matches,
        })
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AppError> {
        // Resolve the comparison target before spending requests on the player.
        let pro = request
            .pro_player_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .map(find_pro)
            .transpose()?;

        let platform = Platform::new(
            request
                .region
                .as_deref()
                .filter(|r| !r.trim().is_empty())
                .unwrap_or(&self.settings.default_region),
        );
        let season = self.player_season(&platform, &request.summoner_name)?;
        let your_rank = season.rank.clone().unwrap_or_default();

        let raw = accumulate(&season.matches, &season.account.puuid);
        let your_stats = aggregate(&raw);
        let achievements = classify(&your_stats);
        let opponents = frequent_opponents(&season.matches, &season.account.puuid, FREQUENT_OPPONENTS);

        let Some(pro) = pro else {
            self.step("Generating roasts...");
            let review = self.regenerate(&your_stats, &your_rank, &achievements, &[]);
            return Ok(AnalysisReport {
                status: "success".to_string(),
                mode: ReportMode::YearReview,
                your_rank,
                your_stats,
                achievements,
                postcards: review.postcards,
                used_topics: review.topics,
                frequent_opponents: opponents,
                pro_stats: None,
                pro_info: None,
            });
        };

        self.step(&format!("Comparing with {}...", pro.name));
        let pro_platform = Platform::new(pro.region);
        let pro_account = self.lookup_account(&pro_platform, pro.riot_id)?;
        let pro_rank = self
            .lookup_rank(&pro_platform, &pro_account.puuid)?
            .unwrap_or_else(|| "Unknown".to_string());
        let pro_matches = self.fetch_matches(&pro_platform, &pro_account.puuid, MIN_PRO_GAMES, false)?;

        if let Some(last_played) = latest_game(&pro_matches) {
            if !played_within(last_played, Utc::now(), PRO_RECENCY_DAYS) {
                warn!(pro = pro.name, %last_played, "pro has not played ranked recently");
            }
        }

        let pro_stats = aggregate(&accumulate(&pro_matches, &pro_account.puuid));

        self.step("Generating roasts...");
        let postcards = comparison_or_fallback(
            self.narrator,
            &ComparisonInput {
                season: self.settings.season,
                your_stats: &your_stats,
                your_rank: &your_rank,
                pro_stats: &pro_stats,
                pro_rank: &pro_rank,
                pro_name: pro.name,
                pro_team: pro.team,
            },
        );

        Ok(AnalysisReport {
            status: "success".to_string(),
            mode: ReportMode::ProComparison,
            your_rank,
            your_stats,
            achievements,
            postcards,
            used_topics: Vec::new(),
            frequent_opponents: opponents,
            pro_stats: Some(pro_stats),
            pro_info: Some(ProInfo {
                name: pro.name.to_string(),
                team: pro.team.to_string(),
                role: pro.role.to_string(),
                rank: pro_rank,
            }),
        })
    }

    pub fn regenerate(
        &self,
        stats: &AggregatedStats,
        rank: &str,
        achievements: &[Achievement],
        used_topics: &[String],
    ) -> YearReview {
        regenerate(self.narrator, self.settings.season, stats, rank, achievements, used_topics)
    }
}

/// New cards for stats the caller already has, avoiding `used_topics`.
pub fn regenerate(
    narrator: &dyn Narrator,
    season: i32,
    stats: &AggregatedStats,
    rank: &str,
    achievements: &[Achievement],
    used_topics: &[String],
) -> YearReview {
    year_review_or_fallback(
        narrator,
        &YearReviewInput {
            season,
            stats,
            rank,
            achievements,
            used_topics,
        },
    )
}

/// Creation time of the newest match in the list.
pub fn latest_game(matches: &[MatchDto]) -> Option<DateTime<Utc>> {
    matches
        .iter()
        .filter_map(|m| m.info.as_ref())
        .map(|info| info.game_creation)
        .max()
        .and_then(DateTime::from_timestamp_millis)
}

pub fn played_within(last_played: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    now.signed_duration_since(last_played) <= Duration::days(days)
}
