use super::client::RiotApiClient;
use super::endpoints::{Platform, RiotId};
use super::models::{AccountDto, LeagueEntryDto, MatchDto};
use crate::error::AppError;
use crate::progress::ProgressSink;

/// Where match history comes from. "Not found" is `Ok(None)` / empty; errors
/// are transport or upstream failures.
pub trait MatchSource {
    fn account(&self, platform: &Platform, riot_id: &RiotId) -> Result<Option<AccountDto>, AppError>;

    fn league_entries(&self, platform: &Platform, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError>;

    /// Ranked match ids, newest first, played at or after `start_time` (epoch seconds).
    fn match_ids(
        &self,
        platform: &Platform,
        puuid: &str,
        count: usize,
        start_time: i64,
    ) -> Result<Vec<String>, AppError>;

    fn match_detail(&self, platform: &Platform, match_id: &str) -> Result<Option<MatchDto>, AppError>;
}

/// The live Riot API bound to one caller's progress sink.
pub struct RiotSession<'a> {
    client: &'a RiotApiClient,
    progress: &'a dyn ProgressSink,
}

impl<'a> RiotSession<'a> {
    pub fn new(client: &'a RiotApiClient, progress: &'a dyn ProgressSink) -> Self {
        RiotSession { client, progress }
    }
}

impl MatchSource for RiotSession<'_> {
    fn account(&self, platform: &Platform, riot_id: &RiotId) -> Result<Option<AccountDto>, AppError> {
        self.client.get_account(platform, riot_id, self.progress)
    }

    fn league_entries(&self, platform: &Platform, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        self.client.get_league_entries(platform, puuid, self.progress)
    }

    fn match_ids(
        &self,
        platform: &Platform,
        puuid: &str,
        count: usize,
        start_time: i64,
    ) -> Result<Vec<String>, AppError> {
        self.client
            .get_match_ids(platform, puuid, count, Some(start_time), self.progress)
    }

    fn match_detail(&self, platform: &Platform, match_id: &str) -> Result<Option<MatchDto>, AppError> {
        self.client.get_match(platform, match_id, self.progress)
    }
}
