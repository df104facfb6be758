use crate::cache::AccountCache;
use crate::error::AppError;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::rate_limit::RequestBudget;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

use super::endpoints::{self, Platform, RiotId};
use super::models::*;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("league_roast/", env!("CARGO_PKG_VERSION"));

/// Whether another attempt is allowed after `retry_count` retries.
/// Rate limits and transport errors share the same allowance.
fn can_retry(retry_count: u32) -> bool {
    retry_count < MAX_RETRIES
}

/// Seconds to wait for a 429, at least one.
fn retry_after_secs(header: Option<&str>) -> u64 {
    header
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(1)
        .max(1)
}

pub struct RiotApiClient {
    api_key: String,
    agent: ureq::Agent,
    budget: RequestBudget,
    accounts: AccountCache,
}

impl RiotApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();

        RiotApiClient {
            api_key: api_key.into(),
            agent,
            budget: RequestBudget::new(),
            accounts: AccountCache::new(),
        }
    }

    /// GET `url`; `Ok(None)` on 404. Waits out 429s (honouring `Retry-After`)
    /// and transport hiccups up to `MAX_RETRIES` times.
    fn execute_request(&self, url: &str, progress: &dyn ProgressSink) -> Result<Option<String>, AppError> {
        let mut retry_count = 0;

        loop {
            self.budget.acquire();

            let response = self
                .agent
                .get(url)
                .set("X-Riot-Token", &self.api_key)
                .call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map(Some)
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(404, _)) => {
                    debug!(url, "riot api returned 404");
                    return Ok(None);
                }
                Err(ureq::Error::Status(429, resp)) => {
                    if !can_retry(retry_count) {
                        return Err(AppError::RateLimited);
                    }
                    let wait_secs = retry_after_secs(resp.header("Retry-After"));
                    warn!(wait_secs, attempt = retry_count + 1, "rate limited by riot api");

                    for remaining in (1..=wait_secs).rev() {
                        progress.report(ProgressEvent::RateLimited { seconds: remaining });
                        thread::sleep(Duration::from_secs(1));
                    }
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code @ (401 | 403), _)) => {
                    return Err(AppError::ApiError(format!(
                        "Riot API rejected the key (HTTP {}); check RIOT_API_KEY",
                        code
                    )));
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let body = resp.into_string().unwrap_or_default();
                    return Err(AppError::ApiError(format!("HTTP {}: {}", code, body.trim())));
                }
                Err(ureq::Error::Transport(e)) => {
                    if !can_retry(retry_count) {
                        return Err(AppError::HttpError(e.to_string()));
                    }
                    warn!(error = %e, attempt = retry_count + 1, "riot api request failed, retrying");
                    thread::sleep(Duration::from_secs(1));
                    retry_count += 1;
                }
            }
        }
    }

    pub fn get_account(
        &self,
        platform: &Platform,
        riot_id: &RiotId,
        progress: &dyn ProgressSink,
    ) -> Result<Option<AccountDto>, AppError> {
        if let Some(account) = self.accounts.get(platform, riot_id) {
            debug!(%riot_id, "account served from cache");
            return Ok(Some(account));
        }

        let url = endpoints::account_by_riot_id_url(platform, riot_id);
        let Some(body) = self.execute_request(&url, progress)? else {
            return Ok(None);
        };

        let account: AccountDto = serde_json::from_str(&body)
            .map_err(|_| AppError::PlayerNotFound(riot_id.to_string()))?;
        self.accounts.insert(platform, riot_id, account.clone());
        Ok(Some(account))
    }

    pub fn get_league_entries(
        &self,
        platform: &Platform,
        puuid: &str,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<LeagueEntryDto>, AppError> {
        let url = endpoints::league_entries_url(platform, puuid);
        match self.execute_request(&url, progress)? {
            Some(body) => Ok(serde_json::from_str(&body)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn get_match_ids(
        &self,
        platform: &Platform,
        puuid: &str,
        count: usize,
        start_time: Option<i64>,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<String>, AppError> {
        let url = endpoints::match_ids_url(platform, puuid, count, start_time);
        let ids: Vec<String> = match self.execute_request(&url, progress)? {
            Some(body) => serde_json::from_str(&body)?,
            None => Vec::new(),
        };
        debug!(count = ids.len(), %platform, "fetched match ids");
        Ok(ids)
    }

    /// A payload that does not parse is treated like a missing match.
    pub fn get_match(
        &self,
        platform: &Platform,
        match_id: &str,
        progress: &dyn ProgressSink,
    ) -> Result<Option<MatchDto>, AppError> {
        let url = endpoints::match_url(platform, match_id);
        let Some(body) = self.execute_request(&url, progress)? else {
            return Ok(None);
        };

        match serde_json::from_str(&body) {
            Ok(dto) => Ok(Some(dto)),
            Err(e) => {
                warn!(match_id, error = %e, "skipping unparseable match payload");
                Ok(None)
            }
        }
    }
}
