use crate::api::endpoints::{Platform, RiotId};
use crate::api::models::AccountDto;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

const DEFAULT_TTL_MINS: i64 = 10;

#[derive(Debug, Clone)]
pub struct CachedAccount {
    pub account: AccountDto,
    pub cached_at: DateTime<Utc>,
}

impl CachedAccount {
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.cached_at) > ttl
    }
}

/// Riot id → account lookups. The only remote response we keep; lives for
/// the process and is never written to disk.
pub struct AccountCache {
    entries: Mutex<HashMap<String, CachedAccount>>,
    ttl: Duration,
}

impl AccountCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_TTL_MINS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        AccountCache {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn key(platform: &Platform, riot_id: &RiotId) -> String {
        format!("{}:{}", platform, riot_id.to_string().to_lowercase())
    }

    pub fn get(&self, platform: &Platform, riot_id: &RiotId) -> Option<AccountDto> {
        self.get_at(platform, riot_id, Utc::now())
    }

    fn get_at(&self, platform: &Platform, riot_id: &RiotId, now: DateTime<Utc>) -> Option<AccountDto> {
        let mut entries = self.entries.lock().ok()?;
        let key = Self::key(platform, riot_id);

        match entries.get(&key) {
            Some(cached) if !cached.is_stale(now, self.ttl) => Some(cached.account.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, platform: &Platform, riot_id: &RiotId, account: AccountDto) {
        self.insert_at(platform, riot_id, account, Utc::now());
    }

    fn insert_at(&self, platform: &Platform, riot_id: &RiotId, account: AccountDto, now: DateTime<Utc>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                Self::key(platform, riot_id),
                CachedAccount {
                    account,
                    cached_at: now,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AccountCache {
    fn default() -> Self {
        Self::new()
    }
}
