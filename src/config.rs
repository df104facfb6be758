use crate::error::AppError;
use chrono::{DateTime, TimeZone, Utc};
use std::env;

const DEFAULT_REGION: &str = "na1";
const DEFAULT_SEASON_YEAR: i32 = 2025;
const DEFAULT_MATCH_LIMIT: usize = 100;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_LLM_MODEL: &str = "claude-3-5-sonnet-latest";
const DEFAULT_LLM_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub region: String,
    pub season_year: i32,
    pub match_limit: usize,
    pub bind_addr: String,
    pub llm: Option<LlmConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("RIOT_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::ConfigError("RIOT_API_KEY not found in environment or .env file".to_string())
            })?;

        let region = lookup("DEFAULT_REGION")
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let season_year = match lookup("SEASON_YEAR") {
            Some(raw) => raw.trim().parse::<i32>().map_err(|_| {
                AppError::ConfigError(format!("SEASON_YEAR must be a year, got '{}'", raw))
            })?,
            None => DEFAULT_SEASON_YEAR,
        };

        let match_limit = match lookup("MATCH_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                AppError::ConfigError(format!("MATCH_LIMIT must be a number, got '{}'", raw))
            })?,
            None => DEFAULT_MATCH_LIMIT,
        }
        .clamp(1, DEFAULT_MATCH_LIMIT);

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let llm = lookup("LLM_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(|api_key| LlmConfig {
                api_key,
                model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                endpoint: lookup("LLM_ENDPOINT")
                    .unwrap_or_else(|| DEFAULT_LLM_ENDPOINT.to_string()),
            });

        Ok(Config {
            api_key,
            region,
            season_year,
            match_limit,
            bind_addr,
            llm,
        })
    }

    /// Jan 1 of the configured season, UTC.
    pub fn season_start(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(self.season_year, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_riot_key_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[("RIOT_API_KEY", "RGAPI-test")])).unwrap();

        assert_eq!(config.region, "na1");
        assert_eq!(config.season_year, 2025);
        assert_eq!(config.match_limit, 100);
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert!(config.llm.is_none());
        assert_eq!(config.season_start().timestamp(), 1_735_689_600);
    }

    #[test]
    fn match_limit_is_clamped_and_llm_is_enabled_by_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "RGAPI-test"),
            ("DEFAULT_REGION", " EUW1 "),
            ("MATCH_LIMIT", "500"),
            ("LLM_API_KEY", "sk-test"),
        ]))
        .unwrap();

        assert_eq!(config.region, "euw1");
        assert_eq!(config.match_limit, 100);
        let llm = config.llm.unwrap();
        assert_eq!(llm.model, DEFAULT_LLM_MODEL);
        assert_eq!(llm.endpoint, DEFAULT_LLM_ENDPOINT);
    }

    #[test]
    fn bad_season_year_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("RIOT_API_KEY", "RGAPI-test"),
            ("SEASON_YEAR", "last year"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SEASON_YEAR"));
    }
}
