use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded, please try again later")]
    RateLimited,

    #[error("Invalid Riot ID '{0}'. Use format: Name#TAG")]
    InvalidRiotId(String),

    #[error("Summoner '{0}' not found. Use format: Name#TAG (e.g., Doublelift#NA1)")]
    PlayerNotFound(String),

    #[error("Player has no ranked games this season")]
    Unranked,

    #[error("Not enough ranked games ({found} found, need at least {required})")]
    NotEnoughGames { found: usize, required: usize },

    #[error("Pro player '{0}' not found")]
    UnknownProPlayer(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Narrative generation failed: {0}")]
    NarrativeError(String),
}

impl AppError {
    /// Lookup misses the caller can fix by changing the request.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::PlayerNotFound(_) | AppError::UnknownProPlayer(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonError(err.to_string())
    }
}
