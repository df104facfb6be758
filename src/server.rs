//! HTTP front end: JSON analysis, an SSE progress stream and the roster.
//!
//! Analysis is blocking (ureq + governor waits), so every run goes through
//! `spawn_blocking`; the stream variant forwards progress through an
//! unbounded channel that the blocking task writes and the SSE body drains.

use crate::analysis::{Achievement, AggregatedStats};
use crate::api::{RiotApiClient, RiotSession};
use crate::config::Config;
use crate::error::AppError;
use crate::narrative::{Narrator, Postcard};
use crate::pipeline::{regenerate, AnalysisReport, AnalysisRequest, AnalysisSettings, Analyzer};
use crate::progress::{ProgressEvent, ProgressSink, Silent};
use crate::roster::{roster_by_league, ProRosterEntry};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, instrument};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<RiotApiClient>,
    pub narrator: Arc<dyn Narrator>,
    pub settings: AnalysisSettings,
}

impl AppState {
    pub fn new(client: Arc<RiotApiClient>, narrator: Arc<dyn Narrator>, settings: AnalysisSettings) -> Self {
        Self {
            client,
            narrator,
            settings,
        }
    }

    fn run(&self, request: &AnalysisRequest, progress: &dyn ProgressSink) -> Result<AnalysisReport, AppError> {
        let session = RiotSession::new(&self.client, progress);
        Analyzer::new(&session, self.narrator.as_ref(), progress, self.settings.clone()).analyze(request)
    }
}

#[derive(Debug)]
pub enum ServerError {
    App(AppError),
    Task(String),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::App(err)
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Task(err.to_string())
    }
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        err if err.is_not_found() => StatusCode::NOT_FOUND,
        AppError::InvalidRiotId(_) | AppError::Unranked | AppError::NotEnoughGames { .. } => {
            StatusCode::BAD_REQUEST
        }
        AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        AppError::ApiError(_) | AppError::HttpError(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::App(err) => (status_for(&err), err.to_string()),
            ServerError::Task(msg) => {
                error!(error = %msg, "analysis task panicked");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Forwards progress to an SSE stream as ready-to-send JSON payloads.
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<Value>,
    current: Mutex<String>,
}

impl ChannelProgress {
    pub fn new(tx: mpsc::UnboundedSender<Value>) -> Self {
        Self {
            tx,
            current: Mutex::new(String::new()),
        }
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, event: ProgressEvent) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };
        let payload = match &event {
            // The countdown rides along with the last step so the UI keeps it.
            ProgressEvent::RateLimited { .. } => json!({
                "progress": current.as_str(),
                "rate_limit": event.message(),
                "status": "running",
            }),
            _ => {
                *current = event.message();
                json!({ "progress": current.as_str(), "status": "running" })
            }
        };
        // A closed receiver means the client went away; the run finishes anyway.
        let _ = self.tx.send(payload);
    }
}

pub fn result_payload(outcome: Result<AnalysisReport, AppError>) -> Value {
    match outcome {
        Ok(report) => json!({ "result": report }),
        Err(err) => json!({ "error": err.to_string() }),
    }
}

#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    pub your_stats: AggregatedStats,
    pub your_rank: String,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub used_topics: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegenerateResponse {
    pub postcards: Vec<Postcard>,
    pub used_topics: Vec<String>,
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "League Roast API - ranked year in review",
        "status": "running",
        "endpoints": {
            "analyze": "/analyze",
            "analyze_stream": "/analyze-stream",
            "regenerate_roasts": "/regenerate-roasts",
            "pro_players": "/pro-players",
            "health": "/health",
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn pro_players() -> Json<BTreeMap<&'static str, BTreeMap<&'static str, Vec<&'static ProRosterEntry>>>> {
    Json(roster_by_league())
}

#[instrument(name = "analyze", skip_all, fields(summoner = %request.summoner_name))]
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, ServerError> {
    let report = tokio::task::spawn_blocking(move || state.run(&request, &Silent)).await??;
    info!(games = report.your_stats.total_games, mode = ?report.mode, "analysis complete");
    Ok(Json(report))
}

#[instrument(name = "analyze_stream", skip_all, fields(summoner = %request.summoner_name))]
async fn analyze_stream(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::unbounded_channel::<Value>();

    tokio::task::spawn_blocking(move || {
        let progress = ChannelProgress::new(tx.clone());
        let outcome = state.run(&request, &progress);
        if let Err(err) = &outcome {
            info!(error = %err, "streamed analysis failed");
        }
        let _ = tx.send(result_payload(outcome));
    });

    let events = stream::unfold(rx, |mut rx| async move {
        let payload = rx.recv().await?;
        let event = Event::default()
            .json_data(&payload)
            .unwrap_or_else(|_| Event::default().data("{}"));
        Some((Ok(event), rx))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

#[instrument(name = "regenerate_roasts", skip_all, fields(used = request.used_topics.len()))]
async fn regenerate_roasts(
    State(state): State<AppState>,
    Json(request): Json<RegenerateRequest>,
) -> Result<Json<RegenerateResponse>, ServerError> {
    let review = tokio::task::spawn_blocking(move || {
        regenerate(
            state.narrator.as_ref(),
            state.settings.season,
            &request.your_stats,
            &request.your_rank,
            &request.achievements,
            &request.used_topics,
        )
    })
    .await?;

    Ok(Json(RegenerateResponse {
        postcards: review.postcards,
        used_topics: review.topics,
    }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/pro-players", get(pro_players))
        .route("/analyze", post(analyze))
        .route("/analyze-stream", post(analyze_stream))
        .route("/regenerate-roasts", post(regenerate_roasts))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config, narrator: Arc<dyn Narrator>) -> Result<(), AppError> {
    let state = AppState::new(
        Arc::new(RiotApiClient::new(config.api_key.clone())),
        narrator,
        AnalysisSettings::from_config(&config),
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| AppError::ConfigError(format!("cannot bind {}: {}", config.bind_addr, e)))?;
    info!(addr = %config.bind_addr, region = %config.region, "server listening");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| AppError::HttpError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::OfflineNarrator;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use tower::ServiceExt; // for `oneshot`

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(RiotApiClient::new("RGAPI-test")),
            Arc::new(OfflineNarrator),
            AnalysisSettings {
                season: 2025,
                season_start: Utc::now(),
                match_limit: 100,
                default_region: "na1".to_string(),
            },
        )
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let response = router(test_state())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn pro_players_are_grouped_by_league_and_team() {
        let response = router(test_state())
            .oneshot(Request::builder().uri("/pro-players").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        for league in ["LCK", "LEC", "LCS", "LTA"] {
            assert!(body.get(league).is_some(), "missing {}", league);
        }
        let t1 = body["LCK"]["T1"].as_array().unwrap();
        assert!(t1.iter().any(|p| p["id"] == "faker"));
    }

    #[tokio::test]
    async fn regenerate_falls_back_offline() {
        let payload = json!({
            "your_stats": AggregatedStats { total_games: 40, win_rate: 50.0, ..AggregatedStats::default() },
            "your_rank": "GOLD II",
            "used_topics": ["kda"],
        });
        let request = Request::builder()
            .method("POST")
            .uri("/regenerate-roasts")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = router(test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: RegenerateResponse = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(body.postcards.len(), 3);
        assert_eq!(body.postcards[1].content, "40 games. 50.0% winrate. GOLD II.");
        assert!(body.used_topics.is_empty());
    }

    #[tokio::test]
    async fn unknown_pro_is_rejected_before_any_fetch() {
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "summoner_name": "Someone#NA1", "pro_player_id": "nobody" }).to_string(),
            ))
            .unwrap();

        let response = router(test_state()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Pro player 'nobody' not found");
    }

    #[test]
    fn errors_map_to_statuses() {
        assert_eq!(status_for(&AppError::PlayerNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&AppError::Unranked), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&AppError::NotEnoughGames { found: 3, required: 10 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&AppError::RateLimited), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(status_for(&AppError::ApiError("500".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&AppError::JsonError("bad".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn channel_progress_keeps_step_during_countdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let progress = ChannelProgress::new(tx);

        progress.report(ProgressEvent::Match { current: 2, total: 20 });
        progress.report(ProgressEvent::RateLimited { seconds: 3 });

        assert_eq!(
            rx.try_recv().unwrap(),
            json!({ "progress": "Analyzing matches (2/20)...", "status": "running" })
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            json!({
                "progress": "Analyzing matches (2/20)...",
                "rate_limit": "Rate limited. Waiting 3s...",
                "status": "running",
            })
        );
    }

    #[test]
    fn result_payload_wraps_errors() {
        assert_eq!(
            result_payload(Err(AppError::Unranked)),
            json!({ "error": "Player has no ranked games this season" })
        );
    }
}
