use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde::Deserialize;
use serde_json::{Value, json};

use hltv::envelope::Envelope;
use hltv::types::{
    EventInfo, MatchSummary, PlayerProfile, RankingEntry, ResultEntry, TeamProfile,
};
use hltv::utils::ListQuery;
use hltv::{DEFAULT_RANKING_LIMIT, HltvClient, ScraperError};

#[derive(Clone)]
pub struct AppState {
    client: HltvClient,
}

pub fn router(client: HltvClient) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/matches", get(get_matches))
        .route("/api/rankings", get(get_rankings))
        .route("/api/results", get(get_results))
        .route("/api/events", get(get_events))
        .route("/api/player", get(get_player))
        .route("/api/team", get(get_team))
        .with_state(AppState { client })
}

async fn index() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "endpoints": [
            "/api/matches",
            "/api/rankings?limit=30",
            "/api/results",
            "/api/events",
            "/api/player?name=<player>",
            "/api/team?name=<team>",
        ],
    }))
}

// Fetch failures are server errors; a miss (empty page, unknown name) still
// answers 200 with success=false in the envelope.
fn status_for<T>(result: &Result<T, ScraperError>) -> StatusCode {
    match result {
        Ok(_) | Err(ScraperError::NotFound(_)) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn get_matches(
    State(state): State<AppState>,
) -> (StatusCode, Json<Envelope<Vec<MatchSummary>>>) {
    let result = state.client.fetch_matches().await;
    let status = status_for(&result);
    (status, Json(Envelope::of_list(result, "upcoming matches")))
}

async fn get_rankings(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> (StatusCode, Json<Envelope<Vec<RankingEntry>>>) {
    let query = match query.validate() {
        Ok(query) => query,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(Envelope::failed(e))),
    };

    let limit = query.limit.unwrap_or(DEFAULT_RANKING_LIMIT);
    let result = state.client.fetch_rankings(limit).await;
    let status = status_for(&result);
    (status, Json(Envelope::of_list(result, "ranked teams")))
}

async fn get_results(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> (StatusCode, Json<Envelope<Vec<ResultEntry>>>) {
    let query = match query.validate() {
        Ok(query) => query,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(Envelope::failed(e))),
    };

    let result = state
        .client
        .fetch_results()
        .await
        .map(|results| query.apply(results));
    let status = status_for(&result);
    (status, Json(Envelope::of_list(result, "match results")))
}

async fn get_events(
    State(state): State<AppState>,
) -> (StatusCode, Json<Envelope<Vec<EventInfo>>>) {
    let result = state.client.fetch_events().await;
    let status = status_for(&result);
    (status, Json(Envelope::of_list(result, "events")))
}

#[derive(Debug, Deserialize)]
struct NameQuery {
    name: Option<String>,
}

impl NameQuery {
    fn cleaned(self) -> Option<String> {
        self.name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

async fn get_player(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> (StatusCode, Json<Envelope<PlayerProfile>>) {
    let Some(name) = query.cleaned() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::failed("Missing required query parameter 'name'")),
        );
    };

    let result = state.client.fetch_player(&name).await;
    let status = status_for(&result);
    (
        status,
        Json(Envelope::of_entity(result, |p| {
            format!("Found player {}", p.name)
        })),
    )
}

async fn get_team(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> (StatusCode, Json<Envelope<TeamProfile>>) {
    let Some(name) = query.cleaned() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::failed("Missing required query parameter 'name'")),
        );
    };

    let result = state.client.fetch_team(&name).await;
    let status = status_for(&result);
    (
        status,
        Json(Envelope::of_entity(result, |t| {
            format!("Found team {}", t.name)
        })),
    )
}
