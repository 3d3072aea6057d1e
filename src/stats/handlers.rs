use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    pages,
    service::StatsService,
    types::{
        GameSubmission, LeaderboardEntry, PlayerInfoResponse, PlayerLookupForm,
        SubmitGameResponse,
    },
    StatsError,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for submitting match results
///
/// POST /submit_game
/// Body is a JSON array of per-player results; the batch is all-or-nothing
#[instrument(name = "submit_game", skip(state, payload))]
pub async fn submit_game(
    State(state): State<AppState>,
    payload: Result<Json<Vec<GameSubmission>>, JsonRejection>,
) -> Result<Json<SubmitGameResponse>, AppError> {
    let Json(submissions) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Malformed game submission");
        AppError::Validation(rejection.body_text())
    })?;

    info!(entries = submissions.len(), "Submitting game results");

    let service = StatsService::new(Arc::clone(&state.stats_repository));
    let receipt = service.submit_games(submissions).await?;

    Ok(Json(SubmitGameResponse {
        message: "Game data submitted successfully.".to_string(),
        recorded: receipt.recorded(),
        match_ids: receipt.match_ids,
    }))
}

/// HTTP handler for the leaderboard
///
/// GET /player_stats
#[instrument(name = "player_stats", skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let service = StatsService::new(Arc::clone(&state.stats_repository));
    let entries = service.leaderboard().await?;

    info!(entry_count = entries.len(), "Leaderboard served");
    Ok(Json(entries))
}

/// GET /players/:name
#[instrument(name = "player_info", skip(state))]
pub async fn player_info(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PlayerInfoResponse>, AppError> {
    let service = StatsService::new(Arc::clone(&state.stats_repository));
    let details = service.player_details(&name).await?;
    Ok(Json(details.into()))
}

/// GET /
pub async fn index() -> Html<String> {
    Html(pages::layout(""))
}

/// HTML handler for the lookup form
///
/// POST /player_info
#[instrument(name = "player_info_page", skip(state, payload))]
pub async fn player_info_page(
    State(state): State<AppState>,
    payload: Result<Form<PlayerLookupForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Malformed lookup form");
        AppError::Validation(rejection.body_text())
    })?;

    let service = StatsService::new(Arc::clone(&state.stats_repository));

    match service.player_details(&form.player_name).await {
        Ok(details) => Ok(Html(pages::player_details(&details)).into_response()),
        Err(StatsError::NotFound(_)) => {
            info!(player_name = %form.player_name, "Lookup for unknown player");
            Ok((
                StatusCode::NOT_FOUND,
                Html(pages::player_not_found(&form.player_name)),
            )
                .into_response())
        }
        Err(err) => Err(err.into()),
    }
}
