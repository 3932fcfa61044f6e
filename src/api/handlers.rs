use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::SimilarVideosResponse,
    services::gateway::DEFAULT_RECOMMENDATION_LIMIT,
    view::SessionView,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SimilarQuery {
    pub limit: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Render the page for the current session
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let view = state.session.view().await;
    Ok(Html(state.renderer.render(&view)?))
}

/// Current session view as JSON
pub async fn session_view(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.view().await)
}

/// Select a video and record the watch in the background
///
/// The video is resolved from what the session already shows, falling back
/// to the service for ids it has never seen.
pub async fn select_video(
    State(state): State<AppState>,
    Path(video_id): Path<i64>,
) -> AppResult<Redirect> {
    let video = match state.session.find_video(video_id).await {
        Some(video) => video,
        None => state.session.gateway().fetch_video(video_id).await?,
    };

    // Detached: the watch/refresh task outlives this request.
    let _ = state.session.select_video(video).await;

    Ok(Redirect::to("/"))
}

/// Return to browsing recommendations
pub async fn back(State(state): State<AppState>) -> Redirect {
    state.session.back().await;
    Redirect::to("/")
}

/// Switch the session to another user
pub async fn change_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Redirect {
    state.session.change_user(user_id).await;
    Redirect::to("/")
}

/// Videos similar to one video, straight from the service
pub async fn similar_videos(
    State(state): State<AppState>,
    Path(video_id): Path<i64>,
    Query(params): Query<SimilarQuery>,
) -> AppResult<Json<SimilarVideosResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    let similar = state
        .session
        .gateway()
        .fetch_similar_videos(video_id, limit)
        .await?;

    tracing::debug!(video_id, count = similar.similar_videos.len(), "Similar videos fetched");

    Ok(Json(similar))
}
