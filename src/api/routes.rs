use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id::{make_span_with_request_id, request_id_header, MakeRequestUuid};

use super::handlers;
use super::AppState;

/// Creates the main router: browser pages plus JSON under /api
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Browser pages
        .route("/", get(handlers::index))
        .route("/back", post(handlers::back))
        .route("/videos/:video_id/select", post(handlers::select_video))
        .route("/users/:user_id", post(handlers::change_user))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(PropagateRequestIdLayer::new(request_id_header())),
        )
        .with_state(state)
}

/// JSON routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(handlers::session_view))
        .route("/videos/:video_id/similar", get(handlers::similar_videos))
}
