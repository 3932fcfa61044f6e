use std::sync::Arc;

use crate::{
    error::AppResult,
    services::RecommendationGateway,
    session::SessionController,
    view::Renderer,
};

/// Shared application state
///
/// One browsing session per process; the user id is fixed at startup and only
/// changes through the explicit user switch.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionController,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    /// Creates state for a session that has not loaded anything yet
    pub fn new(gateway: Arc<dyn RecommendationGateway>, user_id: i64) -> AppResult<Self> {
        Ok(Self::with_session(
            SessionController::new(gateway, user_id),
            Renderer::new()?,
        ))
    }

    pub fn with_session(session: SessionController, renderer: Renderer) -> Self {
        Self {
            session,
            renderer: Arc::new(renderer),
        }
    }
}
