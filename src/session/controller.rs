use std::sync::Arc;

use tokio::{sync::RwLock, task::JoinHandle};

use crate::{
    models::Video,
    services::gateway::{
        RecommendationGateway, DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_VIDEO_LIMIT,
    },
    view::SessionView,
};

use super::state::{Command, SessionEvent, SessionState};

/// Drives a `SessionState` against a gateway
///
/// State only changes inside `dispatch`, after a gateway call has settled.
/// In-flight requests are never cancelled: when two settle out of order, the
/// later write wins.
#[derive(Clone)]
pub struct SessionController {
    gateway: Arc<dyn RecommendationGateway>,
    state: Arc<RwLock<SessionState>>,
    recommendation_limit: u32,
    video_limit: u32,
}

impl SessionController {
    pub fn new(gateway: Arc<dyn RecommendationGateway>, user_id: i64) -> Self {
        Self {
            gateway,
            state: Arc::new(RwLock::new(SessionState::new(user_id))),
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            video_limit: DEFAULT_VIDEO_LIMIT,
        }
    }

    pub fn with_limits(mut self, recommendation_limit: u32, video_limit: u32) -> Self {
        self.recommendation_limit = recommendation_limit;
        self.video_limit = video_limit;
        self
    }

    pub fn gateway(&self) -> &Arc<dyn RecommendationGateway> {
        &self.gateway
    }

    /// Initial load of recommendations and catalog
    pub async fn mount(&self) {
        if let Some(command) = self.dispatch(SessionEvent::LoadStarted).await {
            self.run(command).await;
        }
    }

    /// Switches the session to another user and reloads
    pub async fn change_user(&self, user_id: i64) {
        if let Some(command) = self.dispatch(SessionEvent::UserChanged(user_id)).await {
            self.run(command).await;
        }
    }

    /// Selects a video, then records the watch and refreshes in the background
    ///
    /// The selection is visible as soon as this returns. The returned handle
    /// resolves once the refreshed recommendations (if any) are applied.
    pub async fn select_video(&self, video: Video) -> JoinHandle<()> {
        tracing::info!(video_id = video.id, title = %video.title, "Video selected");

        let command = self.dispatch(SessionEvent::VideoSelected(video)).await;
        let controller = self.clone();

        tokio::spawn(async move {
            if let Some(command) = command {
                controller.run(command).await;
            }
        })
    }

    /// Leaves the pinned video and goes back to browsing recommendations
    pub async fn back(&self) {
        self.dispatch(SessionEvent::Back).await;
    }

    /// A copy of the current state
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// The page as it should render right now
    pub async fn view(&self) -> SessionView {
        SessionView::from_state(&*self.state.read().await)
    }

    /// A video already held by the session, by id
    pub async fn find_video(&self, video_id: i64) -> Option<Video> {
        self.state.read().await.find_video(video_id).cloned()
    }

    async fn dispatch(&self, event: SessionEvent) -> Option<Command> {
        self.state.write().await.update(event)
    }

    /// Performs commands until the state machine stops asking for more
    async fn run(&self, command: Command) {
        let mut next = Some(command);
        while let Some(command) = next.take() {
            let event = self.perform(command).await;
            next = self.dispatch(event).await;
        }
    }

    async fn perform(&self, command: Command) -> SessionEvent {
        match command {
            Command::Load { user_id } => {
                tracing::debug!(user_id, gateway = self.gateway.name(), "Loading session data");
                let (recommendations, videos) = tokio::join!(
                    self.gateway
                        .fetch_recommendations(user_id, self.recommendation_limit),
                    self.gateway.fetch_videos(self.video_limit),
                );
                SessionEvent::LoadSettled {
                    recommendations,
                    videos,
                }
            }
            Command::RecordWatch(watch) => {
                let result = self
                    .gateway
                    .record_watch(
                        watch.video_id,
                        watch.user_id,
                        watch.watch_duration,
                        watch.watch_percentage,
                    )
                    .await;
                SessionEvent::WatchSettled(result)
            }
            Command::Refresh { user_id } => {
                let result = self
                    .gateway
                    .fetch_recommendations(user_id, self.recommendation_limit)
                    .await;
                SessionEvent::RefreshSettled(result)
            }
        }
    }
}
