use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{Recommendation, RecommendationResponse, Video, WatchAck},
};

/// Seconds reported for every click-through watch
pub const WATCH_DURATION_SECS: f64 = 10.0;

/// Percentage reported for every click-through watch
pub const WATCH_PERCENTAGE: f64 = 5.0;

/// Video id → position in the recommendation list
///
/// Rebuilt whenever either list is replaced. On duplicate ids the first
/// occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct RecommendationIndex {
    positions: HashMap<i64, usize>,
}

impl RecommendationIndex {
    pub fn build(recommendations: &[Recommendation]) -> Self {
        let mut positions = HashMap::with_capacity(recommendations.len());
        for (i, rec) in recommendations.iter().enumerate() {
            positions.entry(rec.video.id).or_insert(i);
        }
        Self { positions }
    }

    pub fn position(&self, video_id: i64) -> Option<usize> {
        self.positions.get(&video_id).copied()
    }
}

/// A watch event ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct WatchEvent {
    pub video_id: i64,
    pub user_id: i64,
    pub watch_duration: Option<f64>,
    pub watch_percentage: Option<f64>,
}

/// Network work requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch recommendations and the catalog concurrently
    Load { user_id: i64 },
    /// Report a watch; a `Refresh` follows whatever the outcome
    RecordWatch(WatchEvent),
    /// Re-fetch recommendations only
    Refresh { user_id: i64 },
}

/// Everything that can happen to a session
#[derive(Debug)]
pub enum SessionEvent {
    LoadStarted,
    UserChanged(i64),
    LoadSettled {
        recommendations: AppResult<RecommendationResponse>,
        videos: AppResult<Vec<Video>>,
    },
    VideoSelected(Video),
    WatchSettled(AppResult<WatchAck>),
    RefreshSettled(AppResult<RecommendationResponse>),
    Back,
}

/// View state of one browsing session
///
/// Only `update` changes it. Failed results never overwrite data: the last
/// good recommendations stay on screen.
#[derive(Debug, Clone)]
pub struct SessionState {
    user_id: i64,
    loading: bool,
    videos: Vec<Video>,
    recommendations: Vec<Recommendation>,
    selected_video: Option<Video>,
    index: RecommendationIndex,
}

impl SessionState {
    /// Empty state for a fresh session, loading until the first load settles
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            loading: true,
            videos: Vec::new(),
            recommendations: Vec::new(),
            selected_video: None,
            index: RecommendationIndex::default(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn selected_video(&self) -> Option<&Video> {
        self.selected_video.as_ref()
    }

    /// Recommendation for a video, matched by id rather than by position
    pub fn recommendation_for(&self, video_id: i64) -> Option<&Recommendation> {
        self.index
            .position(video_id)
            .and_then(|i| self.recommendations.get(i))
    }

    /// A video the session already holds, by id
    pub fn find_video(&self, video_id: i64) -> Option<&Video> {
        self.selected_video
            .iter()
            .chain(self.videos.iter())
            .chain(self.recommendations.iter().map(|r| &r.video))
            .find(|v| v.id == video_id)
    }

    /// Applies one event and returns the network work it calls for
    pub fn update(&mut self, event: SessionEvent) -> Option<Command> {
        match event {
            SessionEvent::LoadStarted => {
                self.loading = true;
                Some(Command::Load {
                    user_id: self.user_id,
                })
            }
            SessionEvent::UserChanged(user_id) => {
                if user_id == self.user_id {
                    return None;
                }
                tracing::info!(from = self.user_id, to = user_id, "Session user changed");
                self.user_id = user_id;
                self.loading = true;
                Some(Command::Load { user_id })
            }
            SessionEvent::LoadSettled {
                recommendations,
                videos,
            } => {
                self.loading = false;

                match recommendations {
                    Ok(response) => self.replace_recommendations(response.recommendations),
                    Err(e) => tracing::error!(
                        error = %e,
                        user_id = self.user_id,
                        "Failed to load recommendations, keeping previous"
                    ),
                }

                match videos {
                    Ok(videos) => self.replace_videos(videos),
                    Err(e) => tracing::error!(error = %e, "Failed to load videos, keeping previous"),
                }

                None
            }
            SessionEvent::VideoSelected(video) => {
                let watch = WatchEvent {
                    video_id: video.id,
                    user_id: self.user_id,
                    watch_duration: Some(WATCH_DURATION_SECS),
                    watch_percentage: Some(WATCH_PERCENTAGE),
                };
                self.selected_video = Some(video);
                Some(Command::RecordWatch(watch))
            }
            SessionEvent::WatchSettled(result) => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "Failed to record watch, refreshing anyway");
                }
                Some(Command::Refresh {
                    user_id: self.user_id,
                })
            }
            SessionEvent::RefreshSettled(result) => {
                match result {
                    Ok(response) => self.replace_recommendations(response.recommendations),
                    Err(e) => tracing::warn!(
                        error = %e,
                        user_id = self.user_id,
                        "Failed to refresh recommendations, keeping previous"
                    ),
                }
                None
            }
            SessionEvent::Back => {
                if self.selected_video.take().is_none() {
                    tracing::debug!("Back with nothing selected");
                }
                None
            }
        }
    }

    fn replace_recommendations(&mut self, recommendations: Vec<Recommendation>) {
        tracing::debug!(count = recommendations.len(), "Replacing recommendations");
        self.recommendations = recommendations;
        self.reindex();
    }

    fn replace_videos(&mut self, videos: Vec<Video>) {
        tracing::debug!(count = videos.len(), "Replacing videos");
        self.videos = videos;
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = RecommendationIndex::build(&self.recommendations);
    }
}
