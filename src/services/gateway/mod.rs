/// Remote data gateway
///
/// Typed boundary to the recommendation service. Implementations translate
/// transport responses into the domain types in `crate::models` and carry no
/// business logic or state of their own.
use crate::{
    error::AppResult,
    models::{RecommendationResponse, SimilarVideosResponse, Video, WatchAck},
};

pub mod http;

pub use http::HttpGateway;

/// Number of recommendations requested when the caller has no preference
pub const DEFAULT_RECOMMENDATION_LIMIT: u32 = 10;

/// Number of catalog videos requested when the caller has no preference
pub const DEFAULT_VIDEO_LIMIT: u32 = 20;

/// Trait for recommendation service backends
///
/// Every operation is a single attempt. Failures surface as
/// `AppError::Transport`, `AppError::Decode` or `AppError::NotFound`; retrying
/// is left to whoever triggers the next user action.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationGateway: Send + Sync {
    /// Fetch the ranked recommendations for a user
    ///
    /// An empty recommendation list is a successful response.
    async fn fetch_recommendations(
        &self,
        user_id: i64,
        limit: u32,
    ) -> AppResult<RecommendationResponse>;

    /// Fetch the general catalog
    async fn fetch_videos(&self, limit: u32) -> AppResult<Vec<Video>>;

    /// Fetch a single video, `AppError::NotFound` if the service has no such id
    async fn fetch_video(&self, video_id: i64) -> AppResult<Video>;

    /// Report that a user watched a video
    async fn record_watch(
        &self,
        video_id: i64,
        user_id: i64,
        watch_duration: Option<f64>,
        watch_percentage: Option<f64>,
    ) -> AppResult<WatchAck>;

    /// Fetch the nearest neighbours of one video
    async fn fetch_similar_videos(
        &self,
        video_id: i64,
        limit: u32,
    ) -> AppResult<SimilarVideosResponse>;

    /// Gateway name for logging and debugging
    fn name(&self) -> &'static str;
}
