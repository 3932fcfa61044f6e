/// HTTP gateway to the recommendation service
///
/// Endpoints:
/// - `GET  /api/recommendations/user/{user_id}?limit=n`
/// - `GET  /api/recommendations/similar/{video_id}?limit=n`
/// - `GET  /api/videos?limit=n`
/// - `GET  /api/videos/{video_id}`
/// - `POST /api/videos/{video_id}/watch`
use std::time::Duration;

use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendationResponse, SimilarVideosResponse, Video, WatchAck, WatchRequest},
    services::gateway::RecommendationGateway,
};

#[derive(Clone)]
pub struct HttpGateway {
    http_client: HttpClient,
    api_url: String,
}

impl HttpGateway {
    /// Creates a gateway rooted at `api_url` with a per-request timeout
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(http_client, api_url))
    }

    pub fn with_client(http_client: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Checks the status, then reads the body as bytes
    ///
    /// Reading bytes before decoding keeps a truncated connection (transport)
    /// apart from a body of the wrong shape (decode).
    async fn read_body(response: Response, what: &str) -> AppResult<Vec<u8>> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(what.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                resource = %what,
                "Recommendation service request failed"
            );
            return Err(AppError::Transport(format!(
                "Service returned status {} for {}: {}",
                status, what, body
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> AppResult<T> {
        serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, resource = %what, "Unexpected payload shape");
            AppError::Decode(format!("{}: {}", what, e))
        })
    }
}

#[async_trait::async_trait]
impl RecommendationGateway for HttpGateway {
    #[instrument(skip(self), fields(gateway = "http"))]
    async fn fetch_recommendations(
        &self,
        user_id: i64,
        limit: u32,
    ) -> AppResult<RecommendationResponse> {
        let what = format!("recommendations for user {}", user_id);
        let response = self
            .http_client
            .get(self.url(&format!("/api/recommendations/user/{}", user_id)))
            .query(&[("limit", limit)])
            .send()
            .await?;

        let body = Self::read_body(response, &what).await?;
        let recommendations: RecommendationResponse = Self::decode(&body, &what)?;

        tracing::debug!(
            user_id,
            count = recommendations.recommendations.len(),
            total = recommendations.total,
            "Fetched recommendations"
        );

        Ok(recommendations)
    }

    #[instrument(skip(self), fields(gateway = "http"))]
    async fn fetch_videos(&self, limit: u32) -> AppResult<Vec<Video>> {
        let response = self
            .http_client
            .get(self.url("/api/videos"))
            .query(&[("limit", limit)])
            .send()
            .await?;

        let body = Self::read_body(response, "video catalog").await?;
        let videos: Option<Vec<Video>> = Self::decode(&body, "video catalog")?;
        let videos = videos.unwrap_or_default();

        tracing::debug!(count = videos.len(), "Fetched video catalog");

        Ok(videos)
    }

    #[instrument(skip(self), fields(gateway = "http"))]
    async fn fetch_video(&self, video_id: i64) -> AppResult<Video> {
        let what = format!("video {}", video_id);
        let response = self
            .http_client
            .get(self.url(&format!("/api/videos/{}", video_id)))
            .send()
            .await?;

        let body = Self::read_body(response, &what).await?;
        Self::decode(&body, &what)
    }

    #[instrument(skip(self), fields(gateway = "http"))]
    async fn record_watch(
        &self,
        video_id: i64,
        user_id: i64,
        watch_duration: Option<f64>,
        watch_percentage: Option<f64>,
    ) -> AppResult<WatchAck> {
        let what = format!("watch of video {}", video_id);
        let request = WatchRequest {
            user_id,
            watch_duration,
            watch_percentage,
        };

        let response = self
            .http_client
            .post(self.url(&format!("/api/videos/{}/watch", video_id)))
            .json(&request)
            .send()
            .await?;

        let body = Self::read_body(response, &what).await?;

        tracing::info!(video_id, user_id, "Watch event recorded");

        Ok(WatchAck::from_body(&body))
    }

    #[instrument(skip(self), fields(gateway = "http"))]
    async fn fetch_similar_videos(
        &self,
        video_id: i64,
        limit: u32,
    ) -> AppResult<SimilarVideosResponse> {
        let what = format!("videos similar to {}", video_id);
        let response = self
            .http_client
            .get(self.url(&format!("/api/recommendations/similar/{}", video_id)))
            .query(&[("limit", limit)])
            .send()
            .await?;

        let body = Self::read_body(response, &what).await?;
        Self::decode(&body, &what)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
