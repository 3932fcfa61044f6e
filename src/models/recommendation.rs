use serde::{Deserialize, Deserializer, Serialize};

use super::Video;

/// A video paired with the service's opinion of how well it matches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub video: Video,
    /// Conventionally in [0, 1], never clamped here
    pub similarity_score: f64,
    pub reason: String,
}

/// Response of `GET /api/recommendations/user/{user_id}`
///
/// `total` is whatever the service reports and need not match
/// `recommendations.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub user_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub total: i64,
}

/// One neighbour in a similar-videos response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarVideo {
    pub video: Video,
    pub similarity_score: f64,
}

/// Response of `GET /api/recommendations/similar/{video_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarVideosResponse {
    pub video: Video,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub similar_videos: Vec<SimilarVideo>,
    #[serde(default)]
    pub total: i64,
}

/// Treats a JSON `null` list the same as an absent one
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
