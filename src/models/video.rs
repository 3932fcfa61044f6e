use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A short-form video as served by the recommendation service
///
/// Values are never edited in place. A newer copy from the service replaces
/// the whole entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: i64,
    /// External identifier of the upload
    #[serde(default)]
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
    /// Length in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub views: u64,
    pub likes: u64,
    #[serde(default)]
    pub created_at: String,
}

impl Video {
    /// Calendar date the video was uploaded, if `created_at` parses
    ///
    /// The service emits naive ISO-8601 timestamps; RFC 3339 is accepted too.
    pub fn uploaded_on(&self) -> Option<NaiveDate> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.created_at) {
            return Some(ts.date_naive());
        }
        NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|ts| ts.date())
    }

    /// Tags with `None` and `Some(vec![])` treated alike
    pub fn tag_list(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}
