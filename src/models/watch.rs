use serde::{Deserialize, Serialize};

/// Body of `POST /api/videos/{video_id}/watch`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchRequest {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_percentage: Option<f64>,
}

/// Whatever the service answered to a watch event
///
/// The shape is not interpreted. A body that is not JSON is kept as `Null`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WatchAck(pub serde_json::Value);

impl WatchAck {
    pub fn from_body(body: &[u8]) -> Self {
        Self(serde_json::from_slice(body).unwrap_or(serde_json::Value::Null))
    }
}
