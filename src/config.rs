use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// User the session browses as
    #[serde(default = "default_user_id")]
    pub user_id: i64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// How many recommendations to request per load
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: u32,

    /// How many catalog videos to request per load
    #[serde(default = "default_video_limit")]
    pub video_limit: u32,

    /// Per-request timeout for calls to the recommendation service
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_user_id() -> i64 {
    1
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendation_limit() -> u32 {
    crate::services::gateway::DEFAULT_RECOMMENDATION_LIMIT
}

fn default_video_limit() -> u32 {
    crate::services::gateway::DEFAULT_VIDEO_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_for_empty_environment() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.user_id, 1);
        assert_eq!(config.recommendation_limit, 10);
        assert_eq!(config.video_limit, 20);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_are_read() {
        let vars = vec![
            ("API_URL".to_string(), "http://recs.internal:9000".to_string()),
            ("USER_ID".to_string(), "42".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.api_url, "http://recs.internal:9000");
        assert_eq!(config.user_id, 42);
        assert_eq!(config.port, 8080);
    }
}
