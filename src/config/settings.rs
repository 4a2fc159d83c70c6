use anyhow::{Context, Result};
use chrono::{Duration, Utc};

/// CBBD API access settings.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.collegebasketballdata.com".to_string(),
            rate_limit_ms: 250, // 4 req/sec
            user_agent: "CourtsideAnalytics/0.1",
            timeout_secs: 30,
        }
    }
}

/// Season and storage settings for the fetch/process pipeline.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub season: i32,
    pub cache_dir: String,
    pub database_path: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            season: 2026, // 2025-26 season
            cache_dir: "cache".to_string(),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "courtside.db".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub pipeline: PipelineSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api: ApiSettings::default(),
            pipeline: PipelineSettings::default(),
        }
    }

    /// The CBBD bearer token. Required for any network fetch, so missing
    /// configuration fails loudly instead of producing 401s mid-run.
    pub fn api_key(&self) -> Result<String> {
        std::env::var("CBBD_API_KEY").context("CBBD_API_KEY environment variable is not set")
    }
}

/// Date a default run targets: yesterday in US Eastern time, approximated
/// as UTC-5, so late tips have gone final regardless of server timezone.
pub fn default_slate_date() -> String {
    let eastern_now = Utc::now() - Duration::hours(5);
    let yesterday = eastern_now.date_naive() - Duration::days(1);
    yesterday.format("%Y-%m-%d").to_string()
}
