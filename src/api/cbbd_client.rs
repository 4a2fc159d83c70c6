use crate::cache::Cache;
use crate::config::ApiSettings;
use crate::domain::models::{GameResponse, PlayResponse};
use crate::http::RateLimitedClient;
use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

/// CollegeBasketballData API client
pub struct CbbdClient {
    client: RateLimitedClient,
    base_url: String,
}

impl CbbdClient {
    /// Create a new CBBD API client authenticated with a bearer token
    pub fn new(settings: &ApiSettings, api_key: &str) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            Some(api_key),
        )?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    /// Fetch all games tipping off on a single date
    pub async fn fetch_games(&mut self, season: i32, date: &str) -> Result<Vec<GameResponse>> {
        let url = self.build_games_url(season, date);
        info!("Fetching games for {} from {}", date, url);

        let response = self.client.get(&url).await?;

        if !response.status().is_success() {
            anyhow::bail!("API returned status: {}", response.status());
        }

        let games: Vec<GameResponse> = response
            .json()
            .await
            .context("Failed to parse games response")?;

        info!("Fetched {} games for {}", games.len(), date);
        Ok(games)
    }

    /// Fetch play-by-play raw text for one game
    pub async fn fetch_plays_raw(&mut self, game_id: i64) -> Result<String> {
        let url = self.build_plays_url(game_id);
        info!("Fetching plays for game {} from {}", game_id, url);

        let response = self.client.get(&url).await?;

        if !response.status().is_success() {
            anyhow::bail!("API returned status: {}", response.status());
        }

        let text = response.text().await?;
        Ok(text)
    }

    /// Fetch play-by-play with cache integration.
    /// Saves the FULL raw JSON to cache, then parses it.
    pub async fn fetch_and_cache_plays(
        &mut self,
        game_id: i64,
        cache: &Cache,
    ) -> Result<Option<Vec<PlayResponse>>> {
        // 1. Try the cache first
        let cached_value = cache.load_raw(game_id)?;

        let json_value = if let Some(val) = cached_value {
            val
        } else {
            // 2. Fetch raw text
            let text = match self.fetch_plays_raw(game_id).await {
                Ok(t) => t,
                Err(e) => {
                    log::error!("Failed to fetch plays for game {}: {:?}", game_id, e);
                    return Ok(None);
                }
            };

            // 3. Parse to Value so the full response lands on disk
            let value: Value = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse JSON for game {}", game_id))?;

            // 4. Save Value to cache
            if let Err(e) = cache.save_raw(game_id, &value) {
                warn!("Failed to save plays for game {} to cache: {:?}", game_id, e);
            }

            value
        };

        // 5. Map into wire structs. The cached Value keeps every field
        // even if the struct gains more later.
        let plays: Vec<PlayResponse> = serde_json::from_value(json_value)
            .with_context(|| format!("Failed to map JSON to plays for game {}", game_id))?;

        Ok(Some(plays))
    }

    // --- Helper Methods ---

    fn build_games_url(&self, season: i32, date: &str) -> String {
        format!(
            "{}/games?season={}&startDateRange={}&endDateRange={}",
            self.base_url, season, date, date
        )
    }

    fn build_plays_url(&self, game_id: i64) -> String {
        format!("{}/plays/game/{}", self.base_url, game_id)
    }
}
