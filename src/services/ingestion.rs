use anyhow::Result;
use log::{info, warn};

use crate::api::CbbdClient;
use crate::cache::Cache;
use crate::config::AppConfig;
use crate::domain::{FetchProgress, GameResponse};

/// Pull one date's slate of games and their play-by-play feeds into the
/// cache. Network-only; no analysis happens here.
pub struct IngestionService {
    cache: Cache,
    api_client: CbbdClient,
    config: AppConfig,
    date: String,
}

impl IngestionService {
    pub fn new(config: AppConfig, api_key: &str, date: String) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.pipeline.cache_dir)?,
            api_client: CbbdClient::new(&config.api, api_key)?,
            config,
            date,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("=== Starting Data Ingestion ===\n");

        // Step 1: Fetch the slate of games for the date
        let games = self.fetch_game_slate().await?;
        info!("  → Found {} games on {}\n", games.len(), self.date);

        // Step 2: Fetch play-by-play per game
        let fetched = self.fetch_play_by_play(&games).await?;
        info!("  → Play-by-play available for {} games\n", fetched);

        // Step 3: Save the slate to the parsed cache
        self.save_parsed_cache(&games)?;
        info!("  → Saved game slate to parsed cache\n");

        info!("=== Ingestion Complete ===");
        Ok(())
    }

    async fn fetch_game_slate(&mut self) -> Result<Vec<GameResponse>> {
        info!("Step 1: Fetching games for {}...", self.date);
        self.api_client
            .fetch_games(self.config.pipeline.season, &self.date)
            .await
    }

    async fn fetch_play_by_play(&mut self, games: &[GameResponse]) -> Result<usize> {
        info!("Step 2: Fetching play-by-play for {} games...", games.len());

        let mut progress = FetchProgress::new(games.len());
        let mut available = 0;

        for game in games {
            let was_cached = self.cache.has_raw(game.id);

            match self
                .api_client
                .fetch_and_cache_plays(game.id, &self.cache)
                .await?
            {
                Some(_) => {
                    available += 1;
                    self.update_progress(&mut progress, was_cached);
                }
                None => progress.increment_failed(),
            }
        }

        if progress.failed_count() > 0 {
            warn!(
                "  → {} games had no fetchable play-by-play",
                progress.failed_count()
            );
        }

        Ok(available)
    }

    fn update_progress(&self, progress: &mut FetchProgress, was_cached: bool) {
        if was_cached {
            progress.increment_cached();
        } else {
            progress.increment_fetched();
        }
    }

    fn save_parsed_cache(&self, games: &[GameResponse]) -> Result<()> {
        info!("Step 3: Saving game slate...");
        self.cache.save_parsed(&slate_key(&self.date), games)?;
        Ok(())
    }
}

/// Parsed-cache key for one date's game slate. Shared with processing.
pub fn slate_key(date: &str) -> String {
    format!("games_{date}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slate_key_is_date_scoped() {
        assert_eq!(slate_key("2025-12-01"), "games_2025-12-01");
        assert_ne!(slate_key("2025-12-01"), slate_key("2025-12-02"));
    }
}
