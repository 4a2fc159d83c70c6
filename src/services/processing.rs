use anyhow::{Context, Result};
use log::{error, info, warn};

use crate::cache::Cache;
use crate::config::AppConfig;
use crate::database::{self, DbConn, GameRow};
use crate::domain::{GameMeta, GameResponse, PlayResponse};
use crate::pbp::TextPatternClassifier;
use crate::pipeline::process_game;

use super::ingestion::slate_key;

/// Per-run summary comparing the expected slate against what actually made
/// it through analysis and into the database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessReport {
    pub expected: usize,
    pub pbp_fetched: usize,
    pub processed: usize,
    pub failed: usize,
    pub missing_pbp: Vec<i64>,
    pub failed_analysis: Vec<i64>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing_pbp.is_empty() && self.failed_analysis.is_empty()
    }

    pub fn log_summary(&self) {
        info!("=== Completeness Check ===");
        info!("  Expected games   : {}", self.expected);
        info!("  PBP fetched      : {}", self.pbp_fetched);
        info!("  Fully processed  : {}", self.processed);
        info!("  Failed           : {}", self.failed);
        if !self.missing_pbp.is_empty() {
            warn!(
                "  Missing PBP ({}) : {}",
                self.missing_pbp.len(),
                join_ids(&self.missing_pbp)
            );
        }
        if !self.failed_analysis.is_empty() {
            warn!(
                "  Failed analysis ({}): {}",
                self.failed_analysis.len(),
                join_ids(&self.failed_analysis)
            );
        }
        if self.is_complete() {
            info!(
                "  Status: COMPLETE, all {} games processed.",
                self.expected
            );
        } else {
            warn!(
                "  Status: INCOMPLETE, {}/{} games fully processed.",
                self.processed, self.expected
            );
        }
        info!("==========================");
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run every cached game for one date through the analysis pipeline and
/// replace its database rows. Reads only the cache; never the network.
pub struct ProcessingService {
    config: AppConfig,
    cache: Cache,
    date: String,
}

impl ProcessingService {
    pub fn new(config: AppConfig, date: String) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.pipeline.cache_dir)?,
            config,
            date,
        })
    }

    pub fn run(&self) -> Result<CompletenessReport> {
        info!("=== Starting Data Processing ===\n");

        // Step 1: Load the date's slate from the parsed cache
        let games = self.load_game_slate()?;
        info!("  → Loaded {} games for {}\n", games.len(), self.date);

        // Step 2: Open the database (creates the schema when absent)
        let pool = database::create_pool(&self.config.pipeline.database_path)?;
        let mut conn = database::get_connection(&pool)?;
        info!(
            "  → Database ready at {}\n",
            self.config.pipeline.database_path
        );

        // Step 3: Analyze and store each game
        let report = self.process_games(&mut conn, &games)?;

        report.log_summary();
        info!("=== Processing Complete ===");
        Ok(report)
    }

    fn load_game_slate(&self) -> Result<Vec<GameResponse>> {
        self.cache
            .load_parsed(&slate_key(&self.date))?
            .ok_or_else(|| {
                anyhow::anyhow!("No cached game slate for {}; run ingest first", self.date)
            })
    }

    fn process_games(
        &self,
        conn: &mut DbConn,
        games: &[GameResponse],
    ) -> Result<CompletenessReport> {
        let classifier = TextPatternClassifier::new()?;
        let mut report = CompletenessReport {
            expected: games.len(),
            ..Default::default()
        };

        for (idx, game) in games.iter().enumerate() {
            let label = format!("[{}/{}] Game {}", idx + 1, games.len(), game.id);

            let plays = self.load_plays(game.id)?;
            let Some(plays) = plays.filter(|p| !p.is_empty()) else {
                warn!("{}: no cached play-by-play", label);
                report.missing_pbp.push(game.id);
                continue;
            };
            report.pbp_fetched += 1;

            match self.analyze_and_store(conn, &classifier, game, &plays) {
                Ok((events, possessions)) => {
                    report.processed += 1;
                    info!("{}: {} events, {} possessions", label, events, possessions);
                }
                Err(e) => {
                    error!("{} failed: {:?}", label, e);
                    report.failed += 1;
                    report.failed_analysis.push(game.id);
                }
            }
        }

        Ok(report)
    }

    fn load_plays(&self, game_id: i64) -> Result<Option<Vec<PlayResponse>>> {
        let Some(value) = self.cache.load_raw(game_id)? else {
            return Ok(None);
        };
        let plays = serde_json::from_value(value)
            .with_context(|| format!("Failed to map cached JSON to plays for game {game_id}"))?;
        Ok(Some(plays))
    }

    fn analyze_and_store(
        &self,
        conn: &mut DbConn,
        classifier: &TextPatternClassifier,
        game: &GameResponse,
        plays: &[PlayResponse],
    ) -> Result<(usize, usize)> {
        let meta = game
            .to_meta(self.config.pipeline.season)
            .ok_or_else(|| anyhow::anyhow!("game record is missing team identity"))?;

        let outputs = process_game(&meta, plays, classifier)?;
        let row = game_row_from(game, &meta);
        database::replace_game(conn, &row, &outputs)?;

        Ok((outputs.events.len(), outputs.possessions.len()))
    }
}

fn game_row_from(game: &GameResponse, meta: &GameMeta) -> GameRow {
    GameRow {
        id: meta.id,
        season: meta.season,
        start_date: meta.start_date,
        status: meta.status.clone(),
        home_team_id: meta.home_team_id,
        home_team: meta.home_team.clone(),
        home_points: game.home_points,
        away_team_id: meta.away_team_id,
        away_team: meta.away_team.clone(),
        away_points: game.away_points,
        created_at: None,
    }
}
