pub mod api;
pub mod boxscore;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod four_factors;
pub mod http;
pub mod lineup;
pub mod pbp;
pub mod pipeline;
pub mod possession;
pub mod rate_limiter;
pub mod services;
pub mod shotchart;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::{default_slate_date, AppConfig};
use crate::services::ingestion::IngestionService;
use crate::services::processing::{CompletenessReport, ProcessingService};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_ingest(date: Option<String>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let api_key = config.api_key()?;
        let date = date.unwrap_or_else(default_slate_date);
        let mut service = IngestionService::new(config, &api_key, date)?;
        service.run().await
    })
}

pub fn handle_process(date: Option<String>) -> Result<CompletenessReport> {
    let config = AppConfig::new();
    let date = date.unwrap_or_else(default_slate_date);
    let service = ProcessingService::new(config, date)?;
    service.run()
}
