use crate::config::AppConfig;
use crate::database::DbPool;

pub mod admin;
pub mod games;

pub struct AppState {
    pub pool: DbPool,
    pub config: AppConfig,
}
