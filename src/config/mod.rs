pub mod settings;

pub use settings::{default_slate_date, ApiSettings, AppConfig, PipelineSettings};
