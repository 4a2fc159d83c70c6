pub mod extract;
pub mod types;

pub use extract::extract_shot_chart;
pub use types::ShotRecord;
