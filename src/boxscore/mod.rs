pub mod aggregate;
pub mod types;

pub use aggregate::aggregate_box_scores;
pub use types::BoxScoreLine;
