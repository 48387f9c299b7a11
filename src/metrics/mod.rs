pub mod game_metrics;
pub mod timing;

pub use game_metrics::GameMetrics;
pub use timing::{TimingStats, TimingSummary};
