pub mod headless;
pub mod play;
pub mod search;

pub use headless::{HeadlessMode, RunSummary};
pub use play::PlayMode;
pub use search::SearchReport;
