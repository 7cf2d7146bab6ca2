pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod state;
pub mod stats;

pub use app::router;
pub use config::AppConfig;
pub use loader::{load_band_csv, parse_band_csv};
pub use state::AppState;
pub use stats::{group_daily, summarize};
