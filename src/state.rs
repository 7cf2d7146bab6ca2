use crate::config::AppConfig;
use std::path::PathBuf;

/// Where to read from. Records themselves are never cached between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub web_dir: PathBuf,
}

impl AppState {
    pub fn new(data_path: PathBuf, web_dir: PathBuf) -> Self {
        Self { data_path, web_dir }
    }
}

impl From<&AppConfig> for AppState {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.data_path.clone(), config.web_dir.clone())
    }
}
