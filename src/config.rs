use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATA_PATH: &str = "data/sample_band_data.csv";
pub const DEFAULT_WEB_DIR: &str = "web";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub web_dir: PathBuf,
}

impl AppConfig {
    /// Reads `PORT`, `BAND_DATA_PATH` and `BAND_WEB_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_path = lookup("BAND_DATA_PATH").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let web_dir = lookup("BAND_WEB_DIR").unwrap_or_else(|| DEFAULT_WEB_DIR.to_string());

        Self {
            port,
            data_path: PathBuf::from(data_path),
            web_dir: PathBuf::from(web_dir),
        }
    }
}
