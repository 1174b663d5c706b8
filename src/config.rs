use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/BodyWeightMaster.csv";
const DEFAULT_PASSWORD: &str = "changeme";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub password: String,
}

impl Config {
    /// Reads `PORT`, `WEIGHT_DATA_PATH` and `DASHBOARD_PASSWORD`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_path = lookup("WEIGHT_DATA_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let password = match lookup("DASHBOARD_PASSWORD").filter(|value| !value.is_empty()) {
            Some(password) => password,
            None => {
                warn!("DASHBOARD_PASSWORD is not set, falling back to the default password");
                DEFAULT_PASSWORD.to_string()
            }
        };

        Self {
            port,
            data_path,
            password,
        }
    }
}
