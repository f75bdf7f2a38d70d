use std::{
    net::{IpAddr, Ipv4Addr},
    num::ParseIntError,
    path::PathBuf,
};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 1234;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable `PORT` is not a valid port (`{value}`): {source:#?}")]
    InvalidPort {
        value: String,
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// When `None`, the bundled dataset is used.
    pub dataset_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `PORT` and `MOVIES_DATASET` through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };
        let dataset_path = var("MOVIES_DATASET").map(PathBuf::from);

        Ok(Self { port, dataset_path })
    }

    pub fn rocket_config(&self) -> rocket::Config {
        rocket::Config {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: self.port,
            ..rocket::Config::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dataset_path: None,
        }
    }
}
