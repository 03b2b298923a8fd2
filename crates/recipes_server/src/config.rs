//! Environment-driven server configuration.
//!
//! Every key has a default; a default being used is logged at `info` once
//! logging is up, and a value that fails to parse is an error.

use log::info;
use recipes_core::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const HOST_KEY: &str = "RECIPES_HOST";
pub const PORT_KEY: &str = "RECIPES_PORT";
pub const SEED_PATH_KEY: &str = "RECIPES_SEED_PATH";
pub const LOG_LEVEL_KEY: &str = "RECIPES_LOG_LEVEL";
pub const LOG_DIR_KEY: &str = "RECIPES_LOG_DIR";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_SEED_PATH: &str = "recipes.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub seed_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rotating log files; stderr when unset.
    pub log_dir: Option<String>,
    /// Keys that fell back to their default, reported after logging starts.
    pub defaulted: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { key, value, reason } => {
                write!(f, "invalid {key} value `{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

impl Config {
    /// Loads configuration from process environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut defaulted = Vec::new();
        let mut load = |key: &'static str, default: &str| {
            lookup(key).filter(|value| !value.trim().is_empty()).unwrap_or_else(|| {
                defaulted.push(key);
                default.to_string()
            })
        };

        let host: IpAddr = parse(HOST_KEY, load(HOST_KEY, DEFAULT_HOST))?;
        let port: u16 = parse(PORT_KEY, load(PORT_KEY, DEFAULT_PORT))?;
        let seed_path = PathBuf::from(load(SEED_PATH_KEY, DEFAULT_SEED_PATH));
        let log_level = load(LOG_LEVEL_KEY, default_log_level());
        let log_dir = lookup(LOG_DIR_KEY).filter(|value| !value.trim().is_empty());

        Ok(Self {
            host,
            port,
            seed_path,
            log_level,
            log_dir,
            defaulted,
        })
    }

    /// Socket address string the listener binds to.
    pub fn bind_address(&self) -> String {
        match self.host {
            IpAddr::V4(host) => format!("{host}:{}", self.port),
            IpAddr::V6(host) => format!("[{host}]:{}", self.port),
        }
    }

    pub fn log_defaults(&self) {
        for key in &self.defaulted {
            info!("event=config_default module=config status=ok key={key}");
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
        value,
    })
}
