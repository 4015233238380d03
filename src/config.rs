use std::env;

use crate::error::ConfigError;
use crate::seeder::DEFAULT_SEED_COUNT;

pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub test_database_path: String,
    pub seed_count: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "data/blog.db".to_string(),
            test_database_path: IN_MEMORY.to_string(),
            seed_count: DEFAULT_SEED_COUNT,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Reads the process environment, honouring a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed_count = match lookup("BLOG_SEED_COUNT") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "BLOG_SEED_COUNT", value: v.clone() })?,
            None => defaults.seed_count,
        };

        let log_format = match lookup("LOG_FORMAT").map(|s| s.to_lowercase()) {
            Some(s) if s == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            database_path: lookup("BLOG_DATABASE_PATH").unwrap_or(defaults.database_path),
            test_database_path: lookup("BLOG_TEST_DATABASE_PATH").unwrap_or(defaults.test_database_path),
            seed_count,
            log_format,
        })
    }
}
