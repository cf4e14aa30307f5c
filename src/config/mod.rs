//! Configuration management for slovostat
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{parse_date, DATE_FORMAT};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Query and aggregation configuration
    pub query: QueryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,
}

/// Query configuration shared by every article and trend query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// URL substrings of the admitted news sources
    pub allowed_domains: Vec<String>,

    /// Sections that the catch-all category excludes
    pub reserved_sections: Vec<String>,

    /// Name of the synthetic catch-all category
    pub other_category: String,

    /// Start date used when the article store holds no dated record
    pub default_start_date: NaiveDate,

    /// First day of a week bucket
    pub week_start: Weekday,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::with_source(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Override values with `SLOVOSTAT_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("SLOVOSTAT_SQLITE_PATH") {
            self.database.sqlite_path = path.into();
        }

        if let Ok(domains) = std::env::var("SLOVOSTAT_ALLOWED_DOMAINS") {
            self.query.allowed_domains = domains
                .split(',')
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect();
        }

        if let Ok(value) = std::env::var("SLOVOSTAT_DEFAULT_START_DATE") {
            self.query.default_start_date = parse_date(value.trim()).ok_or_else(|| {
                Error::config(format!(
                    "SLOVOSTAT_DEFAULT_START_DATE must use {DATE_FORMAT}, got '{value}'"
                ))
            })?;
        }

        if let Ok(value) = std::env::var("SLOVOSTAT_WEEK_START") {
            self.query.week_start = value.trim().parse::<Weekday>().map_err(|_| {
                Error::config(format!("SLOVOSTAT_WEEK_START is not a weekday: '{value}'"))
            })?;
        }

        if let Ok(level) = std::env::var("SLOVOSTAT_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("SLOVOSTAT_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let query = &self.query;

        if query.allowed_domains.is_empty() {
            return Err(Error::config("allowed_domains must not be empty"));
        }

        if query.allowed_domains.iter().any(|d| d.trim().is_empty()) {
            return Err(Error::config("allowed_domains must not contain empty entries"));
        }

        if query.other_category.trim().is_empty() {
            return Err(Error::config("other_category must not be empty"));
        }

        if query.reserved_sections.contains(&query.other_category) {
            return Err(Error::config(format!(
                "other_category '{}' is also a reserved section",
                query.other_category
            )));
        }

        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(Error::config(format!(
                    "logging.format must be 'text' or 'json', got '{other}'"
                )))
            }
        }

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("data/slovostat.db"),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            allowed_domains: vec![
                String::from("aktuality"),
                String::from("dennikn"),
                String::from("pravda"),
            ],
            reserved_sections: vec![
                String::from("politika"),
                String::from("ekonomika"),
                String::from("vojna"),
                String::from("zahraničie"),
            ],
            other_category: String::from("iné"),
            default_start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
            week_start: Weekday::Sun,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}
