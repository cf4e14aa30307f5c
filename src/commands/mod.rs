//! CLI presentation layer
//!
//! Each command opens the store, calls one query service and renders the
//! result on stdout. Logs go to stderr.

pub mod articles;
pub mod catalog;
pub mod import;
pub mod trends;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::ValueEnum;

use slovostat::config::Config;
use slovostat::query::{DateRangeResolver, QueryScope};
use slovostat::storage::{open_sqlite_repository, SharedArticleRepository};

pub use articles::articles;
pub use catalog::{categories, range};
pub use import::import;
pub use trends::{trends, TrendParams};

/// Output format of query commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Chart style of the trends command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartStyle {
    /// Horizontal bars per bucket
    Bar,
    /// Line with markers per bucket
    Line,
}

/// Number of top words offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopN {
    #[value(name = "5")]
    Five,
    #[value(name = "10")]
    Ten,
}

impl TopN {
    pub fn count(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
        }
    }
}

/// Loaded configuration shared by all commands
pub struct AppContext {
    pub config: Config,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Open the article store read-only
    pub fn repository(&self) -> Result<SharedArticleRepository> {
        let path = &self.config.database.sqlite_path;
        open_sqlite_repository(path)
            .with_context(|| format!("Failed to open article store at {}", path.display()))
    }

    pub fn scope(&self) -> Result<QueryScope> {
        QueryScope::from_config(&self.config.query).context("Invalid query configuration")
    }

    /// Fill missing window bounds from the stored date range
    pub fn resolve_window(
        &self,
        repo: &SharedArticleRepository,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<(NaiveDate, NaiveDate)> {
        if let (Some(from), Some(to)) = (from, to) {
            return Ok((from, to));
        }

        let resolver = DateRangeResolver::new(repo.clone(), self.config.query.default_start_date);
        let range = resolver
            .get_date_range()
            .context("Failed to resolve the stored date range")?;
        let (first, last) = range.as_dates();

        let from = from
            .or(first)
            .unwrap_or(self.config.query.default_start_date);
        let to = to.or(last).unwrap_or_else(|| Local::now().date_naive());

        Ok((from, to))
    }
}
