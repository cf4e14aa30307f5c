//! slovostat - word-frequency trends over scraped news articles
//!
//! Reads articles (each annotated with its most frequent word and that
//! word's count) from a document store and answers the questions a
//! dashboard asks: which categories exist, which dates are covered, which
//! articles match a category and window, and how the top words of that
//! window evolve per day or per week.
//!
//! # Architecture
//!
//! - [`config`] - Configuration management and settings
//! - [`models`] - Core data structures and types
//! - [`storage`] - Article store abstraction (SQLite, in-memory)
//! - [`query`] - Filter construction, category catalog, date range, article listing
//! - [`analytics`] - Top-word ranking and trend series
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use slovostat::prelude::*;
//! use chrono::NaiveDate;
//!
//! fn main() -> slovostat::error::Result<()> {
//!     let config = Config::from_env()?;
//!     let repo = open_sqlite_repository(&config.database.sqlite_path)?;
//!     let scope = QueryScope::from_config(&config.query)?;
//!
//!     let trends = TrendAggregationService::new(repo, scope, config.query.week_start);
//!     let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
//!     let result = trends.get_top_word_trends(start, end, Some("politika"), 5, Aggregation::Week)?;
//!     for trend in result.iter() {
//!         println!("{}: {:?}", trend.word, trend.series());
//!     }
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{TrendAggregationService, WordTrend, WordTrends};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Aggregation, Article, CategoryConfig, StoredArticle, TrendPoint};
    pub use crate::query::{
        ArticleQueryService, CategoryCatalog, DateRange, DateRangeResolver, QueryScope,
    };
    pub use crate::storage::{
        create_sqlite_repository, open_sqlite_repository, ArticleRepository,
        SharedArticleRepository,
    };
}

// Direct re-exports for convenience
pub use models::{Aggregation, Article, StoredArticle};
