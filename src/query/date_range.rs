//! Bounds of the available publication dates
//!
//! Used to seed the date pickers. An empty store is a normal state here:
//! missing bounds fall back to defaults instead of failing.

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::Result;
use crate::models::{format_date, parse_date, StoredArticle};
use crate::storage::{SharedArticleRepository, SortOrder};

/// Earliest and latest publication dates, as stored strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub first: String,
    pub last: String,
}

impl DateRange {
    /// Parsed bounds, `None` where a stored value is not `YYYY-MM-DD`
    pub fn as_dates(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (parse_date(&self.first), parse_date(&self.last))
    }

    pub fn into_tuple(self) -> (String, String) {
        (self.first, self.last)
    }
}

/// Resolves the first and last publication dates of the article store
pub struct DateRangeResolver {
    repo: SharedArticleRepository,
    default_start: NaiveDate,
}

impl DateRangeResolver {
    pub fn new(repo: SharedArticleRepository, default_start: NaiveDate) -> Self {
        Self {
            repo,
            default_start,
        }
    }

    /// Resolve the range, defaulting the end to the local date today
    pub fn get_date_range(&self) -> Result<DateRange> {
        self.resolve_at(Local::now().date_naive())
    }

    /// Resolve the range with an explicit date for the end fallback
    pub fn resolve_at(&self, today: NaiveDate) -> Result<DateRange> {
        let first = self.repo.boundary_article(SortOrder::Ascending)?;
        let last = self.repo.boundary_article(SortOrder::Descending)?;

        let range = DateRange {
            first: stored_date(first).unwrap_or_else(|| format_date(self.default_start)),
            last: stored_date(last).unwrap_or_else(|| format_date(today)),
        };

        tracing::debug!(first = %range.first, last = %range.last, "Resolved date range");
        Ok(range)
    }
}

fn stored_date(article: Option<StoredArticle>) -> Option<String> {
    article
        .and_then(|a| a.published)
        .filter(|date| !date.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockArticleRepository;
    use std::sync::Arc;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dated(published: Option<&str>) -> StoredArticle {
        StoredArticle {
            url: Some("https://dennikn.sk/a".to_string()),
            published: published.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_store_uses_defaults() {
        let resolver =
            DateRangeResolver::new(Arc::new(MockArticleRepository::new()), date("2025-03-01"));
        let range = resolver.resolve_at(date("2025-06-15")).unwrap();

        assert_eq!(range.into_tuple(), ("2025-03-01".to_string(), "2025-06-15".to_string()));
    }

    #[test]
    fn test_bounds_come_from_store() {
        let repo = MockArticleRepository::with_data(
            vec![dated(Some("2025-03-07")), dated(Some("2025-03-03")), dated(Some("2025-04-01"))],
            Vec::new(),
        );
        let resolver = DateRangeResolver::new(Arc::new(repo), date("2025-03-01"));
        let range = resolver.resolve_at(date("2025-06-15")).unwrap();

        assert_eq!(range.first, "2025-03-03");
        assert_eq!(range.last, "2025-04-01");
        assert_eq!(range.as_dates(), (Some(date("2025-03-03")), Some(date("2025-04-01"))));
    }

    #[test]
    fn test_undated_or_empty_boundary_falls_back() {
        let repo = MockArticleRepository::with_data(
            vec![dated(None), dated(Some("")), dated(Some("2025-03-07"))],
            Vec::new(),
        );
        let resolver = DateRangeResolver::new(Arc::new(repo), date("2025-03-01"));
        let range = resolver.resolve_at(date("2025-06-15")).unwrap();

        assert_eq!(range.first, "2025-03-01");
        assert_eq!(range.last, "2025-03-07");
    }
}
