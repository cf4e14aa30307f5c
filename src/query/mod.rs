//! Filter construction shared by article listing and trend aggregation
//!
//! Both query paths select records by the same three predicates:
//!
//! - section: an exact section name, or the catch-all category defined by
//!   exclusion of the reserved sections
//! - publication date inside an inclusive `YYYY-MM-DD` window
//! - URL containing one of the allow-listed source domains
//!
//! [`QueryScope`] is built once from [`QueryConfig`] and turns a user
//! selection into an [`ArticleFilter`] that every repository evaluates the
//! same way.

pub mod articles;
pub mod catalog;
pub mod date_range;

use chrono::NaiveDate;
use regex::Regex;

use crate::config::QueryConfig;
use crate::error::{Error, Result};
use crate::models::{format_date, StoredArticle};

pub use articles::ArticleQueryService;
pub use catalog::CategoryCatalog;
pub use date_range::{DateRange, DateRangeResolver};

/// Section predicate of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    /// No section restriction
    Any,
    /// Section equals the given name exactly
    Section(String),
    /// Section is missing or not one of the reserved sections
    Other { reserved: Vec<String> },
}

impl CategorySelection {
    /// Evaluate the predicate against a stored section value
    pub fn matches(&self, section: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Section(name) => section == Some(name.as_str()),
            Self::Other { reserved } => match section {
                Some(section) => !reserved.iter().any(|r| r == section),
                None => true,
            },
        }
    }
}

/// Allow-list of source domains, matched as URL substrings
#[derive(Debug, Clone)]
pub struct DomainAllowList {
    pattern: Regex,
}

impl DomainAllowList {
    /// Compile the allow-list into a single alternation
    pub fn new<I, S>(domains: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domains: Vec<String> = domains.into_iter().map(Into::into).collect();

        if domains.is_empty() || domains.iter().any(|d| d.is_empty()) {
            return Err(Error::config("domain allow-list needs non-empty entries"));
        }

        let alternation = domains
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation)
            .map_err(|e| Error::with_source("Invalid domain allow-list", e))?;

        Ok(Self { pattern })
    }

    /// Check whether a URL belongs to one of the allowed sources
    pub fn is_allowed(&self, url: &str) -> bool {
        self.pattern.is_match(url)
    }
}

/// Complete record filter: section, inclusive date window and source domain
#[derive(Debug, Clone)]
pub struct ArticleFilter {
    pub selection: CategorySelection,
    start: String,
    end: String,
    domains: DomainAllowList,
}

impl ArticleFilter {
    pub fn new(
        selection: CategorySelection,
        start: NaiveDate,
        end: NaiveDate,
        domains: DomainAllowList,
    ) -> Self {
        Self {
            selection,
            start: format_date(start),
            end: format_date(end),
            domains,
        }
    }

    /// Inclusive date bounds as stored strings
    pub fn date_bounds(&self) -> (&str, &str) {
        (&self.start, &self.end)
    }

    /// Check whether a URL belongs to an allowed source
    pub fn allows_url(&self, url: Option<&str>) -> bool {
        url.is_some_and(|u| self.domains.is_allowed(u))
    }

    /// Check the date window; ISO dates compare correctly as strings
    pub fn covers_date(&self, published: Option<&str>) -> bool {
        published.is_some_and(|d| self.start.as_str() <= d && d <= self.end.as_str())
    }

    /// Evaluate all three predicates against a stored record
    pub fn matches(&self, article: &StoredArticle) -> bool {
        self.selection.matches(article.section.as_deref())
            && self.covers_date(article.published.as_deref())
            && self.allows_url(article.url.as_deref())
    }
}

/// Query settings resolved once from configuration
#[derive(Debug, Clone)]
pub struct QueryScope {
    domains: DomainAllowList,
    reserved_sections: Vec<String>,
    other_category: String,
}

impl QueryScope {
    pub fn from_config(config: &QueryConfig) -> Result<Self> {
        Ok(Self {
            domains: DomainAllowList::new(config.allowed_domains.iter().cloned())?,
            reserved_sections: config.reserved_sections.clone(),
            other_category: config.other_category.clone(),
        })
    }

    /// Name of the synthetic catch-all category
    pub fn other_category(&self) -> &str {
        &self.other_category
    }

    /// Map a category name (or none) to its section predicate
    pub fn selection(&self, category: Option<&str>) -> CategorySelection {
        match category {
            None => CategorySelection::Any,
            Some(name) if name == self.other_category => CategorySelection::Other {
                reserved: self.reserved_sections.clone(),
            },
            Some(name) => CategorySelection::Section(name.to_string()),
        }
    }

    /// Build the filter for a category and inclusive date window
    pub fn filter(&self, category: Option<&str>, start: NaiveDate, end: NaiveDate) -> ArticleFilter {
        let filter = ArticleFilter::new(self.selection(category), start, end, self.domains.clone());

        tracing::debug!(
            selection = ?filter.selection,
            start = %filter.start,
            end = %filter.end,
            "Built article filter"
        );

        filter
    }
}
