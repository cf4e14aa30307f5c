// Core data structures for slovostat

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Date format used by the article store (`YYYY-MM-DD`, fixed width)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date the way the article store keeps it
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` date string
///
/// Only the zero-padded form is accepted: chrono alone would also take
/// `2025-3-1`, which does not order correctly against stored dates.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| format_date(*date) == value)
}

/// Article document as kept in the store
///
/// Every field may be missing: the scraping pipeline that produces these
/// documents is not under our control. Field names follow the stored
/// document shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArticle {
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Publication date as `YYYY-MM-DD`
    #[serde(
        rename = "Datum_publikacie",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published: Option<String>,

    /// Section label (politika, ekonomika, ...)
    #[serde(rename = "Sekcia", default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Most frequent word extracted from the article body
    #[serde(
        rename = "Najcastejsie_slovo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub top_word: Option<String>,

    /// Occurrences of `top_word` in the article
    #[serde(rename = "Pocet", default)]
    pub count: i64,
}

impl StoredArticle {
    /// Convert into a displayable article, dropping records without URL or date
    pub fn into_article(self) -> Option<Article> {
        let url = self.url.filter(|u| !u.is_empty())?;
        let published = self.published.filter(|d| !d.is_empty())?;

        Some(Article {
            url,
            published,
            section: self.section,
            top_word: self.top_word,
            count: self.count,
        })
    }
}

/// Article record guaranteed to carry a URL and a publication date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Datum_publikacie")]
    pub published: String,
    #[serde(rename = "Sekcia", skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(rename = "Najcastejsie_slovo", skip_serializing_if = "Option::is_none")]
    pub top_word: Option<String>,
    #[serde(rename = "Pocet")]
    pub count: i64,
}

impl Article {
    /// URL segment at index 2 when split on `/` (the host for absolute URLs)
    pub fn url_segment(&self) -> &str {
        self.url.split('/').nth(2).unwrap_or("")
    }
}

/// Category configuration document; only `category` is consumed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub category: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryConfig {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            keywords: Vec::new(),
        }
    }
}

/// Time granularity of a trend series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// One bucket per publication date
    #[default]
    Day,
    /// One bucket per calendar week, keyed by the week's first day
    Week,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            other => Err(Error::invalid_input(format!(
                "unknown aggregation '{other}', expected 'day' or 'week'"
            ))),
        }
    }
}

/// One `(bucket, count)` pair of a word's trend series
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TrendPoint {
    pub bucket: NaiveDate,
    pub count: i64,
}
