//! Word trend aggregation over a category and date window
//!
//! This module provides functionality for:
//! - Ranking words by their summed occurrence count
//! - Bucketing publication dates by day or by calendar week
//! - Building per-word time series restricted to the top-ranked words

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::models::{parse_date, Aggregation, StoredArticle, TrendPoint};
use crate::query::QueryScope;
use crate::storage::SharedArticleRepository;

/// First day of the week containing `date`
#[must_use]
pub fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(offset))
}

/// Bucket key of a publication date for the given granularity
#[must_use]
pub fn bucket_for(date: NaiveDate, aggregation: Aggregation, week_start: Weekday) -> NaiveDate {
    match aggregation {
        Aggregation::Day => date,
        Aggregation::Week => week_start_of(date, week_start),
    }
}

/// Time series of a single word (sorted by bucket)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordTrend {
    /// Word being tracked
    pub word: String,

    /// Summed count over the whole window
    pub total: i64,

    /// Bucketed counts, ascending by bucket
    points: Vec<TrendPoint>,
}

impl WordTrend {
    fn from_buckets(word: String, total: i64, buckets: BTreeMap<NaiveDate, i64>) -> Self {
        let points = buckets
            .into_iter()
            .map(|(bucket, count)| TrendPoint { bucket, count })
            .collect();

        Self {
            word,
            total,
            points,
        }
    }

    /// Get the number of buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bucketed counts in chronological order
    #[must_use]
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// `(bucket, count)` pairs in chronological order
    #[must_use]
    pub fn series(&self) -> Vec<(NaiveDate, i64)> {
        self.points.iter().map(|p| (p.bucket, p.count)).collect()
    }

    /// Largest bucket count, used to scale charts
    #[must_use]
    pub fn peak(&self) -> i64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }
}

/// Result of a trend query: top words in rank order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordTrends {
    pub aggregation: Aggregation,
    trends: Vec<WordTrend>,
}

impl WordTrends {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trends.len()
    }

    /// Words in rank order (highest total first)
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        self.trends.iter().map(|t| t.word.as_str()).collect()
    }

    #[must_use]
    pub fn get(&self, word: &str) -> Option<&WordTrend> {
        self.trends.iter().find(|t| t.word == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordTrend> {
        self.trends.iter()
    }

    /// Word -> `(bucket, count)` series mapping
    #[must_use]
    pub fn as_map(&self) -> BTreeMap<String, Vec<(NaiveDate, i64)>> {
        self.trends
            .iter()
            .map(|t| (t.word.clone(), t.series()))
            .collect()
    }
}

/// Record reduced to what the aggregation needs
struct Observation<'a> {
    word: &'a str,
    date: NaiveDate,
    count: i64,
}

fn observations(records: &[StoredArticle]) -> Vec<Observation<'_>> {
    let mut skipped = 0usize;
    let observations = records
        .iter()
        .filter_map(|record| {
            let word = record.top_word.as_deref()?;
            match record.published.as_deref().and_then(parse_date) {
                Some(date) => Some(Observation {
                    word,
                    date,
                    count: record.count,
                }),
                None => {
                    skipped += 1;
                    None
                }
            }
        })
        .collect();

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped records with unparseable publication dates");
    }
    observations
}

/// Top `limit` words by summed count; ties broken by ascending word
fn rank_words<'a>(observations: &[Observation<'a>], limit: usize) -> Vec<(&'a str, i64)> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for observation in observations {
        let total = totals.entry(observation.word).or_insert(0);
        *total = total.saturating_add(observation.count);
    }

    let mut ranked: Vec<(&str, i64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);
    ranked
}

/// Rank words and build their bucketed series from already filtered records
#[must_use]
pub fn aggregate_trends(
    records: &[StoredArticle],
    limit: usize,
    aggregation: Aggregation,
    week_start: Weekday,
) -> WordTrends {
    let observations = observations(records);
    let ranked = rank_words(&observations, limit);

    let mut buckets: HashMap<&str, BTreeMap<NaiveDate, i64>> =
        ranked.iter().map(|(word, _)| (*word, BTreeMap::new())).collect();

    for observation in &observations {
        // Words outside the top set are dropped here
        if let Some(series) = buckets.get_mut(observation.word) {
            let bucket = bucket_for(observation.date, aggregation, week_start);
            let count = series.entry(bucket).or_insert(0);
            *count = count.saturating_add(observation.count);
        }
    }

    let trends = ranked
        .into_iter()
        .map(|(word, total)| {
            let series = buckets.remove(word).unwrap_or_default();
            WordTrend::from_buckets(word.to_string(), total, series)
        })
        .collect();

    WordTrends {
        aggregation,
        trends,
    }
}

/// Builds top-word time series for a category and date window
pub struct TrendAggregationService {
    repo: SharedArticleRepository,
    scope: QueryScope,
    week_start: Weekday,
}

impl TrendAggregationService {
    pub fn new(repo: SharedArticleRepository, scope: QueryScope, week_start: Weekday) -> Self {
        Self {
            repo,
            scope,
            week_start,
        }
    }

    /// Series of the `limit` most frequent words within `[start, end]`
    ///
    /// `category` of `None` applies no section restriction. No matching
    /// records yields an empty result.
    pub fn get_top_word_trends(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        category: Option<&str>,
        limit: usize,
        aggregation: Aggregation,
    ) -> Result<WordTrends> {
        let filter = self.scope.filter(category, start, end);
        let records = self.repo.find_articles(&filter)?;
        let trends = aggregate_trends(&records, limit, aggregation, self.week_start);

        tracing::info!(
            category = category.unwrap_or("*"),
            start = %start,
            end = %end,
            %aggregation,
            records = records.len(),
            words = trends.len(),
            "Trend aggregation finished"
        );
        Ok(trends)
    }
}
