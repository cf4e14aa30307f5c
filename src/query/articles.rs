//! Article listing for a category and date window

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Article, StoredArticle};
use crate::query::QueryScope;
use crate::storage::SharedArticleRepository;

/// Filters and orders article records for display
pub struct ArticleQueryService {
    repo: SharedArticleRepository,
    scope: QueryScope,
}

impl ArticleQueryService {
    pub fn new(repo: SharedArticleRepository, scope: QueryScope) -> Self {
        Self { repo, scope }
    }

    /// Articles of a category published within `[start, end]`, newest first
    ///
    /// Records from sources outside the allow-list, and records without a
    /// URL or publication date, never appear. No match yields an empty list.
    pub fn get_articles_by_category(
        &self,
        category: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Article>> {
        let filter = self.scope.filter(Some(category), start, end);
        let records = self.repo.find_articles(&filter)?;
        let articles = sort_articles(records.into_iter().filter_map(StoredArticle::into_article));

        tracing::info!(
            category,
            start = %start,
            end = %end,
            count = articles.len(),
            "Article query finished"
        );
        Ok(articles)
    }
}

/// Order by (publication date, URL segment 2), both descending
///
/// The sort is stable: fully tied records keep store order.
pub fn sort_articles(articles: impl IntoIterator<Item = Article>) -> Vec<Article> {
    let mut articles: Vec<Article> = articles.into_iter().collect();
    articles.sort_by(|a, b| {
        b.published
            .cmp(&a.published)
            .then_with(|| b.url_segment().cmp(a.url_segment()))
    });
    articles
}
