//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use slovostat::config::QueryConfig;
use slovostat::models::{CategoryConfig, StoredArticle};
use slovostat::query::QueryScope;
use slovostat::storage::{MockArticleRepository, SharedArticleRepository};

pub const RESERVED: [&str; 4] = ["politika", "ekonomika", "vojna", "zahraničie"];

/// Parse a `YYYY-MM-DD` literal
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Create a complete article record
pub fn create_article(
    url: &str,
    published: &str,
    section: &str,
    word: &str,
    count: i64,
) -> StoredArticle {
    StoredArticle {
        url: Some(url.to_string()),
        published: Some(published.to_string()),
        section: Some(section.to_string()),
        top_word: Some(word.to_string()),
        count,
    }
}

/// Query scope built from the default configuration
pub fn default_scope() -> QueryScope {
    QueryScope::from_config(&QueryConfig::default()).expect("default scope")
}

/// Configured categories of the default fixture
pub fn fixture_categories() -> Vec<CategoryConfig> {
    RESERVED.iter().map(|c| CategoryConfig::new(*c)).collect()
}

/// Mixed fixture: several sections, sources and dates in March 2025
pub fn fixture_articles() -> Vec<StoredArticle> {
    vec![
        create_article("https://www.aktuality.sk/clanok/a1", "2025-03-01", "politika", "volby", 3),
        create_article("https://spravy.pravda.sk/domace/a2", "2025-03-01", "politika", "volby", 2),
        create_article("https://dennikn.sk/a3", "2025-03-04", "politika", "vlada", 6),
        create_article("https://dennikn.sk/a4", "2025-03-10", "politika", "volby", 1),
        create_article("https://www.sme.sk/a5", "2025-03-05", "politika", "volby", 50),
        create_article("https://dennikn.sk/a6", "2025-03-05", "ekonomika", "dane", 4),
        create_article("https://www.aktuality.sk/a7", "2025-03-06", "šport", "gol", 5),
        create_article("https://dennikn.sk/a8", "2025-03-07", "kultura", "film", 2),
        create_article("https://spravy.pravda.sk/a9", "2025-03-12", "zahraničie", "trump", 9),
        StoredArticle {
            url: Some("https://dennikn.sk/a10".to_string()),
            published: Some("2025-03-08".to_string()),
            section: None,
            top_word: Some("pocasie".to_string()),
            count: 1,
        },
        StoredArticle {
            url: None,
            published: Some("2025-03-02".to_string()),
            section: Some("politika".to_string()),
            top_word: Some("volby".to_string()),
            count: 100,
        },
    ]
}

/// Mock repository seeded with the fixture
pub fn fixture_repository() -> SharedArticleRepository {
    Arc::new(MockArticleRepository::with_data(
        fixture_articles(),
        fixture_categories(),
    ))
}

/// Repository holding exactly the given articles
pub fn repository_with(articles: Vec<StoredArticle>) -> SharedArticleRepository {
    Arc::new(MockArticleRepository::with_data(articles, Vec::new()))
}
