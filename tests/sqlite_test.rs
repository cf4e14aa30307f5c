//! SQLite store behaves like the in-memory store

mod common;

use std::io::Write;
use std::sync::Arc;

use chrono::Weekday;
use common::{date, default_scope, fixture_articles, fixture_categories, fixture_repository};
use slovostat::analytics::TrendAggregationService;
use slovostat::models::Aggregation;
use slovostat::query::{ArticleQueryService, CategoryCatalog, DateRangeResolver};
use slovostat::storage::{
    import_articles, import_categories, open_sqlite_repository, ArticleRepository,
    SharedArticleRepository, SqliteArticleRepository,
};
use tempfile::TempDir;

fn sqlite_fixture() -> (TempDir, SharedArticleRepository) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("articles.db");

    let writer = SqliteArticleRepository::new(&path).unwrap();
    writer.insert_articles(&fixture_articles()).unwrap();
    writer.insert_categories(&fixture_categories()).unwrap();
    drop(writer);

    let repo = open_sqlite_repository(&path).unwrap();
    (temp_dir, repo)
}

#[test]
fn test_articles_match_mock_store() {
    let (_dir, sqlite) = sqlite_fixture();

    for category in ["politika", "iné", "ekonomika", "vojna"] {
        let from_sqlite = ArticleQueryService::new(sqlite.clone(), default_scope())
            .get_articles_by_category(category, date("2025-03-01"), date("2025-03-31"))
            .unwrap();
        let from_mock = ArticleQueryService::new(fixture_repository(), default_scope())
            .get_articles_by_category(category, date("2025-03-01"), date("2025-03-31"))
            .unwrap();

        assert_eq!(from_sqlite, from_mock, "category {category}");
    }
}

#[test]
fn test_trends_match_mock_store() {
    let (_dir, sqlite) = sqlite_fixture();

    for aggregation in [Aggregation::Day, Aggregation::Week] {
        for category in [Some("politika"), Some("iné"), None] {
            let from_sqlite = TrendAggregationService::new(sqlite.clone(), default_scope(), Weekday::Sun)
                .get_top_word_trends(date("2025-03-01"), date("2025-03-31"), category, 10, aggregation)
                .unwrap();
            let from_mock =
                TrendAggregationService::new(fixture_repository(), default_scope(), Weekday::Sun)
                    .get_top_word_trends(date("2025-03-01"), date("2025-03-31"), category, 10, aggregation)
                    .unwrap();

            assert_eq!(from_sqlite, from_mock);
        }
    }
}

#[test]
fn test_catalog_and_range_from_sqlite() {
    let (_dir, sqlite) = sqlite_fixture();

    let categories = CategoryCatalog::new(sqlite.clone(), "iné")
        .list_categories()
        .unwrap();
    assert_eq!(categories.last().map(String::as_str), Some("iné"));
    assert_eq!(categories.len(), 5);

    let range = DateRangeResolver::new(sqlite, date("2025-03-01"))
        .resolve_at(date("2025-12-31"))
        .unwrap();
    assert_eq!(range.first, "2025-03-01");
    assert_eq!(range.last, "2025-03-12");
}

#[test]
fn test_empty_sqlite_store() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("empty.db");
    drop(SqliteArticleRepository::new(&path).unwrap());
    let repo = open_sqlite_repository(&path).unwrap();

    let range = DateRangeResolver::new(repo.clone(), date("2025-03-01"))
        .resolve_at(date("2025-07-04"))
        .unwrap();
    assert_eq!(range.into_tuple(), ("2025-03-01".to_string(), "2025-07-04".to_string()));

    let articles = ArticleQueryService::new(repo, default_scope())
        .get_articles_by_category("politika", date("2025-03-01"), date("2025-03-31"))
        .unwrap();
    assert!(articles.is_empty());
}

#[test]
fn test_import_then_query() {
    let temp_dir = tempfile::tempdir().unwrap();
    let articles_path = temp_dir.path().join("articles.json");
    let categories_path = temp_dir.path().join("categories.jsonl");

    std::fs::write(
        &articles_path,
        serde_json::to_string(&fixture_articles()).unwrap(),
    )
    .unwrap();
    let mut categories_file = std::fs::File::create(&categories_path).unwrap();
    for category in fixture_categories() {
        writeln!(categories_file, "{}", serde_json::to_string(&category).unwrap()).unwrap();
    }

    let repo = Arc::new(SqliteArticleRepository::new(temp_dir.path().join("db.sqlite")).unwrap());
    assert_eq!(import_articles(repo.as_ref(), &articles_path).unwrap(), fixture_articles().len());
    assert_eq!(import_categories(repo.as_ref(), &categories_path).unwrap(), 4);

    let articles = ArticleQueryService::new(repo, default_scope())
        .get_articles_by_category("politika", date("2025-03-01"), date("2025-03-31"))
        .unwrap();
    assert_eq!(articles.len(), 4);
}

#[test]
fn test_missing_database_is_a_storage_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let err = open_sqlite_repository(temp_dir.path().join("nope.db")).err().unwrap();
    assert_eq!(err.category(), slovostat::error::ErrorCategory::Storage);
}
