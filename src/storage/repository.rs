//! Repository Pattern for the article store
//!
//! Query services never talk to a database directly: they receive a
//! [`SharedArticleRepository`] handle, which lets the same services run
//! against SQLite in production and an in-memory store in tests.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Query Services                         │
//! │   CategoryCatalog, DateRangeResolver, ArticleQueryService,  │
//! │                 TrendAggregationService                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   ArticleRepository                         │
//! └─────────────────────────────────────────────────────────────┘
//!                   │                         │
//!                   ▼                         ▼
//!          ┌─────────────────┐       ┌─────────────────┐
//!          │     SQLite      │       │      Mock       │
//!          └─────────────────┘       └─────────────────┘
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use rusqlite::{params, params_from_iter, Connection, OpenFlags, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::models::{CategoryConfig, StoredArticle};
use crate::query::{ArticleFilter, CategorySelection};

// ============================================================================
// Core Types
// ============================================================================

/// Sort direction on the publication date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

// ============================================================================
// Repository Trait
// ============================================================================

/// Read access to the article and category-configuration collections
///
/// The insert methods exist for data loading; query services only read.
pub trait ArticleRepository: Send + Sync {
    /// Distinct category names from the configuration collection, ascending
    fn distinct_categories(&self) -> Result<Vec<String>>;

    /// First record when sorted by publication date
    ///
    /// Records without a date sort before every dated record, so an
    /// ascending lookup may return an undated record.
    fn boundary_article(&self, order: SortOrder) -> Result<Option<StoredArticle>>;

    /// All records matching the filter, in store order
    fn find_articles(&self, filter: &ArticleFilter) -> Result<Vec<StoredArticle>>;

    /// Append article documents, returning the number stored
    fn insert_articles(&self, articles: &[StoredArticle]) -> Result<usize>;

    /// Append category configuration documents, returning the number stored
    fn insert_categories(&self, categories: &[CategoryConfig]) -> Result<usize>;
}

/// Shared repository handle injected into the query services
pub type SharedArticleRepository = Arc<dyn ArticleRepository>;

// ============================================================================
// SQLite Implementation
// ============================================================================

/// SQLite implementation of ArticleRepository
///
/// Uses `Mutex` to ensure thread-safety for the SQLite connection.
pub struct SqliteArticleRepository {
    conn: Mutex<Connection>,
}

impl SqliteArticleRepository {
    /// Open (or create) a writable database and ensure the schema exists
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;

        tracing::info!(path = %path.display(), "SQLite repository initialized");
        Ok(repo)
    }

    /// Open an existing database without write access
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        tracing::debug!(path = %path.display(), "SQLite repository opened read-only");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create in-memory repository (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;
        Ok(repo)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::other("SQLite connection lock poisoned"))
    }

    /// Create database schema
    fn create_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
                CREATE TABLE IF NOT EXISTS articles (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    url TEXT,
                    datum_publikacie TEXT,
                    sekcia TEXT,
                    najcastejsie_slovo TEXT,
                    pocet INTEGER NOT NULL DEFAULT 0
                );

                CREATE INDEX IF NOT EXISTS idx_articles_datum
                    ON articles(datum_publikacie);

                CREATE INDEX IF NOT EXISTS idx_articles_sekcia
                    ON articles(sekcia);

                CREATE TABLE IF NOT EXISTS filter_keywords (
                    category TEXT NOT NULL,
                    keywords TEXT NOT NULL DEFAULT '[]'
                );
                "#,
        )?;

        Ok(())
    }

    fn row_to_article(row: &Row<'_>) -> rusqlite::Result<StoredArticle> {
        Ok(StoredArticle {
            url: row.get(0)?,
            published: row.get(1)?,
            section: row.get(2)?,
            top_word: row.get(3)?,
            count: row.get(4)?,
        })
    }
}

/// Translate the section predicate into SQL, appending its parameters
fn section_clause(selection: &CategorySelection, params: &mut Vec<String>) -> Option<String> {
    match selection {
        CategorySelection::Any => None,
        CategorySelection::Section(name) => {
            params.push(name.clone());
            Some(format!("sekcia = ?{}", params.len()))
        }
        CategorySelection::Other { reserved } if reserved.is_empty() => None,
        CategorySelection::Other { reserved } => {
            let placeholders: Vec<String> = reserved
                .iter()
                .map(|section| {
                    params.push(section.clone());
                    format!("?{}", params.len())
                })
                .collect();
            Some(format!(
                "(sekcia IS NULL OR sekcia NOT IN ({}))",
                placeholders.join(", ")
            ))
        }
    }
}

impl ArticleRepository for SqliteArticleRepository {
    fn distinct_categories(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT category FROM filter_keywords ORDER BY category")?;
        let categories = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(categories)
    }

    fn boundary_article(&self, order: SortOrder) -> Result<Option<StoredArticle>> {
        let direction = match order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        let query = format!(
            "SELECT url, datum_publikacie, sekcia, najcastejsie_slovo, pocet
             FROM articles ORDER BY datum_publikacie {direction}, id ASC LIMIT 1"
        );

        let conn = self.conn()?;
        let article = conn
            .query_row(&query, [], Self::row_to_article)
            .optional()?;

        Ok(article)
    }

    fn find_articles(&self, filter: &ArticleFilter) -> Result<Vec<StoredArticle>> {
        let (start, end) = filter.date_bounds();
        let mut params = vec![start.to_string(), end.to_string()];
        let mut query = String::from(
            "SELECT url, datum_publikacie, sekcia, najcastejsie_slovo, pocet
             FROM articles
             WHERE datum_publikacie >= ?1 AND datum_publikacie <= ?2 AND url IS NOT NULL",
        );

        if let Some(clause) = section_clause(&filter.selection, &mut params) {
            query.push_str(" AND ");
            query.push_str(&clause);
        }
        query.push_str(" ORDER BY id");

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), Self::row_to_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        // Domain allow-list is checked with the shared matcher
        let articles: Vec<StoredArticle> =
            rows.into_iter().filter(|a| filter.matches(a)).collect();

        tracing::debug!(matched = articles.len(), "SQLite article query finished");
        Ok(articles)
    }

    fn insert_articles(&self, articles: &[StoredArticle]) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO articles (url, datum_publikacie, sekcia, najcastejsie_slovo, pocet)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for article in articles {
                stmt.execute(params![
                    article.url,
                    article.published,
                    article.section,
                    article.top_word,
                    article.count,
                ])?;
            }
        }
        tx.commit()?;

        Ok(articles.len())
    }

    fn insert_categories(&self, categories: &[CategoryConfig]) -> Result<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO filter_keywords (category, keywords) VALUES (?1, ?2)")?;
            for category in categories {
                let keywords = serde_json::to_string(&category.keywords)?;
                stmt.execute(params![category.category, keywords])?;
            }
        }
        tx.commit()?;

        Ok(categories.len())
    }
}

// ============================================================================
// Mock Implementation (for testing)
// ============================================================================

/// In-memory mock implementation of ArticleRepository
#[derive(Debug, Default)]
pub struct MockArticleRepository {
    articles: RwLock<Vec<StoredArticle>>,
    categories: RwLock<Vec<CategoryConfig>>,
}

impl MockArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with documents
    pub fn with_data(articles: Vec<StoredArticle>, categories: Vec<CategoryConfig>) -> Self {
        Self {
            articles: RwLock::new(articles),
            categories: RwLock::new(categories),
        }
    }

    /// Number of stored articles
    pub fn len(&self) -> usize {
        self.articles.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> Error {
    Error::other("In-memory repository lock poisoned")
}

impl ArticleRepository for MockArticleRepository {
    fn distinct_categories(&self) -> Result<Vec<String>> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        let distinct: BTreeSet<&str> = categories.iter().map(|c| c.category.as_str()).collect();
        Ok(distinct.into_iter().map(String::from).collect())
    }

    fn boundary_article(&self, order: SortOrder) -> Result<Option<StoredArticle>> {
        let articles = self.articles.read().map_err(|_| poisoned())?;
        let mut sorted: Vec<&StoredArticle> = articles.iter().collect();
        match order {
            SortOrder::Ascending => sorted.sort_by(|a, b| a.published.cmp(&b.published)),
            SortOrder::Descending => sorted.sort_by(|a, b| b.published.cmp(&a.published)),
        }
        Ok(sorted.first().map(|a| (*a).clone()))
    }

    fn find_articles(&self, filter: &ArticleFilter) -> Result<Vec<StoredArticle>> {
        let articles = self.articles.read().map_err(|_| poisoned())?;
        Ok(articles.iter().filter(|a| filter.matches(a)).cloned().collect())
    }

    fn insert_articles(&self, articles: &[StoredArticle]) -> Result<usize> {
        let mut stored = self.articles.write().map_err(|_| poisoned())?;
        stored.extend_from_slice(articles);
        Ok(articles.len())
    }

    fn insert_categories(&self, categories: &[CategoryConfig]) -> Result<usize> {
        let mut stored = self.categories.write().map_err(|_| poisoned())?;
        stored.extend_from_slice(categories);
        Ok(categories.len())
    }
}

// ============================================================================
// Factory Functions
// ============================================================================

/// Create a shared SQLite repository
pub fn create_sqlite_repository(path: impl AsRef<Path>) -> Result<SharedArticleRepository> {
    Ok(Arc::new(SqliteArticleRepository::new(path)?))
}

/// Create a shared read-only SQLite repository
pub fn open_sqlite_repository(path: impl AsRef<Path>) -> Result<SharedArticleRepository> {
    Ok(Arc::new(SqliteArticleRepository::open_read_only(path)?))
}

/// Create a shared mock repository (for testing)
pub fn create_mock_repository() -> SharedArticleRepository {
    Arc::new(MockArticleRepository::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QueryConfig;
    use crate::query::QueryScope;
    use chrono::NaiveDate;

    fn create_test_repos() -> Vec<Box<dyn ArticleRepository>> {
        vec![
            Box::new(SqliteArticleRepository::in_memory().unwrap()),
            Box::new(MockArticleRepository::new()),
        ]
    }

    fn article(url: Option<&str>, published: Option<&str>, section: Option<&str>) -> StoredArticle {
        StoredArticle {
            url: url.map(String::from),
            published: published.map(String::from),
            section: section.map(String::from),
            top_word: Some("slovo".to_string()),
            count: 2,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_distinct_categories() {
        for repo in create_test_repos() {
            repo.insert_categories(&[
                CategoryConfig::new("vojna"),
                CategoryConfig::new("ekonomika"),
                CategoryConfig::new("vojna"),
            ])
            .unwrap();

            assert_eq!(
                repo.distinct_categories().unwrap(),
                vec!["ekonomika".to_string(), "vojna".to_string()]
            );
        }
    }

    #[test]
    fn test_boundary_article() {
        for repo in create_test_repos() {
            assert!(repo.boundary_article(SortOrder::Ascending).unwrap().is_none());

            repo.insert_articles(&[
                article(Some("https://dennikn.sk/a"), Some("2025-03-05"), None),
                article(Some("https://dennikn.sk/b"), Some("2025-03-02"), None),
                article(Some("https://dennikn.sk/c"), Some("2025-03-09"), None),
            ])
            .unwrap();

            let first = repo.boundary_article(SortOrder::Ascending).unwrap().unwrap();
            let last = repo.boundary_article(SortOrder::Descending).unwrap().unwrap();
            assert_eq!(first.published.as_deref(), Some("2025-03-02"));
            assert_eq!(last.published.as_deref(), Some("2025-03-09"));
        }
    }

    #[test]
    fn test_undated_record_sorts_first() {
        for repo in create_test_repos() {
            repo.insert_articles(&[
                article(Some("https://dennikn.sk/a"), Some("2025-03-05"), None),
                article(Some("https://dennikn.sk/b"), None, None),
            ])
            .unwrap();

            let first = repo.boundary_article(SortOrder::Ascending).unwrap().unwrap();
            let last = repo.boundary_article(SortOrder::Descending).unwrap().unwrap();
            assert!(first.published.is_none());
            assert_eq!(last.published.as_deref(), Some("2025-03-05"));
        }
    }

    #[test]
    fn test_find_articles_applies_all_predicates() {
        let scope = QueryScope::from_config(&QueryConfig::default()).unwrap();

        for repo in create_test_repos() {
            repo.insert_articles(&[
                article(Some("https://www.aktuality.sk/1"), Some("2025-03-02"), Some("politika")),
                article(Some("https://www.sme.sk/2"), Some("2025-03-02"), Some("politika")),
                article(Some("https://dennikn.sk/3"), Some("2025-04-01"), Some("politika")),
                article(Some("https://dennikn.sk/4"), Some("2025-03-03"), Some("vojna")),
                article(Some("https://dennikn.sk/5"), Some("2025-03-03"), None),
                article(None, Some("2025-03-03"), Some("politika")),
            ])
            .unwrap();

            let politics = repo
                .find_articles(&scope.filter(
                    Some("politika"),
                    date("2025-03-01"),
                    date("2025-03-31"),
                ))
                .unwrap();
            assert_eq!(politics.len(), 1);
            assert_eq!(politics[0].url.as_deref(), Some("https://www.aktuality.sk/1"));

            let other = repo
                .find_articles(&scope.filter(Some("iné"), date("2025-03-01"), date("2025-03-31")))
                .unwrap();
            assert_eq!(other.len(), 1);
            assert_eq!(other[0].url.as_deref(), Some("https://dennikn.sk/5"));
        }
    }

    #[test]
    fn test_sqlite_file_repository() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("store.db");

        let repo = SqliteArticleRepository::new(&path).unwrap();
        repo.insert_categories(&[CategoryConfig::new("politika")]).unwrap();
        drop(repo);

        let read_only = SqliteArticleRepository::open_read_only(&path).unwrap();
        assert_eq!(read_only.distinct_categories().unwrap(), vec!["politika"]);
        assert!(read_only
            .insert_categories(&[CategoryConfig::new("vojna")])
            .is_err());
    }

    #[test]
    fn test_open_missing_database_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = SqliteArticleRepository::open_read_only(temp_dir.path().join("missing.db"));
        assert!(result.is_err());
    }

    #[test]
    fn test_mock_repository_utilities() {
        let mock = MockArticleRepository::new();
        assert!(mock.is_empty());

        mock.insert_articles(&[article(Some("https://dennikn.sk/a"), Some("2025-03-05"), None)])
            .unwrap();
        assert_eq!(mock.len(), 1);
    }
}
