//! Article store access
//!
//! [`repository`] defines the store abstraction with its SQLite and
//! in-memory implementations; [`import`] loads document exports.

pub mod import;
pub mod repository;

pub use import::{import_articles, import_categories};
pub use repository::{
    create_mock_repository, create_sqlite_repository, open_sqlite_repository, ArticleRepository,
    MockArticleRepository, SharedArticleRepository, SortOrder, SqliteArticleRepository,
};
