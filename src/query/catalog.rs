//! Selectable categories

use crate::error::Result;
use crate::storage::SharedArticleRepository;

/// Lists the categories a user can pick from
pub struct CategoryCatalog {
    repo: SharedArticleRepository,
    other_category: String,
}

impl CategoryCatalog {
    pub fn new(repo: SharedArticleRepository, other_category: impl Into<String>) -> Self {
        Self {
            repo,
            other_category: other_category.into(),
        }
    }

    /// Distinct configured categories followed by the catch-all category
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let mut categories = self.repo.distinct_categories()?;
        categories.push(self.other_category.clone());

        tracing::debug!(count = categories.len(), "Loaded category catalog");
        Ok(categories)
    }
}
