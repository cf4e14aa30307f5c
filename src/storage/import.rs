//! Loading document-store exports into a repository
//!
//! Accepts either a JSON array of documents or JSON Lines (one document per
//! line), which covers both common export formats of the scraping pipeline.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{CategoryConfig, StoredArticle};
use crate::storage::ArticleRepository;

/// Parse a JSON array or JSON Lines document export
pub fn parse_documents<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let trimmed = content.trim_start();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line)
                .map_err(|e| Error::with_source(format!("Invalid document on line {}", index + 1), e))
        })
        .collect()
}

/// Read a document export from disk
pub fn read_documents<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::with_source(format!("Failed to read {}", path.display()), e))?;
    parse_documents(&content)
}

/// Import an article export, returning the number of stored documents
pub fn import_articles(repo: &dyn ArticleRepository, path: &Path) -> Result<usize> {
    let articles: Vec<StoredArticle> = read_documents(path)?;
    let stored = repo.insert_articles(&articles)?;

    let incomplete = articles
        .iter()
        .filter(|a| a.url.is_none() || a.published.is_none())
        .count();
    if incomplete > 0 {
        tracing::warn!(
            incomplete,
            "Imported articles without URL or publication date; queries will skip them"
        );
    }

    tracing::info!(path = %path.display(), stored, "Imported articles");
    Ok(stored)
}

/// Import a category configuration export
pub fn import_categories(repo: &dyn ArticleRepository, path: &Path) -> Result<usize> {
    let categories: Vec<CategoryConfig> = read_documents(path)?;
    let stored = repo.insert_categories(&categories)?;

    tracing::info!(path = %path.display(), stored, "Imported category configuration");
    Ok(stored)
}
