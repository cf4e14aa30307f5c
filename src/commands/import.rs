use anyhow::{Context, Result};
use std::path::PathBuf;

use slovostat::storage::{create_sqlite_repository, import_articles, import_categories};

use super::AppContext;

pub fn import(
    ctx: &AppContext,
    articles: Option<PathBuf>,
    categories: Option<PathBuf>,
) -> Result<()> {
    if articles.is_none() && categories.is_none() {
        anyhow::bail!("Nothing to import: pass --articles and/or --categories");
    }

    let path = &ctx.config.database.sqlite_path;
    let repo = create_sqlite_repository(path)
        .with_context(|| format!("Failed to open article store at {}", path.display()))?;

    if let Some(file) = categories {
        let stored = import_categories(repo.as_ref(), &file)
            .with_context(|| format!("Failed to import categories from {}", file.display()))?;
        println!("Imported {stored} category documents from {}", file.display());
    }

    if let Some(file) = articles {
        let stored = import_articles(repo.as_ref(), &file)
            .with_context(|| format!("Failed to import articles from {}", file.display()))?;
        println!("Imported {stored} article documents from {}", file.display());
    }

    Ok(())
}
