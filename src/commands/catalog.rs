use anyhow::{Context, Result};

use slovostat::query::{CategoryCatalog, DateRangeResolver};

use super::AppContext;

pub fn categories(ctx: &AppContext) -> Result<()> {
    let repo = ctx.repository()?;
    let scope = ctx.scope()?;
    let catalog = CategoryCatalog::new(repo, scope.other_category());

    let categories = catalog
        .list_categories()
        .context("Failed to load categories")?;

    for category in categories {
        println!("{category}");
    }

    Ok(())
}

pub fn range(ctx: &AppContext) -> Result<()> {
    let repo = ctx.repository()?;
    let resolver = DateRangeResolver::new(repo, ctx.config.query.default_start_date);

    let range = resolver
        .get_date_range()
        .context("Failed to resolve date range")?;

    println!("First date: {}", range.first);
    println!("Last date:  {}", range.last);

    Ok(())
}
