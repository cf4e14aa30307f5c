use anyhow::{Context, Result};
use chrono::NaiveDate;

use slovostat::models::Article;
use slovostat::query::ArticleQueryService;

use super::{AppContext, OutputFormat};

pub fn articles(
    ctx: &AppContext,
    category: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    format: OutputFormat,
) -> Result<()> {
    let repo = ctx.repository()?;
    let (from, to) = ctx.resolve_window(&repo, from, to)?;
    let service = ArticleQueryService::new(repo, ctx.scope()?);

    let articles = service
        .get_articles_by_category(category, from, to)
        .context("Article query failed")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&articles)?);
        }
        OutputFormat::Text => print!("{}", render_articles(&articles, category, from, to)),
    }

    Ok(())
}

/// Text listing, or a notice when the window holds no articles
fn render_articles(articles: &[Article], category: &str, from: NaiveDate, to: NaiveDate) -> String {
    if articles.is_empty() {
        return format!("No articles in section '{category}' between {from} and {to}.\n");
    }

    let mut out = format!("Articles in section '{category}' from {from} to {to}\n");
    out.push_str("================================\n");
    for article in articles {
        out.push_str(&format_article(article));
        out.push('\n');
    }
    out
}

fn format_article(article: &Article) -> String {
    format!(
        "{} - {} - top word: {} (count: {})",
        article.published,
        article.url,
        article.top_word.as_deref().unwrap_or("-"),
        article.count
    )
}
