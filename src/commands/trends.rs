use anyhow::{Context, Result};
use chrono::NaiveDate;

use slovostat::analytics::{TrendAggregationService, WordTrend, WordTrends};
use slovostat::models::Aggregation;

use super::{AppContext, ChartStyle, OutputFormat, TopN};

const BAR_WIDTH: usize = 40;

pub struct TrendParams {
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub top: TopN,
    pub aggregation: Aggregation,
    pub style: ChartStyle,
    pub format: OutputFormat,
}

pub fn trends(ctx: &AppContext, params: TrendParams) -> Result<()> {
    let repo = ctx.repository()?;
    let (from, to) = ctx.resolve_window(&repo, params.from, params.to)?;
    let service = TrendAggregationService::new(repo, ctx.scope()?, ctx.config.query.week_start);

    let trends = service
        .get_top_word_trends(
            from,
            to,
            params.category.as_deref(),
            params.top.count(),
            params.aggregation,
        )
        .context("Trend aggregation failed")?;

    match params.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trends)?),
        OutputFormat::Text => {
            let section = params.category.as_deref().unwrap_or("all");
            print!("{}", render_report(&trends, section, from, to, params.style));
        }
    }

    Ok(())
}

/// Header plus chart, or a notice when no word qualifies
fn render_report(
    trends: &WordTrends,
    section: &str,
    from: NaiveDate,
    to: NaiveDate,
    style: ChartStyle,
) -> String {
    if trends.is_empty() {
        return "No data for the chart.\n".to_string();
    }

    let mut out = format!(
        "Top {} words in section '{section}' ({} buckets, {from} to {to})\n",
        trends.len(),
        trends.aggregation
    );
    out.push_str("================================\n");
    out.push_str(&render_chart(trends, style));
    out
}

/// Render all series with a shared scale
fn render_chart(trends: &WordTrends, style: ChartStyle) -> String {
    let peak = trends.iter().map(WordTrend::peak).max().unwrap_or(0);
    let mut out = String::new();

    for trend in trends.iter() {
        out.push_str(&format!("\n{} (total {})\n", trend.word, trend.total));
        for point in trend.points() {
            let width = scaled(point.count, peak);
            let mark = match style {
                ChartStyle::Bar => "█".repeat(width.max(1)),
                ChartStyle::Line => format!("{}●", "─".repeat(width.saturating_sub(1))),
            };
            out.push_str(&format!("  {} {mark} {}\n", point.bucket, point.count));
        }
    }

    out
}

fn scaled(count: i64, peak: i64) -> usize {
    if peak <= 0 || count <= 0 {
        return 0;
    }
    ((count as f64 / peak as f64) * BAR_WIDTH as f64).round() as usize
}
