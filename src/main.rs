use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slovostat::config::Config;
use slovostat::models::Aggregation;

mod commands;

use commands::{AppContext, ChartStyle, OutputFormat, TopN};

#[derive(Parser)]
#[command(
    name = "slovostat",
    version,
    about = "Word-frequency trends over scraped news articles",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database path; overrides the config file
    #[arg(long, global = true)]
    database: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List selectable categories
    Categories,

    /// Show the first and last publication dates in the store
    Range,

    /// List articles of a category within a date window
    Articles {
        /// Category (section) name
        #[arg(short = 's', long)]
        category: String,

        /// Start date (inclusive), defaults to the first stored date
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (inclusive), defaults to the last stored date
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Chart the most frequent words over time
    Trends {
        /// Category (section) name; all sections when omitted
        #[arg(short = 's', long)]
        category: Option<String>,

        /// Start date (inclusive), defaults to the first stored date
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (inclusive), defaults to the last stored date
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Number of top words
        #[arg(short = 'n', long, value_enum, default_value = "5")]
        top: TopN,

        /// Time granularity (day, week)
        #[arg(short, long, default_value = "day")]
        aggregation: Aggregation,

        /// Chart style
        #[arg(long, value_enum, default_value = "bar")]
        style: ChartStyle,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Load document exports (JSON array or JSON Lines) into the database
    Import {
        /// Article export file
        #[arg(long)]
        articles: Option<PathBuf>,

        /// Category configuration export file
        #[arg(long)]
        categories: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    setup_tracing(&config.logging.level, &config.logging.format, cli.verbose)?;

    tracing::info!(
        database = %config.database.sqlite_path.display(),
        "slovostat starting"
    );

    let ctx = AppContext::new(config);

    match cli.command {
        Commands::Categories => commands::categories(&ctx)?,

        Commands::Range => commands::range(&ctx)?,

        Commands::Articles {
            category,
            from,
            to,
            format,
        } => {
            tracing::info!(
                category = %category,
                from = ?from,
                to = ?to,
                "Starting articles command"
            );
            commands::articles(&ctx, &category, from, to, format)?;
        }

        Commands::Trends {
            category,
            from,
            to,
            top,
            aggregation,
            style,
            format,
        } => {
            tracing::info!(
                category = ?category,
                from = ?from,
                to = ?to,
                top = top.count(),
                %aggregation,
                "Starting trends command"
            );
            let params = commands::TrendParams {
                category,
                from,
                to,
                top,
                aggregation,
                style,
                format,
            };
            commands::trends(&ctx, params)?;
        }

        Commands::Import {
            articles,
            categories,
        } => {
            tracing::info!(
                articles = ?articles,
                categories = ?categories,
                "Starting import command"
            );
            commands::import(&ctx, articles, categories)?;
        }
    }

    tracing::debug!("slovostat completed successfully");
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    config.apply_env().context("Invalid environment configuration")?;

    if let Some(path) = &cli.database {
        config.database.sqlite_path = path.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn setup_tracing(level: &str, format: &str, verbose: bool) -> Result<()> {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else if verbose {
        tracing_subscriber::EnvFilter::new("slovostat=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("slovostat={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}
