use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forumscan::companies::load_companies;
use forumscan::config::Config;
use forumscan::models::ReportKind;
use forumscan::pipeline::{ForumScanner, Report};

#[derive(Parser)]
#[command(
    name = "forumscan",
    version,
    about = "Stock forum crawler with keyword sentiment and fundamental scoring",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
}

/// Options shared by both report types
#[derive(clap::Args)]
struct ScanArgs {
    /// Markdown file with `[Name](forum URL)` links
    #[arg(long)]
    companies: PathBuf,

    /// Only threads started in the last N days
    #[arg(short, long)]
    days: Option<i64>,

    /// Maximum simultaneous requests
    #[arg(long)]
    concurrency: Option<usize>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Positive/negative thread sentiment per company
    Sentiment(ScanArgs),

    /// Weighted fundamental keyword score per company
    Fundamental(ScanArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    let (kind, args) = match cli.command {
        Commands::Sentiment(args) => (ReportKind::Sentiment, args),
        Commands::Fundamental(args) => (ReportKind::Fundamental, args),
    };

    if let Some(days) = args.days {
        config.filter.recency_days = days;
    }
    if let Some(concurrency) = args.concurrency {
        config.crawler.max_concurrent_requests = concurrency;
    }
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        report = kind.as_str(),
        companies = %args.companies.display(),
        days = config.filter.recency_days,
        concurrency = config.crawler.max_concurrent_requests,
        "forumscan starting"
    );

    let companies = load_companies(&args.companies, &config.directory)
        .with_context(|| format!("Failed to load companies from {}", args.companies.display()))?;
    if companies.is_empty() {
        tracing::warn!("No companies found in directory file");
    }

    let scanner = ForumScanner::new(&config, kind).context("Failed to build scanner")?;
    let report = scanner.run(&companies).await;

    if report.is_empty() {
        tracing::warn!("Report is empty");
    }

    write_report(&report, args.output.as_deref())?;

    tracing::info!("forumscan completed successfully");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env();
            Ok(config)
        }
        None => Config::from_env(),
    }
}

fn write_report(report: &Report, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = report.rows.len(), "Report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("forumscan=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("forumscan={level},warn"))
            .context("Invalid log level")?
    };

    // stdout carries the report, logs go to stderr
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
