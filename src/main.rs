//! Novel-Trawler main entry point
//!
//! This is the command-line interface for the Novel-Trawler chapter crawler.

use anyhow::Context;
use clap::Parser;
use novel_trawler::config::{load_config_with_hash, validate, Config};
use novel_trawler::crawler::{run_crawl, CrawlOutcome};
use novel_trawler::output::{book_file_path, write_book};
use novel_trawler::url::build_search_url;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Novel-Trawler: fetch a serialized novel chapter by chapter
///
/// Searches the configured site for a book, walks its chapters from the latest
/// back to the first, and writes the whole book as a text file.
#[derive(Parser, Debug)]
#[command(name = "novel-trawler")]
#[command(version)]
#[command(about = "Fetch a serialized novel chapter by chapter", long_about = None)]
struct Cli {
    /// Name of the book to search for
    #[arg(value_name = "BOOK")]
    book: String,

    /// Path to TOML configuration file (built-in site rules when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory to write the book into (overrides the config)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Maximum number of chapter pages to visit (overrides the config)
    #[arg(long, value_name = "N")]
    max_chapters: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show what would be crawled without opening any page
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load(cli.config.as_deref())?;

    if let Some(max_chapters) = cli.max_chapters {
        config.crawler.max_chapters = max_chapters;
    }
    if let Some(output) = &cli.output {
        config.output.directory = output.display().to_string();
    }
    validate(&config).context("invalid settings")?;

    if cli.dry_run {
        handle_dry_run(&config, &cli.book)
    } else {
        handle_crawl(&config, &cli.book).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("novel_trawler=info,warn"),
            1 => EnvFilter::new("novel_trawler=debug,info"),
            2 => EnvFilter::new("novel_trawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the built-in defaults when none is given
fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using built-in site rules");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, book: &str) -> anyhow::Result<()> {
    println!("=== Novel-Trawler Dry Run ===\n");

    println!("Search:");
    println!("  Book: {}", book);
    println!("  URL: {}", build_search_url(&config.site.search_url, book));

    println!("\nCrawler Configuration:");
    println!("  Max chapters: {}", config.crawler.max_chapters);

    println!("\nSession:");
    println!("  Renderer: {:?}", config.session.renderer);
    println!("  JavaScript enabled: {}", config.session.javascript_enabled);
    println!("  Timeout: {}s", config.session.timeout_secs);
    println!("  User agent: {}", config.session.user_agent);

    println!("\nCookies ({}):", config.session.cookies.len());
    for cookie in &config.session.cookies {
        println!(
            "  - {}={} ({}{})",
            cookie.name, cookie.value, cookie.domain, cookie.path
        );
    }

    println!("\nSite Rules:");
    println!("  Result entry: {}", config.site.result_entry);
    println!("  Result title: {}", config.site.result_title);
    println!("  Result link: {}", config.site.result_link);
    println!("  Chapter title: {}", config.site.chapter_title);
    println!("  Chapter body: {}", config.site.chapter_body);
    println!("  Previous links: {}", config.site.prev_links.join(" | "));
    println!("  Stripped: {}", config.site.strip.join(", "));

    let path = book_file_path(Path::new(&config.output.directory), book)?;
    println!("\nOutput:");
    println!("  File: {}", path.display());

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, book: &str) -> anyhow::Result<()> {
    match run_crawl(config, book).await? {
        CrawlOutcome::Found(found) => {
            let path = write_book(&found, Path::new(&config.output.directory), book)?;
            println!(
                "✓ {} ({} chapters) written to {}",
                found.title,
                found.chapters.len(),
                path.display()
            );
        }
        CrawlOutcome::NotFound => {
            println!("No book found for '{}'", book);
        }
    }

    Ok(())
}
