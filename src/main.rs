//! Trap-Sieve main entry point
//!
//! This is the command-line interface for the Trap-Sieve crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use trap_sieve::config::{load_config_with_hash, Config, CorpusKind};
use trap_sieve::crawler::crawl;
use trap_sieve::frontier::Frontier;
use trap_sieve::output::{print_statistics, CrawlStatistics};
use trap_sieve::url::UrlClassifier;
use tracing_subscriber::EnvFilter;

/// Trap-Sieve: a restricted-domain crawler that filters crawler traps
///
/// Trap-Sieve walks a site from its seed URLs, keeps only links inside the
/// allowed domain that do not look like traps, and writes analytics reports
/// about what it found when the frontier runs dry.
#[derive(Parser, Debug)]
#[command(name = "trap-sieve")]
#[command(version)]
#[command(about = "A restricted-domain crawler with trap filtering", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "check")]
    dry_run: bool,

    /// Classify the given URLs with the configured policy and exit
    #[arg(long, value_name = "URL", num_args = 1..)]
    check: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)
    } else if !cli.check.is_empty() {
        handle_check(&config, &cli.check)
    } else {
        handle_crawl(&config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("trap_sieve=info,warn"),
            1 => EnvFilter::new("trap_sieve=debug,info"),
            2 => EnvFilter::new("trap_sieve=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Trap-Sieve Dry Run ===\n");

    println!("Crawler Configuration:");
    match config.crawler.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unlimited"),
    }
    println!("  Progress interval: {}", config.crawler.progress_interval);

    println!("\nCorpus:");
    match config.corpus.kind {
        CorpusKind::Disk => {
            println!("  Kind: disk");
            println!("  Root: {}", config.corpus.root.as_deref().unwrap_or("-"));
        }
        CorpusKind::Http => {
            println!("  Kind: http");
            println!("  User agent: {}", config.corpus.user_agent);
            println!("  Politeness delay: {}ms", config.corpus.politeness_delay_ms);
            println!("  Timeout: {}s", config.corpus.timeout_secs);
        }
    }

    let classifier = UrlClassifier::from_policy(&config.policy)?;
    println!("\nPolicy:");
    println!("  Allowed domain: {}", config.policy.allowed_domain);
    println!(
        "  Blocked extensions: {}",
        config.policy.blocked_extensions.len()
    );
    println!("  Rules: {}", classifier.rule_names().join(", "));

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    match &config.output.stopwords_path {
        Some(path) => println!("  Stopwords: {}", path),
        None => println!("  Stopwords: bundled"),
    }

    println!("\nSeeds ({}):", config.crawler.seeds.len());
    for seed in &config.crawler.seeds {
        println!("  - {} [{}]", seed, classifier.classify(seed));
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --check mode: classifies URLs without crawling
fn handle_check(config: &Config, urls: &[String]) -> anyhow::Result<()> {
    let classifier = UrlClassifier::from_policy(&config.policy)?;

    for url in urls {
        println!("{} {}", classifier.classify(url), url);
    }

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Allowed domain: {}, seeds: {}",
        config.policy.allowed_domain,
        config.crawler.seeds.len()
    );

    let outcome = crawl(config).await.context("crawl failed")?;
    tracing::info!("Crawl completed successfully");

    let stats = CrawlStatistics::from_state(
        &outcome.state,
        outcome.pages_crawled,
        outcome.frontier.len(),
    );
    println!();
    print_statistics(&stats);

    Ok(())
}
