use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use password_recovery::codec;
use password_recovery::monitor::utils::{format_number, format_rate, TimeProjection};
use password_recovery::search::{self, SearchOutcome, WordlistStatus, PROJECTION_RATE};
use password_recovery::{CharsetPreset, SearchConfig, DEFAULT_BATCH_SIZE, VERSION};

#[derive(Parser)]
#[command(name = "password-recovery")]
#[command(version = VERSION)]
#[command(about = "Multi-threaded brute-force recovery of a known plaintext password")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover a password by wordlist scan and exhaustive search
    Recover {
        /// The password to recover
        #[arg(short, long)]
        target: String,
        /// Character set to enumerate
        #[arg(short, long, value_enum, default_value = "digits")]
        charset: CharsetPreset,
        /// Maximum candidate length
        #[arg(short, long)]
        max_length: usize,
        /// Wordlist to scan before the exhaustive search
        #[arg(short, long)]
        wordlist: Option<PathBuf>,
        /// Worker threads (defaults to available cores)
        #[arg(long)]
        threads: Option<usize>,
        /// Candidates evaluated per inner batch
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: u64,
    },
    /// Run a recovery described by a JSON configuration file
    Run {
        /// Path to the JSON configuration
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = match cli.command {
        Commands::Recover {
            target,
            charset,
            max_length,
            wordlist,
            threads,
            batch_size,
        } => SearchConfig {
            target,
            charset,
            max_length,
            wordlist,
            num_threads: threads.unwrap_or_else(num_cpus::get),
            batch_size,
        },
        Commands::Run { config } => SearchConfig::from_file(&config)
            .with_context(|| format!("Failed to load configuration from {}", config.display()))?,
    };
    config.validate().context("Invalid configuration")?;

    print_projection(&config);
    let outcome = search::run(&config)?;
    print_report(&outcome);

    Ok(())
}

/// Space size and projected duration for the largest configured length
fn print_projection(config: &SearchConfig) {
    let total = codec::cardinality(config.max_length, config.charset().len());
    println!(
        "Total combinations for length {}: {}",
        config.max_length, total
    );

    let p = TimeProjection::from_total(&total, PROJECTION_RATE);
    println!(
        "Estimated time to try them all at {} candidates/second:",
        format_number(PROJECTION_RATE)
    );
    println!("  Seconds: {:.2}", p.seconds);
    println!("  Minutes: {:.2}", p.minutes);
    println!("  Hours:   {:.2}", p.hours);
    println!("  Days:    {:.2}", p.days);
    println!("  Years:   {:.2}", p.years);
}

fn print_report(outcome: &SearchOutcome) {
    println!("{}", "=".repeat(50));

    match &outcome.wordlist {
        WordlistStatus::Skipped => {}
        WordlistStatus::Found { position } => {
            println!("Found in wordlist at position {}", position);
        }
        WordlistStatus::NotFound { lines } => {
            println!("Not in wordlist ({} lines, position -1)", lines);
        }
        WordlistStatus::Failed(err) => {
            eprintln!("Wordlist scan failed: {}", err);
        }
    }

    match &outcome.found {
        Some(candidate) => println!("Password found: {}", candidate),
        None => println!("Password not found"),
    }
    println!("Total time: {:.2}s", outcome.elapsed.as_secs_f64());
    println!("Tested candidates: {}", format_number(outcome.tested));
    println!(
        "Average rate: {} candidates/second",
        format_rate(outcome.throughput())
    );
}
