//! Command-line tool for consistent nested cloze markup in Anki.
//!
//! Applies clozenest transforms to a collection through AnkiConnect, to text on
//! stdin, and reviews the change logs a run leaves behind.

mod check;

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clozenest::{ReplaceMode, Transform};
use clozenest_batch::{BatchDriver, ChangeLog, Config, ConnectStore, RunReport, parse_log};
use tracing::{debug, info, warn};

/// Consistent nested cloze markup for Anki notes.
#[derive(Parser, Debug)]
#[command(name = "clozenest")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// AnkiConnect URL, overriding the configuration
    #[arg(long, global = true)]
    url: Option<String>,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Transform parameters that override the `[transform]` section.
#[derive(clap::Args, Debug, Default)]
struct TransformArgs {
    /// Highest base index kept when collapsing nested clozes
    #[arg(long)]
    threshold: Option<u64>,

    /// Highest cloze index kept by the clip transform
    #[arg(long)]
    clip_max: Option<u64>,

    /// Maximum number of wrapping clozes generated per note
    #[arg(long)]
    limit: Option<usize>,

    /// Wrap the first occurrence of each cloze or all of them
    #[arg(long)]
    replace: Option<ReplaceMode>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply a transform to every matching note in Anki
    Apply {
        /// consistent, collapse, dedupe, clip, hints or generate
        transform: Transform,

        /// Anki search query, overriding the configuration
        #[arg(long)]
        query: Option<String>,

        /// Notes read per request, overriding the configuration
        #[arg(long)]
        batch_size: Option<usize>,

        /// Log changes without writing them to Anki
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Where to write the change log
        #[arg(long, default_value = "modified_notes.txt")]
        log: PathBuf,

        /// Print the run report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        transform_args: TransformArgs,
    },

    /// Transform text read from stdin and write it to stdout
    Text {
        /// consistent, collapse, dedupe, clip, hints or generate
        transform: Transform,

        #[command(flatten)]
        transform_args: TransformArgs,
    },

    /// Check that a change log only moved cloze markup around
    Check {
        /// The change log to check
        log: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            Config::from_file(path)?
        }
        None => Config::default(),
    };
    if let Some(url) = &args.url {
        config.anki.url = url.clone();
    }

    match args.command {
        Command::Apply {
            transform,
            query,
            batch_size,
            dry_run,
            log,
            json,
            transform_args,
        } => {
            if let Some(query) = query {
                config.batch.query = query;
            }
            if let Some(batch_size) = batch_size {
                config.batch.batch_size = batch_size;
            }
            override_transform(&mut config, &transform_args);
            config.validate()?;

            let report = apply(&config, transform, dry_run, &log).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report, dry_run, &log);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Text {
            transform,
            transform_args,
        } => {
            override_transform(&mut config, &transform_args);
            config.validate()?;

            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            let output = config.transformer().apply_text(transform, &input)?;

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { log } => {
            let text = std::fs::read_to_string(&log)?;
            let parsed = parse_log(&text)?;

            let mut stdout = std::io::stdout().lock();
            let differing = check::write_report(&parsed, &mut stdout)?;
            stdout.flush()?;

            if differing > 0 {
                warn!(blocks = differing, "Content changed beyond cloze markup");
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn override_transform(config: &mut Config, args: &TransformArgs) {
    if let Some(threshold) = args.threshold {
        config.transform.base_index_threshold = threshold;
    }
    if let Some(clip_max) = args.clip_max {
        config.transform.clip_max = clip_max;
    }
    if let Some(limit) = args.limit {
        config.transform.combo_limit = limit;
    }
    if let Some(replace) = args.replace {
        config.transform.replace = replace;
    }
}

async fn apply(
    config: &Config,
    transform: Transform,
    dry_run: bool,
    log_path: &Path,
) -> Result<RunReport, Box<dyn std::error::Error>> {
    let store = ConnectStore::new(config.client()?);
    let version = store.client().misc().version().await?;
    info!(url = %store.client().url(), version, "Connected to AnkiConnect");

    let lookup = match config.note_type_lookup() {
        Some(mut lookup) => {
            lookup.refresh(&store).await?;
            Some(lookup)
        }
        None => None,
    };

    let transformer = config.transformer();
    let mut driver = BatchDriver::new(&store, &transformer);
    if let Some(lookup) = &lookup {
        driver = driver.with_lookup(lookup);
    }

    let mut options = config.run_options();
    options.dry_run = dry_run;

    let mut log = ChangeLog::new(BufWriter::new(File::create(log_path)?))?;
    let report = driver.run(transform, &options, &mut log).await?;
    log.finish(&report.failures)?;

    Ok(report)
}

fn print_summary(report: &RunReport, dry_run: bool, log_path: &Path) {
    let verb = if dry_run { "would be modified" } else { "modified" };
    println!("Scanned:   {}", report.scanned);
    println!("Modified:  {} ({})", report.modified, verb);
    println!("Unchanged: {}", report.unchanged());
    println!("Skipped:   {}", report.skipped);
    println!("Failed:    {}", report.failures.len());
    for failure in &report.failures {
        println!("  note {}: {}", failure.note_id, failure.error);
    }
    println!("Change log: {}", log_path.display());
}
