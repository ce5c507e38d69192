mod builder;
mod check;
mod config;
mod error;
mod input;
mod policy;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::builder::{WordListBuilder, WriteReport};
use crate::config::{Config, ConfigOverrides};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Build a canonical, sorted word list from a semicolon-annotated dictionary"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Optional path to a configuration TOML file overriding defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize a dictionary file and write the word list
    Build(BuildArgs),
    /// Verify that an existing word list is sorted, deduplicated and valid
    Check(CheckArgs),
    /// Write the effective settings to the config file
    InitConfig(InitConfigArgs),
}

#[derive(Debug, Args)]
struct PolicyArgs {
    /// Override the maximum accepted word length
    #[arg(long = "max-len")]
    max_len: Option<usize>,

    /// Override the regular expression a word must match
    #[arg(long)]
    pattern: Option<String>,
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Dictionary file to read (one entry per line, `word;annotation`)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Destination for the word list; overwritten if present
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    policy: PolicyArgs,

    /// Normalize and report the word count without writing the output
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Word list to verify; defaults to the configured destination
    #[arg(name = "PATH")]
    path: Option<PathBuf>,

    #[command(flatten)]
    policy: PolicyArgs,
}

#[derive(Debug, Args)]
struct InitConfigArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    force: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();
    init_tracing(cli.verbose)?;
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::debug!("Ignoring unreadable .env file: {}", err),
    }

    let overrides = match &cli.command {
        Command::Build(args) => ConfigOverrides {
            source: args.input.clone(),
            destination: args.output.clone(),
            max_word_len: args.policy.max_len,
            word_pattern: args.policy.pattern.clone(),
        },
        Command::Check(args) => ConfigOverrides {
            destination: args.path.clone(),
            max_word_len: args.policy.max_len,
            word_pattern: args.policy.pattern.clone(),
            ..Default::default()
        },
        Command::InitConfig(_) => ConfigOverrides::default(),
    };

    let config = Config::load(cli.config.clone(), overrides)?;

    match cli.command {
        Command::Build(args) => run_build(&config, args.dry_run),
        Command::Check(_) => run_check(&config),
        Command::InitConfig(args) => {
            let path = config.save(args.force)?;
            tracing::info!("wrote config to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    // RUST_LOG still wins when set; the flag only moves the default.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| anyhow::anyhow!("Failed to set tracing subscriber: {err}"))
}

fn run_build(config: &Config, dry_run: bool) -> Result<ExitCode> {
    if let Some(report) = build_word_list(config, dry_run)? {
        tracing::info!("wrote {} words to {}", report.count, report.path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Normalizes the configured source and writes the destination. Returns
/// `None` on a dry run, where the destination is left untouched.
fn build_word_list(config: &Config, dry_run: bool) -> Result<Option<WriteReport>> {
    let builder = WordListBuilder::new(config.policy()?);
    tracing::debug!(
        "Building word list from {} (max length {}, pattern {})",
        config.source.display(),
        builder.policy().max_len(),
        builder.policy().pattern()
    );

    let words = builder
        .normalize_file(&config.source)
        .with_context(|| format!("failed to build word list from {}", config.source.display()))?;

    if words.is_empty() {
        tracing::warn!("no words accepted from {}", config.source.display());
    } else {
        tracing::debug!(
            "First word {:?}, last word {:?}",
            words.words().first(),
            words.words().last()
        );
    }

    if dry_run {
        println!(
            "[DRY RUN] {} words would be written to {}",
            words.len(),
            config.destination.display()
        );
        return Ok(None);
    }

    let report = words.write(&config.destination)?;
    Ok(Some(report))
}

fn run_check(config: &Config) -> Result<ExitCode> {
    let policy = config.policy()?;
    let report = check::check_file(&config.destination, &policy)?;

    if report.is_canonical() {
        tracing::info!(
            "{} is canonical ({} words)",
            report.path.display(),
            report.words
        );
        return Ok(ExitCode::SUCCESS);
    }

    for violation in &report.violations {
        tracing::warn!("{}: {}", report.path.display(), violation);
    }
    tracing::error!(
        "{} has {} problem(s) across {} words",
        report.path.display(),
        report.violations.len(),
        report.words
    );
    Ok(ExitCode::FAILURE)
}
