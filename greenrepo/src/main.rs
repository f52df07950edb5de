// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Command-line interface for the greenrepo binary.
//!
//! The CLI analyzes a live repository through the GitHub API, scores a
//! profile saved as JSON without any network access, and renders badge
//! artifacts for a known score. Logs go to stderr; results go to stdout.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
    time::Duration
};

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use greenrepo::{
    Collector, DEFAULT_BADGE_SLUG, Error, GithubHost, GreenRepoConfig, RepositoryId,
    RepositoryProfile, ScoreResult, analyze, io_error, load_config, score_with, write_badge_assets
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Top-level CLI options parsed from user input.
#[derive(Debug, Parser)]
#[command(name = "greenrepo", version, about = "Score the sustainability of a repository")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only log warnings and errors, and hide the progress spinner.
    #[arg(long = "quiet", short = 'q', global = true, action = ArgAction::SetTrue)]
    quiet: bool
}

#[derive(Debug, Subcommand)]
/// Supported commands exposed by the CLI.
enum Command {
    /// Collect and score a repository hosted on GitHub.
    Analyze(AnalyzeArgs),
    /// Score a repository profile stored as JSON.
    Score(ScoreArgs),
    /// Render badge artifacts for a score.
    Badge(BadgeArgs)
}

/// Output encoding for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Text
}

#[derive(Debug, Args)]
/// Arguments accepted by the `analyze` subcommand.
struct AnalyzeArgs {
    /// Repository to analyze.
    #[arg(value_name = "OWNER/REPO")]
    repository: String,

    /// Path to the YAML configuration file.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Token used to authenticate against the GitHub API.
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output encoding.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool,

    /// Also write badge artifacts for the result into this directory.
    #[arg(long = "badge-dir", value_name = "DIR")]
    badge_dir: Option<PathBuf>
}

#[derive(Debug, Args)]
/// Arguments accepted by the `score` subcommand.
struct ScoreArgs {
    /// JSON file containing a repository profile.
    #[arg(long = "profile", value_name = "PATH")]
    profile: PathBuf,

    /// Path to the YAML configuration file.
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output encoding.
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool
}

#[derive(Debug, Args)]
/// Arguments accepted by the `badge` subcommand.
struct BadgeArgs {
    /// Score between 0 and 100.
    #[arg(long = "score", value_parser = clap::value_parser!(u8).range(0..=100))]
    score: u8,

    /// Base name of the generated files.
    #[arg(long = "slug", value_name = "NAME", default_value = DEFAULT_BADGE_SLUG)]
    slug: String,

    /// Directory that will receive the SVG and manifest artifacts.
    #[arg(long = "output", value_name = "DIR", default_value = "badges")]
    output: PathBuf
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    if let Err(error) = run(cli).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

fn init_tracing(quiet: bool) {
    let default_directive = if quiet { "greenrepo=warn" } else { "greenrepo=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, collection, serialization and badge errors.
async fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Analyze(args) => run_analyze(args, cli.quiet).await,
        Command::Score(args) => run_score(args),
        Command::Badge(args) => run_badge(args)
    }
}

async fn run_analyze(args: AnalyzeArgs, quiet: bool) -> Result<(), Error> {
    let config = load_optional_config(args.config.as_deref())?;
    let id: RepositoryId = args.repository.parse()?;
    let host = GithubHost::new(
        &config.host.api_base,
        args.token.as_deref(),
        config.host.retry.clone()
    )?;
    let collector = Collector::from_config(host, &config.host);

    let spinner = spinner(quiet)?;
    spinner.set_message(format!("Analyzing {id}..."));
    let outcome = analyze(&collector, &id, &config.scoring).await;
    spinner.finish_and_clear();
    let analysis = outcome?;

    if let Some(directory) = args.badge_dir.as_deref() {
        let assets = write_badge_assets(analysis.result.score, &id.to_string(), directory)?;
        info!("Badge written to {}", assets.svg_path.display());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match args.format {
        OutputFormat::Json => write_json(&mut handle, &analysis, args.pretty),
        OutputFormat::Text => write_text(&mut handle, &id.to_string(), &analysis.result)
    }
}

fn run_score(args: ScoreArgs) -> Result<(), Error> {
    let result = score_profile_file(&args.profile, args.config.as_deref())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match args.format {
        OutputFormat::Json => write_json(&mut handle, &result, args.pretty),
        OutputFormat::Text => {
            let heading = args.profile.display().to_string();
            write_text(&mut handle, &heading, &result)
        }
    }
}

fn score_profile_file(path: &Path, config: Option<&Path>) -> Result<ScoreResult, Error> {
    let config = load_optional_config(config)?;
    let contents = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let profile: RepositoryProfile = serde_json::from_str(&contents)?;

    Ok(score_with(&profile, &config.scoring))
}

fn run_badge(args: BadgeArgs) -> Result<(), Error> {
    let assets = write_badge_assets(args.score, &args.slug, &args.output)?;
    info!(
        "Badge written to {} and {}",
        assets.svg_path.display(),
        assets.manifest_path.display()
    );

    Ok(())
}

fn load_optional_config(path: Option<&Path>) -> Result<GreenRepoConfig, Error> {
    match path {
        Some(path) => load_config(path),
        None => Ok(GreenRepoConfig::default())
    }
}

fn spinner(quiet: bool) -> Result<ProgressBar, Error> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .map_err(|e| Error::service(format!("invalid progress template: {e}")))?;
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(120));

    Ok(spinner)
}

fn write_json<W, T>(writer: &mut W, value: &T, pretty: bool) -> Result<(), Error>
where
    W: Write,
    T: Serialize
{
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)?;
    } else {
        serde_json::to_writer(&mut *writer, value)?;
    }

    writeln!(writer).map_err(stdout_error)
}

fn write_text<W: Write>(writer: &mut W, heading: &str, result: &ScoreResult) -> Result<(), Error> {
    let breakdown = &result.breakdown;
    let mut report = format!(
        "{heading}: {} / 100, grade {} ({})\n\
         language deduction: {}\n\
         compute deduction:  {}\n\
         bloat deduction:    {}\n",
        result.score,
        result.grade,
        result.grade.label(),
        breakdown.language_deduction,
        breakdown.compute_deduction,
        breakdown.bloat_deduction
    );
    for reason in &breakdown.reasons {
        report.push_str(&format!("  - {reason}\n"));
    }
    for reason in &breakdown.positive_reasons {
        report.push_str(&format!("  + {reason}\n"));
    }

    writer.write_all(report.as_bytes()).map_err(stdout_error)
}

fn stdout_error(source: io::Error) -> Error {
    io_error(Path::new("<stdout>"), source)
}
