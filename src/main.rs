// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use git_syncup::utils::logging;
use git_syncup::{Config, RepoScanner, RunReport, SyncOrchestrator, Validator};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "git_syncup")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Tool to update local Git repositories from their remotes", long_about = None)]
struct Cli {
    /// Root directory to start the search for Git repositories
    #[arg(short, long, value_name = "DIR")]
    path: PathBuf,

    /// Keywords to filter repositories by (substring match on the path)
    #[arg(short, long, num_args = 1.., value_name = "KEYWORD")]
    keywords: Option<Vec<String>>,

    /// Also append log output to a dated file in the working directory
    #[arg(long, action = ArgAction::SetTrue)]
    log: bool,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log.then(logging::default_log_file);
    logging::init_logger(cli.color, cli.verbose, log_file.as_deref())
        .context("Failed to initialize logging")?;
    if let Some(path) = &log_file {
        info!("Logging to file {}", path.display());
    }

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    Validator::validate_directory(&cli.path).context("Invalid root path")?;
    let root = cli
        .path
        .canonicalize()
        .with_context(|| format!("Cannot resolve root path {}", cli.path.display()))?;

    let orchestrator = SyncOrchestrator::new(&config.sync);
    orchestrator
        .preflight()
        .context("Git client is required to sync repositories")?;

    let mut report = RunReport::begin();

    let scanner = RepoScanner::new(&config.discovery, cli.keywords);
    let repos = scanner.discover(&root);
    report.discovered = repos.len();

    if repos.is_empty() {
        warn!("No Git repositories found to be synced with Git remote.");
    } else {
        info!("Start syncing Git repositories.");
        orchestrator.sync_all(&repos, &mut report);
    }

    report.finish();
    report.log_summary();

    if report.with_errors > 0 {
        println!(
            "{}",
            logging::format_warning(&format!(
                "Synced {} repositories, {} finished with errors",
                report.processed, report.with_errors
            ))
        );
    } else {
        println!(
            "{}",
            logging::format_success(&format!(
                "Synced {} repositories in {}",
                report.processed,
                report.elapsed_human()
            ))
        );
    }

    Ok(())
}
