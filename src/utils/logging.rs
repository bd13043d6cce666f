// file: src/utils/logging.rs
// description: Tracing subscriber initialization with optional ANSI coloring and file output

use crate::error::Result;
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logger(colored_output: bool, verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::new(level);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_ansi(colored_output);

    let registry = tracing_subscriber::registry().with(filter).with(fmt_layer);

    match log_file {
        Some(path) => {
            let file = std::fs::File::options().create(true).append(true).open(path)?;
            let file_layer = fmt::layer()
                .with_target(false)
                .compact()
                .with_ansi(false)
                .with_writer(Arc::new(file));
            registry.with(file_layer).init();
        }
        None => registry.init(),
    }

    Ok(())
}

/// Dated log file name in the working directory, one file per day.
pub fn default_log_file() -> PathBuf {
    PathBuf::from(format!(
        "git_syncup_{}.log",
        chrono::Local::now().format("%Y%m%d")
    ))
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}
