// file: src/sync/orchestrator.rs
// description: sequential per-repository synchronization with failure isolation
// reference: batch update workflow over discovered repositories

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::sync::executor::CommandRunner;
use crate::sync::report::{RepoStatus, RunReport};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

const GIT_PROBE_COMMAND: &str = "git --version";

/// Walks the discovered repository list in order and runs the update command
/// sequence against each one. One repository's failure never stops the batch;
/// within a repository, a failed step never skips the following step.
pub struct SyncOrchestrator {
    runner: CommandRunner,
    steps: Vec<String>,
}

impl SyncOrchestrator {
    pub fn new(config: &SyncConfig) -> Self {
        let mut steps = Vec::new();
        if !config.reconcile_command.trim().is_empty() {
            steps.push(config.reconcile_command.clone());
        }
        steps.push(config.fetch_command.clone());

        Self {
            runner: CommandRunner::new(config.command_timeout_secs),
            steps,
        }
    }

    /// Verify the Git client resolves on the search path. This is the only
    /// fatal dependency; the optional reconciliation helper is probed per
    /// repository instead and fails soft.
    pub fn preflight(&self) -> Result<()> {
        check_client(&self.runner, GIT_PROBE_COMMAND)
    }

    pub fn sync_all(&self, repos: &[PathBuf], report: &mut RunReport) {
        for repo in repos {
            let status = self.sync_repo(repo);
            report.record(status);
        }
    }

    fn sync_repo(&self, repo: &Path) -> RepoStatus {
        debug!("Updating {}", repo.display());
        let mut failed_steps = 0usize;

        for step in &self.steps {
            match self.runner.run(step, repo) {
                Ok(result) if result.success => {
                    let output = result.output_lossy();
                    if !output.trim().is_empty() {
                        info!("Command output: {}", output.trim_end());
                    }
                }
                Ok(result) => {
                    failed_steps += 1;
                    error!(
                        "Error running \"{}\" in {}: {}",
                        step,
                        repo.display(),
                        result.output_lossy().trim_end()
                    );
                }
                Err(err) => {
                    failed_steps += 1;
                    error!("Error running \"{}\" in {}: {}", step, repo.display(), err);
                }
            }
        }

        info!("Finished updating {}", repo.display());

        if failed_steps == 0 {
            RepoStatus::Done
        } else {
            RepoStatus::DoneWithErrors
        }
    }
}

fn check_client(runner: &CommandRunner, probe: &str) -> Result<()> {
    match runner.run(probe, Path::new(".")) {
        Ok(result) if result.success => Ok(()),
        Ok(_) | Err(_) => {
            let program = probe.split_whitespace().next().unwrap_or(probe);
            Err(SyncError::MissingDependency(program.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn make_repo(root: &Path, name: &str) -> PathBuf {
        let repo = root.join(name);
        fs::create_dir_all(repo.join(".git")).unwrap();
        repo
    }

    fn orchestrator(reconcile: &str, fetch: &str) -> SyncOrchestrator {
        SyncOrchestrator::new(&SyncConfig {
            reconcile_command: reconcile.to_string(),
            fetch_command: fetch.to_string(),
            command_timeout_secs: 0,
        })
    }

    #[test]
    fn missing_client_fails_preflight() {
        let runner = CommandRunner::new(0);
        let result = check_client(&runner, "definitely-not-a-real-binary-0xf00 --version");
        assert!(matches!(result, Err(SyncError::MissingDependency(_))));
    }

    #[cfg(unix)]
    #[test]
    fn all_steps_succeeding_marks_repo_done() {
        let temp = TempDir::new().unwrap();
        let repos = vec![make_repo(temp.path(), "one")];
        let mut report = RunReport::begin();
        report.discovered = repos.len();

        orchestrator("true", "echo synced").sync_all(&repos, &mut report);

        assert_eq!(report.processed, 1);
        assert_eq!(report.with_errors, 0);
    }

    #[cfg(unix)]
    #[test]
    fn failing_step_does_not_stop_the_batch() {
        let temp = TempDir::new().unwrap();
        let repos = vec![make_repo(temp.path(), "one"), make_repo(temp.path(), "two")];
        let mut report = RunReport::begin();
        report.discovered = repos.len();

        orchestrator("false", "echo synced").sync_all(&repos, &mut report);

        assert_eq!(report.processed, 2);
        assert_eq!(report.with_errors, 2);
    }

    #[cfg(unix)]
    #[test]
    fn missing_helper_binary_fails_soft() {
        let temp = TempDir::new().unwrap();
        let repos = vec![make_repo(temp.path(), "one")];
        let mut report = RunReport::begin();
        report.discovered = repos.len();

        orchestrator("definitely-not-a-real-binary-0xf00", "echo synced")
            .sync_all(&repos, &mut report);

        assert_eq!(report.processed, 1);
        assert_eq!(report.with_errors, 1);
    }

    #[test]
    fn empty_reconcile_command_skips_the_step() {
        let orchestrator = orchestrator("", "echo synced");
        assert_eq!(orchestrator.steps.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn discovered_repositories_are_all_processed() {
        let temp = TempDir::new().unwrap();
        make_repo(temp.path(), "alpha");
        make_repo(temp.path(), "beta/.terraform");
        make_repo(temp.path(), "gamma/delta");

        let config = crate::config::Config::default_config();
        let scanner = crate::repository::RepoScanner::new(&config.discovery, None);
        let repos = scanner.discover(temp.path());

        let mut report = RunReport::begin();
        report.discovered = repos.len();
        orchestrator("", "echo synced").sync_all(&repos, &mut report);
        report.finish();

        assert_eq!(report.discovered, 2);
        assert_eq!(report.processed, 2);
        assert_eq!(report.with_errors, 0);
    }
}
