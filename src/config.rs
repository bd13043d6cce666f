// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SyncError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Metadata directory name marking a repository root.
    pub git_dir: String,
    /// Reserved substrings that unconditionally disqualify a candidate path.
    pub exclude_patterns: Vec<String>,
    pub follow_symlinks: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Reconciliation helper run before fetching. Empty string skips the step.
    pub reconcile_command: String,
    pub fetch_command: String,
    /// Upper bound per command invocation in seconds. 0 disables the bound.
    pub command_timeout_secs: u64,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("GIT_SYNCUP")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            discovery: DiscoveryConfig {
                git_dir: ".git".to_string(),
                exclude_patterns: vec![".terraform".to_string()],
                follow_symlinks: false,
            },
            sync: SyncConfig {
                reconcile_command: "git up".to_string(),
                fetch_command: "git fetch origin --prune".to_string(),
                command_timeout_secs: 0,
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.discovery.git_dir.is_empty() {
            return Err(SyncError::Config(
                "discovery.git_dir must not be empty".to_string(),
            ));
        }

        if self.discovery.git_dir.contains(std::path::MAIN_SEPARATOR) {
            return Err(SyncError::Config(
                "discovery.git_dir must be a plain directory name".to_string(),
            ));
        }

        if self.sync.fetch_command.trim().is_empty() {
            return Err(SyncError::Config(
                "sync.fetch_command must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.discovery.git_dir, ".git");
        assert_eq!(config.discovery.exclude_patterns, vec![".terraform"]);
        assert_eq!(config.sync.fetch_command, "git fetch origin --prune");
    }

    #[test]
    fn empty_fetch_command_is_rejected() {
        let mut config = Config::default_config();
        config.sync.fetch_command = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn git_dir_with_separator_is_rejected() {
        let mut config = Config::default_config();
        config.discovery.git_dir = format!("nested{}git", std::path::MAIN_SEPARATOR);
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[discovery]
git_dir = ".git"
exclude_patterns = [".terraform", "node_modules"]
follow_symlinks = false

[sync]
reconcile_command = ""
fetch_command = "git fetch --all --prune"
command_timeout_secs = 30
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.discovery.exclude_patterns.len(), 2);
        assert_eq!(config.sync.reconcile_command, "");
        assert_eq!(config.sync.command_timeout_secs, 30);
    }
}
