// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod repository;
pub mod sync;
pub mod utils;

pub use config::{Config, DiscoveryConfig, SyncConfig};
pub use error::{Result, SyncError};
pub use repository::{Classification, KeywordFilter, PathClassifier, RepoScanner};
pub use sync::{CommandOutput, CommandRunner, RepoStatus, RunReport, SyncOrchestrator};
pub use utils::Validator;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _scanner = RepoScanner::new(&config.discovery, None);
        let _orchestrator = SyncOrchestrator::new(&config.sync);
    }
}
