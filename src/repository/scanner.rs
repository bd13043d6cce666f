// file: src/repository/scanner.rs
// description: Directory walking and repository discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::DiscoveryConfig;
use crate::repository::classifier::{Classification, PathClassifier};
use crate::repository::filter::KeywordFilter;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub struct RepoScanner {
    classifier: PathClassifier,
    filter: KeywordFilter,
    follow_symlinks: bool,
}

impl RepoScanner {
    pub fn new(config: &DiscoveryConfig, keywords: Option<Vec<String>>) -> Self {
        Self {
            classifier: PathClassifier::new(
                config.git_dir.clone(),
                config.exclude_patterns.clone(),
            ),
            filter: KeywordFilter::new(keywords),
            follow_symlinks: config.follow_symlinks,
        }
    }

    /// Walk the tree under `root` once and collect every repository root that
    /// survives exclusion and keyword filtering, in traversal order.
    ///
    /// Descent stops at any repository root, so a repository nested inside
    /// another repository's working tree is never reported separately.
    /// Unreadable entries are skipped; partial results are valid.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        info!("Searching for Git repositories under {}", root.display());
        let mut repos = Vec::new();

        let mut walker = WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .into_iter();

        loop {
            let entry = match walker.next() {
                None => break,
                Some(Err(err)) => {
                    warn!("Skipping unreadable entry: {}", err);
                    continue;
                }
                Some(Ok(entry)) => entry,
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            match self.classifier.classify(entry.path()) {
                Classification::NotRepository => {}
                Classification::Excluded => {
                    walker.skip_current_dir();
                }
                Classification::Repository => {
                    if self.filter.matches(entry.path()) {
                        repos.push(entry.path().to_path_buf());
                    } else {
                        debug!("Keyword filter rejected {}", entry.path().display());
                    }
                    walker.skip_current_dir();
                }
            }
        }

        info!(
            "Discovered {} repositories under {}",
            repos.len(),
            root.display()
        );
        repos
    }
}
