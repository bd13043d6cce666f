// file: src/repository/classifier.rs
// description: repository root detection and reserved-path exclusion
// reference: path-based classification over directory entries

use std::path::Path;
use tracing::warn;

/// Outcome of inspecting one directory during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The directory does not directly contain the metadata directory.
    NotRepository,
    /// A repository root disqualified by a reserved substring.
    Excluded,
    /// A repository root eligible for synchronization.
    Repository,
}

pub struct PathClassifier {
    git_dir: String,
    exclude_patterns: Vec<String>,
}

impl PathClassifier {
    pub fn new(git_dir: String, exclude_patterns: Vec<String>) -> Self {
        Self {
            git_dir,
            exclude_patterns,
        }
    }

    /// Classify a directory. A repository root directly contains the metadata
    /// directory; a `.git` file (submodule, linked worktree) does not qualify.
    pub fn classify(&self, dir: &Path) -> Classification {
        let metadata_dir = dir.join(&self.git_dir);

        if !metadata_dir.is_dir() {
            return Classification::NotRepository;
        }

        let metadata_path = metadata_dir.to_string_lossy();
        if self
            .exclude_patterns
            .iter()
            .any(|pattern| metadata_path.contains(pattern.as_str()))
        {
            warn!(
                "Path {} is skipped as it contains a reserved keyword",
                metadata_dir.display()
            );
            return Classification::Excluded;
        }

        Classification::Repository
    }
}
