//! Error types for corpus loading

use std::path::PathBuf;
use thiserror::Error;

/// Corpus loading errors
///
/// Only the corpus root itself can fail a run. Problems with individual
/// skill directories are skipped, never surfaced as errors.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus root does not exist
    #[error("{} not found", path.display())]
    RootNotFound {
        /// Requested root path
        path: PathBuf,
    },

    /// The corpus root exists but is not a directory
    #[error("{} is not a directory", path.display())]
    NotADirectory {
        /// Requested root path
        path: PathBuf,
    },

    /// The corpus root could not be listed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Directory being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_not_found_message() {
        let err = CorpusError::RootNotFound {
            path: PathBuf::from("/nowhere/skills"),
        };
        assert_eq!(err.to_string(), "/nowhere/skills not found");
    }
}
