//! Storage layer for the expense tracker
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod expenses;
pub mod file_io;

pub use expenses::{ExpenseRepository, ExpenseStore, STORE_VERSION};
pub use file_io::{read_json_value, to_json_string, write_json_atomic};

use crate::config::paths::TrackerPaths;

/// Main storage coordinator that provides access to the repositories
pub struct Storage {
    paths: TrackerPaths,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance
    ///
    /// Nothing is read or written until a repository is used.
    pub fn new(paths: TrackerPaths) -> Self {
        Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation_is_lazy() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone());

        assert_eq!(storage.expenses.path(), paths.expenses_file());
        assert!(!paths.expenses_file().exists());

        storage.expenses.load().unwrap();
        assert!(paths.expenses_file().exists());
    }
}
