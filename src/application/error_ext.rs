//! Error conversion helpers for data file access
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Attach the data file path to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_data_file(&path)?;
    /// ```
    fn with_data_file(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_data_file(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::DataFileOpen {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
