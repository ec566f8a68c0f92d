//! Hierarchy service
//!
//! Loads employee records from a JSON data file and builds the management tree.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Employee, EmployeeRecord, Hierarchy, HierarchyBuilder, UnresolvedPolicy};
use crate::infrastructure::traits::FileSystem;

/// Decode a JSON array of employee records.
///
/// `path` only labels the error.
pub fn decode_records(content: &str, path: &Path) -> ApplicationResult<Vec<EmployeeRecord>> {
    serde_json::from_str(content).map_err(|e| ApplicationError::DataFileDecode {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Service for loading hierarchies and answering manager queries.
pub struct HierarchyService {
    fs: Arc<dyn FileSystem>,
    policy: UnresolvedPolicy,
}

impl HierarchyService {
    /// Create a new hierarchy service.
    pub fn new(fs: Arc<dyn FileSystem>, policy: UnresolvedPolicy) -> Self {
        Self { fs, policy }
    }

    /// Read and decode the records of a data file, in file order.
    #[instrument(level = "debug", skip(self))]
    pub fn load_records(&self, data_file: &Path) -> ApplicationResult<Vec<EmployeeRecord>> {
        let content = self.fs.read_to_string(data_file).with_data_file(data_file)?;
        let records = decode_records(&content, data_file)?;
        debug!("load_records: {} records", records.len());
        Ok(records)
    }

    /// Build the hierarchy described by a data file.
    ///
    /// The first record in the file is the root.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, data_file: &Path) -> ApplicationResult<Hierarchy> {
        let records = self.load_records(data_file)?;
        let hierarchy = HierarchyBuilder::new()
            .with_policy(self.policy)
            .with_source(data_file.display().to_string())
            .build(&records)?;
        Ok(hierarchy)
    }

    /// Load a data file and find the closest common manager of two employees.
    pub fn find_closest_manager(
        &self,
        data_file: &Path,
        one: &str,
        two: &str,
    ) -> ApplicationResult<Employee> {
        let hierarchy = self.load(data_file)?;
        let manager = hierarchy.closest_manager(one, two)?;
        Ok(manager.clone())
    }
}
