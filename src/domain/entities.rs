//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat employee record as supplied by a data source.
///
/// The record names its own id and the ids of the employees it manages.
/// Subordinates are resolved to tree nodes by the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    /// Ids of directly managed employees, in reporting order
    #[serde(default, rename = "employees")]
    pub subordinates: Vec<String>,
}

impl EmployeeRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, subordinates: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subordinates: subordinates.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Data payload for tree nodes: the identity of one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: String,
    pub name: String,
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.name)
    }
}

impl From<&EmployeeRecord> for Employee {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
        }
    }
}

/// What the builder does with a subordinate id that has no record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Fail the build
    #[default]
    Reject,
    /// Drop the reference and log a warning
    Skip,
}
