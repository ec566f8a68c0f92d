//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy rules.
/// These are independent of how the employee records were obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no root employee: the record list is empty")]
    UnresolvedRoot,

    #[error("could not find employee: {0}")]
    EmployeeNotFound(String),

    #[error("hierarchy is inconsistent: {0}")]
    InternalInconsistency(String),

    #[error("duplicate employee id: {0}")]
    DuplicateEmployee(String),

    #[error("employee {manager} lists unknown subordinate: {subordinate}")]
    UnresolvedSubordinate { manager: String, subordinate: String },

    #[error("employee reports to more than one manager: {0}")]
    MultipleManagers(String),

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("employee is not reachable from the root: {0}")]
    Unreachable(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
