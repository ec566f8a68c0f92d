//! Domain layer: entities and hierarchy logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod display;
pub mod entities;
pub mod error;
pub mod hierarchy;

pub use arena::{TreeArena, TreeNode};
pub use builder::HierarchyBuilder;
pub use display::TreeDisplay;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use hierarchy::{EmployeePath, Hierarchy};

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Falls back to the input when a variable is undefined.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
