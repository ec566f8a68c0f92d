//! Hierarchy builder: turns flat employee records into a rooted tree.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::arena::TreeArena;
use crate::domain::entities::{Employee, EmployeeRecord, UnresolvedPolicy};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::hierarchy::Hierarchy;

/// Constructs a [`Hierarchy`] from employee records.
///
/// The first record is the root. Every record is indexed before any
/// subordinate is linked, so a manager may list employees whose records
/// appear later in the input.
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    policy: UnresolvedPolicy,
    source: String,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: UnresolvedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Label of the data source, kept on the hierarchy as-is.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    #[instrument(level = "debug", skip(self, records), fields(records = records.len()))]
    pub fn build(&self, records: &[EmployeeRecord]) -> DomainResult<Hierarchy> {
        if records.is_empty() {
            return Err(DomainError::UnresolvedRoot);
        }

        let positions = index_records(records)?;
        let children = self.link_subordinates(records, &positions)?;
        let (tree, index) = build_tree(records, &children);

        // Anything the walk from the root did not reach is a second component
        if let Some(orphan) = records.iter().find(|r| !index.contains_key(&r.id)) {
            return Err(DomainError::Unreachable(orphan.id.clone()));
        }

        debug!("built hierarchy with {} employees", index.len());
        Ok(Hierarchy::new(tree, index, self.source.clone()))
    }

    /// Resolve every listed subordinate to a record position.
    ///
    /// Returns the child positions of each record, in listing order.
    fn link_subordinates(
        &self,
        records: &[EmployeeRecord],
        positions: &HashMap<&str, usize>,
    ) -> DomainResult<Vec<Vec<usize>>> {
        let mut has_manager = vec![false; records.len()];
        let mut children = Vec::with_capacity(records.len());

        for record in records {
            let mut resolved = Vec::with_capacity(record.subordinates.len());
            for subordinate in &record.subordinates {
                let Some(&pos) = positions.get(subordinate.as_str()) else {
                    match self.policy {
                        UnresolvedPolicy::Reject => {
                            return Err(DomainError::UnresolvedSubordinate {
                                manager: record.id.clone(),
                                subordinate: subordinate.clone(),
                            });
                        }
                        UnresolvedPolicy::Skip => {
                            warn!(
                                "skipping unknown subordinate {} of {}",
                                subordinate, record.id
                            );
                            continue;
                        }
                    }
                };
                if pos == 0 {
                    return Err(DomainError::CycleDetected(subordinate.clone()));
                }
                if has_manager[pos] {
                    return Err(DomainError::MultipleManagers(subordinate.clone()));
                }
                has_manager[pos] = true;
                resolved.push(pos);
            }
            children.push(resolved);
        }
        Ok(children)
    }
}

/// First pass: map every id to its record position.
fn index_records(records: &[EmployeeRecord]) -> DomainResult<HashMap<&str, usize>> {
    let mut positions = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if positions.insert(record.id.as_str(), pos).is_some() {
            return Err(DomainError::DuplicateEmployee(record.id.clone()));
        }
    }
    Ok(positions)
}

/// Second pass: insert nodes depth-first from the root.
///
/// Every position has at most one manager and the root has none, so each
/// reachable record is visited exactly once.
fn build_tree(
    records: &[EmployeeRecord],
    children: &[Vec<usize>],
) -> (TreeArena, HashMap<String, Index>) {
    let mut tree = TreeArena::with_capacity(records.len());
    let mut index = HashMap::with_capacity(records.len());
    let mut stack: Vec<(usize, Option<Index>)> = vec![(0, None)];

    while let Some((pos, parent_idx)) = stack.pop() {
        let record = &records[pos];
        let current_idx = tree.insert_node(Employee::from(record), parent_idx);
        index.insert(record.id.clone(), current_idx);

        // Reverse so children are inserted in listing order
        for &child in children[pos].iter().rev() {
            stack.push((child, Some(current_idx)));
        }
    }

    (tree, index)
}
