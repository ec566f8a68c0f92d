//! Management hierarchy and ancestry queries.

use std::collections::HashMap;

use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::{TreeArena, TreeNode};
use crate::domain::entities::Employee;
use crate::domain::error::{DomainError, DomainResult};

/// Node indices from the root down to a target, both inclusive.
pub type EmployeePath = Vec<Index>;

/// A built management tree with its own id index.
///
/// Read-only after construction; each instance owns its index, so several
/// hierarchies can live side by side.
#[derive(Debug)]
pub struct Hierarchy {
    tree: TreeArena,
    index: HashMap<String, Index>,
    employee_count: usize,
    source: String,
}

impl Hierarchy {
    pub(crate) fn new(tree: TreeArena, index: HashMap<String, Index>, source: String) -> Self {
        let employee_count = index.len();
        Self {
            tree,
            index,
            employee_count,
            source,
        }
    }

    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.employee_count
    }

    /// Always false for a built hierarchy; kept alongside `len()`.
    pub fn is_empty(&self) -> bool {
        self.employee_count == 0
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn root(&self) -> Option<&Employee> {
        self.tree
            .root()
            .and_then(|idx| self.tree.get_node(idx))
            .map(|node| &node.data)
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.index
            .get(id)
            .and_then(|&idx| self.tree.get_node(idx))
            .map(|node| &node.data)
    }

    /// Direct manager of `id`; `None` for the root.
    pub fn manager_of(&self, id: &str) -> DomainResult<Option<&Employee>> {
        let idx = self.lookup(id)?;
        Ok(self
            .tree
            .get_node(idx)
            .and_then(|node| node.parent)
            .and_then(|parent| self.tree.get_node(parent))
            .map(|node| &node.data))
    }

    /// Employees reporting directly to `id`, in listing order.
    pub fn reports_of(&self, id: &str) -> DomainResult<Vec<&Employee>> {
        let idx = self.lookup(id)?;
        let node = self.node(idx)?;
        node.children
            .iter()
            .map(|&child| self.node(child).map(|n| &n.data))
            .collect()
    }

    /// Employees along a path, root first.
    pub fn resolve_path(&self, path: &[Index]) -> DomainResult<Vec<&Employee>> {
        path.iter()
            .map(|&idx| self.node(idx).map(|n| &n.data))
            .collect()
    }

    /// All root-to-`target` paths, found by depth-first search.
    ///
    /// On a tree this is a single path, or none when `target` is unknown.
    /// The walk keeps its own stack, so reporting chains of any depth work.
    #[instrument(level = "trace", skip(self))]
    pub fn paths_to(&self, target: &str) -> Vec<EmployeePath> {
        let mut paths = Vec::new();
        let Some(root) = self.tree.root() else {
            return paths;
        };

        let mut path: EmployeePath = Vec::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            let Some(node) = self.tree.get_node(current) else {
                continue;
            };
            path.truncate(depth);
            path.push(current);
            if node.data.id == target {
                paths.push(path.clone());
                continue;
            }
            // Reverse so children are visited in listing order
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        paths
    }

    /// Closest common manager of two employees.
    ///
    /// For two different employees this is the deepest employee that manages
    /// both, or one of the two when it manages the other. Asking for the same
    /// employee twice yields its direct manager, and the root for the root.
    ///
    /// Every pair of paths is compared; on a tree that is a single pair.
    #[instrument(level = "debug", skip(self))]
    pub fn closest_manager(&self, one: &str, two: &str) -> DomainResult<&Employee> {
        let id_one = self.lookup(one)?;
        self.lookup(two)?;

        let paths_one = self.paths_to(one);
        let paths_two = self.paths_to(two);
        let include_targets = one != two;

        let mut best: Option<(usize, Index)> = None;
        for (path_one, path_two) in paths_one.iter().cartesian_product(paths_two.iter()) {
            if let Some((cost, candidate)) = lowest_common(path_one, path_two, include_targets) {
                if best.map_or(true, |(min, _)| cost < min) {
                    best = Some((cost, candidate));
                }
            }
        }

        match best {
            Some((cost, idx)) => {
                debug!("closest manager found at cost {}", cost);
                self.node(idx).map(|n| &n.data)
            }
            // The root has nobody above it
            None if !include_targets && self.tree.root() == Some(id_one) => {
                self.node(id_one).map(|n| &n.data)
            }
            None => Err(DomainError::InternalInconsistency(format!(
                "no common manager for {} and {}",
                one, two
            ))),
        }
    }

    fn lookup(&self, id: &str) -> DomainResult<Index> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| DomainError::EmployeeNotFound(id.to_string()))
    }

    fn node(&self, idx: Index) -> DomainResult<&TreeNode> {
        self.tree.get_node(idx).ok_or_else(|| {
            DomainError::InternalInconsistency(format!("dangling node index {:?}", idx))
        })
    }
}

/// Cheapest node shared by two root paths, with its cost.
///
/// The cost counts the edges from the candidate down to both targets, minus
/// one. Positions of `path_one` are scanned root to leaf and only a strictly
/// cheaper match replaces the current one, so the first minimum wins. With
/// `include_targets` unset the last position of each path is skipped.
///
/// A node occurs at most once per path, so each position of `path_one` has
/// at most one partner in `path_two`, found through a position map.
fn lowest_common(
    path_one: &[Index],
    path_two: &[Index],
    include_targets: bool,
) -> Option<(usize, Index)> {
    if path_one.is_empty() || path_two.is_empty() {
        return None;
    }
    let skip = usize::from(!include_targets);
    let prefix_one = &path_one[..path_one.len() - skip];
    let prefix_two = &path_two[..path_two.len() - skip];

    let positions_two: HashMap<Index, usize> = prefix_two
        .iter()
        .enumerate()
        .map(|(y, &idx)| (idx, y))
        .collect();

    let mut best: Option<(usize, Index)> = None;
    for (x, node_one) in prefix_one.iter().enumerate() {
        let Some(&y) = positions_two.get(node_one) else {
            continue;
        };
        let down_one = path_one.len() - 1 - x;
        let down_two = path_two.len() - 1 - y;
        // Both zero only when the two targets are the same node
        let cost = (down_one + down_two).saturating_sub(1);
        if best.map_or(true, |(min, _)| cost < min) {
            best = Some((cost, *node_one));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::HierarchyBuilder;
    use crate::domain::entities::EmployeeRecord;

    fn hierarchy() -> Hierarchy {
        let records = vec![
            EmployeeRecord::new("A", "Alice", &["B", "G"]),
            EmployeeRecord::new("B", "Bob", &["F", "Q", "P"]),
            EmployeeRecord::new("G", "Grace", &["L"]),
            EmployeeRecord::new("F", "Frank", &["H"]),
            EmployeeRecord::new("H", "Heidi", &["X", "T1"]),
            EmployeeRecord::new("Q", "Quinn", &[]),
            EmployeeRecord::new("P", "Peggy", &[]),
            EmployeeRecord::new("L", "Lena", &[]),
            EmployeeRecord::new("X", "Xena", &[]),
            EmployeeRecord::new("T1", "Trent", &[]),
        ];
        HierarchyBuilder::new().build(&records).unwrap()
    }

    fn ids<'a>(h: &'a Hierarchy, path: &[Index]) -> Vec<&'a str> {
        h.resolve_path(path)
            .unwrap()
            .into_iter()
            .map(|e| e.id.as_str())
            .collect()
    }

    #[test]
    fn given_leaf_when_enumerating_paths_then_single_root_path() {
        let h = hierarchy();
        let paths = h.paths_to("T1");
        assert_eq!(paths.len(), 1);
        assert_eq!(ids(&h, &paths[0]), vec!["A", "B", "F", "H", "T1"]);
    }

    #[test]
    fn given_root_when_enumerating_paths_then_path_is_root_only() {
        let h = hierarchy();
        let paths = h.paths_to("A");
        assert_eq!(paths.len(), 1);
        assert_eq!(ids(&h, &paths[0]), vec!["A"]);
    }

    #[test]
    fn given_unknown_id_when_enumerating_paths_then_empty() {
        assert!(hierarchy().paths_to("Z1").is_empty());
    }

    #[test]
    fn given_repeated_queries_then_paths_are_stable() {
        let h = hierarchy();
        assert_eq!(h.paths_to("X"), h.paths_to("X"));
    }

    #[test]
    fn given_self_query_on_root_then_returns_root() {
        let h = hierarchy();
        assert_eq!(h.closest_manager("A", "A").unwrap().id, "A");
    }

    #[test]
    fn given_self_query_on_employee_then_returns_direct_manager() {
        let h = hierarchy();
        assert_eq!(h.closest_manager("T1", "T1").unwrap().id, "H");
        assert_eq!(h.closest_manager("B", "B").unwrap().id, "A");
    }

    #[test]
    fn given_manager_and_report_then_manager_wins() {
        let h = hierarchy();
        assert_eq!(h.closest_manager("F", "X").unwrap().id, "F");
        assert_eq!(h.closest_manager("X", "F").unwrap().id, "F");
    }

    #[test]
    fn given_missing_first_id_then_names_it_even_if_second_missing() {
        let err = hierarchy().closest_manager("Z1", "Z2").unwrap_err();
        assert_eq!(err, DomainError::EmployeeNotFound("Z1".into()));
    }

    #[test]
    fn given_paths_when_scanning_without_targets_then_skips_last_position() {
        let h = hierarchy();
        let l = &h.paths_to("L")[0];
        let g = &h.paths_to("G")[0];
        let (_, idx) = lowest_common(l, g, false).unwrap();
        assert_eq!(h.resolve_path(&[idx]).unwrap()[0].id, "A");
        let (cost, idx) = lowest_common(l, g, true).unwrap();
        assert_eq!(h.resolve_path(&[idx]).unwrap()[0].id, "G");
        assert_eq!(cost, 0);
    }

    #[test]
    fn given_manager_and_reports_then_lookups_resolve() {
        let h = hierarchy();
        assert_eq!(h.manager_of("H").unwrap().unwrap().id, "F");
        assert!(h.manager_of("A").unwrap().is_none());
        assert_eq!(h.reports_of("H").unwrap().len(), 2);
        assert_eq!(h.get("G").unwrap().name, "Grace");
        assert_eq!(h.root().unwrap().id, "A");
        assert_eq!(h.len(), 10);
        assert!(!h.is_empty());
        assert_eq!(h.depth(), 5);
    }

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_lowercase(),
        }
    }

    /// `Z` sits in the arena but is detached from the root `A`.
    fn detached_hierarchy() -> Hierarchy {
        let mut tree = TreeArena::new();
        let z = tree.insert_node(employee("Z"), None);
        let a = tree.insert_node(employee("A"), None);
        let index = HashMap::from([("Z".to_string(), z), ("A".to_string(), a)]);
        Hierarchy::new(tree, index, "detached".to_string())
    }

    #[test]
    fn given_detached_employee_when_finding_closest_manager_then_internal_inconsistency() {
        let h = detached_hierarchy();
        assert_eq!(h.root().unwrap().id, "A");

        let err = h.closest_manager("A", "Z").unwrap_err();
        assert!(matches!(err, DomainError::InternalInconsistency(_)));
        let err = h.closest_manager("Z", "A").unwrap_err();
        assert!(matches!(err, DomainError::InternalInconsistency(_)));
    }

    #[test]
    fn given_index_into_foreign_arena_when_resolving_then_internal_inconsistency() {
        let mut foreign = TreeArena::new();
        let root = foreign.insert_node(employee("R"), None);
        foreign.insert_node(employee("S"), Some(root));
        let ghost = foreign.insert_node(employee("GHOST"), Some(root));

        let mut tree = TreeArena::new();
        let a = tree.insert_node(employee("A"), None);
        let index = HashMap::from([("A".to_string(), a), ("GHOST".to_string(), ghost)]);
        let h = Hierarchy::new(tree, index, "dangling".to_string());

        let err = h.reports_of("GHOST").unwrap_err();
        assert!(matches!(err, DomainError::InternalInconsistency(_)));
        let err = h.resolve_path(&[a, ghost]).unwrap_err();
        assert!(matches!(err, DomainError::InternalInconsistency(_)));
    }

    #[test]
    fn given_deep_reporting_chain_when_querying_then_walks_without_recursion() {
        const DEPTH: usize = 100_000;
        let ids: Vec<String> = (0..DEPTH).map(|i| format!("E{}", i)).collect();
        let records: Vec<EmployeeRecord> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| EmployeeRecord {
                id: id.clone(),
                name: id.to_lowercase(),
                subordinates: ids.get(i + 1).cloned().into_iter().collect(),
            })
            .collect();
        let h = HierarchyBuilder::new().build(&records).unwrap();

        let deepest = &ids[DEPTH - 1];
        let above = &ids[DEPTH - 2];
        assert_eq!(h.depth(), DEPTH);
        assert_eq!(h.paths_to(deepest)[0].len(), DEPTH);
        assert_eq!(&h.closest_manager(deepest, above).unwrap().id, above);
        assert_eq!(&h.closest_manager(deepest, deepest).unwrap().id, above);
        assert_eq!(h.closest_manager("E0", deepest).unwrap().id, "E0");
    }
}
