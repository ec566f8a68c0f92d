use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::Employee;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Employee carried by this node
    pub data: Employee,
    /// Index of the manager node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of directly managed employees, in reporting order
    pub children: Vec<Index>,
}

/// Arena-based tree structure holding one management hierarchy.
///
/// Nodes reference each other through generational indices, so the tree
/// owns every node and no node can be shared between two parents.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            arena: Arena::with_capacity(n),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: Employee, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order iterator starting at the root, children left to right.
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    /// Number of levels in the tree; 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.into_iter().map(|r| (r, 1)).collect();

        while let Some((node_idx, level)) = stack.pop() {
            if let Some(node) = self.get_node(node_idx) {
                max_depth = max_depth.max(level);
                for &child in &node.children {
                    stack.push((child, level + 1));
                }
            }
        }
        max_depth
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_lowercase(),
        }
    }

    #[test]
    fn given_empty_arena_then_has_no_root_and_zero_depth() {
        let tree = TreeArena::new();
        assert!(tree.root().is_none());
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn given_linked_nodes_when_iterating_then_visits_preorder() {
        let mut tree = TreeArena::new();
        let a = tree.insert_node(employee("A"), None);
        let b = tree.insert_node(employee("B"), Some(a));
        tree.insert_node(employee("C"), Some(a));
        tree.insert_node(employee("D"), Some(b));

        let order: Vec<&str> = tree.iter().map(|(_, n)| n.data.id.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "D", "C"]);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.get_node(b).unwrap().parent, Some(a));
    }
}
