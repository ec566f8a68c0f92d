//! Conversion of hierarchies into printable trees.

use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::arena::{TreeArena, TreeNode};
use crate::domain::hierarchy::Hierarchy;

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for TreeArena {
    fn to_tree_string(&self) -> Tree<String> {
        let preorder: Vec<(Index, &TreeNode)> = self.iter().collect();
        if preorder.is_empty() {
            return Tree::new("Empty hierarchy".to_string());
        }

        // Reverse pre-order finishes every report before its manager
        let mut pending: HashMap<Index, Vec<Tree<String>>> = HashMap::new();
        let mut root_tree = None;
        for &(node_idx, node) in preorder.iter().rev() {
            let mut leaves = pending.remove(&node_idx).unwrap_or_default();
            leaves.reverse();
            let subtree = Tree::new(node.data.to_string()).with_leaves(leaves);
            match node.parent {
                Some(parent) => pending.entry(parent).or_default().push(subtree),
                None => root_tree = Some(subtree),
            }
        }
        root_tree.unwrap_or_else(|| Tree::new("Empty hierarchy".to_string()))
    }
}

impl TreeDisplay for Hierarchy {
    fn to_tree_string(&self) -> Tree<String> {
        self.tree().to_tree_string()
    }
}
