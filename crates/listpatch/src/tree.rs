//! A simple ordered tree whose edits are addressed by [`TreePath`].

use crate::apply::ApplyError;
use crate::diff_patch::Snapshot;
use crate::op::PatchOp;
use crate::tree_path::TreePath;
use serde::{Deserialize, Serialize};

/// A node holding a value and an ordered list of child subtrees.
///
/// The node itself acts as the tree root; patch operations address its
/// descendants by path, never the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode<T> {
    pub value: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn new(value: T) -> Self {
        TreeNode {
            value,
            children: Vec::new(),
        }
    }

    pub fn with_children(value: T, children: Vec<TreeNode<T>>) -> Self {
        TreeNode { value, children }
    }

    /// The node at `path`, the receiver itself for the root path.
    pub fn node_at(&self, path: &TreePath) -> Option<&TreeNode<T>> {
        let mut node = self;
        for component in path.components() {
            node = node.children.get(*component)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &TreePath) -> Option<&mut TreeNode<T>> {
        let mut node = self;
        for component in path.components() {
            node = node.children.get_mut(*component)?;
        }
        Some(node)
    }

    /// Insert `node` so that it ends up at `path`, shifting later
    /// siblings right. The last path component may equal the parent's
    /// current child count, appending.
    pub fn insert(&mut self, path: &TreePath, node: TreeNode<T>) -> Result<(), ApplyError> {
        let (parent_path, position) = split_edit_path(path)?;
        let parent = self
            .node_at_mut(&parent_path)
            .ok_or_else(|| ApplyError::PathNotFound { path: path.clone() })?;
        if position > parent.children.len() {
            return Err(ApplyError::PathNotFound { path: path.clone() });
        }
        parent.children.insert(position, node);
        Ok(())
    }

    /// Remove and return the subtree at `path`, shifting later
    /// siblings left.
    pub fn remove(&mut self, path: &TreePath) -> Result<TreeNode<T>, ApplyError> {
        let (parent_path, position) = split_edit_path(path)?;
        let parent = self
            .node_at_mut(&parent_path)
            .ok_or_else(|| ApplyError::PathNotFound { path: path.clone() })?;
        if position >= parent.children.len() {
            return Err(ApplyError::PathNotFound { path: path.clone() });
        }
        Ok(parent.children.remove(position))
    }

    /// Replace the subtree at `path` in place, returning the old one.
    pub fn replace(&mut self, path: &TreePath, node: TreeNode<T>) -> Result<TreeNode<T>, ApplyError> {
        if path.is_empty() {
            return Err(ApplyError::RootPath);
        }
        let slot = self
            .node_at_mut(path)
            .ok_or_else(|| ApplyError::PathNotFound { path: path.clone() })?;
        Ok(std::mem::replace(slot, node))
    }

    /// Apply a single patch operation to the tree in place.
    pub fn apply(&mut self, op: PatchOp<TreeNode<T>, TreePath>) -> Result<(), ApplyError> {
        match op {
            PatchOp::Insert { element, at } => self.insert(&at, element),
            PatchOp::Delete { at } => self.remove(&at).map(|_| ()),
            PatchOp::Update { at, element } => self.replace(&at, element).map(|_| ()),
            PatchOp::Move { from, to } => {
                let node = self.remove(&from)?;
                self.insert(&to, node)
            }
        }
    }

    /// All descendant paths in depth-first pre-order, root excluded.
    pub fn paths(&self) -> Vec<TreePath> {
        let mut out = Vec::new();
        collect_paths(self, &TreePath::root(), &mut out);
        out
    }
}

fn split_edit_path(path: &TreePath) -> Result<(TreePath, usize), ApplyError> {
    match (path.parent(), path.last()) {
        (Some(parent), Some(position)) => Ok((parent, position)),
        _ => Err(ApplyError::RootPath),
    }
}

fn collect_paths<T>(node: &TreeNode<T>, prefix: &TreePath, out: &mut Vec<TreePath>) {
    for (rank, child) in node.children.iter().enumerate() {
        let path = prefix.child(rank);
        out.push(path.clone());
        collect_paths(child, &path, out);
    }
}

impl<T> Snapshot<TreePath> for TreeNode<T> {
    type Element = TreeNode<T>;

    fn element_at(&self, index: &TreePath) -> Option<&TreeNode<T>> {
        self.node_at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: i32) -> TreeNode<i32> {
        TreeNode::new(value)
    }

    fn sample() -> TreeNode<i32> {
        TreeNode::with_children(
            0,
            vec![
                TreeNode::with_children(1, vec![leaf(11), leaf(12)]),
                leaf(2),
            ],
        )
    }

    #[test]
    fn node_at_walks_nested_paths() {
        let tree = sample();
        assert_eq!(tree.node_at(&TreePath::root()).unwrap().value, 0);
        assert_eq!(tree.node_at(&TreePath::from([0, 1])).unwrap().value, 12);
        assert!(tree.node_at(&TreePath::from([0, 2])).is_none());
    }

    #[test]
    fn insert_shifts_later_siblings() {
        let mut tree = sample();
        tree.insert(&TreePath::from([1]), leaf(99)).unwrap();
        let values: Vec<i32> = tree.children.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![1, 99, 2]);
    }

    #[test]
    fn remove_returns_the_subtree() {
        let mut tree = sample();
        let removed = tree.remove(&TreePath::from([0])).unwrap();
        assert_eq!(removed.value, 1);
        assert_eq!(removed.children.len(), 2);
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn root_cannot_be_edited() {
        let mut tree = sample();
        assert_eq!(
            tree.remove(&TreePath::root()).unwrap_err(),
            ApplyError::RootPath
        );
        assert_eq!(
            tree.insert(&TreePath::root(), leaf(5)).unwrap_err(),
            ApplyError::RootPath
        );
    }

    #[test]
    fn move_relocates_a_subtree() {
        let mut tree = sample();
        tree.apply(PatchOp::Move {
            from: TreePath::from([0, 1]),
            to: TreePath::from([1, 0]),
        })
        .unwrap();
        assert_eq!(tree.node_at(&TreePath::from([1, 0])).unwrap().value, 12);
        assert_eq!(tree.node_at(&TreePath::from([0])).unwrap().children.len(), 1);
    }

    #[test]
    fn paths_enumerate_depth_first() {
        let tree = sample();
        let paths = tree.paths();
        let expect: Vec<TreePath> = vec![
            TreePath::from([0]),
            TreePath::from([0, 0]),
            TreePath::from([0, 1]),
            TreePath::from([1]),
        ];
        assert_eq!(paths, expect);
    }
}
