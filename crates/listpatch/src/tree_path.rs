use serde::{Deserialize, Serialize};
use std::fmt;

/// Hierarchical index into a tree-shaped collection: the sequence of
/// child positions leading from the root to a node.
///
/// Paths order lexicographically, which matches depth-first iteration
/// order of the tree: `[0] < [0, 3] < [1]`. The empty path addresses
/// the root itself and is not a valid operation target.
///
/// # Examples
///
/// ```
/// use listpatch::TreePath;
///
/// let a = TreePath::from([0, 3]);
/// let b = TreePath::from([1]);
/// assert!(a < b);
/// assert!(TreePath::from([0]).is_ancestor_of(&a));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TreePath(Vec<usize>);

impl TreePath {
    /// The empty path, addressing the tree root.
    pub fn root() -> Self {
        TreePath(Vec::new())
    }

    pub fn new(components: Vec<usize>) -> Self {
        TreePath(components)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn components(&self) -> &[usize] {
        &self.0
    }

    /// Child position at `level`, where level 0 is directly under the root.
    pub fn component(&self, level: usize) -> Option<usize> {
        self.0.get(level).copied()
    }

    /// Position among the siblings of the addressed node.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the parent node, or `None` for the root path.
    pub fn parent(&self) -> Option<TreePath> {
        if self.0.is_empty() {
            None
        } else {
            Some(TreePath(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Path extended by one more child position.
    pub fn child(&self, position: usize) -> TreePath {
        let mut components = self.0.clone();
        components.push(position);
        TreePath(components)
    }

    /// `true` if `self` is a proper prefix of `other`.
    pub fn is_ancestor_of(&self, other: &TreePath) -> bool {
        self.0.len() < other.0.len() && other.0[..self.0.len()] == self.0[..]
    }

    /// Path with the component at `level` offset by `delta`.
    ///
    /// Panics if `level` is out of range or the component would go
    /// negative; both are caller programming errors.
    pub fn shifted_at(&self, level: usize, delta: isize) -> TreePath {
        let mut components = self.0.clone();
        let shifted = components[level] as isize + delta;
        assert!(shifted >= 0, "tree path component shifted below zero");
        components[level] = shifted as usize;
        TreePath(components)
    }
}

impl From<Vec<usize>> for TreePath {
    fn from(components: Vec<usize>) -> Self {
        TreePath(components)
    }
}

impl<const N: usize> From<[usize; N]> for TreePath {
    fn from(components: [usize; N]) -> Self {
        TreePath(components.to_vec())
    }
}

impl From<&[usize]> for TreePath {
    fn from(components: &[usize]) -> Self {
        TreePath(components.to_vec())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}
