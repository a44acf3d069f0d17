//! Incremental collection diffing and patch generation.
//!
//! The engine connects a stream of primitive edits (insert / delete /
//! update / move) made against an ordered collection to two value
//! types describing the change:
//!
//! - [`CollectionDiff`] - an order-independent bundle of index lists
//!   describing how one snapshot became another. Diffs are folded
//!   incrementally: each recorded edit renumbers the pending entries
//!   so the diff always equals "original snapshot vs. current state".
//! - a *patch* - an ordered sequence of [`PatchOp`] / [`DiffOp`]
//!   values that, applied one by one against the live intermediate
//!   state, reproduces the destination collection.
//!
//! Index arithmetic is delegated to an [`IndexStrider`], so the same
//! algorithms serve flat integer indices ([`LinearStrider`]) and
//! hierarchical tree paths ([`TreePathStrider`] over [`TreePath`]).
//! Transformations the tree strider cannot express positionally
//! degrade to a Reset diff, a sentinel telling consumers to reload
//! the whole collection instead of applying an incorrect patch.

pub mod apply;
pub mod diff;
pub mod diff_patch;
pub mod differ;
pub mod op;
pub mod strider;
pub mod tree;
pub mod tree_path;

pub use apply::{apply, apply_all, ApplyError};
pub use diff::{CollectionDiff, Move};
pub use diff_patch::Snapshot;
pub use differ::{diff_slices, diff_slices_by};
pub use op::{DiffOp, PatchOp};
pub use strider::{
    IndexRelation, IndexStrider, LinearStrider, PositionIndependentStrider, Stride,
    TreePathStrider,
};
pub use tree::TreeNode;
pub use tree_path::TreePath;
