//! Apply element-carrying patch operations to live collections.

use crate::op::PatchOp;
use crate::tree_path::TreePath;
use thiserror::Error;

/// Failure while applying a patch operation to a collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("index {index} out of bounds for collection of length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("no node at path {path}")]
    PathNotFound { path: TreePath },
    #[error("the tree root cannot be inserted, deleted or moved")]
    RootPath,
}

/// Apply a single patch operation to a vector in place.
///
/// Returns an error and leaves the vector untouched when the
/// operation's indices do not fit the vector's current length.
///
/// # Examples
///
/// ```
/// use listpatch::{apply, PatchOp};
///
/// let mut items = vec![10, 20, 30];
/// apply(&mut items, PatchOp::Move { from: 2, to: 0 }).unwrap();
/// assert_eq!(items, vec![30, 10, 20]);
/// ```
pub fn apply<T>(collection: &mut Vec<T>, op: PatchOp<T, usize>) -> Result<(), ApplyError> {
    let len = collection.len();
    match op {
        PatchOp::Insert { element, at } => {
            if at > len {
                return Err(ApplyError::OutOfBounds { index: at, len });
            }
            collection.insert(at, element);
        }
        PatchOp::Delete { at } => {
            if at >= len {
                return Err(ApplyError::OutOfBounds { index: at, len });
            }
            collection.remove(at);
        }
        PatchOp::Update { at, element } => match collection.get_mut(at) {
            Some(slot) => *slot = element,
            None => return Err(ApplyError::OutOfBounds { index: at, len }),
        },
        PatchOp::Move { from, to } => {
            if from >= len {
                return Err(ApplyError::OutOfBounds { index: from, len });
            }
            if to >= len {
                return Err(ApplyError::OutOfBounds { index: to, len });
            }
            let element = collection.remove(from);
            collection.insert(to, element);
        }
    }
    Ok(())
}

/// Apply a sequence of patch operations left to right, stopping at the
/// first failure.
pub fn apply_all<T, O>(collection: &mut Vec<T>, ops: O) -> Result<(), ApplyError>
where
    O: IntoIterator<Item = PatchOp<T, usize>>,
{
    for op in ops {
        apply(collection, op)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_at_end_is_allowed() {
        let mut items = vec![1, 2];
        apply(&mut items, PatchOp::Insert { element: 3, at: 2 }).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn insert_past_end_fails() {
        let mut items = vec![1, 2];
        let err = apply(&mut items, PatchOp::Insert { element: 3, at: 4 }).unwrap_err();
        assert_eq!(err, ApplyError::OutOfBounds { index: 4, len: 2 });
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut items = vec![1, 2, 3];
        apply(&mut items, PatchOp::Update { at: 1, element: 20 }).unwrap();
        assert_eq!(items, vec![1, 20, 3]);
    }

    #[test]
    fn move_targets_post_removal_position() {
        let mut items = vec![0, 1, 2, 3];
        apply(&mut items, PatchOp::Move { from: 0, to: 3 }).unwrap();
        assert_eq!(items, vec![1, 2, 3, 0]);
    }

    #[test]
    fn apply_all_stops_at_first_failure() {
        let mut items = vec![1];
        let ops = vec![
            PatchOp::Delete { at: 0 },
            PatchOp::Delete { at: 0 },
            PatchOp::Insert { element: 9, at: 0 },
        ];
        let err = apply_all(&mut items, ops).unwrap_err();
        assert_eq!(err, ApplyError::OutOfBounds { index: 0, len: 0 });
        assert!(items.is_empty());
    }
}
