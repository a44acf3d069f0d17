use serde::{Deserialize, Serialize};
use std::fmt;

/// One primitive edit of an ordered collection, carrying the affected
/// element where one exists.
///
/// `Insert` positions are destination-space, `Delete` positions are
/// source-space, `Update` positions are the same in both spaces, and
/// `Move` couples a source-space `from` with a destination-space `to`.
/// Inside a patch every index is interpreted against the intermediate
/// state at that point of the sequence instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchOp<T, I> {
    Insert { element: T, at: I },
    Delete { at: I },
    Update { at: I, element: T },
    Move { from: I, to: I },
}

/// Element-less projection of [`PatchOp`]: just the operation shape
/// and its indices. Diffs and valueless patches are built from these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffOp<I> {
    Insert { at: I },
    Delete { at: I },
    Update { at: I },
    Move { from: I, to: I },
}

impl<T, I> PatchOp<T, I> {
    /// Drop the element payload, keeping the shape and indices.
    pub fn as_diff_op(&self) -> DiffOp<I>
    where
        I: Clone,
    {
        match self {
            PatchOp::Insert { at, .. } => DiffOp::Insert { at: at.clone() },
            PatchOp::Delete { at } => DiffOp::Delete { at: at.clone() },
            PatchOp::Update { at, .. } => DiffOp::Update { at: at.clone() },
            PatchOp::Move { from, to } => DiffOp::Move {
                from: from.clone(),
                to: to.clone(),
            },
        }
    }

    pub fn map_element<U>(self, mut transform: impl FnMut(T) -> U) -> PatchOp<U, I> {
        match self {
            PatchOp::Insert { element, at } => PatchOp::Insert {
                element: transform(element),
                at,
            },
            PatchOp::Delete { at } => PatchOp::Delete { at },
            PatchOp::Update { at, element } => PatchOp::Update {
                at,
                element: transform(element),
            },
            PatchOp::Move { from, to } => PatchOp::Move { from, to },
        }
    }

    pub fn map_index<J>(self, mut transform: impl FnMut(I) -> J) -> PatchOp<T, J> {
        match self {
            PatchOp::Insert { element, at } => PatchOp::Insert {
                element,
                at: transform(at),
            },
            PatchOp::Delete { at } => PatchOp::Delete { at: transform(at) },
            PatchOp::Update { at, element } => PatchOp::Update {
                at: transform(at),
                element,
            },
            PatchOp::Move { from, to } => PatchOp::Move {
                from: transform(from),
                to: transform(to),
            },
        }
    }
}

impl<I> DiffOp<I> {
    pub fn map_index<J>(self, mut transform: impl FnMut(I) -> J) -> DiffOp<J> {
        match self {
            DiffOp::Insert { at } => DiffOp::Insert { at: transform(at) },
            DiffOp::Delete { at } => DiffOp::Delete { at: transform(at) },
            DiffOp::Update { at } => DiffOp::Update { at: transform(at) },
            DiffOp::Move { from, to } => DiffOp::Move {
                from: transform(from),
                to: transform(to),
            },
        }
    }
}

impl<I: fmt::Display> fmt::Display for DiffOp<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffOp::Insert { at } => write!(f, "I(at: {at})"),
            DiffOp::Delete { at } => write!(f, "D(at: {at})"),
            DiffOp::Update { at } => write!(f, "U(at: {at})"),
            DiffOp::Move { from, to } => write!(f, "M(from: {from}, to: {to})"),
        }
    }
}

impl<T: fmt::Debug, I: fmt::Display> fmt::Display for PatchOp<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchOp::Insert { element, at } => write!(f, "I({element:?}, at: {at})"),
            PatchOp::Delete { at } => write!(f, "D(at: {at})"),
            PatchOp::Update { at, element } => write!(f, "U(at: {at}, with: {element:?})"),
            PatchOp::Move { from, to } => write!(f, "M(from: {from}, to: {to})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_keeps_indices() {
        let op = PatchOp::Insert {
            element: "x",
            at: 4usize,
        };
        assert_eq!(op.as_diff_op(), DiffOp::Insert { at: 4 });
        let op = PatchOp::<&str, usize>::Move { from: 1, to: 3 };
        assert_eq!(op.as_diff_op(), DiffOp::Move { from: 1, to: 3 });
    }

    #[test]
    fn mapping_rewrites_payload_and_indices() {
        let op = PatchOp::Update {
            at: 2usize,
            element: 5,
        };
        let op = op.map_element(|e| e * 10).map_index(|i| i as u64);
        assert_eq!(op, PatchOp::Update { at: 2u64, element: 50 });

        let op = DiffOp::Move { from: 1usize, to: 4 };
        assert_eq!(
            op.map_index(|i| i + 1),
            DiffOp::Move { from: 2, to: 5 }
        );
    }

    #[test]
    fn display_is_compact() {
        let op: DiffOp<usize> = DiffOp::Move { from: 2, to: 0 };
        assert_eq!(op.to_string(), "M(from: 2, to: 0)");
    }
}
