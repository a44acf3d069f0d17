use crate::tree_path::TreePath;
use std::cmp::Ordering;
use std::marker::PhantomData;

/// How an index relates to a mutation (insertion or deletion of one
/// slot) at a reference index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRelation {
    /// Strictly before the reference slot; never displaced by it.
    Before,
    /// The reference slot itself.
    Equal,
    /// At or after the reference slot at the reference's depth;
    /// displaced by mutations there.
    After,
    /// Inside the subtree rooted at the reference slot.
    Descendant,
    /// In a part of the collection the reference slot cannot displace.
    Unrelated,
}

/// One step of a linear index, in both directions.
pub trait Stride: Ord + Clone {
    fn forward(self) -> Self;
    fn backward(self) -> Self;
}

macro_rules! impl_stride {
    ($($t:ty),*) => {
        $(impl Stride for $t {
            fn forward(self) -> Self {
                self + 1
            }
            fn backward(self) -> Self {
                self - 1
            }
        })*
    };
}

impl_stride!(usize, u32, u64, i32, i64, isize);

/// Policy object defining how to shift an index by one position and
/// how indices relate to a mutated slot, parametrized over the index
/// representation.
///
/// Striders are pure: no state, no side effects. The diff engine asks
/// the strider both questions so the same record/patch algorithms
/// serve flat and hierarchical indices.
pub trait IndexStrider {
    type Index: Ord + Clone;

    /// Classify `index` against a single-slot mutation at `reference`.
    fn relation(&self, index: &Self::Index, reference: &Self::Index) -> IndexRelation;

    /// `index` shifted one slot toward the end, at the depth of `reference`.
    fn shift_right(&self, index: Self::Index, reference: &Self::Index) -> Self::Index;

    /// `index` shifted one slot toward the start, at the depth of `reference`.
    fn shift_left(&self, index: Self::Index, reference: &Self::Index) -> Self::Index;
}

/// Strider for indices whose exact position does not matter: shifts
/// are no-ops and only equality is observed. Used when a diff is kept
/// as an unordered set of touched positions.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionIndependentStrider<I>(PhantomData<I>);

impl<I> PositionIndependentStrider<I> {
    pub const fn new() -> Self {
        PositionIndependentStrider(PhantomData)
    }
}

impl<I: Ord + Clone> IndexStrider for PositionIndependentStrider<I> {
    type Index = I;

    fn relation(&self, index: &I, reference: &I) -> IndexRelation {
        if index == reference {
            IndexRelation::Equal
        } else {
            IndexRelation::Unrelated
        }
    }

    fn shift_right(&self, index: I, _reference: &I) -> I {
        index
    }

    fn shift_left(&self, index: I, _reference: &I) -> I {
        index
    }
}

/// Strider for flat, linear indices: every slot at or after a mutation
/// shifts by one.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearStrider<I>(PhantomData<I>);

impl<I> LinearStrider<I> {
    pub const fn new() -> Self {
        LinearStrider(PhantomData)
    }
}

impl<I: Stride> IndexStrider for LinearStrider<I> {
    type Index = I;

    fn relation(&self, index: &I, reference: &I) -> IndexRelation {
        match index.cmp(reference) {
            Ordering::Less => IndexRelation::Before,
            Ordering::Equal => IndexRelation::Equal,
            Ordering::Greater => IndexRelation::After,
        }
    }

    fn shift_right(&self, index: I, _reference: &I) -> I {
        index.forward()
    }

    fn shift_left(&self, index: I, _reference: &I) -> I {
        index.backward()
    }
}

/// Strider for hierarchical [`TreePath`] indices.
///
/// A mutation at a path displaces only the later siblings under the
/// same parent (and their subtrees); shifts perturb exactly the
/// component at the reference's depth. Paths in unrelated subtrees
/// report [`IndexRelation::Unrelated`] and are left untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreePathStrider;

impl TreePathStrider {
    pub const fn new() -> Self {
        TreePathStrider
    }
}

impl IndexStrider for TreePathStrider {
    type Index = TreePath;

    fn relation(&self, index: &TreePath, reference: &TreePath) -> IndexRelation {
        debug_assert!(!reference.is_empty(), "the root path is not a valid slot");
        if index.len() < reference.len() {
            return IndexRelation::Unrelated;
        }
        let level = reference.len() - 1;
        if index.components()[..level] != reference.components()[..level] {
            return IndexRelation::Unrelated;
        }
        let own = index.components()[level];
        let slot = reference.components()[level];
        match own.cmp(&slot) {
            Ordering::Less => IndexRelation::Before,
            Ordering::Greater => IndexRelation::After,
            Ordering::Equal => {
                if index.len() == reference.len() {
                    IndexRelation::Equal
                } else {
                    IndexRelation::Descendant
                }
            }
        }
    }

    fn shift_right(&self, index: TreePath, reference: &TreePath) -> TreePath {
        index.shifted_at(reference.len() - 1, 1)
    }

    fn shift_left(&self, index: TreePath, reference: &TreePath) -> TreePath {
        index.shifted_at(reference.len() - 1, -1)
    }
}
