use crate::diff::{CollectionDiff, Move};
use crate::op::{DiffOp, PatchOp};
use crate::strider::{IndexRelation, IndexStrider};
use std::fmt;

/// Read-only indexed access to a collection snapshot, used to pull
/// element payloads into a generated patch.
pub trait Snapshot<I> {
    type Element;

    fn element_at(&self, index: &I) -> Option<&Self::Element>;
}

impl<T> Snapshot<usize> for [T] {
    type Element = T;

    fn element_at(&self, index: &usize) -> Option<&T> {
        self.get(*index)
    }
}

impl<T> Snapshot<usize> for Vec<T> {
    type Element = T;

    fn element_at(&self, index: &usize) -> Option<&T> {
        self.get(*index)
    }
}

fn element_at_or_panic<'a, C, I>(snapshot: &'a C, index: &I) -> &'a C::Element
where
    C: Snapshot<I> + ?Sized,
    I: fmt::Debug,
{
    match snapshot.element_at(index) {
        Some(element) => element,
        None => panic!("diff index {index:?} is out of bounds of the destination snapshot"),
    }
}

impl<I: Ord + Clone> CollectionDiff<I> {
    /// Convert the diff into an element-less patch: a sequence of
    /// operations safe to apply one by one, left to right, against the
    /// source collection.
    ///
    /// Ordering contract: updates first, then deletes in descending
    /// index order, then moves with indices adjusted to the
    /// intermediate state, then inserts in ascending order. A reset
    /// diff yields an empty sequence; check
    /// [`is_reset`](Self::is_reset) first.
    ///
    /// Complexity: O(I + D + U + M * (I + D + U + M)) for I inserts,
    /// D deletes, U updates and M moves.
    pub fn patch<S>(&self, strider: &S) -> Vec<DiffOp<I>>
    where
        S: IndexStrider<Index = I>,
    {
        if self.is_reset() {
            return Vec::new();
        }
        let mut ops = Vec::with_capacity(self.len());
        ops.extend(self.updates.iter().cloned().map(|at| DiffOp::Update { at }));
        ops.extend(self.deletes.iter().cloned().map(|at| DiffOp::Delete { at }));
        ops.extend(self.adjusted_moves(strider).into_iter().map(|m| DiffOp::Move {
            from: m.from,
            to: m.to,
        }));
        ops.extend(self.inserts.iter().cloned().map(|at| DiffOp::Insert { at }));
        ops
    }

    /// Like [`patch`](Self::patch), but carrying element payloads read
    /// from `destination`, the snapshot this diff leads to. Inserted
    /// elements are read at their insert index; updated elements at
    /// their simulated post-patch position.
    ///
    /// Panics if the diff indexes outside `destination`; passing a
    /// snapshot the diff does not describe is a caller programming
    /// error.
    ///
    /// Complexity: O(I + D + U * (I + D + M) + M * (I + D + U + M)).
    pub fn patch_to<C, S>(&self, destination: &C, strider: &S) -> Vec<PatchOp<C::Element, I>>
    where
        C: Snapshot<I> + ?Sized,
        C::Element: Clone,
        I: fmt::Debug,
        S: IndexStrider<Index = I>,
    {
        if self.is_reset() {
            return Vec::new();
        }
        let updates_after = self.updates_after_patch(strider);
        let mut ops = Vec::with_capacity(self.len());
        ops.extend(
            self.updates
                .iter()
                .zip(updates_after.iter())
                .map(|(at, after)| PatchOp::Update {
                    at: at.clone(),
                    element: element_at_or_panic(destination, after).clone(),
                }),
        );
        ops.extend(self.deletes.iter().cloned().map(|at| PatchOp::Delete { at }));
        ops.extend(self.adjusted_moves(strider).into_iter().map(|m| PatchOp::Move {
            from: m.from,
            to: m.to,
        }));
        ops.extend(self.inserts.iter().map(|at| PatchOp::Insert {
            element: element_at_or_panic(destination, at).clone(),
            at: at.clone(),
        }));
        ops
    }

    /// Rewrite the moves so they can be applied sequentially between
    /// the patch's deletes and inserts. Each `from` is discounted for
    /// deletes and earlier move departures below it, each `to` for
    /// inserts and later move arrivals; the final pairwise pass
    /// resolves concurrent moves into one consistent permutation, as
    /// if all moves happened at once.
    fn adjusted_moves<S>(&self, strider: &S) -> Vec<Move<I>>
    where
        S: IndexStrider<Index = I>,
    {
        let mut moves = self.moves.clone();
        if moves.is_empty() {
            return moves;
        }

        for delete in &self.deletes {
            for m in &mut moves {
                if strider.relation(&m.from, delete) == IndexRelation::After {
                    m.from = strider.shift_left(m.from.clone(), delete);
                }
            }
        }

        for insert in self.inserts.iter().rev() {
            for m in &mut moves {
                if matches!(
                    strider.relation(&m.to, insert),
                    IndexRelation::Equal | IndexRelation::After
                ) {
                    m.to = strider.shift_left(m.to.clone(), insert);
                }
            }
        }

        for i in 0..moves.len() {
            let from = moves[i].from.clone();
            for j in i + 1..moves.len() {
                if matches!(
                    strider.relation(&moves[j].from, &from),
                    IndexRelation::Equal | IndexRelation::After
                ) {
                    moves[j].from = strider.shift_left(moves[j].from.clone(), &from);
                }
            }
        }

        for i in (0..moves.len()).rev() {
            let to = moves[i].to.clone();
            for j in 0..i {
                if strider.relation(&moves[j].to, &to) == IndexRelation::After {
                    moves[j].to = strider.shift_left(moves[j].to.clone(), &to);
                }
            }
        }

        for i in 0..moves.len() {
            for j in (i + 1..moves.len()).rev() {
                match strider.relation(&moves[j].from, &moves[i].to) {
                    IndexRelation::Before => {
                        moves[i].to = strider.shift_right(moves[i].to.clone(), &moves[j].from);
                    }
                    IndexRelation::Equal | IndexRelation::After => {
                        moves[j].from = strider.shift_right(moves[j].from.clone(), &moves[i].to);
                    }
                    IndexRelation::Descendant | IndexRelation::Unrelated => {}
                }
            }
        }

        moves
    }

    /// Map each update index from source space to its position in the
    /// destination collection, after all deletes, moves and inserts of
    /// this diff have landed.
    fn updates_after_patch<S>(&self, strider: &S) -> Vec<I>
    where
        S: IndexStrider<Index = I>,
    {
        let mut after = self.updates.clone();
        if after.is_empty() {
            return after;
        }

        let mut removals: Vec<I> = self.deletes.clone();
        removals.extend(self.moves.iter().map(|m| m.from.clone()));
        removals.sort_by(|a, b| b.cmp(a));
        for removal in &removals {
            for u in &mut after {
                if strider.relation(u, removal) == IndexRelation::After {
                    *u = strider.shift_left(u.clone(), removal);
                }
            }
        }

        let mut additions: Vec<I> = self.inserts.clone();
        additions.extend(self.moves.iter().map(|m| m.to.clone()));
        additions.sort();
        for addition in &additions {
            for u in &mut after {
                if matches!(
                    strider.relation(u, addition),
                    IndexRelation::Equal | IndexRelation::After
                ) {
                    *u = strider.shift_right(u.clone(), addition);
                }
            }
        }

        after
    }
}
