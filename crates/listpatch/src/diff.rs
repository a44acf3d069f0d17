use crate::op::DiffOp;
use crate::strider::{IndexRelation, IndexStrider};
use listpatch_util::sort::sorted_insert_by;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single element relocation inside a diff. `from` is a source-space
/// index, `to` is a destination-space index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move<I> {
    pub from: I,
    pub to: I,
}

/// Order-independent description of the minimal set of inserts,
/// deletes, updates and moves between two snapshots of an ordered
/// collection.
///
/// Index spaces: `inserts` are destination-space (ascending), `deletes`
/// are source-space (descending), `updates` address the same position
/// in both spaces (ascending), `moves` couple a source-space `from`
/// with a destination-space `to`. Indices within each list are unique;
/// conflicts between lists are resolved at record time by the
/// annihilation rules of [`record`](Self::record), never left
/// duplicated.
///
/// A diff is a plain value: it references no collection and stays
/// meaningful after the collections that produced it have changed
/// further. The distinguished [reset](Self::reset) diff signals a
/// transformation that could not be expressed positionally; consumers
/// must reload the whole collection when they see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDiff<I> {
    pub(crate) inserts: Vec<I>,
    pub(crate) deletes: Vec<I>,
    pub(crate) updates: Vec<I>,
    pub(crate) moves: Vec<Move<I>>,
    reset: bool,
}

/// Marker for a transformation the strider cannot express positionally.
/// Never surfaces to callers; the recording diff degrades to reset.
pub(crate) struct Unrepresentable;

pub(crate) type Fold<T = ()> = Result<T, Unrepresentable>;

enum DeletionOutcome<I> {
    /// Deletion resolved to this source-space index.
    Delete(I),
    /// Deletion annihilates the pending insert at this list position.
    InsertConflict(usize),
    /// Deletion annihilates the pending move ending at this list position.
    MoveToConflict(usize),
}

fn ascending<I: Ord>(a: &I, b: &I) -> Ordering {
    a.cmp(b)
}

fn descending<I: Ord>(a: &I, b: &I) -> Ordering {
    b.cmp(a)
}

impl<I> Default for CollectionDiff<I> {
    fn default() -> Self {
        CollectionDiff {
            inserts: Vec::new(),
            deletes: Vec::new(),
            updates: Vec::new(),
            moves: Vec::new(),
            reset: false,
        }
    }
}

impl<I> CollectionDiff<I> {
    /// An empty diff describing no change.
    pub fn new() -> Self {
        Self::default()
    }

    /// The reset sentinel: the delta is unknown or unrepresentable and
    /// the consumer must reload the whole collection.
    pub fn reset() -> Self {
        CollectionDiff {
            reset: true,
            ..Self::default()
        }
    }

    pub fn is_reset(&self) -> bool {
        self.reset
    }

    /// Total number of changes contained in the diff.
    pub fn len(&self) -> usize {
        self.inserts.len() + self.deletes.len() + self.updates.len() + self.moves.len()
    }

    /// `true` when the diff carries no operations. Note that per the
    /// consumer contract an empty diff means "unknown delta, reload",
    /// not "nothing changed"; a reset diff is always empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destination-space insertion indices, ascending.
    pub fn inserts(&self) -> &[I] {
        &self.inserts
    }

    /// Source-space deletion indices, descending.
    pub fn deletes(&self) -> &[I] {
        &self.deletes
    }

    /// Update indices (same position in both spaces), ascending.
    pub fn updates(&self) -> &[I] {
        &self.updates
    }

    pub fn moves(&self) -> &[Move<I>] {
        &self.moves
    }

    pub fn map_indices<J>(&self, mut transform: impl FnMut(&I) -> J) -> CollectionDiff<J> {
        CollectionDiff {
            inserts: self.inserts.iter().map(&mut transform).collect(),
            deletes: self.deletes.iter().map(&mut transform).collect(),
            updates: self.updates.iter().map(&mut transform).collect(),
            moves: self
                .moves
                .iter()
                .map(|m| Move {
                    from: transform(&m.from),
                    to: transform(&m.to),
                })
                .collect(),
            reset: self.reset,
        }
    }
}

impl<I: Ord + Clone> CollectionDiff<I> {
    /// Build a diff from unordered index lists, normalizing each list
    /// into its canonical order.
    pub fn from_parts(
        inserts: Vec<I>,
        deletes: Vec<I>,
        updates: Vec<I>,
        moves: Vec<Move<I>>,
    ) -> Self {
        let mut diff = CollectionDiff {
            inserts,
            deletes,
            updates,
            moves,
            reset: false,
        };
        diff.inserts.sort();
        diff.deletes.sort_by(descending);
        diff.updates.sort();
        diff
    }

    /// The diff's content as an unordered operation list. For a
    /// sequence safe to apply directly, use
    /// [`patch`](Self::patch) instead.
    pub fn operations(&self) -> Vec<DiffOp<I>> {
        let mut ops = Vec::with_capacity(self.len());
        ops.extend(self.inserts.iter().cloned().map(|at| DiffOp::Insert { at }));
        ops.extend(self.deletes.iter().cloned().map(|at| DiffOp::Delete { at }));
        ops.extend(self.updates.iter().cloned().map(|at| DiffOp::Update { at }));
        ops.extend(self.moves.iter().cloned().map(|m| DiffOp::Move {
            from: m.from,
            to: m.to,
        }));
        ops
    }

    /// Reconstruct the equivalent diff from a recorded patch, i.e. a
    /// sequence of operations whose indices refer to the live
    /// intermediate state at each step.
    pub fn from_patch<S>(patch: impl IntoIterator<Item = DiffOp<I>>, strider: &S) -> Self
    where
        S: IndexStrider<Index = I>,
    {
        let mut diff = Self::new();
        for op in patch {
            diff.record(op, strider);
        }
        diff
    }

    /// Merge independently produced diffs of consecutive edits into one
    /// equivalent diff by replaying each diff's patch into a fresh
    /// accumulator.
    pub fn merged<S>(diffs: impl IntoIterator<Item = CollectionDiff<I>>, strider: &S) -> Self
    where
        S: IndexStrider<Index = I>,
    {
        let mut merged = Self::new();
        for diff in diffs {
            merged.merge(&diff, strider);
        }
        merged
    }

    /// Fold `next` (the diff of edits that happened after the edits
    /// described by `self`) into `self`.
    pub fn merge<S>(&mut self, next: &CollectionDiff<I>, strider: &S)
    where
        S: IndexStrider<Index = I>,
    {
        if next.is_reset() {
            *self = Self::reset();
            return;
        }
        for op in next.patch(strider) {
            self.record(op, strider);
        }
    }

    /// Fold one primitive edit into the diff, renumbering pending
    /// entries so the diff stays equivalent to "original snapshot vs.
    /// state after this edit".
    ///
    /// A move to its own current position is a silent no-op. Edits the
    /// strider cannot express positionally (certain subtree
    /// interactions under [`TreePathStrider`](crate::TreePathStrider))
    /// degrade the diff to [reset](Self::reset); recording into a
    /// reset diff changes nothing.
    pub fn record<S>(&mut self, op: DiffOp<I>, strider: &S)
    where
        S: IndexStrider<Index = I>,
    {
        if self.reset {
            return;
        }
        let folded = match op {
            DiffOp::Insert { at } => self.record_insertion(at, strider),
            DiffOp::Delete { at } => self.record_deletion(at, strider),
            DiffOp::Update { at } => self.record_update(at, strider),
            DiffOp::Move { from, to } => self.record_move(from, to, strider),
        };
        if folded.is_err() {
            *self = Self::reset();
        }
    }

    /// `true` when `index` lies strictly inside a subtree that is
    /// itself a pending insert. Such positions materialize from the
    /// destination snapshot, so edits at them fold away.
    fn inside_pending_insert<S>(&self, index: &I, strider: &S) -> bool
    where
        S: IndexStrider<Index = I>,
    {
        self.inserts
            .iter()
            .any(|p| strider.relation(index, p) == IndexRelation::Descendant)
    }

    fn record_insertion<S>(&mut self, at: I, strider: &S) -> Fold
    where
        S: IndexStrider<Index = I>,
    {
        if self.inside_pending_insert(&at, strider) {
            return Ok(());
        }
        self.adjust_for_insertion(&at, strider);
        sorted_insert_by(&mut self.inserts, at, ascending);
        Ok(())
    }

    fn record_deletion<S>(&mut self, at: I, strider: &S) -> Fold
    where
        S: IndexStrider<Index = I>,
    {
        if self.inside_pending_insert(&at, strider) {
            return Ok(());
        }
        match self.adjust_for_deletion(&at, strider)? {
            DeletionOutcome::Delete(adjusted) => {
                // A pending update at (or under) the deleted position
                // is subsumed by the deletion.
                self.updates.retain(|u| {
                    !matches!(
                        strider.relation(u, &adjusted),
                        IndexRelation::Equal | IndexRelation::Descendant
                    )
                });
                sorted_insert_by(&mut self.deletes, adjusted, descending);
            }
            DeletionOutcome::InsertConflict(i) => {
                self.inserts.remove(i);
            }
            DeletionOutcome::MoveToConflict(i) => {
                let annihilated = self.moves.remove(i);
                sorted_insert_by(&mut self.deletes, annihilated.from, descending);
            }
        }
        Ok(())
    }

    fn record_update<S>(&mut self, at: I, strider: &S) -> Fold
    where
        S: IndexStrider<Index = I>,
    {
        // Updating a pending insert (or anything inside an inserted
        // subtree) folds away: the insert reads the final snapshot.
        if self.inserts.iter().any(|p| {
            matches!(
                strider.relation(&at, p),
                IndexRelation::Equal | IndexRelation::Descendant
            )
        }) {
            return Ok(());
        }

        // Updating a move destination cannot be expressed positionally;
        // downgrade the move to delete + insert.
        if let Some(i) = self
            .moves
            .iter()
            .position(|m| strider.relation(&m.to, &at) == IndexRelation::Equal)
        {
            let downgraded = self.moves.remove(i);
            sorted_insert_by(&mut self.deletes, downgraded.from, descending);
            sorted_insert_by(&mut self.inserts, at, ascending);
            return Ok(());
        }

        // Updates touching moved subtrees fall outside the positional model.
        if self.moves.iter().any(|m| {
            strider.relation(&m.to, &at) == IndexRelation::Descendant
                || strider.relation(&at, &m.to) == IndexRelation::Descendant
        }) {
            return Err(Unrepresentable);
        }

        // Resolve the destination-space index back to source space:
        // prior inserts and move destinations before it pull it left,
        let mut adjusted = at.clone();
        let mut destination_slots: Vec<I> = self.inserts.clone();
        destination_slots.extend(self.moves.iter().map(|m| m.to.clone()));
        destination_slots.sort_by(descending);
        for slot in &destination_slots {
            match strider.relation(&at, slot) {
                IndexRelation::After => adjusted = strider.shift_left(adjusted, slot),
                IndexRelation::Before | IndexRelation::Unrelated => {}
                IndexRelation::Equal | IndexRelation::Descendant => return Err(Unrepresentable),
            }
        }
        // then prior deletes and move sources at or before it push it right.
        let mut source_slots: Vec<I> = self.deletes.clone();
        source_slots.extend(self.moves.iter().map(|m| m.from.clone()));
        source_slots.sort_by(ascending);
        for slot in &source_slots {
            match strider.relation(&adjusted, slot) {
                IndexRelation::Equal | IndexRelation::After => {
                    adjusted = strider.shift_right(adjusted, slot);
                }
                IndexRelation::Descendant => return Err(Unrepresentable),
                IndexRelation::Before | IndexRelation::Unrelated => {}
            }
        }

        // Idempotence: already updated, or covered by a pending subtree update.
        if self.updates.iter().any(|u| {
            matches!(
                strider.relation(&adjusted, u),
                IndexRelation::Equal | IndexRelation::Descendant
            )
        }) {
            return Ok(());
        }
        // A subtree update subsumes pending finer-grained entries inside it.
        self.updates
            .retain(|u| strider.relation(u, &adjusted) != IndexRelation::Descendant);
        self.deletes
            .retain(|d| strider.relation(d, &adjusted) != IndexRelation::Descendant);
        if self.moves.iter().any(|m| {
            strider.relation(&m.from, &adjusted) == IndexRelation::Descendant
                || strider.relation(&adjusted, &m.from) == IndexRelation::Descendant
        }) {
            return Err(Unrepresentable);
        }

        sorted_insert_by(&mut self.updates, adjusted, ascending);
        Ok(())
    }

    fn record_move<S>(&mut self, from: I, to: I, strider: &S) -> Fold
    where
        S: IndexStrider<Index = I>,
    {
        if from == to {
            return Ok(());
        }
        let from_inside = self.inside_pending_insert(&from, strider);
        let to_inside = self.inside_pending_insert(&to, strider);
        match (from_inside, to_inside) {
            // Confined to a subtree that only exists in the final
            // snapshot: nothing to record.
            (true, true) => return Ok(()),
            // Out of an inserted subtree: only the arrival is real.
            (true, false) => return self.record_insertion(to, strider),
            // Into an inserted subtree: only the departure is real.
            (false, true) => return self.record_deletion(from, strider),
            (false, false) => {}
        }
        // Nested move destinations are outside the positional model.
        if self.moves.iter().any(|m| {
            strider.relation(&to, &m.to) == IndexRelation::Descendant
                || strider.relation(&m.to, &to) == IndexRelation::Descendant
        }) {
            return Err(Unrepresentable);
        }

        match self.adjust_for_deletion(&from, strider)? {
            DeletionOutcome::Delete(adjusted_from) => {
                self.adjust_for_insertion(&to, strider);
                if adjusted_from == to {
                    // The element ends up at its original rank.
                    return Ok(());
                }
                if let Some(i) = self
                    .updates
                    .iter()
                    .position(|u| strider.relation(u, &adjusted_from) == IndexRelation::Equal)
                {
                    // Moving an updated element: positionally this is a
                    // delete + insert, the insert reading the final snapshot.
                    self.updates.remove(i);
                    sorted_insert_by(&mut self.deletes, adjusted_from, descending);
                    sorted_insert_by(&mut self.inserts, to, ascending);
                } else if self.updates.iter().any(|u| {
                    strider.relation(u, &adjusted_from) == IndexRelation::Descendant
                        || strider.relation(&adjusted_from, u) == IndexRelation::Descendant
                }) {
                    return Err(Unrepresentable);
                } else {
                    self.moves.push(Move {
                        from: adjusted_from,
                        to,
                    });
                }
            }
            DeletionOutcome::InsertConflict(i) => {
                // Moving a pending insert re-records it at the new spot.
                self.inserts.remove(i);
                self.record_insertion(to, strider)?;
            }
            DeletionOutcome::MoveToConflict(i) => {
                // Moving an already-moved element retargets the pending move.
                self.adjust_for_insertion(&to, strider);
                self.moves[i].to = to;
                if self.moves[i].from == self.moves[i].to {
                    // Returned to its origin: the moves cancel.
                    self.moves.remove(i);
                }
            }
        }
        Ok(())
    }

    /// Shift pending destination indices to make room for an insertion
    /// at `at`.
    fn adjust_for_insertion<S>(&mut self, at: &I, strider: &S)
    where
        S: IndexStrider<Index = I>,
    {
        for i in 0..self.inserts.len() {
            match strider.relation(&self.inserts[i], at) {
                IndexRelation::Equal | IndexRelation::After | IndexRelation::Descendant => {
                    let shifted = strider.shift_right(self.inserts[i].clone(), at);
                    self.inserts[i] = shifted;
                }
                IndexRelation::Before | IndexRelation::Unrelated => {}
            }
        }
        for i in 0..self.moves.len() {
            match strider.relation(&self.moves[i].to, at) {
                IndexRelation::Equal | IndexRelation::After | IndexRelation::Descendant => {
                    let shifted = strider.shift_right(self.moves[i].to.clone(), at);
                    self.moves[i].to = shifted;
                }
                IndexRelation::Before | IndexRelation::Unrelated => {}
            }
        }
    }

    /// Resolve a deletion at destination-space `at`: shift pending
    /// destination indices closed over the removed slot, detect
    /// annihilation with a pending insert or move destination, and
    /// otherwise translate `at` into the source index space.
    fn adjust_for_deletion<S>(&mut self, at: &I, strider: &S) -> Fold<DeletionOutcome<I>>
    where
        S: IndexStrider<Index = I>,
    {
        let mut adjusted = at.clone();

        let mut insert_conflict = None;
        let mut swallowed_inserts: Vec<usize> = Vec::new();
        for i in 0..self.inserts.len() {
            match strider.relation(&self.inserts[i], at) {
                IndexRelation::After => {
                    let shifted = strider.shift_left(self.inserts[i].clone(), at);
                    self.inserts[i] = shifted;
                }
                IndexRelation::Equal => insert_conflict = Some(i),
                IndexRelation::Descendant => swallowed_inserts.push(i),
                IndexRelation::Before | IndexRelation::Unrelated => {
                    match strider.relation(at, &self.inserts[i]) {
                        IndexRelation::After => {
                            adjusted = strider.shift_left(adjusted, &self.inserts[i]);
                        }
                        IndexRelation::Before | IndexRelation::Unrelated => {}
                        IndexRelation::Equal | IndexRelation::Descendant => {
                            return Err(Unrepresentable)
                        }
                    }
                }
            }
        }

        let mut move_conflict = None;
        let mut downgraded_moves: Vec<usize> = Vec::new();
        for i in 0..self.moves.len() {
            match strider.relation(&self.moves[i].to, at) {
                IndexRelation::After => {
                    let shifted = strider.shift_left(self.moves[i].to.clone(), at);
                    self.moves[i].to = shifted;
                }
                IndexRelation::Equal => move_conflict = Some(i),
                IndexRelation::Descendant => downgraded_moves.push(i),
                IndexRelation::Before | IndexRelation::Unrelated => {
                    match strider.relation(at, &self.moves[i].to) {
                        IndexRelation::After => {
                            adjusted = strider.shift_left(adjusted, &self.moves[i].to);
                        }
                        IndexRelation::Before | IndexRelation::Unrelated => {}
                        IndexRelation::Equal | IndexRelation::Descendant => {
                            return Err(Unrepresentable)
                        }
                    }
                }
            }
        }

        // Pending entries strictly inside the deleted subtree. A
        // swallowed insert disappears outright; a move into the subtree
        // downgrades to a deletion of its source. Conflicts target the
        // subtree root itself, so they cannot coexist with these.
        debug_assert!(insert_conflict.is_none() || swallowed_inserts.is_empty());
        debug_assert!(move_conflict.is_none() || downgraded_moves.is_empty());
        for i in swallowed_inserts.into_iter().rev() {
            self.inserts.remove(i);
        }
        for i in downgraded_moves.into_iter().rev() {
            let downgraded = self.moves.remove(i);
            sorted_insert_by(&mut self.deletes, downgraded.from, descending);
            if let Some(conflict) = move_conflict.as_mut() {
                if *conflict > i {
                    *conflict -= 1;
                }
            }
        }

        // Translate into source space: every pending removal at or
        // before the slot pushes it right.
        let mut source_slots: Vec<I> = self.deletes.clone();
        source_slots.extend(self.moves.iter().map(|m| m.from.clone()));
        source_slots.sort_by(ascending);
        for slot in &source_slots {
            match strider.relation(&adjusted, slot) {
                IndexRelation::Equal | IndexRelation::After => {
                    adjusted = strider.shift_right(adjusted, slot);
                }
                IndexRelation::Descendant => return Err(Unrepresentable),
                IndexRelation::Before | IndexRelation::Unrelated => {
                    if strider.relation(slot, &adjusted) == IndexRelation::Descendant {
                        return Err(Unrepresentable);
                    }
                }
            }
        }

        if let Some(i) = insert_conflict {
            Ok(DeletionOutcome::InsertConflict(i))
        } else if let Some(i) = move_conflict {
            Ok(DeletionOutcome::MoveToConflict(i))
        } else {
            Ok(DeletionOutcome::Delete(adjusted))
        }
    }
}
