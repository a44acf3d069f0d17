//! Scenario tests for the incremental record engine over flat indices:
//! each case folds a sequence of live edits into a diff and checks the
//! resulting index lists, then replays the generated patch against the
//! source snapshot and compares with a direct simulation of the edits.

use listpatch::{apply_all, CollectionDiff, DiffOp, LinearStrider, Move};

fn strider() -> LinearStrider<usize> {
    LinearStrider::new()
}

/// Apply live-indexed edits directly to a vector, minting a fresh
/// value for every insert and update so each edit stays observable.
fn simulate(initial: &[i64], ops: &[DiffOp<usize>]) -> Vec<i64> {
    let mut state = initial.to_vec();
    let mut fresh = 100;
    for op in ops {
        match op {
            DiffOp::Insert { at } => {
                state.insert(*at, fresh);
                fresh += 1;
            }
            DiffOp::Delete { at } => {
                state.remove(*at);
            }
            DiffOp::Update { at } => {
                state[*at] = fresh;
                fresh += 1;
            }
            DiffOp::Move { from, to } => {
                let element = state.remove(*from);
                state.insert(*to, element);
            }
        }
    }
    state
}

fn record(ops: &[DiffOp<usize>]) -> CollectionDiff<usize> {
    CollectionDiff::from_patch(ops.iter().cloned(), &strider())
}

/// Record the edits, generate an element-carrying patch against the
/// simulated destination, apply it to the source and return the result.
fn replay(initial: &[i64], ops: &[DiffOp<usize>]) -> Vec<i64> {
    let destination = simulate(initial, ops);
    let diff = record(ops);
    assert!(!diff.is_reset(), "flat edits must never degrade to reset");
    let mut replayed = initial.to_vec();
    apply_all(&mut replayed, diff.patch_to(&destination, &strider()))
        .unwrap_or_else(|e| panic!("patch failed to apply for ops {ops:?}: {e}"));
    replayed
}

fn assert_replay(ops: &[DiffOp<usize>]) {
    let initial = [0, 1, 2, 3];
    assert_eq!(
        replay(&initial, ops),
        simulate(&initial, ops),
        "replayed patch diverged from simulation for ops {ops:?}"
    );
}

#[test]
fn insert_then_delete_of_an_original_element() {
    // [0,1,2,3] -> insert at 1 -> [0,x,1,2,3] -> delete at 2 removes
    // the original element 1, not the pending insert.
    let diff = record(&[DiffOp::Insert { at: 1 }, DiffOp::Delete { at: 2 }]);
    assert_eq!(diff.inserts(), &[1]);
    assert_eq!(diff.deletes(), &[1]);
    assert!(diff.updates().is_empty());
    assert!(diff.moves().is_empty());
    assert_replay(&[DiffOp::Insert { at: 1 }, DiffOp::Delete { at: 2 }]);
}

#[test]
fn delete_annihilates_a_pending_insert() {
    let diff = record(&[
        DiffOp::Insert { at: 2 },
        DiffOp::Update { at: 2 },
        DiffOp::Delete { at: 2 },
    ]);
    assert!(diff.is_empty());
    assert!(!diff.is_reset());
    assert_replay(&[
        DiffOp::Insert { at: 2 },
        DiffOp::Update { at: 2 },
        DiffOp::Delete { at: 2 },
    ]);
}

#[test]
fn opposite_moves_cancel() {
    let ops = [DiffOp::Move { from: 0, to: 1 }, DiffOp::Move { from: 1, to: 0 }];
    let diff = record(&ops);
    assert!(diff.is_empty(), "canceling moves must leave no residue: {diff:?}");
    assert!(!diff.is_reset());
    assert_replay(&ops);
}

#[test]
fn move_of_a_pending_insert_rerecords_the_insert() {
    let ops = [
        DiffOp::Insert { at: 1 },
        DiffOp::Insert { at: 0 },
        DiffOp::Move { from: 0, to: 1 },
    ];
    let diff = record(&ops);
    assert_eq!(diff.inserts(), &[1, 2]);
    assert!(diff.deletes().is_empty());
    assert!(diff.moves().is_empty());
    assert_replay(&ops);
}

#[test]
fn move_of_an_updated_element_downgrades_to_delete_and_insert() {
    let ops = [DiffOp::Update { at: 1 }, DiffOp::Move { from: 1, to: 3 }];
    let diff = record(&ops);
    assert_eq!(diff.deletes(), &[1]);
    assert_eq!(diff.inserts(), &[3]);
    assert!(diff.updates().is_empty());
    assert!(diff.moves().is_empty());
    assert_replay(&ops);
}

#[test]
fn update_of_a_move_destination_downgrades_the_move() {
    let ops = [DiffOp::Move { from: 0, to: 2 }, DiffOp::Update { at: 2 }];
    let diff = record(&ops);
    assert_eq!(diff.deletes(), &[0]);
    assert_eq!(diff.inserts(), &[2]);
    assert!(diff.moves().is_empty());
    assert_replay(&ops);
}

#[test]
fn update_of_a_pending_insert_folds_away() {
    let diff = record(&[DiffOp::Insert { at: 2 }, DiffOp::Update { at: 2 }]);
    assert_eq!(diff.inserts(), &[2]);
    assert!(diff.updates().is_empty());
}

#[test]
fn delete_annihilates_a_pending_move() {
    let ops = [DiffOp::Move { from: 1, to: 3 }, DiffOp::Delete { at: 3 }];
    let diff = record(&ops);
    assert_eq!(diff.deletes(), &[1]);
    assert!(diff.inserts().is_empty());
    assert!(diff.moves().is_empty());
    assert_replay(&ops);
}

#[test]
fn moving_an_already_moved_element_retargets_the_pending_move() {
    let ops = [DiffOp::Move { from: 3, to: 0 }, DiffOp::Move { from: 0, to: 2 }];
    let diff = record(&ops);
    assert_eq!(diff.moves(), &[Move { from: 3, to: 2 }]);
    assert_replay(&ops);
}

#[test]
fn update_index_translates_across_inserts_and_deletes() {
    // Live index 2 in [x,0,1,3] is source element 1.
    let ops = [
        DiffOp::Insert { at: 0 },
        DiffOp::Delete { at: 3 },
        DiffOp::Update { at: 2 },
    ];
    let diff = record(&ops);
    assert_eq!(diff.updates(), &[1]);
    assert_eq!(diff.deletes(), &[2]);
    assert_eq!(diff.inserts(), &[0]);
    assert_replay(&ops);
}

#[test]
fn repeated_updates_are_idempotent() {
    let diff = record(&[DiffOp::Update { at: 0 }, DiffOp::Update { at: 0 }]);
    assert_eq!(diff.updates(), &[0]);
}

#[test]
fn move_to_own_position_is_a_no_op() {
    let diff = record(&[DiffOp::Move { from: 2, to: 2 }]);
    assert!(diff.is_empty());
}

#[test]
fn deletes_are_stored_descending() {
    let diff = record(&[
        DiffOp::Delete { at: 0 },
        DiffOp::Delete { at: 0 },
        DiffOp::Delete { at: 0 },
    ]);
    assert_eq!(diff.deletes(), &[2, 1, 0]);
}

#[test]
fn inserts_are_stored_ascending() {
    let diff = record(&[DiffOp::Insert { at: 2 }, DiffOp::Insert { at: 0 }]);
    assert_eq!(diff.inserts(), &[0, 3]);
}

#[test]
fn longer_mixed_sequences_replay() {
    let batteries: &[&[DiffOp<usize>]] = &[
        &[
            DiffOp::Insert { at: 2 },
            DiffOp::Move { from: 0, to: 4 },
            DiffOp::Delete { at: 1 },
            DiffOp::Update { at: 0 },
            DiffOp::Insert { at: 3 },
            DiffOp::Move { from: 4, to: 0 },
        ],
        &[
            DiffOp::Delete { at: 0 },
            DiffOp::Insert { at: 3 },
            DiffOp::Move { from: 2, to: 0 },
        ],
        &[
            DiffOp::Move { from: 0, to: 3 },
            DiffOp::Move { from: 0, to: 3 },
            DiffOp::Move { from: 0, to: 3 },
        ],
        &[
            DiffOp::Update { at: 3 },
            DiffOp::Delete { at: 1 },
            DiffOp::Update { at: 2 },
            DiffOp::Insert { at: 0 },
        ],
        &[
            DiffOp::Insert { at: 4 },
            DiffOp::Move { from: 1, to: 4 },
            DiffOp::Update { at: 4 },
            DiffOp::Delete { at: 0 },
        ],
    ];
    for ops in batteries {
        assert_replay(ops);
    }
}

#[test]
fn recording_into_a_reset_diff_changes_nothing() {
    let mut diff = CollectionDiff::reset();
    diff.record(DiffOp::Insert { at: 0 }, &strider());
    assert!(diff.is_reset());
    assert!(diff.is_empty());
    assert!(diff.patch(&strider()).is_empty());
}

#[test]
fn merging_a_reset_diff_resets_the_accumulator() {
    let mut diff = record(&[DiffOp::Insert { at: 1 }]);
    diff.merge(&CollectionDiff::reset(), &strider());
    assert!(diff.is_reset());
}

#[test]
fn chunked_merge_matches_recording_everything_at_once() {
    let ops: Vec<DiffOp<usize>> = vec![
        DiffOp::Insert { at: 2 },
        DiffOp::Move { from: 0, to: 4 },
        DiffOp::Delete { at: 1 },
        DiffOp::Update { at: 0 },
        DiffOp::Insert { at: 3 },
    ];
    let initial = [0, 1, 2, 3];
    let destination = simulate(&initial, &ops);
    let expected = replay(&initial, &ops);
    assert_eq!(expected, destination);

    for split in 0..=ops.len() {
        let first = CollectionDiff::from_patch(ops[..split].iter().cloned(), &strider());
        let second = CollectionDiff::from_patch(ops[split..].iter().cloned(), &strider());
        let merged = CollectionDiff::merged([first, second], &strider());
        let mut replayed = initial.to_vec();
        apply_all(&mut replayed, merged.patch_to(&destination, &strider()))
            .unwrap_or_else(|e| panic!("merged patch failed at split {split}: {e}"));
        assert_eq!(replayed, destination, "merged diff diverged at split {split}");
    }
}

#[test]
fn map_indices_converts_the_index_representation() {
    let diff = record(&[DiffOp::Insert { at: 1 }, DiffOp::Delete { at: 2 }]);
    let widened: CollectionDiff<u64> = diff.map_indices(|&i| i as u64);
    assert_eq!(widened.inserts(), &[1u64]);
    assert_eq!(widened.deletes(), &[1u64]);
    assert!(!widened.is_reset());
}

#[test]
fn from_parts_normalizes_list_order() {
    let diff = CollectionDiff::from_parts(
        vec![3, 0],
        vec![1, 2],
        vec![2, 0],
        vec![Move { from: 1, to: 2 }],
    );
    assert_eq!(diff.inserts(), &[0, 3]);
    assert_eq!(diff.deletes(), &[2, 1]);
    assert_eq!(diff.updates(), &[0, 2]);
    assert_eq!(diff.moves(), &[Move { from: 1, to: 2 }]);
}
