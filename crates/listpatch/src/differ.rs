//! Snapshot differ: compute a [`CollectionDiff`] between two flat
//! collection states without an operation log.
//!
//! The differ runs a longest-common-subsequence pass, then pairs off
//! equal deleted and inserted elements into moves. It produces
//! inserts, deletes and moves only; a replaced element surfaces as a
//! delete plus an insert rather than an update, since without an
//! operation log element identity cannot be told apart from element
//! equality.

use crate::diff::{CollectionDiff, Move};

/// Diff two slices of equatable elements.
///
/// # Examples
///
/// ```
/// use listpatch::diff_slices;
///
/// let diff = diff_slices(&[1, 2, 3], &[1, 3, 4]);
/// assert_eq!(diff.deletes(), &[1]);
/// assert_eq!(diff.inserts(), &[2]);
/// ```
pub fn diff_slices<T: PartialEq>(old: &[T], new: &[T]) -> CollectionDiff<usize> {
    diff_slices_by(old, new, |a, b| a == b)
}

/// Diff two slices under a caller-supplied equality relation.
///
/// Complexity: O(n * m) time and space for the LCS table.
pub fn diff_slices_by<T, F>(old: &[T], new: &[T], mut eq: F) -> CollectionDiff<usize>
where
    F: FnMut(&T, &T) -> bool,
{
    let n = old.len();
    let m = new.len();

    // dp[i][j] = length of the LCS of old[i..] and new[j..].
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = if eq(&old[i], &new[j]) {
                1 + dp[i + 1][j + 1]
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    let mut deletes: Vec<usize> = Vec::new();
    let mut inserts: Vec<usize> = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if eq(&old[i], &new[j]) {
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            deletes.push(i);
            i += 1;
        } else {
            inserts.push(j);
            j += 1;
        }
    }
    while i < n {
        deletes.push(i);
        i += 1;
    }
    while j < m {
        inserts.push(j);
        j += 1;
    }

    // Pair each deleted element with the first unclaimed equal insert
    // and fold the pair into a move.
    let mut moves: Vec<Move<usize>> = Vec::new();
    let mut surviving_deletes: Vec<usize> = Vec::new();
    let mut claimed = vec![false; inserts.len()];
    for from in deletes {
        let candidate = inserts
            .iter()
            .enumerate()
            .find(|(k, to)| !claimed[*k] && eq(&old[from], &new[**to]));
        match candidate {
            Some((k, to)) => {
                claimed[k] = true;
                moves.push(Move { from, to: *to });
            }
            None => surviving_deletes.push(from),
        }
    }
    let surviving_inserts: Vec<usize> = inserts
        .into_iter()
        .enumerate()
        .filter(|(k, _)| !claimed[*k])
        .map(|(_, to)| to)
        .collect();

    CollectionDiff::from_parts(surviving_inserts, surviving_deletes, Vec::new(), moves)
}
