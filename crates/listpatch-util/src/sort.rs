use std::cmp::Ordering;

/// Position at which `element` should be inserted into `slice` to keep it
/// ordered under `compare`, found by binary search.
///
/// If elements equal to `element` are already present, any of the adjacent
/// positions may be returned.
///
/// # Examples
///
/// ```
/// use listpatch_util::sort::sorted_position_by;
///
/// let v = vec![1, 3, 5];
/// assert_eq!(sorted_position_by(&v, &4, |a, b| a.cmp(b)), 2);
/// assert_eq!(sorted_position_by(&v, &0, |a, b| a.cmp(b)), 0);
/// ```
pub fn sorted_position_by<T, F>(slice: &[T], element: &T, mut compare: F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut lo = 0usize;
    let mut hi = slice.len();
    while lo < hi {
        let mid = (lo + hi) / 2;
        match compare(&slice[mid], element) {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return mid,
        }
    }
    lo
}

/// Insert `element` into an already-sorted vector, keeping it sorted under
/// `compare`.
///
/// # Examples
///
/// ```
/// use listpatch_util::sort::sorted_insert_by;
///
/// // Descending order, as the diff engine keeps its delete list.
/// let mut v = vec![7, 4, 1];
/// sorted_insert_by(&mut v, 5, |a, b| b.cmp(a));
/// assert_eq!(v, vec![7, 5, 4, 1]);
/// ```
pub fn sorted_insert_by<T, F>(vec: &mut Vec<T>, element: T, compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let at = sorted_position_by(vec, &element, compare);
    vec.insert(at, element);
}

/// Insert `element` into an ascending-sorted vector using natural ordering.
///
/// # Examples
///
/// ```
/// use listpatch_util::sort::sorted_insert;
///
/// let mut v = vec![1, 3, 5];
/// sorted_insert(&mut v, 4);
/// assert_eq!(v, vec![1, 3, 4, 5]);
/// ```
pub fn sorted_insert<T: Ord>(vec: &mut Vec<T>, element: T) {
    sorted_insert_by(vec, element, |a, b| a.cmp(b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inserts_into_empty() {
        let mut v: Vec<i32> = vec![];
        sorted_insert(&mut v, 9);
        assert_eq!(v, vec![9]);
    }

    #[test]
    fn keeps_descending_order() {
        let mut v = vec![9, 6, 2];
        sorted_insert_by(&mut v, 6, |a, b| b.cmp(a));
        sorted_insert_by(&mut v, 11, |a, b| b.cmp(a));
        sorted_insert_by(&mut v, 0, |a, b| b.cmp(a));
        assert!(v.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(v.len(), 6);
    }

    proptest! {
        #[test]
        fn stays_sorted(mut base in proptest::collection::vec(0i64..100, 0..32), extra in 0i64..100) {
            base.sort();
            let mut v = base;
            sorted_insert(&mut v, extra);
            prop_assert!(v.windows(2).all(|w| w[0] <= w[1]));
            prop_assert!(v.contains(&extra));
        }
    }
}
