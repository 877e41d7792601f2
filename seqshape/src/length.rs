/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::shape::Shape;
use crate::shape::ShapeError;

/// The outcome of comparing the lengths of two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthOrdering {
    Equal,
    ShorterLeft,
    ShorterRight,
}

impl LengthOrdering {
    /// The ordering seen from the other side: `compare_length(b, a)`
    /// is `compare_length(a, b).reverse()`.
    pub fn reverse(self) -> Self {
        match self {
            LengthOrdering::Equal => LengthOrdering::Equal,
            LengthOrdering::ShorterLeft => LengthOrdering::ShorterRight,
            LengthOrdering::ShorterRight => LengthOrdering::ShorterLeft,
        }
    }
}

impl From<Ordering> for LengthOrdering {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => LengthOrdering::ShorterLeft,
            Ordering::Equal => LengthOrdering::Equal,
            Ordering::Greater => LengthOrdering::ShorterRight,
        }
    }
}

impl From<LengthOrdering> for Ordering {
    fn from(ordering: LengthOrdering) -> Self {
        match ordering {
            LengthOrdering::ShorterLeft => Ordering::Less,
            LengthOrdering::Equal => Ordering::Equal,
            LengthOrdering::ShorterRight => Ordering::Greater,
        }
    }
}

impl fmt::Display for LengthOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthOrdering::Equal => write!(f, "equal"),
            LengthOrdering::ShorterLeft => write!(f, "shorter-left"),
            LengthOrdering::ShorterRight => write!(f, "shorter-right"),
        }
    }
}

/// Compare the lengths of two shapes, which need not share a kind
/// type.
///
/// Two finite shapes compare by length directly. Otherwise both
/// shapes are walked in lock-step: the side that runs out first is
/// shorter, and once both walks are periodic the lengths are equal.
/// So a finite shape is shorter than any infinite one, and any two
/// infinite shapes are of equal length.
pub fn compare_length<K, L>(left: &Shape<K>, right: &Shape<L>) -> LengthOrdering {
    if let (Some(l), Some(r)) = (left.len(), right.len()) {
        return l.cmp(&r).into();
    }

    let (mut l, mut r) = (left.cursor(), right.cursor());
    loop {
        if l.is_periodic() && r.is_periodic() {
            return LengthOrdering::Equal;
        }
        match (l.uncons(), r.uncons()) {
            (None, None) => return LengthOrdering::Equal,
            (None, Some(_)) => return LengthOrdering::ShorterLeft,
            (Some(_), None) => return LengthOrdering::ShorterRight,
            (Some((_, ls)), Some((_, rs))) => {
                l = ls;
                r = rs;
            }
        }
    }
}

/// The result of [`sort_two_or`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sorted<K, E> {
    /// `[shorter, longer]`.
    Ordered([Shape<K>; 2]),
    /// The lengths compared equal; the caller's value.
    WhenEqual(E),
}

/// `[shorter, longer]`; `[left, right]` when the lengths are equal.
pub fn sort_two<K>(left: Shape<K>, right: Shape<K>) -> [Shape<K>; 2] {
    sort_pair::<K, _>(left, right)
}

// `sort_two` over owned shapes or references alike.
fn sort_pair<K, S: Borrow<Shape<K>>>(left: S, right: S) -> [S; 2] {
    match compare_length(left.borrow(), right.borrow()) {
        LengthOrdering::ShorterRight => [right, left],
        LengthOrdering::Equal | LengthOrdering::ShorterLeft => [left, right],
    }
}

/// Like [`sort_two`], but returns `when_equal` when the lengths are
/// equal.
pub fn sort_two_or<K, E>(left: Shape<K>, right: Shape<K>, when_equal: E) -> Sorted<K, E> {
    match compare_length(&left, &right) {
        LengthOrdering::Equal => Sorted::WhenEqual(when_equal),
        LengthOrdering::ShorterLeft => Sorted::Ordered([left, right]),
        LengthOrdering::ShorterRight => Sorted::Ordered([right, left]),
    }
}

/// The shortest of `shapes`: a left fold keeping the first of each
/// [`sort_two`]. Among equals, the earliest wins.
pub fn shortest<K>(shapes: &[Shape<K>]) -> Result<&Shape<K>, ShapeError> {
    fold_sorted(shapes, 0)
}

/// The longest of `shapes`: a left fold keeping the second of each
/// [`sort_two`]. Among equals, the latest wins.
pub fn longest<K>(shapes: &[Shape<K>]) -> Result<&Shape<K>, ShapeError> {
    fold_sorted(shapes, 1)
}

fn fold_sorted<K>(shapes: &[Shape<K>], keep: usize) -> Result<&Shape<K>, ShapeError> {
    let Some((first, rest)) = shapes.split_first() else {
        tracing::debug!("rejecting extremal selection over an empty set");
        return Err(ShapeError::EmptyShapeSet);
    };
    Ok(rest
        .iter()
        .fold(first, |best, shape| sort_pair::<K, _>(best, shape)[keep]))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::shape;
    use crate::strategy::gen_finite;
    use crate::strategy::gen_shape;

    #[test]
    fn test_compare_finite() {
        assert_eq!(
            compare_length(&shape![0, 1, 2], &shape!['a', 'b']),
            LengthOrdering::ShorterRight
        );
        assert_eq!(
            compare_length(&shape!['a', 'b'], &shape![0, 1, 2]),
            LengthOrdering::ShorterLeft
        );
        assert_eq!(
            compare_length(&shape![0, 1], &shape!['a', 'b']),
            LengthOrdering::Equal
        );
        assert_eq!(
            compare_length(&Shape::<i32>::empty(), &Shape::<char>::empty()),
            LengthOrdering::Equal
        );
    }

    #[test]
    fn test_compare_infinite() {
        // Finite is shorter than infinite, however long.
        assert_eq!(
            compare_length(&shape![0, 1, 2, 3, 4], &shape![..'a']),
            LengthOrdering::ShorterLeft
        );
        assert_eq!(
            compare_length(&shape!['a'; ..'a'], &Shape::<i32>::empty()),
            LengthOrdering::ShorterRight
        );
        // Any two infinite shapes are of equal length.
        assert_eq!(
            compare_length(&shape![0, 1, 2; ..3], &shape![..'a']),
            LengthOrdering::Equal
        );
        assert_eq!(
            compare_length(&shape![..0], &shape!['a', 'b'; ..'c']),
            LengthOrdering::Equal
        );
    }

    #[test]
    fn test_ordering_conversions() {
        assert_eq!(LengthOrdering::ShorterLeft.reverse(), LengthOrdering::ShorterRight);
        assert_eq!(LengthOrdering::Equal.reverse(), LengthOrdering::Equal);
        assert_eq!(Ordering::from(LengthOrdering::ShorterLeft), Ordering::Less);
        assert_eq!(LengthOrdering::from(Ordering::Greater), LengthOrdering::ShorterRight);
        assert_eq!(LengthOrdering::ShorterRight.to_string(), "shorter-right");
    }

    #[test]
    fn test_sort_two() {
        assert_eq!(
            sort_two(shape![0, 1, 2, 3], shape![4, 5]),
            [shape![4, 5], shape![0, 1, 2, 3]]
        );
        assert_eq!(
            sort_two(shape![0], shape![1]),
            [shape![0], shape![1]]
        );
        assert_eq!(
            sort_two_or(shape![0], shape![1], "same"),
            Sorted::WhenEqual("same")
        );
        assert_eq!(
            sort_two_or(shape![0; ..1], shape![1, 2], ()),
            Sorted::Ordered([shape![1, 2], shape![0; ..1]])
        );
    }

    #[test]
    fn test_shortest_longest() {
        let shapes = [shape![0, 1, 2], shape![3, 4], shape![5, 6, 7, 8]];
        assert_eq!(shortest(&shapes).unwrap(), &shape![3, 4]);
        assert_eq!(longest(&shapes).unwrap(), &shape![5, 6, 7, 8]);

        let shapes = [shape![0], shape![..1], shape![2; ..3]];
        assert_eq!(longest(&shapes).unwrap(), &shape![2; ..3]);
        assert_eq!(shortest(&shapes).unwrap(), &shape![0]);

        assert_eq!(
            shortest::<i32>(&[]).unwrap_err(),
            ShapeError::EmptyShapeSet
        );
        assert_eq!(longest::<i32>(&[]).unwrap_err(), ShapeError::EmptyShapeSet);
    }

    #[test]
    fn test_ties_follow_sort_two() {
        let shapes = [shape![0, 1], shape![2, 3], shape![4]];
        assert_eq!(longest(&shapes).unwrap(), &shape![2, 3]);
        assert_eq!(shortest(&shapes).unwrap(), &shape![4]);

        let shapes = [shape![0], shape![1], shape![2, 3]];
        assert_eq!(shortest(&shapes).unwrap(), &shape![0]);

        // Two infinite shapes tie, so the later one is longest.
        let shapes = [shape![..0], shape![1; ..2]];
        assert_eq!(longest(&shapes).unwrap(), &shape![1; ..2]);
        assert_eq!(shortest(&shapes).unwrap(), &shape![..0]);
    }

    proptest! {
        #[test]
        fn compare_is_total_and_mirrored(a in gen_shape(), b in gen_shape()) {
            let ab = compare_length(&a, &b);
            prop_assert_eq!(compare_length(&b, &a), ab.reverse());
            prop_assert_eq!(compare_length(&a, &a), LengthOrdering::Equal);
        }

        #[test]
        fn compare_agrees_with_len(a in gen_finite(8), b in gen_finite(8)) {
            let expected = a.len().cmp(&b.len());
            prop_assert_eq!(Ordering::from(compare_length(&a, &b)), expected);
        }

        #[test]
        fn sort_two_orders_by_length(a in gen_shape(), b in gen_shape()) {
            let [shorter, longer] = sort_two(a.clone(), b.clone());
            prop_assert_ne!(compare_length(&shorter, &longer), LengthOrdering::ShorterRight);
            prop_assert!((shorter == a && longer == b) || (shorter == b && longer == a));
        }
    }
}
