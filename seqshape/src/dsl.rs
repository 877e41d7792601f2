/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! A flat set of named operations over shapes.
//!
//! Each search relation gets its own family of functions
//! (`first_index_equal`, `last_index_subset`, `all_indexes_superset`,
//! ...), taking the query kind first and the shape second. Everything
//! here delegates to the relation-generic algorithms in
//! [`crate::search`], [`crate::construct`] and [`crate::length`].
//!
//! ```
//! use seqshape::Position;
//! use seqshape::dsl;
//! use seqshape::shape;
//!
//! let s = shape!["a", "b", "c", "x", "d"];
//! assert_eq!(dsl::first_index_equal(&"x", &s), Position::At(3));
//! assert_eq!(
//!     dsl::first_index_equal_or(&"y", &s, "NotFound"),
//!     Position::NotFound("NotFound")
//! );
//! ```

use crate::construct;
use crate::construct::Count;
use crate::length;
use crate::length::LengthOrdering;
use crate::length::Sorted;
use crate::relation::Equal;
use crate::relation::KindOrder;
use crate::relation::Subset;
use crate::relation::Superset;
use crate::search;
use crate::search::Position;
use crate::shape::Shape;
use crate::shape::ShapeError;

macro_rules! search_family {
    (
        $relation:ident,
        $first:ident,
        $first_or:ident,
        $last:ident,
        $last_or:ident,
        $all:ident
    ) => {
        pub fn $first<K: KindOrder>(query: &K, shape: &Shape<K>) -> Position {
            search::first_index(shape, query, $relation)
        }

        pub fn $first_or<K: KindOrder, S>(query: &K, shape: &Shape<K>, not_found: S) -> Position<S> {
            search::first_index_or(shape, query, $relation, not_found)
        }

        pub fn $last<K: KindOrder>(query: &K, shape: &Shape<K>) -> Position {
            search::last_index(shape, query, $relation)
        }

        pub fn $last_or<K: KindOrder, S>(query: &K, shape: &Shape<K>, not_found: S) -> Position<S> {
            search::last_index_or(shape, query, $relation, not_found)
        }

        pub fn $all<K: KindOrder>(query: &K, shape: &Shape<K>) -> Shape<usize> {
            search::all_indexes(shape, query, $relation)
        }
    };
}

search_family!(
    Equal,
    first_index_equal,
    first_index_equal_or,
    last_index_equal,
    last_index_equal_or,
    all_indexes_equal
);

search_family!(
    Subset,
    first_index_subset,
    first_index_subset_or,
    last_index_subset,
    last_index_subset_or,
    all_indexes_subset
);

search_family!(
    Superset,
    first_index_superset,
    first_index_superset_or,
    last_index_superset,
    last_index_superset_or,
    all_indexes_superset
);

pub fn is_finite<K>(shape: &Shape<K>) -> bool {
    shape.is_finite()
}

/// `(prefix, tail)` of an infinite shape.
pub fn split_infinite<K: Clone>(shape: &Shape<K>) -> Result<(Vec<K>, K), ShapeError> {
    shape.split()
}

pub fn first<K>(shape: &Shape<K>) -> Option<&K> {
    shape.first()
}

pub fn last<K>(shape: &Shape<K>) -> Option<&K> {
    shape.last()
}

pub fn prepend<K: Clone>(shape: &Shape<K>, kind: K) -> Shape<K> {
    shape.prepend(kind)
}

pub fn append<K: Clone>(shape: &Shape<K>, kind: K) -> Result<Shape<K>, ShapeError> {
    shape.append(kind)
}

pub fn reverse<K: Clone>(shape: &Shape<K>) -> Result<Shape<K>, ShapeError> {
    shape.reverse()
}

pub fn concat<K: Clone>(left: &Shape<K>, right: &Shape<K>) -> Result<Shape<K>, ShapeError> {
    left.concat(right)
}

pub fn concat_multiple<K: Clone>(shapes: &[Shape<K>]) -> Result<Shape<K>, ShapeError> {
    construct::concat_multiple(shapes)
}

pub fn repeat<K: Clone>(kind: K, count: Count) -> Result<Shape<K>, ShapeError> {
    construct::repeat(kind, count)
}

pub fn single_tuple_set<K: Clone>(shape: &Shape<K>) -> Shape<Shape<K>> {
    shape.singletons()
}

pub fn fill_tuple<K: Clone, L: Clone>(shape: &Shape<K>, replacement: L) -> Shape<L> {
    shape.fill(replacement)
}

pub fn compare_length<K, L>(left: &Shape<K>, right: &Shape<L>) -> LengthOrdering {
    length::compare_length(left, right)
}

pub fn sort_two_tuple<K>(left: Shape<K>, right: Shape<K>) -> [Shape<K>; 2] {
    length::sort_two(left, right)
}

pub fn sort_two_tuple_or<K, E>(left: Shape<K>, right: Shape<K>, when_equal: E) -> Sorted<K, E> {
    length::sort_two_or(left, right, when_equal)
}

pub fn shortest_tuple<K>(shapes: &[Shape<K>]) -> Result<&Shape<K>, ShapeError> {
    length::shortest(shapes)
}

pub fn longest_tuple<K>(shapes: &[Shape<K>]) -> Result<&Shape<K>, ShapeError> {
    length::longest(shapes)
}
