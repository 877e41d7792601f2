/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Relation-parameterized searches over shapes.
//!
//! Each search comes in three variants (first, last, all) and is
//! parameterized by a [`Relation`], so `first_index(&s, &q, Subset)`
//! finds the first element kind that is a subset of `q`.
//!
//! On an infinite shape the prefix is searched element by element,
//! and the unbounded tail is tested once as a whole. A matching tail
//! means every position from the end of the prefix onward matches.
//! The searches report that differently, on purpose:
//!
//! - [`first_index`] reports the first such position,
//!   [`Position::At`]`(prefix_len)`;
//! - [`last_index`] has no largest match, and reports the symbolic
//!   [`Position::Unbounded`]`(prefix_len)`;
//! - [`all_indexes`] returns an infinite shape whose tail is
//!   `prefix_len`, standing for the unbounded run of indexes starting
//!   there.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::relation::Relation;
use crate::shape::Form;
use crate::shape::Shape;

/// The default "not found" sentinel.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize
)]
pub struct Absent;

/// The result of a single-position search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position<S = Absent> {
    /// A match at this zero-based position.
    At(usize),
    /// No element matched; carries the caller's sentinel.
    NotFound(S),
    /// Every position from this one onward matches, without bound.
    Unbounded(usize),
}

impl<S> Position<S> {
    /// The concrete matching position, if there is one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Position::At(index) => Some(*index),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Position::NotFound(_))
    }

    /// Replace the not-found sentinel.
    pub fn map_not_found<T, F: FnOnce(S) -> T>(self, f: F) -> Position<T> {
        match self {
            Position::At(index) => Position::At(index),
            Position::NotFound(sentinel) => Position::NotFound(f(sentinel)),
            Position::Unbounded(from) => Position::Unbounded(from),
        }
    }
}

impl<S: fmt::Display> fmt::Display for Position<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::At(index) => write!(f, "{}", index),
            Position::NotFound(sentinel) => write!(f, "{}", sentinel),
            Position::Unbounded(from) => write!(f, "{}..", from),
        }
    }
}

impl fmt::Display for Absent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "absent")
    }
}

/// The position of the first element matching `query`, or
/// [`Position::NotFound`]`(`[`Absent`]`)`.
pub fn first_index<K, R: Relation<K>>(shape: &Shape<K>, query: &K, relation: R) -> Position {
    first_index_or(shape, query, relation, Absent)
}

/// Like [`first_index`], reporting a miss with `not_found`.
pub fn first_index_or<K, R: Relation<K>, S>(
    shape: &Shape<K>,
    query: &K,
    relation: R,
    not_found: S,
) -> Position<S> {
    let found = match shape.form() {
        Form::Empty => None,
        Form::Finite(kinds) => scan(kinds, query, &relation),
        Form::Infinite(prefix, tail) => scan(prefix, query, &relation)
            .or_else(|| relation.holds(tail, query).then_some(prefix.len())),
    };
    found.map_or(Position::NotFound(not_found), Position::At)
}

/// The position of the last element matching `query`.
///
/// If the unbounded tail of an infinite shape matches there is no
/// last match, and the result is [`Position::Unbounded`] from the end
/// of the prefix.
pub fn last_index<K, R: Relation<K>>(shape: &Shape<K>, query: &K, relation: R) -> Position {
    last_index_or(shape, query, relation, Absent)
}

/// Like [`last_index`], reporting a miss with `not_found`.
pub fn last_index_or<K, R: Relation<K>, S>(
    shape: &Shape<K>,
    query: &K,
    relation: R,
    not_found: S,
) -> Position<S> {
    match all_indexes(shape, query, relation) {
        Shape::Infinite { tail, .. } => Position::Unbounded(tail),
        Shape::Finite(indexes) => indexes
            .last()
            .copied()
            .map_or(Position::NotFound(not_found), Position::At),
    }
}

/// Every position matching `query`, in ascending order.
///
/// For an infinite shape whose tail matches, the result is itself
/// infinite: the matching prefix positions followed by the marker
/// `prefix_len` as its tail, meaning "and every position from
/// `prefix_len` on".
///
/// ```
/// use seqshape::Equal;
/// use seqshape::shape;
/// use seqshape::search::all_indexes;
///
/// assert_eq!(all_indexes(&shape!['a', 'x', 'b', 'x'], &'x', Equal), shape![1, 3]);
/// assert_eq!(all_indexes(&shape!['x', 'b'; ..'x'], &'x', Equal), shape![0; ..2]);
/// ```
pub fn all_indexes<K, R: Relation<K>>(shape: &Shape<K>, query: &K, relation: R) -> Shape<usize> {
    let (kinds, marker) = match shape.form() {
        Form::Empty => return Shape::empty(),
        Form::Finite(kinds) => (kinds, None),
        Form::Infinite(prefix, tail) => (
            prefix,
            relation.holds(tail, query).then_some(prefix.len()),
        ),
    };

    let matched = kinds
        .iter()
        .enumerate()
        .filter(|(_, kind)| relation.holds(kind, query))
        .map(|(index, _)| index)
        .collect();

    match marker {
        Some(from) => Shape::infinite(matched, from),
        None => Shape::finite(matched),
    }
}

fn scan<K, R: Relation<K>>(kinds: &[K], query: &K, relation: &R) -> Option<usize> {
    kinds.iter().position(|kind| relation.holds(kind, query))
}
