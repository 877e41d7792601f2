/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::fmt;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

/// The type of error for shape operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ShapeError {
    #[error("shape is finite: only an unbounded shape has a tail to split off")]
    FiniteShape,

    #[error("cannot {op} an unbounded shape")]
    InfiniteShape { op: &'static str },

    #[error("left side of a concatenation must be finite")]
    InfiniteLeft,

    #[error("operand {index} of {count} is unbounded: only the last operand may be")]
    InfiniteOperand { index: usize, count: usize },

    #[error("invalid repeat count {count}: expected an integer >= 0")]
    InvalidRepeatCount { count: String },

    #[error("repeat count {count} exceeds limit {limit}")]
    RepeatTooLarge { count: usize, limit: usize },

    #[error("expected a non-empty set of shapes")]
    EmptyShapeSet,
}

/// A shape is a structural description of an ordered collection:
/// the kind of each element, and whether the collection has a known
/// length or continues without bound.
///
/// An infinite shape is stored as the elements that appear before
/// the unbounded repetition begins, followed by the single kind that
/// repeats. The prefix is kept exactly as given; a prefix element
/// equal to the tail is never folded into it, so `[number,
/// ...number[]]` (at least one number) and `[...number[]]` (any
/// number of numbers) stay distinct.
///
/// ```
/// use seqshape::Class;
/// use seqshape::shape;
///
/// let s = shape![0, 1, 2; ..9];
/// assert_eq!(s.classify(), Class::Infinite);
/// assert_eq!(s.split().unwrap(), (vec![0, 1, 2], 9));
/// assert_eq!(s.iter().take(5).copied().collect::<Vec<_>>(), vec![0, 1, 2, 9, 9]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape<K> {
    /// Exactly these element kinds, in order.
    Finite(Vec<K>),

    /// `prefix`, followed by `tail` repeated without bound.
    Infinite { prefix: Vec<K>, tail: K },
}

/// The three-way classification every algorithm dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    /// A finite shape of length zero.
    Empty,
    /// A finite shape with at least one element.
    FiniteNonEmpty,
    /// A finite prefix followed by an unbounded tail.
    Infinite,
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Empty => write!(f, "empty"),
            Class::FiniteNonEmpty => write!(f, "finite"),
            Class::Infinite => write!(f, "infinite"),
        }
    }
}

/// A borrowed view of a [`Shape`], tagged by its [`Class`].
///
/// Algorithms classify once on entry through [`Shape::form`] and
/// match on the result, rather than re-deriving the classification
/// at each step.
#[derive(Debug)]
pub enum Form<'a, K> {
    Empty,
    /// Non-empty.
    Finite(&'a [K]),
    /// The decomposition `(prefix, tail)`.
    Infinite(&'a [K], &'a K),
}

impl<K> Clone for Form<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Form<'_, K> {}

/// A walk over the elements of a shape, one element at a time.
///
/// `Cursor` is the shape's element iterator. On an infinite shape it
/// never terminates: once the prefix is exhausted it keeps yielding
/// the tail kind, and the walk reaches a fixpoint (see
/// [`Cursor::is_periodic`]).
#[derive(Debug)]
pub struct Cursor<'a, K> {
    prefix: &'a [K],
    tail: Option<&'a K>,
}

impl<K> Clone for Cursor<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Cursor<'_, K> {}

impl<'a, K> Cursor<'a, K> {
    /// Peel the next element, returning it together with the rest of
    /// the walk, or `None` if nothing remains.
    pub fn uncons(self) -> Option<(&'a K, Cursor<'a, K>)> {
        match (self.prefix.split_first(), self.tail) {
            (Some((head, prefix)), tail) => Some((head, Cursor { prefix, tail })),
            (None, Some(tail)) => Some((tail, self)),
            (None, None) => None,
        }
    }

    /// Whether the remaining walk is a fixpoint of [`Cursor::uncons`]:
    /// peeling one more element leaves it unchanged, which happens
    /// exactly when all that remains is the unbounded tail.
    pub fn is_periodic(&self) -> bool {
        self.prefix.is_empty() && self.tail.is_some()
    }

    /// Whether nothing remains.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_empty() && self.tail.is_none()
    }

    /// The number of remaining elements, or `None` if unbounded.
    pub fn remaining(&self) -> Option<usize> {
        match self.tail {
            Some(_) => None,
            None => Some(self.prefix.len()),
        }
    }
}

impl<'a, K> Iterator for Cursor<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let (head, rest) = self.uncons()?;
        *self = rest;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl<K> Shape<K> {
    /// The empty shape, `[]`.
    pub fn empty() -> Self {
        Shape::Finite(Vec::new())
    }

    /// A shape of exactly `kinds`.
    pub fn finite(kinds: Vec<K>) -> Self {
        Shape::Finite(kinds)
    }

    /// `prefix` followed by `tail` repeated without bound.
    pub fn infinite(prefix: Vec<K>, tail: K) -> Self {
        Shape::Infinite { prefix, tail }
    }

    /// `tail` repeated without bound, with no prefix: `[...tail[]]`.
    pub fn repeated(tail: K) -> Self {
        Shape::Infinite {
            prefix: Vec::new(),
            tail,
        }
    }

    /// Classify this shape as empty, finite-nonempty or infinite.
    pub fn classify(&self) -> Class {
        let class = match self.form() {
            Form::Empty => Class::Empty,
            Form::Finite(_) => Class::FiniteNonEmpty,
            Form::Infinite(..) => Class::Infinite,
        };
        tracing::trace!(%class, "classified shape");
        class
    }

    /// The tagged, borrowed view of this shape.
    pub fn form(&self) -> Form<'_, K> {
        match self {
            Shape::Finite(kinds) if kinds.is_empty() => Form::Empty,
            Shape::Finite(kinds) => Form::Finite(kinds),
            Shape::Infinite { prefix, tail } => Form::Infinite(prefix, tail),
        }
    }

    /// Whether this shape has a known length. The empty shape is
    /// finite.
    pub fn is_finite(&self) -> bool {
        matches!(self, Shape::Finite(_))
    }

    /// Whether this is the empty shape.
    pub fn is_empty(&self) -> bool {
        matches!(self.form(), Form::Empty)
    }

    /// The number of elements, or `None` for an infinite shape.
    pub fn len(&self) -> Option<usize> {
        match self {
            Shape::Finite(kinds) => Some(kinds.len()),
            Shape::Infinite { .. } => None,
        }
    }

    /// A walk over this shape's elements. Unbounded for infinite
    /// shapes.
    pub fn cursor(&self) -> Cursor<'_, K> {
        match self {
            Shape::Finite(kinds) => Cursor {
                prefix: kinds,
                tail: None,
            },
            Shape::Infinite { prefix, tail } => Cursor {
                prefix,
                tail: Some(tail),
            },
        }
    }

    /// Iterate over element kinds. Equivalent to [`Shape::cursor`].
    pub fn iter(&self) -> Cursor<'_, K> {
        self.cursor()
    }

    /// The element kind at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&K> {
        match self {
            Shape::Finite(kinds) => kinds.get(index),
            Shape::Infinite { prefix, tail } => Some(prefix.get(index).unwrap_or(tail)),
        }
    }

    /// The kind of the first element, if any. For `[...t[]]` this is
    /// `t`.
    pub fn first(&self) -> Option<&K> {
        self.get(0)
    }

    /// The kind of the last element, if any. The last element of an
    /// infinite shape is its tail kind.
    pub fn last(&self) -> Option<&K> {
        match self {
            Shape::Finite(kinds) => kinds.last(),
            Shape::Infinite { tail, .. } => Some(tail),
        }
    }

    /// Borrowing decomposition of an infinite shape into its finite
    /// prefix and tail kind.
    ///
    /// The shape is walked head to tail, peeling one element at a
    /// time, until the remaining walk is periodic; the peeled
    /// elements are the prefix. Returns `None` for finite shapes.
    pub fn decompose(&self) -> Option<(&[K], &K)> {
        let Shape::Infinite { prefix, .. } = self else {
            return None;
        };
        let mut rest = self.cursor();
        let mut peeled = 0;
        loop {
            let (head, next) = rest.uncons()?;
            if rest.is_periodic() {
                tracing::trace!(prefix_len = peeled, "decomposed infinite shape");
                return Some((&prefix[..peeled], head));
            }
            peeled += 1;
            rest = next;
        }
    }

    /// Split an infinite shape into `(prefix, tail)` such that the
    /// prefix followed by an unbounded repetition of the tail
    /// reconstructs the shape.
    ///
    /// Only defined for infinite shapes: splitting a finite shape is
    /// a [`ShapeError::FiniteShape`] error.
    pub fn split(&self) -> Result<(Vec<K>, K), ShapeError>
    where
        K: Clone,
    {
        match self.decompose() {
            Some((prefix, tail)) => Ok((prefix.to_vec(), tail.clone())),
            None => {
                tracing::debug!("rejecting split of a finite shape");
                Err(ShapeError::FiniteShape)
            }
        }
    }

    /// Map every element kind, preserving length and finiteness.
    pub fn map<L, F>(&self, mut f: F) -> Shape<L>
    where
        F: FnMut(&K) -> L,
    {
        match self {
            Shape::Finite(kinds) => Shape::Finite(kinds.iter().map(&mut f).collect()),
            Shape::Infinite { prefix, tail } => Shape::Infinite {
                prefix: prefix.iter().map(&mut f).collect(),
                tail: f(tail),
            },
        }
    }
}

impl<K> Default for Shape<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K> From<Vec<K>> for Shape<K> {
    fn from(kinds: Vec<K>) -> Self {
        Shape::Finite(kinds)
    }
}

impl<K> FromIterator<K> for Shape<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Shape::Finite(iter.into_iter().collect())
    }
}

impl<'a, K> IntoIterator for &'a Shape<K> {
    type Item = &'a K;
    type IntoIter = Cursor<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

impl<K: fmt::Display> fmt::Display for Shape<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Finite(kinds) => write!(f, "[{}]", kinds.iter().join(", ")),
            Shape::Infinite { prefix, tail } if prefix.is_empty() => {
                write!(f, "[...{}[]]", tail)
            }
            Shape::Infinite { prefix, tail } => {
                write!(f, "[{}, ...{}[]]", prefix.iter().join(", "), tail)
            }
        }
    }
}

/// Construct a [`Shape`] from element kinds.
///
/// `shape![a, b]` is finite, `shape![a, b; ..t]` continues with `t`
/// repeated without bound, and `shape![..t]` is the pure repetition
/// of `t`.
///
/// ```
/// use seqshape::Shape;
/// use seqshape::shape;
///
/// assert_eq!(shape![1, 2], Shape::finite(vec![1, 2]));
/// assert_eq!(shape![1, 2; ..3], Shape::infinite(vec![1, 2], 3));
/// assert_eq!(shape![..3], Shape::repeated(3));
/// assert_eq!(shape![], Shape::<i32>::empty());
/// ```
#[macro_export]
macro_rules! shape {
    () => {
        $crate::shape::Shape::empty()
    };
    ( ..$tail:expr ) => {
        $crate::shape::Shape::repeated($tail)
    };
    ( $( $kind:expr ),+ $(,)? ) => {
        $crate::shape::Shape::finite(vec![$( $kind ),+])
    };
    ( $( $kind:expr ),+ ; ..$tail:expr ) => {
        $crate::shape::Shape::infinite(vec![$( $kind ),+], $tail)
    };
}
