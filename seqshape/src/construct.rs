/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Building new shapes out of old ones.
//!
//! Every operation returns a new shape; the input is never modified.
//! Operations that have no meaningful result on an unbounded shape
//! (reversing it, appending to it, concatenating after it) return a
//! [`ShapeError`] rather than a best-effort guess.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::config;
use crate::shape::Shape;
use crate::shape::ShapeError;

impl<K: Clone> Shape<K> {
    /// `kind` followed by this shape.
    pub fn prepend(&self, kind: K) -> Shape<K> {
        match self {
            Shape::Finite(kinds) => {
                Shape::Finite(std::iter::once(kind).chain(kinds.iter().cloned()).collect())
            }
            Shape::Infinite { prefix, tail } => Shape::Infinite {
                prefix: std::iter::once(kind).chain(prefix.iter().cloned()).collect(),
                tail: tail.clone(),
            },
        }
    }

    /// This shape followed by `kind`. Defined as reverse, prepend,
    /// reverse, and so only on finite shapes.
    pub fn append(&self, kind: K) -> Result<Shape<K>, ShapeError> {
        if !self.is_finite() {
            tracing::debug!("rejecting append to an infinite shape");
            return Err(ShapeError::InfiniteShape { op: "append to" });
        }
        self.reverse()?.prepend(kind).reverse()
    }

    /// The elements of this shape in reverse order.
    ///
    /// An unbounded repetition has no last element to start from, so
    /// reversing an infinite shape is an error.
    pub fn reverse(&self) -> Result<Shape<K>, ShapeError> {
        match self {
            Shape::Finite(kinds) => Ok(Shape::Finite(kinds.iter().rev().cloned().collect())),
            Shape::Infinite { .. } => {
                tracing::debug!("rejecting reverse of an infinite shape");
                Err(ShapeError::InfiniteShape { op: "reverse" })
            }
        }
    }

    /// This shape followed by `right`.
    ///
    /// The left side must be finite. The right side may be infinite,
    /// in which case the result is infinite with its prefix extended
    /// by all of `self`.
    pub fn concat(&self, right: &Shape<K>) -> Result<Shape<K>, ShapeError> {
        let Shape::Finite(left) = self else {
            tracing::debug!("rejecting concatenation after an infinite shape");
            return Err(ShapeError::InfiniteLeft);
        };
        Ok(match right {
            Shape::Finite(kinds) => Shape::Finite([left.as_slice(), kinds.as_slice()].concat()),
            Shape::Infinite { prefix, tail } => Shape::Infinite {
                prefix: [left.as_slice(), prefix.as_slice()].concat(),
                tail: tail.clone(),
            },
        })
    }

    /// A shape of the same length and finiteness with every element
    /// kind replaced by `replacement`.
    pub fn fill<L: Clone>(&self, replacement: L) -> Shape<L> {
        self.map(|_| replacement.clone())
    }

    /// Partition this shape into one single-element shape per
    /// element. The partition of an infinite shape is itself
    /// infinite, with `[tail]` as its tail.
    pub fn singletons(&self) -> Shape<Shape<K>> {
        self.map(|kind| Shape::finite(vec![kind.clone()]))
    }
}

/// How many times [`repeat`] repeats a kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize
)]
pub enum Count {
    Exactly(usize),
    /// Without bound.
    Unbounded,
}

impl From<usize> for Count {
    fn from(count: usize) -> Self {
        Count::Exactly(count)
    }
}

impl TryFrom<i64> for Count {
    type Error = ShapeError;

    fn try_from(count: i64) -> Result<Self, Self::Error> {
        usize::try_from(count)
            .map(Count::Exactly)
            .map_err(|_| ShapeError::InvalidRepeatCount {
                count: count.to_string(),
            })
    }
}

impl TryFrom<f64> for Count {
    type Error = ShapeError;

    /// Positive infinity is [`Count::Unbounded`]; any other count
    /// must be a non-negative integer.
    fn try_from(count: f64) -> Result<Self, Self::Error> {
        if count == f64::INFINITY {
            return Ok(Count::Unbounded);
        }
        if count.is_finite() && count >= 0.0 && count.fract() == 0.0 && count <= usize::MAX as f64
        {
            return Ok(Count::Exactly(count as usize));
        }
        Err(ShapeError::InvalidRepeatCount {
            count: count.to_string(),
        })
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Exactly(n) => write!(f, "{}", n),
            Count::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// `count` copies of `kind`.
///
/// An exact count produces a finite shape, and must not exceed the
/// configured [`max_repeat_count`](config::Config::max_repeat_count).
/// [`Count::Unbounded`] produces `[...kind[]]`.
///
/// ```
/// use seqshape::Count;
/// use seqshape::repeat;
/// use seqshape::shape;
///
/// assert_eq!(repeat('x', Count::Exactly(3)).unwrap(), shape!['x', 'x', 'x']);
/// assert_eq!(repeat('x', Count::Unbounded).unwrap(), shape![..'x']);
/// assert!(Count::try_from(-1i64).is_err());
/// ```
pub fn repeat<K: Clone>(kind: K, count: Count) -> Result<Shape<K>, ShapeError> {
    match count {
        Count::Unbounded => Ok(Shape::repeated(kind)),
        Count::Exactly(count) => {
            let limit = config::global::max_repeat_count();
            if count > limit {
                tracing::debug!(count, limit, "rejecting oversized repeat");
                return Err(ShapeError::RepeatTooLarge { count, limit });
            }
            Ok(Shape::finite(vec![kind; count]))
        }
    }
}

/// Concatenate `shapes` left to right, as a right fold of
/// [`Shape::concat`] seeded with the last operand. The empty sequence
/// concatenates to the empty shape.
///
/// Only the last operand may be infinite; its tail becomes the tail of
/// the result.
pub fn concat_multiple<K: Clone>(shapes: &[Shape<K>]) -> Result<Shape<K>, ShapeError> {
    let count = shapes.len();
    if let Some(index) = shapes
        .iter()
        .take(count.saturating_sub(1))
        .position(|shape| !shape.is_finite())
    {
        tracing::debug!(index, count, "rejecting infinite operand before the last");
        return Err(ShapeError::InfiniteOperand { index, count });
    }
    let Some((last, init)) = shapes.split_last() else {
        return Ok(Shape::empty());
    };
    init.iter()
        .rev()
        .try_fold(last.clone(), |acc, shape| shape.concat(&acc))
}
