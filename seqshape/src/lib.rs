/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Structural algorithms over sequence shapes.
//!
//! A [`Shape`] describes the element kinds of an ordered collection
//! without holding any data: either a sequence of known length, or a
//! finite prefix followed by an unbounded repetition of a single tail
//! kind. This crate answers purely structural questions about such
//! descriptions: is the shape finite, where does a kind first or last
//! occur, what is the concatenation of two shapes, which of a set of
//! shapes is the shortest.
//!
//! Element kinds are opaque to the engine. They are compared only
//! through the [`KindOrder`] capability, and searches are
//! parameterized by a [`Relation`] ([`Equal`], [`Subset`] or
//! [`Superset`]). The [`Kind`] lattice is a ready-made kind
//! universe with a compact textual syntax:
//!
//! ```
//! use seqshape::Kind;
//! use seqshape::Position;
//! use seqshape::Shape;
//! use seqshape::Subset;
//! use seqshape::search::first_index;
//!
//! let shape: Shape<Kind> = "[true, false, 'x', 3, ...number[]]".parse().unwrap();
//! assert_eq!(first_index(&shape, &Kind::String, Subset), Position::At(2));
//! assert_eq!(shape.to_string(), "[true, false, 'x', 3, ...number[]]");
//! ```

/// Process-wide limits and their environment/YAML sources.
pub mod config;

/// Prepend, append, reverse, concatenation, repetition and fills.
pub mod construct;

/// Flat, per-relation named operations.
pub mod dsl;

/// A concrete lattice of element kinds.
pub mod kind;

/// Length comparison and extremal selection.
pub mod length;

/// A parser for the compact textual syntax of kinds and shapes.
pub mod parse;

/// Element-kind comparison capability and search relations.
pub mod relation;

/// First, last and all-indexes searches.
pub mod search;

/// Core shape representation, classification and decomposition.
pub mod shape;

/// Property-based generators for randomized test input.
#[cfg(test)]
pub mod strategy;

pub use construct::Count;
pub use construct::concat_multiple;
pub use construct::repeat;
pub use kind::Kind;
pub use length::LengthOrdering;
pub use length::Sorted;
pub use length::compare_length;
pub use length::longest;
pub use length::shortest;
pub use length::sort_two;
pub use length::sort_two_or;
pub use parse::ParseError;
pub use relation::Equal;
pub use relation::KindOrder;
pub use relation::Relation;
pub use relation::Subset;
pub use relation::Superset;
pub use search::Absent;
pub use search::Position;
pub use shape::Class;
pub use shape::Cursor;
pub use shape::Form;
pub use shape::Shape;
pub use shape::ShapeError;
