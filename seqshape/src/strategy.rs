/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for [`Kind`] and [`Shape`].
//!
//! The main entry point is [`gen_shape`], which generates a finite or
//! infinite shape of [`Kind`]s with a short prefix. Every generated
//! kind is in union normal form, so it prints and parses back to
//! itself.
//!
//! Example usage:
//!
//! ```ignore
//! use proptest::prelude::*;
//!
//! use crate::strategy::gen_shape;
//!
//! proptest! {
//!     #[test]
//!     fn test_shape(s in gen_shape()) {
//!         // Use `s` as input to search or construction tests
//!     }
//! }
//! ```
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use proptest::prelude::*;

use crate::kind::Kind;
use crate::shape::Shape;

/// The longest prefix any generator here produces.
pub const MAX_LEN: usize = 8;

/// Generates a non-union [`Kind`]: a base kind, a bound, or a small
/// literal.
pub fn gen_atom() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Never),
        Just(Kind::Unknown),
        Just(Kind::Boolean),
        Just(Kind::Number),
        Just(Kind::String),
        Just(Kind::Object),
        any::<bool>().prop_map(Kind::Bool),
        (-3i64..=3).prop_map(Kind::Num),
        "[a-c' \\\\]{0,3}".prop_map(|s| Kind::str(&s)),
    ]
}

/// Generates a [`Kind`], normalizing any union of up to three atoms.
pub fn gen_kind() -> impl Strategy<Value = Kind> {
    prop_oneof![
        3 => gen_atom(),
        1 => prop::collection::vec(gen_atom(), 2..=3).prop_map(Kind::union),
    ]
}

/// Generates a finite shape of up to `max_len` kinds.
pub fn gen_finite(max_len: usize) -> impl Strategy<Value = Shape<Kind>> {
    prop::collection::vec(gen_kind(), 0..=max_len).prop_map(Shape::finite)
}

/// Generates an infinite shape whose prefix has up to `max_len`
/// kinds.
pub fn gen_infinite(max_len: usize) -> impl Strategy<Value = Shape<Kind>> {
    (prop::collection::vec(gen_kind(), 0..=max_len), gen_kind())
        .prop_map(|(prefix, tail)| Shape::infinite(prefix, tail))
}

/// Generates a finite or infinite shape.
pub fn gen_shape() -> impl Strategy<Value = Shape<Kind>> {
    prop_oneof![gen_finite(MAX_LEN), gen_infinite(MAX_LEN)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KindOrder;

    proptest! {
        #[test]
        fn test_generated_kinds_are_reflexive(kind in gen_kind()) {
            prop_assert!(kind.is_subset_of(&kind));
            prop_assert!(kind.is_superset_of(&kind));
            prop_assert!(kind.equal(&kind));
        }

        #[test]
        fn test_generated_kinds_are_normal(kind in gen_kind()) {
            prop_assert_eq!(Kind::union(kind.members().into_iter().cloned()), kind);
        }

        #[test]
        fn test_finite_respects_max_len(shape in gen_finite(4)) {
            prop_assert!(shape.len().is_some_and(|n| n <= 4));
        }
    }
}
