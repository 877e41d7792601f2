/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Element kinds are opaque to the engine. Everything it knows about
//! them comes from the [`KindOrder`] capability, and searches are
//! parameterized by a [`Relation`] built on top of it, so the search
//! algorithms are written once rather than once per relation.

/// The comparison capability over element kinds.
///
/// Laws:
/// - `equal` is an equivalence relation.
/// - `is_subset_of` is a preorder: reflexive (`a.is_subset_of(&a)`)
///   and transitive.
/// - `a.is_superset_of(&b) == b.is_subset_of(&a)`.
pub trait KindOrder {
    /// Structural equality of two kinds.
    fn equal(&self, other: &Self) -> bool;

    /// Whether every value of `self` is also a value of `other`
    /// (`self` is narrower than or equal to `other`).
    fn is_subset_of(&self, other: &Self) -> bool;

    /// Whether every value of `other` is also a value of `self`.
    fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }
}

// Kinds with no structure beyond identity: a kind only contains
// itself.
macro_rules! discrete_kind {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl KindOrder for $ty {
                fn equal(&self, other: &Self) -> bool {
                    self == other
                }

                fn is_subset_of(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

discrete_kind!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    String,
    &'static str,
);

/// A predicate deciding whether an element kind matches a query kind.
///
/// Any `Fn(&K, &K) -> bool` closure taking `(element, query)` is a
/// relation.
pub trait Relation<K> {
    /// Whether `element` matches `query`.
    ///
    /// Searches apply the same test to the tail of an infinite shape:
    /// a tail that holds matches at every position past the prefix.
    fn holds(&self, element: &K, query: &K) -> bool;
}

/// The element kind is structurally identical to the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Equal;

/// The element kind is narrower than or equal to the query: the query
/// accepts it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Subset;

/// The element kind is wider than or equal to the query: the element
/// accepts the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Superset;

impl<K: KindOrder> Relation<K> for Equal {
    fn holds(&self, element: &K, query: &K) -> bool {
        element.equal(query)
    }
}

impl<K: KindOrder> Relation<K> for Subset {
    fn holds(&self, element: &K, query: &K) -> bool {
        element.is_subset_of(query)
    }
}

impl<K: KindOrder> Relation<K> for Superset {
    fn holds(&self, element: &K, query: &K) -> bool {
        element.is_superset_of(query)
    }
}

impl<K, F> Relation<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    fn holds(&self, element: &K, query: &K) -> bool {
        self(element, query)
    }
}
