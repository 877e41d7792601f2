/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! A small lattice of element kinds.
//!
//! [`Kind`] is a self-contained kind universe: base kinds (`number`,
//! `string`, ...), literal kinds (`3`, `'x'`, `true`), their unions,
//! and the two bounds `never` (no values) and `unknown` (all values).
//! It implements [`KindOrder`], which makes every search relation
//! meaningful over it:
//!
//! ```text
//!                 unknown
//!        /      /     \        \
//!   boolean  number  string  object
//!    /  \      |       |
//! true false  0,1,..  'a',..
//!        \     |      /
//!             never
//! ```
//!
//! Unions are kept in a normal form (see [`Kind::union`]) so that
//! structural equality coincides with mutual inclusion for the kinds
//! this module can construct.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

use crate::parse;
use crate::parse::ParseError;
use crate::relation::KindOrder;

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize
)]
pub enum Kind {
    /// The empty kind; a subset of every kind.
    Never,
    /// The universal kind; a superset of every kind.
    Unknown,
    Boolean,
    Number,
    String,
    Object,
    /// A boolean literal.
    Bool(bool),
    /// An integer literal.
    Num(i64),
    /// A string literal.
    Str(String),
    /// A normalized union of at least two kinds.
    Union(BTreeSet<Kind>),
}

impl Kind {
    pub fn bool(value: bool) -> Self {
        Kind::Bool(value)
    }

    pub fn num(value: i64) -> Self {
        Kind::Num(value)
    }

    pub fn str(value: &str) -> Self {
        Kind::Str(value.to_string())
    }

    /// The union of `kinds`, in normal form:
    /// - nested unions are flattened and `never` is dropped;
    /// - `true | false` becomes `boolean`;
    /// - any member included in another member is absorbed (`1 |
    ///   number` is `number`), and `unknown` absorbs everything;
    /// - an empty union is `never`, a singleton union is its member.
    pub fn union<I: IntoIterator<Item = Kind>>(kinds: I) -> Kind {
        let mut members = BTreeSet::new();
        for kind in kinds {
            match kind {
                Kind::Union(inner) => members.extend(inner),
                Kind::Never => {}
                other => {
                    members.insert(other);
                }
            }
        }

        if members.contains(&Kind::Bool(true)) && members.contains(&Kind::Bool(false)) {
            members.remove(&Kind::Bool(true));
            members.remove(&Kind::Bool(false));
            members.insert(Kind::Boolean);
        }

        let members: BTreeSet<Kind> = members
            .iter()
            .filter(|member| {
                !members
                    .iter()
                    .any(|other| other != *member && member.is_subset_of(other))
            })
            .cloned()
            .collect();

        let mut members = members.into_iter();
        match (members.next(), members.next()) {
            (None, _) => Kind::Never,
            (Some(only), None) => only,
            (Some(first), Some(second)) => {
                Kind::Union([first, second].into_iter().chain(members).collect())
            }
        }
    }

    /// Whether this is a literal kind.
    pub fn is_literal(&self) -> bool {
        matches!(self, Kind::Bool(_) | Kind::Num(_) | Kind::Str(_))
    }

    /// The members of this kind viewed as a union. Non-union kinds
    /// are a union of one.
    pub fn members(&self) -> Vec<&Kind> {
        match self {
            Kind::Union(members) => members.iter().collect(),
            Kind::Never => Vec::new(),
            other => vec![other],
        }
    }
}

impl KindOrder for Kind {
    fn equal(&self, other: &Self) -> bool {
        self == other
    }

    fn is_subset_of(&self, other: &Self) -> bool {
        match (self, other) {
            (Kind::Never, _) | (_, Kind::Unknown) => true,
            (Kind::Union(members), _) => members.iter().all(|m| m.is_subset_of(other)),
            (Kind::Boolean, Kind::Union(_)) => {
                Kind::Bool(true).is_subset_of(other) && Kind::Bool(false).is_subset_of(other)
            }
            (_, Kind::Union(members)) => members.iter().any(|m| self.is_subset_of(m)),
            (Kind::Bool(_), Kind::Boolean)
            | (Kind::Num(_), Kind::Number)
            | (Kind::Str(_), Kind::String) => true,
            (a, b) => a == b,
        }
    }
}

impl From<bool> for Kind {
    fn from(value: bool) -> Self {
        Kind::Bool(value)
    }
}

impl From<i64> for Kind {
    fn from(value: i64) -> Self {
        Kind::Num(value)
    }
}

impl From<&str> for Kind {
    fn from(value: &str) -> Self {
        Kind::str(value)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Never => write!(f, "never"),
            Kind::Unknown => write!(f, "unknown"),
            Kind::Boolean => write!(f, "boolean"),
            Kind::Number => write!(f, "number"),
            Kind::String => write!(f, "string"),
            Kind::Object => write!(f, "object"),
            Kind::Bool(value) => write!(f, "{}", value),
            Kind::Num(value) => write!(f, "{}", value),
            Kind::Str(value) => {
                let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
                write!(f, "'{}'", escaped)
            }
            Kind::Union(members) => write!(f, "({})", members.iter().join(" | ")),
        }
    }
}

impl FromStr for Kind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_kind(s)
    }
}
