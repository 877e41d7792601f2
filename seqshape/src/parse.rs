/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! This module defines a parser of the compact syntax used to write
//! [`Kind`]s and shapes over them.
//! ```text
//! shape   ::= "[" ( items ( "," spread )? | spread )? "]"
//! items   ::= kind ( "," kind )*
//! spread  ::= "..." kind "[" "]"
//! kind    ::= atom ( "|" atom )*
//! atom    ::= "never" | "unknown" | "boolean" | "number" | "string"
//!           | "object" | "true" | "false"
//!           | integer
//!           | "'" ( [^'\\] | "\\'" | "\\\\" )* "'"
//!           | "(" kind ")"
//! integer ::= "-"? [0-9]+
//! ```
//!
//! Notes:
//! - `...k[]` is the unbounded tail: `[number, ...string[]]` is a
//!   number followed by any number of strings.
//! - `|` builds a union, normalized by [`Kind::union`]; so `true |
//!   false` parses as `boolean`.
//! - Whitespace may surround any token, but never splits one: `[1 2]`
//!   is an error, not `[12]`.
//! - Inside a string literal, `\'` is a quote and `\\` a backslash.
//! - Shapes with more than [`crate::config::Config::max_shape_len`]
//!   elements, and kinds nested deeper than
//!   [`crate::config::Config::max_kind_depth`] parentheses, are
//!   rejected.

use std::str::FromStr;

use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::char;
use nom::character::complete::digit1;
use nom::character::complete::multispace0;
use nom::character::complete::none_of;
use nom::character::complete::one_of;
use nom::combinator::all_consuming;
use nom::combinator::map;
use nom::combinator::map_res;
use nom::combinator::opt;
use nom::combinator::recognize;
use nom::combinator::value;
use nom::multi::fold_many0;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::sequence::preceded;

use crate::config;
use crate::kind::Kind;
use crate::shape::Shape;

/// Errors that can occur while parsing kinds and shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("failed to parse {input:?}: unexpected input at {remaining:?}")]
    Syntax { input: String, remaining: String },

    #[error("shape has {len} elements, exceeding limit {limit}")]
    TooLong { len: usize, limit: usize },

    #[error("kind is nested {depth} parentheses deep, exceeding limit {limit}")]
    TooDeep { depth: usize, limit: usize },
}

// `inner`, with any surrounding whitespace skipped.
fn ws<'a, O, P>(
    inner: P,
) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn integer(input: &str) -> IResult<&str, i64> {
    map_res(recognize((opt(char('-')), digit1)), str::parse).parse(input)
}

fn quoted(input: &str) -> IResult<&str, String> {
    delimited(
        char('\''),
        fold_many0(
            alt((none_of("\\'"), preceded(char('\\'), one_of("\\'")))),
            String::new,
            |mut value: String, c: char| {
                value.push(c);
                value
            },
        ),
        char('\''),
    )
    .parse(input)
}

fn keyword(input: &str) -> IResult<&str, Kind> {
    alt((
        value(Kind::Never, tag("never")),
        value(Kind::Unknown, tag("unknown")),
        value(Kind::Boolean, tag("boolean")),
        value(Kind::Number, tag("number")),
        value(Kind::String, tag("string")),
        value(Kind::Object, tag("object")),
        value(Kind::Bool(true), tag("true")),
        value(Kind::Bool(false), tag("false")),
    ))
    .parse(input)
}

fn atom(input: &str) -> IResult<&str, Kind> {
    ws(alt((
        delimited(char('('), kind_expression, ws(char(')'))),
        keyword,
        map(integer, Kind::Num),
        map(quoted, Kind::Str),
    )))
    .parse(input)
}

/// Parse a kind: one atom, or a `|`-separated union of atoms.
///
/// Parenthesized kinds recurse without bound here; [`parse_kind`] and
/// [`parse_shape`] check the nesting depth first.
pub fn kind_expression(input: &str) -> IResult<&str, Kind> {
    map(separated_list1(ws(char('|')), atom), Kind::union).parse(input)
}

fn spread(input: &str) -> IResult<&str, Kind> {
    delimited(
        ws(tag("...")),
        kind_expression,
        (ws(char('[')), ws(char(']'))),
    )
    .parse(input)
}

fn items(input: &str) -> IResult<&str, Shape<Kind>> {
    map(
        (
            separated_list1(ws(char(',')), kind_expression),
            opt(preceded(ws(char(',')), spread)),
        ),
        |(prefix, tail)| match tail {
            Some(tail) => Shape::infinite(prefix, tail),
            None => Shape::finite(prefix),
        },
    )
    .parse(input)
}

/// Parse a bracketed shape.
pub fn shape_expression(input: &str) -> IResult<&str, Shape<Kind>> {
    delimited(
        ws(char('[')),
        map(
            opt(alt((map(spread, Shape::repeated), items))),
            Option::unwrap_or_default,
        ),
        ws(char(']')),
    )
    .parse(input)
}

// The deepest parenthesis nesting outside string literals.
fn nesting_depth(input: &str) -> usize {
    let (mut depth, mut deepest) = (0usize, 0usize);
    let mut quoted = false;
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        match (quoted, c) {
            (true, '\\') => {
                chars.next();
            }
            (_, '\'') => quoted = !quoted,
            (false, '(') => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            (false, ')') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

fn run<T>(input: &str, parser: fn(&str) -> IResult<&str, T>) -> Result<T, ParseError> {
    let depth = nesting_depth(input);
    let limit = config::global::max_kind_depth();
    if depth > limit {
        tracing::debug!(depth, limit, "rejecting deeply nested input");
        return Err(ParseError::TooDeep { depth, limit });
    }

    let result = all_consuming(parser).parse(input);
    match result {
        Ok((_, parsed)) => Ok(parsed),
        Err(err) => {
            let remaining = match err {
                nom::Err::Error(e) | nom::Err::Failure(e) => e.input.to_string(),
                nom::Err::Incomplete(_) => String::new(),
            };
            tracing::debug!(input, %remaining, "rejecting malformed input");
            Err(ParseError::Syntax {
                input: input.to_string(),
                remaining,
            })
        }
    }
}

/// Parses a kind from a string.
pub fn parse_kind(input: &str) -> Result<Kind, ParseError> {
    run(input, kind_expression)
}

/// Parses a shape from a string.
///
/// # Returns
///
/// * `Ok(Shape<Kind>)` if parsing succeeds
/// * `Err(ParseError::Syntax)` if the input is malformed
/// * `Err(ParseError::TooLong)` if the shape has more elements than
///   the configured limit
/// * `Err(ParseError::TooDeep)` if a kind nests parentheses deeper
///   than the configured limit
pub fn parse_shape(input: &str) -> Result<Shape<Kind>, ParseError> {
    let shape = run(input, shape_expression)?;
    let len = match &shape {
        Shape::Finite(kinds) => kinds.len(),
        Shape::Infinite { prefix, .. } => prefix.len(),
    };
    let limit = config::global::max_shape_len();
    if len > limit {
        tracing::debug!(len, limit, "rejecting oversized shape");
        return Err(ParseError::TooLong { len, limit });
    }
    Ok(shape)
}

impl FromStr for Shape<Kind> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_shape(s)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::Config;
    use crate::shape;
    use crate::strategy::gen_shape;

    fn parse(input: &str) -> Shape<Kind> {
        parse_shape(input).unwrap()
    }

    #[test]
    fn test_kinds() {
        assert_eq!(parse_kind("number").unwrap(), Kind::Number);
        assert_eq!(parse_kind("never").unwrap(), Kind::Never);
        assert_eq!(parse_kind("unknown").unwrap(), Kind::Unknown);
        assert_eq!(parse_kind("-42").unwrap(), Kind::num(-42));
        assert_eq!(parse_kind("'a b'").unwrap(), Kind::str("a b"));
        assert_eq!(parse_kind("''").unwrap(), Kind::str(""));
        assert_eq!(parse_kind("true | false").unwrap(), Kind::Boolean);
        assert_eq!(
            parse_kind("'a' | ('b' | 1)").unwrap(),
            Kind::union([Kind::str("a"), Kind::str("b"), Kind::num(1)])
        );
        assert_eq!(parse_kind("1 | number").unwrap(), Kind::Number);
        assert_eq!("string".parse::<Kind>().unwrap(), Kind::String);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(parse("[]"), Shape::empty());
        assert_eq!(parse("[ ]"), Shape::empty());
        assert_eq!(
            parse("[0, 'x', boolean]"),
            shape![Kind::num(0), Kind::str("x"), Kind::Boolean]
        );
        assert_eq!(parse("[...number[]]"), shape![..Kind::Number]);
        assert_eq!(
            parse("[ true, ...( 'a' | 'b' )[] ]"),
            shape![Kind::bool(true); ..Kind::union([Kind::str("a"), Kind::str("b")])]
        );
        // The prefix element equal to the tail is kept.
        assert_eq!(
            parse("[number, ...number[]]"),
            shape![Kind::Number; ..Kind::Number]
        );
    }

    #[test]
    fn test_syntax_errors() {
        for input in [
            "",
            "[",
            "[1,",
            "[...number]",
            "[...number[], 1]",
            "[1, ...number[], ...string[]]",
            "['unterminated]",
            "[nothing]",
            "[1,]",
            "[1 2]",
            "[true false]",
            "[num ber]",
            "[. ..number[]]",
            "['a\\']",
        ] {
            assert!(
                matches!(parse_shape(input), Err(ParseError::Syntax { .. })),
                "{input:?} should not parse"
            );
        }
        assert!(parse_kind("number |").is_err());
        assert!(parse_kind("(number").is_err());
    }

    #[test]
    fn test_whitespace_between_tokens() {
        assert_eq!(parse(" [ 1 ,2 ] "), shape![Kind::num(1), Kind::num(2)]);
        assert_eq!(parse("[\t...\nnumber [ ] ]"), shape![..Kind::Number]);
        assert_eq!(parse("[-7]"), shape![Kind::num(-7)]);
        assert!(parse_shape("[- 7]").is_err());
        assert_eq!(parse("['  ']"), shape![Kind::str("  ")]);
    }

    #[test]
    fn test_escaped_quotes() {
        assert_eq!(parse_kind(r"'it\'s'").unwrap(), Kind::str("it's"));
        assert_eq!(parse_kind(r"'a\\b'").unwrap(), Kind::str(r"a\b"));
        assert!(parse_kind(r"'\n'").is_err());

        let shape = shape![Kind::str("it's"), Kind::str(r"\")];
        assert_eq!(shape.to_string(), r"['it\'s', '\\']");
        assert_eq!(parse(&shape.to_string()), shape);
    }

    #[test]
    fn test_nesting_depth() {
        let nested = |depth: usize| format!("[{}1{}]", "(".repeat(depth), ")".repeat(depth));

        // Deep enough to exhaust the stack if it were parsed.
        assert!(matches!(
            parse_shape(&nested(100_000)),
            Err(ParseError::TooDeep { depth: 100_000, .. })
        ));
        // Parentheses inside string literals do not count.
        assert_eq!(
            parse_kind(&format!("'{}'", "(".repeat(1000))).unwrap(),
            Kind::str(&"(".repeat(1000))
        );

        let lock = crate::config::global::lock();
        let mut config = Config::new();
        config.set_max_kind_depth(100);
        let _guard = lock.override_config(config);

        assert_eq!(parse(&nested(100)), shape![Kind::num(1)]);
        assert_eq!(
            parse_shape(&nested(101)).unwrap_err(),
            ParseError::TooDeep {
                depth: 101,
                limit: 100
            }
        );
    }

    #[test]
    fn test_error_message() {
        let err = parse_shape("[1, ?]").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                input: "[1, ?]".to_string(),
                remaining: ", ?]".to_string(),
            }
        );
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn test_too_long() {
        let lock = crate::config::global::lock();
        let mut config = Config::new();
        config.set_max_shape_len(100);
        let _guard = lock.override_config(config);

        let at_limit = format!("[{}]", vec!["0"; 100].join(", "));
        assert_eq!(parse_shape(&at_limit).unwrap().len(), Some(100));

        let over = format!("[{}, ...number[]]", vec!["0"; 101].join(", "));
        assert_eq!(
            parse_shape(&over).unwrap_err(),
            ParseError::TooLong {
                len: 101,
                limit: 100
            }
        );
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_rejection_logged() {
        assert!(parse_shape("[1 2]").is_err());
        assert!(logs_contain("rejecting malformed input"));
    }

    proptest! {
        #[test]
        fn display_parses_back(shape in gen_shape()) {
            prop_assert_eq!(parse(&shape.to_string()), shape);
        }
    }
}
