//! Textual pattern forms.
//!
//! Grammars for the built-in domains, mirrored by their `Display`
//! impls:
//!
//! - item sets: `{a, b, 'two words'}` (bare or single-quoted items)
//! - intervals: `[0, 10]`, `(2, +inf]`, `ø` (also `∅` and `∞`)
//! - ngram sets: `{'hello world', '!'}` (single-quoted phrases)
//!
//! Each domain gets a `FromStr` impl; failures surface as
//! [`PsError::Parse`].

use chumsky::prelude::*;
use std::str::FromStr;

use crate::domains::{IntervalPattern, ItemSetPattern, NgramSetPattern};
use crate::error::PsError;

/// Single-quoted string, no escapes.
fn quoted() -> impl Parser<char, String, Error = Simple<char>> {
    just('\'')
        .ignore_then(none_of('\'').repeated().collect::<String>())
        .then_ignore(just('\''))
}

/// Unquoted item: any run of characters free of delimiters.
fn bare_item() -> impl Parser<char, String, Error = Simple<char>> {
    filter(|c: &char| !c.is_whitespace() && !",{}'".contains(*c))
        .repeated()
        .at_least(1)
        .collect::<String>()
}

/// An interval endpoint: a finite decimal or a signed infinity.
fn endpoint() -> impl Parser<char, f64, Error = Simple<char>> {
    let infinity = one_of("+-")
        .or_not()
        .then(just("inf").ignored().or(just('∞').ignored()))
        .map(|(sign, _)| match sign {
            Some('-') => f64::NEG_INFINITY,
            _ => f64::INFINITY,
        });

    let finite = one_of("+-")
        .or_not()
        .chain::<char, _, _>(
            filter(|c: &char| c.is_ascii_digit() || *c == '.')
                .repeated()
                .at_least(1),
        )
        .collect::<String>()
        .try_map(|s, span| {
            s.parse::<f64>()
                .map_err(|e| Simple::custom(span, e.to_string()))
        });

    infinity.or(finite)
}

/// Parser for `{a, b, 'two words'}`.
pub fn item_set() -> impl Parser<char, ItemSetPattern<String>, Error = Simple<char>> {
    quoted()
        .or(bare_item())
        .padded()
        .separated_by(just(','))
        .delimited_by(just('{'), text::whitespace().ignore_then(just('}')))
        .map(ItemSetPattern::from_iter)
}

/// Parser for `[0, 10]`, `(2, +inf]` and `ø`.
pub fn interval() -> impl Parser<char, IntervalPattern, Error = Simple<char>> {
    let empty = one_of("ø∅").to(IntervalPattern::Empty);
    let range = one_of("[(")
        .map(|c| c == '[')
        .then(endpoint().padded())
        .then_ignore(just(','))
        .then(endpoint().padded())
        .then(one_of("])").map(|c| c == ']'))
        .map(|(((closed_lower, lower), upper), closed_upper)| {
            IntervalPattern::new(lower, closed_lower, upper, closed_upper)
        });
    empty.or(range)
}

/// Parser for `{'hello world', '!'}`.
pub fn ngram_set() -> impl Parser<char, NgramSetPattern, Error = Simple<char>> {
    quoted()
        .padded()
        .separated_by(just(','))
        .delimited_by(just('{'), text::whitespace().ignore_then(just('}')))
        .map(NgramSetPattern::from_phrases)
}

fn run_parser<T>(
    parser: impl Parser<char, T, Error = Simple<char>>,
    input: &str,
) -> Result<T, PsError> {
    parser
        .padded()
        .then_ignore(end())
        .parse(input)
        .map_err(|errs| {
            PsError::Parse(
                errs.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })
}

impl FromStr for ItemSetPattern<String> {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        run_parser(item_set(), s)
    }
}

impl FromStr for IntervalPattern {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        run_parser(interval(), s)
    }
}

impl FromStr for NgramSetPattern {
    type Err = PsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        run_parser(ngram_set(), s)
    }
}

// Unit tests live in tests/unit_parsing.rs
