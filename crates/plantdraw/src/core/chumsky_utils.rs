//! Shared chumsky parser utilities for diagram parsing
//!
//! Combinators used by the relation and message grammars of several
//! diagram kinds.

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs).
///
/// Uses explicit character matching to avoid the "repeated combinator making
/// no progress" issue.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse a double-quoted string, returning its contents without the quotes.
pub fn quoted_string<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    just('"')
        .ignore_then(none_of('"').repeated().to_slice())
        .then_ignore(just('"'))
        .map(|s: &str| s.to_string())
}

/// Parse a bare identifier: letters, digits and `_ . $`.
///
/// Arrow characters, `:` and whitespace end an identifier.
pub fn bare_identifier<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || matches!(c, '_' | '.' | '$'))
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| s.to_string())
}

/// Parse a relation or message endpoint: a quoted name or a bare identifier.
///
/// Blank quoted names (`""`, `" "`) are rejected so the whole line fails.
pub fn endpoint_name<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    quoted_string()
        .filter(|name: &String| !name.trim().is_empty())
        .or(bare_identifier())
}

/// Parse an optional `: label` tail running to the end of the line.
///
/// A missing or blank label yields an empty string.
pub fn trailing_label<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    just(':')
        .ignore_then(any().repeated().to_slice())
        .map(|s: &str| s.trim().to_string())
        .or_not()
        .map(Option::unwrap_or_default)
}

/// Parse a `[#color]` hint inside an arrow body, discarding it.
pub fn color_hint<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just('[')
        .then(none_of(']').repeated())
        .then(just(']'))
        .ignored()
}
