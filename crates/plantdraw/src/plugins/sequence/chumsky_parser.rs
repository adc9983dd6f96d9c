//! Sequence message grammar using chumsky
//!
//! A message line is `<endpoint> <arrow> <endpoint> [: label]`, where an
//! endpoint is a quoted string or a bare identifier and an arrow is an
//! optional `<`/`<<` head, a body of dashes (with an optional `[#color]`
//! hint) and an optional `>`/`>>` head.

use chumsky::prelude::*;

use crate::core::chumsky_utils::{
    color_hint, endpoint_name, inline_whitespace, trailing_label,
};

/// Arrowhead drawn at one end of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Head {
    /// `>` or `<`
    Filled,
    /// `>>` or `<<`
    Open,
}

/// The arrow token of a message line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedArrow {
    pub left: Option<Head>,
    pub right: Option<Head>,
    /// Number of dashes in the body
    pub dashes: usize,
}

impl ParsedArrow {
    pub fn is_dashed(&self) -> bool {
        self.dashes >= 2
    }

    pub fn is_async(&self) -> bool {
        self.left == Some(Head::Open) || self.right == Some(Head::Open)
    }

    /// Points right-to-left (`B <- A`)
    pub fn is_reversed(&self) -> bool {
        self.left.is_some() && self.right.is_none()
    }
}

/// A message line after normalization of its direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub from: String,
    pub to: String,
    pub label: String,
    pub reply: bool,
    pub is_async: bool,
}

pub fn arrow_parser<'src>() -> impl Parser<'src, &'src str, ParsedArrow> + Clone {
    let left = just("<<")
        .to(Head::Open)
        .or(just("<").to(Head::Filled))
        .or_not();
    let right = just(">>")
        .to(Head::Open)
        .or(just(">").to(Head::Filled))
        .or_not();
    let body = just('-')
        .ignored()
        .or(color_hint())
        .repeated()
        .at_least(1)
        .to_slice();

    left.then(body)
        .then(right)
        .map(|((left, body), right): ((Option<Head>, &str), Option<Head>)| ParsedArrow {
            left,
            right,
            dashes: body.chars().filter(|c| *c == '-').count(),
        })
}

fn line_parser<'src>() -> impl Parser<'src, &'src str, (String, ParsedArrow, String, String)> + Clone
{
    let ws = inline_whitespace();
    let endpoint = endpoint_name();
    // Activation shorthands after the target (`++`, `--`, `**`, `!!`)
    let activation = one_of("+-*!").repeated().ignored();

    ws.clone()
        .ignore_then(endpoint.clone())
        .then_ignore(ws.clone())
        .then(arrow_parser())
        .then_ignore(ws.clone())
        .then(endpoint)
        .then_ignore(ws.clone())
        .then_ignore(activation)
        .then_ignore(ws)
        .then(trailing_label())
        .then_ignore(end())
        .map(|(((from, arrow), to), label)| (from, arrow, to, label))
}

/// Parse one message line; `None` when the line is not a message.
///
/// Left-pointing arrows swap the endpoints so `from` is always the sender.
pub fn parse_message(line: &str) -> Option<ParsedMessage> {
    let (from, arrow, to, label) = line_parser().parse(line).into_result().ok()?;
    if arrow.left.is_none() && arrow.right.is_none() {
        return None;
    }

    let (from, to) = if arrow.is_reversed() {
        (to, from)
    } else {
        (from, to)
    };

    Some(ParsedMessage {
        from,
        to,
        label,
        reply: arrow.is_dashed(),
        is_async: arrow.is_async(),
    })
}
