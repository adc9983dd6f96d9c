//! Class relation grammar using chumsky
//!
//! `<class> ["mult"] <arrow> ["mult"] <class> [: label]`, where an arrow is
//! an optional decoration, a body of `-` or `.` (direction words such as
//! `up` and `[#color]` hints are allowed inside) and an optional decoration.

use chumsky::prelude::*;

use super::database::{Relation, RelationKind};
use crate::core::chumsky_utils::{
    color_hint, endpoint_name, inline_whitespace, quoted_string, trailing_label,
};

/// Arrow-end decoration, ordered by precedence (strongest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Decoration {
    Triangle,
    FilledDiamond,
    HollowDiamond,
    Arrow,
}

/// The arrow token of a relation line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedArrow {
    pub left: Option<Decoration>,
    pub right: Option<Decoration>,
    pub dotted: bool,
}

impl ParsedArrow {
    /// The strongest decoration and whether it sits on the left end.
    ///
    /// On a tie the right end wins.
    pub fn dominant(&self) -> Option<(Decoration, bool)> {
        match (self.left, self.right) {
            (Some(l), Some(r)) if l < r => Some((l, true)),
            (_, Some(r)) => Some((r, false)),
            (Some(l), None) => Some((l, true)),
            (None, None) => None,
        }
    }

    pub fn kind(&self) -> RelationKind {
        match self.dominant().map(|(d, _)| d) {
            Some(Decoration::Triangle) if self.dotted => RelationKind::Realization,
            Some(Decoration::Triangle) => RelationKind::Inheritance,
            Some(Decoration::FilledDiamond) => RelationKind::Composition,
            Some(Decoration::HollowDiamond) => RelationKind::Aggregation,
            Some(Decoration::Arrow) if self.dotted => RelationKind::Dependency,
            Some(Decoration::Arrow) => RelationKind::Association,
            None => RelationKind::Link,
        }
    }
}

pub fn arrow_parser<'src>() -> impl Parser<'src, &'src str, ParsedArrow> + Clone {
    let left = just("<|")
        .to(Decoration::Triangle)
        .or(just('*').to(Decoration::FilledDiamond))
        .or(just('o').to(Decoration::HollowDiamond))
        .or(just('<').to(Decoration::Arrow))
        .or_not();
    let right = just("|>")
        .to(Decoration::Triangle)
        .or(just('*').to(Decoration::FilledDiamond))
        .or(just('o').to(Decoration::HollowDiamond))
        .or(just('>').to(Decoration::Arrow))
        .or_not();
    let direction = choice((
        text::keyword("up"),
        text::keyword("down"),
        text::keyword("left"),
        text::keyword("right"),
    ))
    .ignored();
    let body = one_of("-.")
        .ignored()
        .or(color_hint())
        .or(direction)
        .repeated()
        .at_least(1)
        .to_slice()
        .filter(|body: &&str| body.contains(['-', '.']));

    left.then(body)
        .then(right)
        .map(|((left, body), right): ((Option<Decoration>, &str), Option<Decoration>)| {
            ParsedArrow {
                left,
                right,
                dotted: body.contains('.'),
            }
        })
}

/// Parse one relation line, normalized so the decorated end is `to`.
pub fn parse_relation(line: &str) -> Option<Relation> {
    let ws = inline_whitespace();
    let endpoint = endpoint_name();
    let multiplicity = quoted_string().then_ignore(ws.clone()).or_not();

    let parser = ws
        .clone()
        .ignore_then(endpoint.clone())
        .then_ignore(ws.clone())
        .then(multiplicity.clone())
        .then(arrow_parser())
        .then_ignore(ws.clone())
        .then(multiplicity)
        .then(endpoint)
        .then_ignore(ws)
        .then(trailing_label())
        .then_ignore(end());

    let (((((left, left_mult), arrow), right_mult), right), label) =
        parser.parse(line).into_result().ok()?;

    let reversed = matches!(arrow.dominant(), Some((_, true)));
    let ((from, from_mult), (to, to_mult)) = if reversed {
        ((right, right_mult), (left, left_mult))
    } else {
        ((left, left_mult), (right, right_mult))
    };

    let mut relation = Relation::new(from, to, arrow.kind()).with_label(label);
    relation.dotted = arrow.dotted;
    relation.from_multiplicity = from_mult;
    relation.to_multiplicity = to_mult;
    Some(relation)
}
