//! Use-case relation grammar using chumsky
//!
//! `<endpoint> <arrow> <endpoint> [: label]`. Endpoints are bare names,
//! `(Use case text)` or `:Actor name:`. Arrows are solid (`--`, `-->`,
//! `->`), dotted (`..>`, `.>`, `<..`) or generalizations (`<|--`, `--|>`).

use chumsky::prelude::*;

use crate::core::chumsky_utils::{endpoint_name, inline_whitespace, trailing_label};
use crate::core::text::encode_line_breaks;

/// A relation endpoint as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A bare or quoted name referring to a declared entity
    Name(String),
    /// `(Text)`: a use case, declared on the spot
    UseCase(String),
    /// `:Name:`: an actor, declared on the spot
    Actor(String),
}

impl Endpoint {
    /// Identifier the endpoint resolves to
    pub fn id(&self) -> &str {
        match self {
            Endpoint::Name(id) | Endpoint::UseCase(id) | Endpoint::Actor(id) => id,
        }
    }
}

/// Arrow head at either end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Head {
    Arrow,
    Triangle,
}

/// The arrow token of a relation line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedArrow {
    pub left: Option<Head>,
    pub right: Option<Head>,
    pub dotted: bool,
}

impl ParsedArrow {
    pub fn is_generalization(&self) -> bool {
        self.left == Some(Head::Triangle) || self.right == Some(Head::Triangle)
    }

    /// The head sits on the left end only
    pub fn is_reversed(&self) -> bool {
        self.left.is_some() && self.right.is_none()
    }

    pub fn is_directed(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

/// A relation line as parsed, before kind assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRelation {
    pub from: Endpoint,
    pub to: Endpoint,
    pub arrow: ParsedArrow,
    pub label: String,
}

fn endpoint_parser<'src>() -> impl Parser<'src, &'src str, Endpoint> + Clone {
    // `( )` and `: :` name nothing and fail the line
    let use_case = just('(')
        .ignore_then(none_of(')').repeated().to_slice())
        .then_ignore(just(')'))
        .map(str::trim)
        .filter(|s: &&str| !s.is_empty())
        .map(|s: &str| Endpoint::UseCase(encode_line_breaks(s)));
    let actor = just(':')
        .ignore_then(none_of(':').repeated().to_slice())
        .then_ignore(just(':'))
        .map(str::trim)
        .filter(|s: &&str| !s.is_empty())
        .map(|s: &str| Endpoint::Actor(s.to_string()));
    let name = endpoint_name().map(Endpoint::Name);

    use_case.or(actor).or(name)
}

fn arrow_parser<'src>() -> impl Parser<'src, &'src str, ParsedArrow> + Clone {
    let left = just("<|")
        .to(Head::Triangle)
        .or(just('<').to(Head::Arrow))
        .or_not();
    let right = just("|>")
        .to(Head::Triangle)
        .or(just('>').to(Head::Arrow))
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
        .or(direction)
        .repeated()
        .at_least(1)
        .to_slice()
        .filter(|body: &&str| body.contains(['-', '.']));

    left.then(body)
        .then(right)
        .map(|((left, body), right): ((Option<Head>, &str), Option<Head>)| ParsedArrow {
            left,
            right,
            dotted: body.contains('.'),
        })
}

/// Parse one relation line; endpoints are swapped for left-pointing arrows
pub fn parse_relation(line: &str) -> Option<ParsedRelation> {
    let ws = inline_whitespace();
    let parser = ws
        .clone()
        .ignore_then(endpoint_parser())
        .then_ignore(ws.clone())
        .then(arrow_parser())
        .then_ignore(ws.clone())
        .then(endpoint_parser())
        .then_ignore(ws)
        .then(trailing_label())
        .then_ignore(end());

    let (((left, arrow), right), label) = parser.parse(line).into_result().ok()?;
    let (from, to) = if arrow.is_reversed() {
        (right, left)
    } else {
        (left, right)
    };

    Some(ParsedRelation {
        from,
        to,
        arrow,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_to_use_case() {
        let rel = parse_relation("User --> (Login)").unwrap();
        assert_eq!(rel.from, Endpoint::Name("User".into()));
        assert_eq!(rel.to, Endpoint::UseCase("Login".into()));
        assert!(!rel.arrow.dotted);
        assert!(rel.arrow.is_directed());
    }

    #[test]
    fn test_dotted_include_with_label() {
        let rel = parse_relation("(Checkout) ..> (Pay) : <<include>>").unwrap();
        assert!(rel.arrow.dotted);
        assert_eq!(rel.label, "<<include>>");
        assert_eq!(rel.to.id(), "Pay");
    }

    #[test]
    fn test_left_dotted_arrow_swaps() {
        let rel = parse_relation("UC1 <.. UC2 : extends").unwrap();
        assert_eq!(rel.from.id(), "UC2");
        assert_eq!(rel.to.id(), "UC1");
    }

    #[test]
    fn test_generalization() {
        let rel = parse_relation("Admin --|> User").unwrap();
        assert!(rel.arrow.is_generalization());
        assert_eq!(rel.to.id(), "User");

        let rel = parse_relation(":Customer: <|-- :VIP:").unwrap();
        assert!(rel.arrow.is_generalization());
        assert_eq!(rel.from, Endpoint::Actor("VIP".into()));
    }

    #[test]
    fn test_plain_link_and_short_arrow() {
        let rel = parse_relation("User -- UC1").unwrap();
        assert!(!rel.arrow.is_directed());
        assert!(parse_relation("User -> UC1").unwrap().arrow.is_directed());
    }

    #[test]
    fn test_blank_endpoints_fail_the_line() {
        assert!(parse_relation("User --> ( )").is_none());
        assert!(parse_relation("User --> ()").is_none());
        assert!(parse_relation(": : --> (Login)").is_none());
        assert!(parse_relation("\"\" --> (Login)").is_none());
    }

    #[test]
    fn test_line_breaks_in_use_case_text() {
        let rel = parse_relation("User --> (Place\\nOrder)").unwrap();
        assert_eq!(rel.to.id(), encode_line_breaks("Place\\nOrder"));
    }

    #[test]
    fn test_rejects_declarations() {
        assert!(parse_relation("actor User").is_none());
        assert!(parse_relation("(Login)").is_none());
        assert!(parse_relation("rectangle Shop {").is_none());
    }
}
