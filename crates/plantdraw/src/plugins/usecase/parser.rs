//! Use-case diagram parser

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::{parse_relation, Endpoint, ParsedRelation};
use super::database::{Entity, UseCaseDatabase, UseCaseRelation, UseCaseRelationKind};
use crate::core::text::encode_line_breaks;
use crate::core::{normalize_lines, Parser};

/// Display text and optional alias of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
struct NamedDeclaration {
    label: String,
    alias: Option<String>,
    stereotype: Option<String>,
}

impl NamedDeclaration {
    fn id(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.label)
    }

    fn is_secondary(&self) -> bool {
        self.stereotype
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("secondary"))
    }
}

/// Split a trailing `<<stereotype>>` off a declaration
fn split_stereotype(text: &str) -> (&str, Option<String>) {
    match (text.find("<<"), text.rfind(">>")) {
        (Some(open), Some(close)) if close > open => {
            let stereotype = text[open + 2..close].trim().to_string();
            (text[..open].trim_end(), Some(stereotype))
        }
        _ => (text, None),
    }
}

/// Parse `"Text"`, `(Text)`, `:Text:` or a bare word, with optional `as Alias`
fn parse_named(text: &str) -> Option<NamedDeclaration> {
    let (text, stereotype) = split_stereotype(text.trim());

    let (label, rest) = match text.chars().next()? {
        open @ ('"' | '(' | ':') => {
            let close = match open {
                '(' => ')',
                other => other,
            };
            let inner = &text[1..];
            let end = inner.find(close)?;
            (inner[..end].trim(), inner[end + 1..].trim())
        }
        _ => match text.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (text, ""),
        },
    };
    if label.is_empty() {
        return None;
    }

    // anything trailing other than `as Alias` is ignored
    let alias = rest
        .strip_prefix("as ")
        .and_then(|alias| alias.split_whitespace().next())
        .map(str::to_string);

    Some(NamedDeclaration {
        label: encode_line_breaks(label),
        alias,
        stereotype,
    })
}

/// Use-case diagram parser
pub struct UseCaseParser;

impl UseCaseParser {
    pub fn new() -> Self {
        Self
    }

    /// `actor …` or a `:Name:` shorthand line
    fn parse_actor(&self, line: &str) -> Option<Entity> {
        let rest = match strip_keyword(line, "actor") {
            Some(rest) => rest,
            None if line.starts_with(':') => line,
            None => return None,
        };
        let named = parse_named(rest)?;
        let secondary = named.is_secondary();
        Some(Entity::actor(named.id(), named.label.as_str(), secondary))
    }

    /// `usecase …` or a `(Text)` shorthand line
    fn parse_use_case(&self, line: &str) -> Option<Entity> {
        let rest = match strip_keyword(line, "usecase") {
            Some(rest) => rest,
            None if line.starts_with('(') => line,
            None => return None,
        };
        let named = parse_named(rest)?;
        Some(Entity::use_case(named.id(), named.label.as_str()))
    }

    /// `rectangle Label {` opening the system boundary
    fn parse_boundary(&self, line: &str) -> Option<String> {
        let rest = strip_keyword(line, "rectangle")?;
        let rest = rest.trim_end_matches('{').trim();
        let named = parse_named(rest)?;
        Some(named.label)
    }

    /// Resolve a relation endpoint to an entity id, declaring shorthand
    /// endpoints that are not known yet
    fn resolve_endpoint(&self, endpoint: &Endpoint, database: &mut UseCaseDatabase) -> Result<String> {
        match endpoint {
            Endpoint::Name(id) => Ok(id.clone()),
            Endpoint::UseCase(text) => {
                if let Some(existing) = database
                    .use_cases()
                    .find(|e| e.label == *text || e.id == *text)
                {
                    return Ok(existing.id.clone());
                }
                database.add_entity(Entity::use_case(text.as_str(), text.as_str()))?;
                Ok(text.clone())
            }
            Endpoint::Actor(name) => {
                if let Some(existing) = database
                    .actors()
                    .find(|e| e.label == *name || e.id == *name)
                {
                    return Ok(existing.id.clone());
                }
                database.add_entity(Entity::actor(name.as_str(), name.as_str(), false))?;
                Ok(name.clone())
            }
        }
    }

    fn add_relation(&self, parsed: ParsedRelation, database: &mut UseCaseDatabase) -> Result<()> {
        let from = self.resolve_endpoint(&parsed.from, database)?;
        let to = self.resolve_endpoint(&parsed.to, database)?;

        let kind = relation_kind(&parsed);
        trace!(from = %from, to = %to, kind = ?kind, "Parsed relation");

        let relation = UseCaseRelation::new(from, to, kind)
            .with_label(parsed.label)
            .directed(parsed.arrow.is_directed());
        database.add_relation(relation)
    }
}

impl Default for UseCaseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Text after a leading keyword, matched case-insensitively
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let (word, rest) = line.split_once(char::is_whitespace)?;
    word.eq_ignore_ascii_case(keyword).then(|| rest.trim())
}

fn relation_kind(parsed: &ParsedRelation) -> UseCaseRelationKind {
    if parsed.arrow.is_generalization() {
        UseCaseRelationKind::Generalization
    } else if parsed.arrow.dotted {
        if parsed.label.to_lowercase().contains("extend") {
            UseCaseRelationKind::Extend
        } else {
            UseCaseRelationKind::Include
        }
    } else {
        UseCaseRelationKind::Association
    }
}

impl Parser<UseCaseDatabase> for UseCaseParser {
    fn parse(&self, input: &str, database: &mut UseCaseDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_usecase", input_len = input.len());
        let _enter = parse_span.enter();

        for line in normalize_lines(input) {
            if line == "}" {
                continue;
            }

            if let Some(label) = self.parse_boundary(&line) {
                trace!(label = %label, "System boundary");
                database.set_system_label(label);
                continue;
            }

            // Relations first: `:User: --> (Login)` also starts like a declaration
            if let Some(relation) = parse_relation(&line) {
                self.add_relation(relation, database)?;
                continue;
            }

            if let Some(actor) = self.parse_actor(&line) {
                trace!(id = %actor.id, secondary = actor.is_secondary(), "Declared actor");
                database.add_entity(actor)?;
                continue;
            }

            if let Some(use_case) = self.parse_use_case(&line) {
                trace!(id = %use_case.id, "Declared use case");
                database.add_entity(use_case)?;
                continue;
            }

            trace!(line = %line, "Skipping unrecognized line");
        }

        debug!(
            entities = database.entities().len(),
            relations = database.relations().len(),
            "Parsed use case diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "usecase"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::text::LINE_BREAK;
    use crate::core::Database;

    fn parse(input: &str) -> UseCaseDatabase {
        let mut db = UseCaseDatabase::new();
        UseCaseParser::new().parse(input, &mut db).unwrap();
        db
    }

    #[test]
    fn test_actor_forms() {
        let db = parse(
            "@startuml\nactor User\nactor \"Store Admin\" as Admin\nactor :Bank: as B <<secondary>>\n:Clerk: as C\n@enduml",
        );
        let ids: Vec<_> = db.actors().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["User", "Admin", "B", "C"]);
        assert_eq!(db.get_node("Admin").unwrap().label, "Store Admin");
        assert!(db.get_node("B").unwrap().is_secondary());
        assert!(!db.get_node("C").unwrap().is_secondary());
    }

    #[test]
    fn test_secondary_is_case_insensitive() {
        let db = parse("@startuml\nactor Payment <<Secondary>>\n@enduml");
        assert!(db.get_node("Payment").unwrap().is_secondary());
    }

    #[test]
    fn test_use_case_forms() {
        let db = parse(
            "@startuml\nusecase \"Place Order\" as UC1\nusecase (Pay) as UC2\nusecase UC3\n(Browse)\n(Log in) as UC5\n@enduml",
        );
        let ids: Vec<_> = db.use_cases().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["UC1", "UC2", "UC3", "Browse", "UC5"]);
        assert_eq!(db.get_node("UC5").unwrap().label, "Log in");
    }

    #[test]
    fn test_line_break_escape_in_label() {
        let db = parse("@startuml\nusecase \"Place\\nOrder\" as UC1\n@enduml");
        assert_eq!(
            db.get_node("UC1").unwrap().label,
            format!("Place{}Order", LINE_BREAK)
        );
    }

    #[test]
    fn test_system_boundary() {
        let db = parse("@startuml\nrectangle \"Online Shop\" {\n(Browse)\n}\n@enduml");
        assert_eq!(db.system_label(), Some("Online Shop"));
        assert_eq!(db.node_count(), 1);
    }

    #[test]
    fn test_relation_kinds() {
        let db = parse(
            "@startuml\nactor User\nusecase UC1\nusecase UC2\nusecase UC3\nUser --> UC1\nUC1 ..> UC2 : <<include>>\nUC3 ..> UC1 : <<extend>>\nUser -- UC3\n@enduml",
        );
        let kinds: Vec<_> = db.relations().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                UseCaseRelationKind::Association,
                UseCaseRelationKind::Include,
                UseCaseRelationKind::Extend,
                UseCaseRelationKind::Association,
            ]
        );
        assert!(db.relations()[0].directed);
        assert!(!db.relations()[3].directed);
    }

    #[test]
    fn test_shorthand_endpoints_resolve_to_declared_entities() {
        let db = parse("@startuml\nactor :Shopper: as S\n(Pay) as UC1\n:Shopper: --> (Pay)\n@enduml");
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.relations()[0].from, "S");
        assert_eq!(db.relations()[0].to, "UC1");
    }

    #[test]
    fn test_shorthand_endpoints_declare_entities() {
        let db = parse("@startuml\n:Guest: --> (Browse)\n@enduml");
        assert!(db.get_node("Guest").unwrap().is_actor());
        assert!(!db.get_node("Browse").unwrap().is_actor());
    }

    #[test]
    fn test_bare_references_may_dangle() {
        let db = parse("@startuml\nactor User\nUser --> Ghost\n@enduml");
        assert_eq!(db.node_count(), 1);
        assert_eq!(db.edge_count(), 1);
    }

    #[test]
    fn test_blank_shorthand_endpoints_are_skipped() {
        let db = parse(
            "@startuml\nactor User\nusecase (Login) as L\nUser --> L\nUser --> ( )\n: : --> L\n( )\n@enduml",
        );
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 1);
        assert_eq!(db.relations()[0].to, "L");
    }

    #[test]
    fn test_generalization() {
        let db = parse("@startuml\nactor User\nactor Admin\nAdmin --|> User\n@enduml");
        assert_eq!(db.relations()[0].kind, UseCaseRelationKind::Generalization);
        assert_eq!(db.relations()[0].to, "User");
    }
}
