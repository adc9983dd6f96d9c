//! Class diagram parser
//!
//! Declarations and bodies are scanned line by line; relation lines go
//! through the chumsky grammar in `chumsky_parser`.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::parse_relation;
use super::database::{Class, ClassDatabase, ClassKind, Member, Relation, RelationKind};
use crate::core::text::unquote;
use crate::core::{normalize_lines, Parser};

/// Declaration keywords, longest first
const DECLARATIONS: &[(&str, ClassKind)] = &[
    ("abstract class ", ClassKind::Abstract),
    ("abstract ", ClassKind::Abstract),
    ("class ", ClassKind::Class),
    ("interface ", ClassKind::Interface),
    ("enum ", ClassKind::Enum),
];

/// Lines that switch a body to its method section
const SEPARATORS: &[&str] = &["--", "..", "==", "__"];

/// A parsed declaration line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    class: Class,
    opens_body: bool,
    extends: Vec<String>,
    implements: Vec<String>,
}

/// Body state of the classifier currently open
#[derive(Debug, Clone, PartialEq, Eq)]
struct OpenBody {
    id: String,
    kind: ClassKind,
    in_methods: bool,
}

/// Class diagram parser
pub struct ClassParser;

impl ClassParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_declaration(&self, line: &str) -> Option<Declaration> {
        let lower = line.to_lowercase();
        let (prefix, kind) = DECLARATIONS
            .iter()
            .find(|(prefix, _)| lower.starts_with(prefix))?;
        let rest = line[prefix.len()..].trim();

        let (body_text, opens_body) = match rest.strip_suffix('{') {
            Some(head) => (head.trim_end(), true),
            None => match rest.strip_suffix("{}") {
                Some(head) => (head.trim_end(), false),
                None => (rest, false),
            },
        };

        let (name_part, relations_part) = split_inheritance(body_text);
        let (id, label) = parse_name(name_part)?;

        let mut extends = Vec::new();
        let mut implements = Vec::new();
        let mut target = &mut extends;
        for word in relations_part.split(|c: char| c.is_whitespace() || c == ',') {
            match word {
                "" => {}
                "extends" => target = &mut extends,
                "implements" => target = &mut implements,
                name => match strip_generics(name) {
                    "" => trace!(word = name, "Skipping unnamed supertype"),
                    parent => target.push(parent.to_string()),
                },
            }
        }

        Some(Declaration {
            class: Class::new(id).with_label(label).with_kind(*kind),
            opens_body,
            extends,
            implements,
        })
    }

    /// Classify a body line into the open classifier
    fn parse_member(&self, line: &str, body: &mut OpenBody, class: &mut Class) {
        if SEPARATORS.iter().any(|s| line.starts_with(s)) {
            body.in_methods = true;
            return;
        }

        if line.contains('(') && line.contains(')') {
            class.methods.push(Member::new(line));
        } else if body.kind == ClassKind::Enum && is_enumerant(line) {
            class
                .enumerants
                .push(line.trim_end_matches([',', ';']).trim().to_string());
        } else if body.in_methods {
            class.methods.push(Member::new(line));
        } else {
            class.attributes.push(Member::new(line));
        }
    }
}

impl Default for ClassParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `Name extends A implements B` into the name and the inheritance tail
fn split_inheritance(text: &str) -> (&str, &str) {
    let positions = [" extends ", " implements "]
        .iter()
        .filter_map(|kw| text.find(kw))
        .min();
    match positions {
        Some(pos) => (&text[..pos], &text[pos..]),
        None => (text, ""),
    }
}

/// Drop generic parameters (`<T>`) and stereotypes (`<<x>>`)
fn strip_generics(name: &str) -> &str {
    match name.find('<') {
        Some(pos) => name[..pos].trim(),
        None => name.trim(),
    }
}

/// Identifier and label of a declaration; supports `"Label" as Id`
fn parse_name(text: &str) -> Option<(String, String)> {
    let text = text.trim();
    if let Some(quoted) = text.strip_prefix('"') {
        let label = quoted.split('"').next()?.to_string();
        let after = quoted[label.len()..].trim_start_matches('"').trim();
        let id = match after.strip_prefix("as ") {
            Some(alias) => strip_generics(alias.split_whitespace().next()?).to_string(),
            None => label.clone(),
        };
        return (!id.is_empty()).then_some((id, label));
    }

    let first = text.split_whitespace().next()?;
    let id = strip_generics(first).to_string();
    if id.is_empty() {
        return None;
    }
    // `Label as Id`
    if let Some(pos) = text.find(" as ") {
        let alias = strip_generics(text[pos + 4..].split_whitespace().next()?);
        if alias.is_empty() {
            return None;
        }
        return Some((alias.to_string(), unquote(&id).to_string()));
    }
    Some((id.clone(), id))
}

/// Bare `UPPER_CASE` token with optional trailing comma or semicolon
fn is_enumerant(line: &str) -> bool {
    let token = line.trim_end_matches([',', ';']).trim();
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && token.starts_with(|c: char| c.is_ascii_uppercase())
}

impl Parser<ClassDatabase> for ClassParser {
    fn parse(&self, input: &str, database: &mut ClassDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_class", input_len = input.len());
        let _enter = parse_span.enter();

        let mut open: Option<OpenBody> = None;

        for line in normalize_lines(input) {
            if let Some(body) = open.as_mut() {
                if line.starts_with('}') {
                    trace!(class = %body.id, "Closing body");
                    open = None;
                    continue;
                }
                if let Some(class) = database.get_class_mut(&body.id) {
                    self.parse_member(&line, body, class);
                }
                continue;
            }

            if let Some(declaration) = self.parse_declaration(&line) {
                let id = declaration.class.id.clone();
                let kind = declaration.class.kind;
                trace!(class = %id, kind = ?kind, "Declared classifier");

                let added = database.add_class(declaration.class)?;
                for parent in declaration.extends {
                    database.add_relation(Relation::new(&id, parent, RelationKind::Inheritance))?;
                }
                for contract in declaration.implements {
                    database.add_relation(Relation::new(&id, contract, RelationKind::Realization))?;
                }

                if declaration.opens_body {
                    if !added {
                        debug!(class = %id, "Body of a redeclared classifier is ignored");
                    }
                    open = Some(OpenBody {
                        id: if added { id } else { String::new() },
                        kind,
                        in_methods: false,
                    });
                }
                continue;
            }

            if line == "}" {
                continue;
            }

            if let Some(relation) = parse_relation(&line) {
                trace!(from = %relation.from, to = %relation.to, kind = ?relation.kind, "Parsed relation");
                database.add_relation(relation)?;
                continue;
            }

            trace!(line = %line, "Skipping unrecognized line");
        }

        debug!(
            classes = database.classes().len(),
            relations = database.relations().len(),
            "Parsed class diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "class"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
