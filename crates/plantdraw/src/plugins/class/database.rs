//! Class diagram database
//!
//! Stores classifiers (classes, interfaces, abstract classes, enums) and the
//! relations between them.

use crate::core::{Database, DiagramError};
use anyhow::Result;

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
    Package,   // ~
}

impl Visibility {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            '~' => Some(Visibility::Package),
            _ => None,
        }
    }
}

/// A member line of a classifier body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub visibility: Option<Visibility>,
    /// The member as written, trimmed
    pub text: String,
}

impl Member {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let visibility = text.chars().next().and_then(Visibility::from_char);
        Self { visibility, text }
    }
}

/// Kind of classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Abstract,
    Enum,
}

impl ClassKind {
    /// Stereotype shown above the name, if any
    pub fn stereotype(&self) -> Option<&'static str> {
        match self {
            ClassKind::Class => None,
            ClassKind::Interface => Some("<<interface>>"),
            ClassKind::Abstract => Some("<<abstract>>"),
            ClassKind::Enum => Some("<<enumeration>>"),
        }
    }
}

/// A classifier in the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub id: String,
    pub label: String,
    pub kind: ClassKind,
    pub attributes: Vec<Member>,
    pub methods: Vec<Member>,
    pub enumerants: Vec<String>,
}

impl Class {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind: ClassKind::Class,
            attributes: Vec::new(),
            methods: Vec::new(),
            enumerants: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn member_count(&self) -> usize {
        self.attributes.len() + self.methods.len() + self.enumerants.len()
    }
}

/// Relation kinds between classifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Inheritance,   // <|--
    Realization,   // <|..
    Composition,   // *--
    Aggregation,   // o--
    Association,   // -->
    Dependency,    // ..>
    Link,          // --
}

/// A relation, normalized so that the decorated end is the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
    pub label: String,
    /// Drawn with a dotted line
    pub dotted: bool,
    pub from_multiplicity: Option<String>,
    pub to_multiplicity: Option<String>,
}

impl Relation {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            label: String::new(),
            dotted: matches!(kind, RelationKind::Realization | RelationKind::Dependency),
            from_multiplicity: None,
            to_multiplicity: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Class diagram database
#[derive(Debug, Default)]
pub struct ClassDatabase {
    classes: Vec<Class>,
    relations: Vec<Relation>,
}

impl ClassDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a classifier; returns false if the id was already declared
    pub fn add_class(&mut self, class: Class) -> Result<bool> {
        if class.id.is_empty() {
            return Err(DiagramError::malformed("classifier without name").into());
        }
        if self.classes.iter().any(|c| c.id == class.id) {
            return Ok(false);
        }
        self.classes.push(class);
        Ok(true)
    }

    pub fn add_relation(&mut self, relation: Relation) -> Result<()> {
        if relation.from.is_empty() || relation.to.is_empty() {
            return Err(DiagramError::malformed("relation without endpoint").into());
        }
        self.relations.push(relation);
        Ok(())
    }

    pub fn get_class_mut(&mut self, id: &str) -> Option<&mut Class> {
        self.classes.iter_mut().find(|c| c.id == id)
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }
}

impl Database for ClassDatabase {
    type Node = Class;
    type Edge = Relation;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_class(node).map(|_| ())
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_relation(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.classes.iter().find(|c| c.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relations.iter()
    }

    fn clear(&mut self) {
        self.classes.clear();
        self.relations.clear();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.relations.len()
    }
}
