//! Sequence diagram database implementation
//!
//! Stores lifelines, messages and committed combined fragments.

use anyhow::Result;

use crate::core::{Database, DiagramError};

/// Declared kind of a lifeline; only affects the head glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifelineKind {
    #[default]
    Participant,
    Actor,
    Database,
    Boundary,
    Control,
    Entity,
    Collections,
    Queue,
}

impl LifelineKind {
    /// Declaration keywords, in the order they are tried
    pub const KEYWORDS: &'static [&'static str] = &[
        "participant",
        "actor",
        "database",
        "boundary",
        "control",
        "entity",
        "collections",
        "queue",
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "participant" => Some(LifelineKind::Participant),
            "actor" => Some(LifelineKind::Actor),
            "database" => Some(LifelineKind::Database),
            "boundary" => Some(LifelineKind::Boundary),
            "control" => Some(LifelineKind::Control),
            "entity" => Some(LifelineKind::Entity),
            "collections" => Some(LifelineKind::Collections),
            "queue" => Some(LifelineKind::Queue),
            _ => None,
        }
    }
}

/// One participant timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifeline {
    /// Identifier used by messages
    pub id: String,
    /// Display label (may differ from id via "as" syntax)
    pub label: String,
    pub kind: LifelineKind,
}

impl Lifeline {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            kind: LifelineKind::Participant,
        }
    }

    pub fn with_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: LifelineKind::Participant,
        }
    }

    pub fn with_kind(mut self, kind: LifelineKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A message between two lifelines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub label: String,
    /// Dashed line
    pub reply: bool,
    /// Open arrowhead
    pub is_async: bool,
}

impl Message {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
            reply: false,
            is_async: false,
        }
    }

    pub fn with_reply(mut self, reply: bool) -> Self {
        self.reply = reply;
        self
    }

    pub fn with_async(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }
}

/// Combined fragment operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Alt,
    Opt,
    Loop,
    Par,
    Break,
    Critical,
    Group,
}

impl FragmentKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "alt" => Some(FragmentKind::Alt),
            "opt" => Some(FragmentKind::Opt),
            "loop" => Some(FragmentKind::Loop),
            "par" => Some(FragmentKind::Par),
            "break" => Some(FragmentKind::Break),
            "critical" => Some(FragmentKind::Critical),
            "group" => Some(FragmentKind::Group),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            FragmentKind::Alt => "alt",
            FragmentKind::Opt => "opt",
            FragmentKind::Loop => "loop",
            FragmentKind::Par => "par",
            FragmentKind::Break => "break",
            FragmentKind::Critical => "critical",
            FragmentKind::Group => "group",
        }
    }
}

/// A labeled section of a fragment, starting at a message index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSection {
    pub label: String,
    pub start: usize,
}

/// A closed combined fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub sections: Vec<FragmentSection>,
    /// Message index at which the fragment closed (exclusive)
    pub end: usize,
    /// Number of fragments open around this one
    pub depth: usize,
}

impl Fragment {
    /// Half-open message index range covered by the fragment
    pub fn span(&self) -> (usize, usize) {
        let start = self.sections.first().map(|s| s.start).unwrap_or(self.end);
        (start, self.end)
    }
}

/// Sequence diagram database
#[derive(Debug, Default)]
pub struct SequenceDatabase {
    lifelines: Vec<Lifeline>,
    messages: Vec<Message>,
    fragments: Vec<Fragment>,
}

impl SequenceDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lifeline; a repeated id keeps the first declaration
    pub fn add_lifeline(&mut self, lifeline: Lifeline) -> Result<()> {
        if lifeline.id.is_empty() {
            return Err(DiagramError::malformed("lifeline without identifier").into());
        }
        if !self.lifelines.iter().any(|l| l.id == lifeline.id) {
            self.lifelines.push(lifeline);
        }
        Ok(())
    }

    /// Add a message; endpoints are not required to be declared
    pub fn add_message(&mut self, message: Message) -> Result<()> {
        if message.from.is_empty() || message.to.is_empty() {
            return Err(DiagramError::malformed("message without endpoint").into());
        }
        self.messages.push(message);
        Ok(())
    }

    pub fn add_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Create lifelines from message endpoints in order of first appearance.
    ///
    /// Only applies when nothing was declared.
    pub fn infer_lifelines(&mut self) {
        if !self.lifelines.is_empty() {
            return;
        }
        for message in &self.messages {
            for id in [&message.from, &message.to] {
                if !self.lifelines.iter().any(|l| &l.id == id) {
                    self.lifelines.push(Lifeline::new(id.clone()));
                }
            }
        }
    }

    pub fn lifelines(&self) -> &[Lifeline] {
        &self.lifelines
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Committed fragments, innermost first
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Get lifeline index (for layout)
    pub fn lifeline_index(&self, id: &str) -> Option<usize> {
        self.lifelines.iter().position(|l| l.id == id)
    }
}

impl Database for SequenceDatabase {
    type Node = Lifeline;
    type Edge = Message;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_lifeline(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_message(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.lifelines.iter().find(|l| l.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.lifelines.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.messages.iter()
    }

    fn clear(&mut self) {
        self.lifelines.clear();
        self.messages.clear();
        self.fragments.clear();
    }

    fn node_count(&self) -> usize {
        self.lifelines.len()
    }

    fn edge_count(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_lifelines() {
        let mut db = SequenceDatabase::new();
        db.add_lifeline(Lifeline::new("Alice")).unwrap();
        db.add_lifeline(Lifeline::with_label("Alice", "Other").with_kind(LifelineKind::Actor))
            .unwrap();
        assert_eq!(db.node_count(), 1);
        assert_eq!(db.lifelines()[0].label, "Alice");
        assert_eq!(db.lifelines()[0].kind, LifelineKind::Participant);
    }

    #[test]
    fn test_messages_do_not_create_lifelines() {
        let mut db = SequenceDatabase::new();
        db.add_message(Message::new("Alice", "Bob", "Hello")).unwrap();
        assert_eq!(db.node_count(), 0);
        assert_eq!(db.edge_count(), 1);
    }

    #[test]
    fn test_infer_lifelines_in_first_appearance_order() {
        let mut db = SequenceDatabase::new();
        db.add_message(Message::new("Charlie", "Alice", "a")).unwrap();
        db.add_message(Message::new("Alice", "Bob", "b")).unwrap();
        db.infer_lifelines();

        let ids: Vec<_> = db.nodes().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["Charlie", "Alice", "Bob"]);
    }

    #[test]
    fn test_infer_is_skipped_when_declared() {
        let mut db = SequenceDatabase::new();
        db.add_lifeline(Lifeline::new("Alice")).unwrap();
        db.add_message(Message::new("Alice", "Bob", "b")).unwrap();
        db.infer_lifelines();
        assert_eq!(db.node_count(), 1);
        assert_eq!(db.lifeline_index("Bob"), None);
    }

    #[test]
    fn test_empty_identifiers_are_malformed() {
        let mut db = SequenceDatabase::new();
        let err = db.add_lifeline(Lifeline::new("")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::MalformedConstruct { .. })
        ));
        assert!(db.add_message(Message::new("A", "", "x")).is_err());
    }

    #[test]
    fn test_fragment_span() {
        let fragment = Fragment {
            kind: FragmentKind::Alt,
            sections: vec![
                FragmentSection { label: "ok".into(), start: 1 },
                FragmentSection { label: "fail".into(), start: 3 },
            ],
            end: 5,
            depth: 0,
        };
        assert_eq!(fragment.span(), (1, 5));
    }

    #[test]
    fn test_keywords() {
        for keyword in LifelineKind::KEYWORDS {
            assert!(LifelineKind::from_keyword(keyword).is_some());
        }
        assert_eq!(FragmentKind::from_keyword("LOOP"), Some(FragmentKind::Loop));
        assert_eq!(FragmentKind::Critical.keyword(), "critical");
        assert_eq!(FragmentKind::from_keyword("else"), None);
    }
}
