//! Activity diagram database
//!
//! Nodes are kept in creation order, which is also their row order in the
//! layout.

use anyhow::Result;

use crate::core::{Database, DiagramError};

/// Kind of activity node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Start,
    Stop,
    Action,
    Decision,
    Merge,
    Fork,
    Join,
}

impl ActivityKind {
    /// Prefix of synthetic identifiers for this kind
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ActivityKind::Start => "start",
            ActivityKind::Stop => "stop",
            ActivityKind::Action => "action",
            ActivityKind::Decision => "decision",
            ActivityKind::Merge => "merge",
            ActivityKind::Fork => "fork",
            ActivityKind::Join => "join",
        }
    }
}

/// Which branch of the innermost open decision a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Outside any decision, or on the `then` branch
    #[default]
    Center,
    /// On the `else` branch
    Else,
}

/// An activity diagram node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityNode {
    pub id: String,
    pub kind: ActivityKind,
    pub label: String,
    /// Number of decisions open when the node was created
    pub depth: usize,
    pub side: Side,
    pub lane: Option<String>,
}

impl ActivityNode {
    pub fn new(id: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: String::new(),
            depth: 0,
            side: Side::Center,
            lane: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placed(mut self, depth: usize, side: Side, lane: Option<String>) -> Self {
        self.depth = depth;
        self.side = side;
        self.lane = lane;
        self
    }
}

/// Control flow between two nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub label: String,
}

impl Transition {
    pub fn new(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }
}

/// A swim-lane column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub label: String,
    pub color: Option<String>,
}

/// Activity diagram database
#[derive(Debug, Default)]
pub struct ActivityDatabase {
    nodes: Vec<ActivityNode>,
    transitions: Vec<Transition>,
    lanes: Vec<Lane>,
}

impl ActivityDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; a repeated id keeps the first one
    pub fn add_activity(&mut self, node: ActivityNode) -> Result<()> {
        if node.id.is_empty() {
            return Err(DiagramError::malformed("activity node without identifier").into());
        }
        if !self.nodes.iter().any(|n| n.id == node.id) {
            self.nodes.push(node);
        }
        Ok(())
    }

    pub fn add_transition(&mut self, transition: Transition) -> Result<()> {
        if transition.from.is_empty() || transition.to.is_empty() {
            return Err(DiagramError::malformed("transition without endpoint").into());
        }
        self.transitions.push(transition);
        Ok(())
    }

    /// Register a lane in order of first appearance; later colors are ignored
    pub fn add_lane(&mut self, label: impl Into<String>, color: Option<String>) {
        let label = label.into();
        if !self.lanes.iter().any(|l| l.label == label) {
            self.lanes.push(Lane { label, color });
        }
    }

    pub fn activities(&self) -> &[ActivityNode] {
        &self.nodes
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane_index(&self, label: &str) -> Option<usize> {
        self.lanes.iter().position(|l| l.label == label)
    }

    pub fn count_kind(&self, kind: ActivityKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    pub fn transitions_into<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Transition> {
        self.transitions.iter().filter(move |t| t.to == id)
    }

    pub fn transitions_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Transition> {
        self.transitions.iter().filter(move |t| t.from == id)
    }
}

impl Database for ActivityDatabase {
    type Node = ActivityNode;
    type Edge = Transition;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_activity(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_transition(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.transitions.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.transitions.clear();
        self.lanes.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.transitions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_node_wins() {
        let mut db = ActivityDatabase::new();
        db.add_activity(ActivityNode::new("a", ActivityKind::Action).with_label("one"))
            .unwrap();
        db.add_activity(ActivityNode::new("a", ActivityKind::Action).with_label("two"))
            .unwrap();
        assert_eq!(db.node_count(), 1);
        assert_eq!(db.get_node("a").unwrap().label, "one");
    }

    #[test]
    fn test_lanes_keep_first_appearance() {
        let mut db = ActivityDatabase::new();
        db.add_lane("Customer", None);
        db.add_lane("Shop", Some("#AntiqueWhite".into()));
        db.add_lane("Customer", Some("#red".into()));
        assert_eq!(db.lanes().len(), 2);
        assert_eq!(db.lane_index("Shop"), Some(1));
        assert_eq!(db.lanes()[0].color, None);
    }

    #[test]
    fn test_transition_queries() {
        let mut db = ActivityDatabase::new();
        db.add_transition(Transition::new("a", "b", "")).unwrap();
        db.add_transition(Transition::new("c", "b", "no")).unwrap();
        assert_eq!(db.transitions_into("b").count(), 2);
        assert_eq!(db.transitions_from("c").next().unwrap().label, "no");
        assert!(db.add_transition(Transition::new("", "b", "")).is_err());
    }
}
