//! Use-case diagram database
//!
//! Actors and use cases share one identifier space.

use anyhow::Result;

use crate::core::{Database, DiagramError};

/// Kind of use-case diagram entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Actor; secondary actors are external systems drawn on the right
    Actor { secondary: bool },
    UseCase,
}

/// An actor or a use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    pub label: String,
    pub kind: EntityKind,
}

impl Entity {
    pub fn actor(id: impl Into<String>, label: impl Into<String>, secondary: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: EntityKind::Actor { secondary },
        }
    }

    pub fn use_case(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: EntityKind::UseCase,
        }
    }

    pub fn is_actor(&self) -> bool {
        matches!(self.kind, EntityKind::Actor { .. })
    }

    pub fn is_secondary(&self) -> bool {
        matches!(self.kind, EntityKind::Actor { secondary: true })
    }
}

/// Relation vocabulary of use-case diagrams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseCaseRelationKind {
    Association,
    Include,
    Extend,
    Generalization,
}

/// A relation between two entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseCaseRelation {
    pub from: String,
    pub to: String,
    pub kind: UseCaseRelationKind,
    pub label: String,
    /// Association drawn with an arrowhead
    pub directed: bool,
}

impl UseCaseRelation {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: UseCaseRelationKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            label: String::new(),
            directed: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }
}

/// Use-case diagram database
#[derive(Debug, Default)]
pub struct UseCaseDatabase {
    entities: Vec<Entity>,
    relations: Vec<UseCaseRelation>,
    system_label: Option<String>,
}

impl UseCaseDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity; a repeated id keeps the first declaration
    pub fn add_entity(&mut self, entity: Entity) -> Result<()> {
        if entity.id.is_empty() {
            return Err(DiagramError::malformed("entity without identifier").into());
        }
        if !self.entities.iter().any(|e| e.id == entity.id) {
            self.entities.push(entity);
        }
        Ok(())
    }

    pub fn add_relation(&mut self, relation: UseCaseRelation) -> Result<()> {
        if relation.from.is_empty() || relation.to.is_empty() {
            return Err(DiagramError::malformed("relation without endpoint").into());
        }
        self.relations.push(relation);
        Ok(())
    }

    /// Set the system boundary label; the first one wins
    pub fn set_system_label(&mut self, label: impl Into<String>) {
        if self.system_label.is_none() {
            self.system_label = Some(label.into());
        }
    }

    pub fn system_label(&self) -> Option<&str> {
        self.system_label.as_deref()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn actors(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_actor())
    }

    pub fn use_cases(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.is_actor())
    }

    pub fn relations(&self) -> &[UseCaseRelation] {
        &self.relations
    }
}

impl Database for UseCaseDatabase {
    type Node = Entity;
    type Edge = UseCaseRelation;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_entity(node)
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.add_relation(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.entities.iter().find(|e| e.id == id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.entities.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relations.iter()
    }

    fn clear(&mut self) {
        self.entities.clear();
        self.relations.clear();
        self.system_label = None;
    }

    fn node_count(&self) -> usize {
        self.entities.len()
    }

    fn edge_count(&self) -> usize {
        self.relations.len()
    }
}
