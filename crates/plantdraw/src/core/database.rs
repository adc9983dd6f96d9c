//! Core database trait for diagram data storage
//!
//! This trait defines the interface for storing the intermediate model a
//! parser produces. Each diagram kind implements it with its own entity and
//! relation types.

use anyhow::Result;

/// Core trait for diagram databases
///
/// A database is append-only while parsing: entities keep their first
/// declaration, relations keep their source order. The layout stage reads
/// it but never writes back.
///
/// The associated types allow each diagram kind to define its own entity and
/// relation structures with kind-specific metadata.
pub trait Database: Send + Sync {
    /// The entity type for this database
    type Node: Clone + Send + Sync;

    /// The relation type for this database
    type Edge: Clone + Send + Sync;

    /// Add an entity to the database
    fn add_node(&mut self, node: Self::Node) -> Result<()>;

    /// Add a relation to the database
    fn add_edge(&mut self, edge: Self::Edge) -> Result<()>;

    /// Get an entity by identifier
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all entities in declaration order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all relations in source order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of entities
    fn node_count(&self) -> usize;

    /// Get the number of relations
    fn edge_count(&self) -> usize;
}
