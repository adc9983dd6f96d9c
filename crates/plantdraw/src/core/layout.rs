//! Core layout trait for diagram positioning
//!
//! This trait defines the interface for assigning coordinates and sizes to
//! the entities of an intermediate model.

use anyhow::Result;

use super::Database;

/// Core trait for layout algorithms
///
/// Layout is deterministic: the same database always produces the same
/// positions. It adds geometry only and leaves relations untouched.
///
/// # Example
/// ```
/// use plantdraw::core::LayoutAlgorithm;
/// use plantdraw::plugins::class::{ClassDatabase, ClassLayoutAlgorithm};
///
/// let db = ClassDatabase::new();
/// let layout = ClassLayoutAlgorithm::new();
/// let positioned = layout.layout(&db).unwrap();
/// assert!(positioned.classes.is_empty());
/// ```
pub trait LayoutAlgorithm<D: Database>: Send + Sync {
    /// The positioned model produced by this algorithm
    type Output;

    /// Position the entities of the database
    fn layout(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;
}
