//! Core renderer trait for diagram emission
//!
//! This trait defines the interface for projecting an intermediate model
//! (through its layout) onto graphical primitives.

use anyhow::Result;

use super::Database;

/// Core trait for diagram emitters
///
/// A renderer runs its layout algorithm and maps every positioned entity to
/// a primitive node and every resolvable relation to a primitive edge.
/// Relations whose endpoints do not resolve are dropped, never reported.
///
/// # Example
/// ```
/// use plantdraw::core::Renderer;
/// use plantdraw::plugins::usecase::{UseCaseDatabase, UseCaseRenderer};
///
/// let db = UseCaseDatabase::new();
/// let renderer = UseCaseRenderer::new();
/// let document = renderer.render(&db).unwrap();
/// assert!(document.nodes.is_empty());
/// ```
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output form
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
