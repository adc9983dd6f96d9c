//! Core diagram trait for all diagram kinds
//!
//! Ties together the detector, parser, database and renderer of one kind.

use super::{Database, Detector, DiagramKind, Parser, RenderConfig, Renderer};
use crate::core::Document;
use std::sync::Arc;

/// Core trait for diagram kinds
///
/// Each supported kind (sequence, class, use case, activity) implements this
/// trait on a unit struct in its plugin module.
///
/// # Example
/// ```
/// use plantdraw::core::{Diagram, DiagramKind};
/// use plantdraw::plugins::activity::ActivityDiagram;
///
/// assert_eq!(ActivityDiagram::kind(), DiagramKind::Activity);
/// ```
pub trait Diagram: Send + Sync {
    /// The intermediate model for this kind
    type Database: Database + Send + Sync;

    /// The parser for this kind
    type Parser: Parser<Self::Database> + Send + Sync;

    /// The emitter for this kind
    type Renderer: Renderer<Self::Database, Output = Document> + Send + Sync;

    /// Get the detector for this kind
    fn detector() -> Arc<dyn Detector>;

    /// Create a new parser instance
    fn create_parser() -> Self::Parser;

    /// Create a new, empty database
    fn create_database() -> Self::Database;

    /// Create a new renderer with the given configuration
    fn create_renderer(config: &RenderConfig) -> Self::Renderer;

    /// The diagram kind handled here
    fn kind() -> DiagramKind;

    /// Get the version of this diagram plugin
    fn version() -> &'static str;
}
