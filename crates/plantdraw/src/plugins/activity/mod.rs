//! Activity diagram plugin
//!
//! Control flow with decisions, parallel forks and swim-lanes.
//!
//! Syntax examples:
//! ```text
//! @startuml
//! |Customer|
//! start
//! :Choose items;
//! if (In stock?) then (yes)
//!   |#AntiqueWhite|Shop|
//!   fork
//!     :Pack;
//!   fork again
//!     :Send invoice;
//!   end fork
//! else (no)
//!   stop
//! endif
//! stop
//! @enduml
//! ```

mod database;
mod detector;
mod frames;
mod layout;
mod parser;
mod renderer;

pub use database::{ActivityDatabase, ActivityKind, ActivityNode, Lane, Side, Transition};
pub use detector::ActivityDetector;
pub use frames::{Cursor, DecisionFrame, ForkFrame, DEFAULT_ELSE_LABEL};
pub use layout::{ActivityLayoutAlgorithm, ActivityLayoutResult, PositionedActivity, PositionedLane};
pub use parser::{classify_line, ActivityLine, ActivityParser, ActivitySession};
pub use renderer::ActivityRenderer;

use crate::core::{Detector, Diagram, DiagramKind, RenderConfig};
use std::sync::Arc;

/// Activity diagram implementation
pub struct ActivityDiagram;

impl Diagram for ActivityDiagram {
    type Database = ActivityDatabase;
    type Parser = ActivityParser;
    type Renderer = ActivityRenderer;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(ActivityDetector::new())
    }

    fn create_parser() -> Self::Parser {
        ActivityParser::new()
    }

    fn create_database() -> Self::Database {
        ActivityDatabase::new()
    }

    fn create_renderer(config: &RenderConfig) -> Self::Renderer {
        ActivityRenderer::with_config(config)
    }

    fn kind() -> DiagramKind {
        DiagramKind::Activity
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
