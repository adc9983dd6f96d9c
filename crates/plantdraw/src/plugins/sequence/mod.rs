//! Sequence diagram plugin
//!
//! Lifelines exchanging messages, with combined fragments.
//!
//! Syntax examples:
//! ```text
//! @startuml
//! actor User
//! participant "Web Server" as WS
//! User -> WS: request
//! alt cached
//!     WS --> User: hit
//! else
//!     WS ->> DB: load
//! end
//! @enduml
//! ```

mod chumsky_parser;
mod database;
mod detector;
mod layout;
mod parser;
mod renderer;

pub use chumsky_parser::{parse_message, ParsedMessage};
pub use database::{
    Fragment, FragmentKind, FragmentSection, Lifeline, LifelineKind, Message, SequenceDatabase,
};
pub use detector::{SequenceArrowDetector, SequenceDetector};
pub use layout::{
    PositionedFragment, PositionedLifeline, PositionedMessage, SectionSeparator,
    SequenceLayoutAlgorithm, SequenceLayoutResult,
};
pub use parser::{FragmentFrame, SequenceParser};
pub use renderer::SequenceRenderer;

use crate::core::{Detector, Diagram, DiagramKind, RenderConfig};
use std::sync::Arc;

/// Sequence diagram implementation
pub struct SequenceDiagram;

impl Diagram for SequenceDiagram {
    type Database = SequenceDatabase;
    type Parser = SequenceParser;
    type Renderer = SequenceRenderer;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(SequenceDetector::new())
    }

    fn create_parser() -> Self::Parser {
        SequenceParser::new()
    }

    fn create_database() -> Self::Database {
        SequenceDatabase::new()
    }

    fn create_renderer(config: &RenderConfig) -> Self::Renderer {
        SequenceRenderer::with_config(config)
    }

    fn kind() -> DiagramKind {
        DiagramKind::Sequence
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
