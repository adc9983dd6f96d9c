//! Class diagram plugin
//!
//! Classes, interfaces, abstract classes and enums on a grid, with
//! inheritance, realization, composition, aggregation, association,
//! dependency and plain links between them.
//!
//! Syntax examples:
//! ```text
//! @startuml
//! abstract class Animal {
//!     +name: String
//!     --
//!     +speak(): String
//! }
//! class Dog
//! Animal <|-- Dog
//! Dog "1" *-- "4" Leg : stands on
//! @enduml
//! ```

mod chumsky_parser;
mod database;
mod detector;
mod layout;
mod parser;
mod renderer;

pub use chumsky_parser::parse_relation;
pub use database::{Class, ClassDatabase, ClassKind, Member, Relation, RelationKind, Visibility};
pub use detector::ClassDetector;
pub use layout::{class_label, ClassLayoutAlgorithm, ClassLayoutResult, PositionedClass};
pub use parser::ClassParser;
pub use renderer::ClassRenderer;

use crate::core::{Detector, Diagram, DiagramKind, RenderConfig};
use std::sync::Arc;

/// Class diagram implementation
pub struct ClassDiagram;

impl Diagram for ClassDiagram {
    type Database = ClassDatabase;
    type Parser = ClassParser;
    type Renderer = ClassRenderer;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(ClassDetector::new())
    }

    fn create_parser() -> Self::Parser {
        ClassParser::new()
    }

    fn create_database() -> Self::Database {
        ClassDatabase::new()
    }

    fn create_renderer(config: &RenderConfig) -> Self::Renderer {
        ClassRenderer::with_config(config)
    }

    fn kind() -> DiagramKind {
        DiagramKind::Class
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
